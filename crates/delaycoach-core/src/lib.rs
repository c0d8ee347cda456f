//! # DelayCoach Core Library
//!
//! This library provides the core logic for the DelayCoach deadline tracker.
//! It implements a CLI-first philosophy: every operation is available through
//! the standalone `delaycoach` binary, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Risk Scorer**: a pure function of a task and an injected `now` that
//!   yields a 0-100 bomb score, a tier, and a short reason
//! - **Behavior Classifier**: an ordered rule table that labels the user's
//!   procrastination archetype from task and check-in history
//! - **Coach**: tone-specific feedback built on scorer output
//! - **Storage**: SQLite key-value persistence and TOML configuration
//!
//! Nothing below `storage` reads the wall clock; callers pass `now`.
//!
//! ## Key Components
//!
//! - [`calculate_bomb_score`]: per-task urgency
//! - [`get_top_bombs`]: ranking of open tasks
//! - [`get_procrastination_type`]: archetype classification
//! - [`Database`]: task and check-in persistence
//! - [`Config`]: application configuration management

pub mod checkin;
pub mod coach;
pub mod error;
pub mod risk;
pub mod sample;
pub mod stats;
pub mod storage;
pub mod task;
pub mod time;

pub use checkin::{record_check_in, CheckInOutcome};
pub use coach::{generate_coach_message, headline_message, CoachMessage, CoachTone};
pub use error::{ConfigError, CoreError, DatabaseError, Result, ValidationError};
pub use risk::{
    calculate_bomb_score, get_risk_level, get_top_bombs, risky_tasks, within_alert_window, BombScore,
    RiskLevel, ScoredTask, DEFAULT_TOP_BOMBS_LIMIT,
};
pub use sample::generate_sample_tasks;
pub use stats::{
    activity_report, get_procrastination_type, ActivityReport, Archetype, BehaviorStats,
    ProcrastinationProfile, TimeRange,
};
pub use storage::{Config, Database};
pub use task::{CheckIn, Mood, Priority, Task, TaskFilter, TaskPatch, TaskSort, TaskStatus};
