//! Statistics module for DelayCoach
//!
//! Behavioral analysis over a user's task and check-in history: the
//! procrastination archetype classifier and day-by-day activity trends.

mod procrastination;
mod trend;

pub use procrastination::{
    classify, get_procrastination_type, Archetype, ArchetypeRule, BehaviorStats,
    ProcrastinationProfile, ARCHETYPE_RULES,
};

pub use trend::{
    activity_report, average_progress_delta, daily_check_in_counts, daily_progress_trend,
    filter_check_ins, ActivityReport, DailyCount, DailyProgress, TimeRange,
};
