//! Bomb-score risk engine.
//!
//! Computes a bounded 0-100 urgency score per task from independent pressure
//! signals, maps scores onto risk tiers, and ranks open tasks.
//!
//! ## Signals
//!
//! | Signal             | Condition                              | Points              |
//! |--------------------|----------------------------------------|---------------------|
//! | Deadline proximity | ≤1 / ≤2 / ≤3 / ≤7 days left            | +50 / +35 / +20 / +10 |
//! | Completion lack    | >80 / >60 / >40 points left            | +30 / +20 / +10     |
//! | Effort deficit     | remaining work hours > hours left      | +min(25, 2 × deficit) |
//! | Staleness          | last check-in >72h ago                 | +15                 |
//! |                    | never checked in and <7 days left      | +20                 |
//! | Overdue            | status is `overdue`                    | +100                |
//!
//! Contributions are summed, clamped to [0, 100] and truncated, so a raw
//! 59.5 stays in the `risk` tier.

pub mod reason;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::task::{Task, TaskStatus};
use crate::time;

pub use reason::{compose_reason, ReasonClause, ReasonMode};

/// Default number of entries returned by [`get_top_bombs`].
pub const DEFAULT_TOP_BOMBS_LIMIT: usize = 3;

pub const MAX_SCORE: f64 = 100.0;
const STALE_CHECK_IN_HOURS: f64 = 72.0;
const NEVER_CHECKED_IN_WINDOW_DAYS: f64 = 7.0;
const DEFICIT_POINTS_PER_HOUR: f64 = 2.0;
const MAX_DEFICIT_POINTS: f64 = 25.0;
const DEFICIT_REASON_MIN_HOURS: f64 = 10.0;
const OVERDUE_POINTS: f64 = 100.0;

pub const ON_TRACK: &str = "On track";
pub const OVERDUE: &str = "OVERDUE";

// Clause evaluation order.
const P_DEADLINE: u8 = 10;
const P_LACK: u8 = 20;
const P_DEFICIT: u8 = 30;
const P_STALENESS: u8 = 40;
const P_OVERDUE: u8 = 50;
const P_FALLBACK: u8 = 255;

/// Derived urgency for one task. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BombScore {
    pub task_id: String,
    /// Clamped to 0-100
    pub score: u8,
    pub reason: String,
}

/// Discrete tier derived from a bomb score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Caution,
    Risk,
    Bomb,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "safe",
            RiskLevel::Caution => "caution",
            RiskLevel::Risk => "risk",
            RiskLevel::Bomb => "bomb",
        }
    }

    /// Badge text as shown next to a task, e.g. `Bomb (72)`.
    /// Safe badges never show the score.
    pub fn badge(&self, score: Option<u8>) -> String {
        let label = match self {
            RiskLevel::Safe => return "Safe".to_string(),
            RiskLevel::Caution => "Caution",
            RiskLevel::Risk => "Risk",
            RiskLevel::Bomb => "Bomb",
        };
        match score {
            Some(s) => format!("{label} ({s})"),
            None => label.to_string(),
        }
    }

    /// Whether the tier warrants surfacing the task as at-risk.
    pub fn is_alarming(&self) -> bool {
        *self >= RiskLevel::Risk
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ranked task annotated with its score and reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredTask {
    #[serde(flatten)]
    pub task: Task,
    pub bomb_score: u8,
    pub bomb_reason: String,
}

impl ScoredTask {
    pub fn risk_level(&self) -> RiskLevel {
        get_risk_level(self.bomb_score)
    }
}

/// Score one task against `now`.
pub fn calculate_bomb_score(task: &Task, now: DateTime<Utc>) -> BombScore {
    let hours_left = time::hours_until_due(task.due_date, now);
    let days_left = hours_left / time::HOURS_PER_DAY;

    let mut score = 0.0;
    let mut clauses: Vec<ReasonClause> = Vec::with_capacity(6);

    let (deadline_points, deadline_reason) = deadline_pressure(days_left);
    score += deadline_points;
    if let Some(text) = deadline_reason {
        clauses.push(ReasonClause::new(P_DEADLINE, true, text, ReasonMode::Overwrite));
    }

    let progress_lack = f64::from(task.progress_lack());
    let (lack_points, lack_reason) = completion_shortfall(progress_lack);
    score += lack_points;
    if let Some(text) = lack_reason {
        clauses.push(ReasonClause::new(P_LACK, true, text, ReasonMode::Append));
    }

    let remaining_hours = progress_lack / 100.0 * task.estimated_hours;
    if hours_left < remaining_hours {
        let deficit = remaining_hours - hours_left;
        score += (deficit * DEFICIT_POINTS_PER_HOUR).min(MAX_DEFICIT_POINTS);
        clauses.push(ReasonClause::new(
            P_DEFICIT,
            deficit > DEFICIT_REASON_MIN_HOURS,
            format!("{}h short", deficit.round() as i64),
            ReasonMode::Append,
        ));
    }

    match task.last_check_in_at {
        Some(last) => {
            let stale = time::hours_between(last, now) > STALE_CHECK_IN_HOURS;
            if stale {
                score += 15.0;
            }
            clauses.push(ReasonClause::new(
                P_STALENESS,
                stale,
                "No check-in 3+ days",
                ReasonMode::Append,
            ));
        }
        None => {
            let urgent = days_left < NEVER_CHECKED_IN_WINDOW_DAYS;
            if urgent {
                score += 20.0;
            }
            clauses.push(ReasonClause::new(
                P_STALENESS,
                urgent,
                "Never checked in",
                ReasonMode::Append,
            ));
        }
    }

    let overdue = task.status == TaskStatus::Overdue;
    if overdue {
        score += OVERDUE_POINTS;
    }
    clauses.push(ReasonClause::new(P_OVERDUE, overdue, OVERDUE, ReasonMode::Overwrite));
    clauses.push(ReasonClause::new(P_FALLBACK, true, ON_TRACK, ReasonMode::Set));

    let score = clamp_score(score);
    let reason = compose_reason(&clauses);
    tracing::trace!(task_id = %task.id, score, reason = %reason, "scored task");

    BombScore {
        task_id: task.id.clone(),
        score,
        reason,
    }
}

/// Map a score to its tier. Lower bounds are inclusive.
pub fn get_risk_level(score: u8) -> RiskLevel {
    if score >= 60 {
        RiskLevel::Bomb
    } else if score >= 40 {
        RiskLevel::Risk
    } else if score >= 20 {
        RiskLevel::Caution
    } else {
        RiskLevel::Safe
    }
}

/// Rank open tasks by descending bomb score and keep the first `limit`.
///
/// Ties keep their original relative order.
pub fn get_top_bombs(tasks: &[Task], limit: usize, now: DateTime<Utc>) -> Vec<ScoredTask> {
    let mut scored = score_open_tasks(tasks, now);
    scored.sort_by(|a, b| b.bomb_score.cmp(&a.bomb_score));
    scored.truncate(limit);
    scored
}

/// Top-ranked tasks whose tier is `risk` or `bomb`.
pub fn risky_tasks(tasks: &[Task], limit: usize, now: DateTime<Utc>) -> Vec<ScoredTask> {
    get_top_bombs(tasks, limit, now)
        .into_iter()
        .filter(|t| t.risk_level().is_alarming())
        .collect()
}

/// Whether an open task is due within the next `alert_hours`.
///
/// Past-due open tasks are always inside the window.
pub fn within_alert_window(task: &Task, alert_hours: u32, now: DateTime<Utc>) -> bool {
    task.status.is_open() && time::hours_until_due(task.due_date, now) <= f64::from(alert_hours)
}

fn score_open_tasks(tasks: &[Task], now: DateTime<Utc>) -> Vec<ScoredTask> {
    tasks
        .iter()
        .filter(|t| t.status.is_open())
        .map(|task| {
            let BombScore { score, reason, .. } = calculate_bomb_score(task, now);
            ScoredTask {
                task: task.clone(),
                bomb_score: score,
                bomb_reason: reason,
            }
        })
        .collect()
}

fn deadline_pressure(days_left: f64) -> (f64, Option<&'static str>) {
    if days_left <= 1.0 {
        (50.0, Some("Deadline in 24h"))
    } else if days_left <= 2.0 {
        (35.0, Some("Deadline in 48h"))
    } else if days_left <= 3.0 {
        (20.0, Some("Deadline in 3 days"))
    } else if days_left <= 7.0 {
        (10.0, None)
    } else {
        (0.0, None)
    }
}

fn completion_shortfall(progress_lack: f64) -> (f64, Option<&'static str>) {
    if progress_lack > 80.0 {
        (30.0, Some("80%+ incomplete"))
    } else if progress_lack > 60.0 {
        (20.0, Some("60%+ incomplete"))
    } else if progress_lack > 40.0 {
        (10.0, None)
    } else {
        (0.0, None)
    }
}

fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.clamp(0.0, MAX_SCORE).floor() as u8
}
