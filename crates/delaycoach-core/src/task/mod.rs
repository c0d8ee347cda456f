//! Task and check-in records.
//!
//! These are the shapes persisted by storage. The scoring core only reads
//! them; mutation happens through [`TaskPatch`] at the storage layer.
//!
//! Field names serialize in camelCase (`dueDate`, `estimatedHours`,
//! `lastCheckInAt`) so stored documents keep a stable, language-neutral shape.

pub mod query;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

pub use query::{select_tasks, TaskFilter, TaskSort};

/// Task lifecycle status.
///
/// `Overdue` forces maximum urgency in the risk scorer; `Done` tasks are
/// left out of risk ranking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Active,
    Done,
    Overdue,
}

impl TaskStatus {
    /// Whether the task still participates in risk ranking.
    pub fn is_open(&self) -> bool {
        matches!(self, TaskStatus::Active | TaskStatus::Overdue)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Active => "active",
            TaskStatus::Done => "done",
            TaskStatus::Overdue => "overdue",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(TaskStatus::Active),
            "done" => Ok(TaskStatus::Done),
            "overdue" => Ok(TaskStatus::Overdue),
            other => Err(ValidationError::InvalidValue {
                field: "status".to_string(),
                message: format!("unknown status '{other}'"),
            }),
        }
    }
}

/// User-assigned priority. Descriptive only; scoring ignores it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Mid,
    High,
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "mid" => Ok(Priority::Mid),
            "high" => Ok(Priority::High),
            other => Err(ValidationError::InvalidValue {
                field: "priority".to_string(),
                message: format!("unknown priority '{other}'"),
            }),
        }
    }
}

/// Self-reported mood attached to a check-in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Good,
    #[default]
    Neutral,
    Bad,
}

impl FromStr for Mood {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(Mood::Good),
            "neutral" => Ok(Mood::Neutral),
            "bad" => Ok(Mood::Bad),
            other => Err(ValidationError::InvalidValue {
                field: "mood".to_string(),
                message: format!("unknown mood '{other}'"),
            }),
        }
    }
}

/// A task with a due date and an effort estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier
    pub id: String,
    pub title: String,
    pub subject: String,
    /// Calendar day the task is due (no time component)
    pub due_date: NaiveDate,
    /// Total effort estimate in hours
    pub estimated_hours: f64,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Percent complete, 0-100
    pub progress: u8,
    /// Most recent check-in; `None` means never checked in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_check_in_at: Option<DateTime<Utc>>,
    pub status: TaskStatus,
}

impl Task {
    /// Create a new active task with zero progress.
    pub fn new(
        title: impl Into<String>,
        subject: impl Into<String>,
        due_date: NaiveDate,
        estimated_hours: f64,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Self {
        Task {
            id: format!("task-{}-{}", now.timestamp(), uuid::Uuid::new_v4()),
            title: title.into(),
            subject: subject.into(),
            due_date,
            estimated_hours,
            priority,
            created_at: now,
            updated_at: now,
            progress: 0,
            last_check_in_at: None,
            status: TaskStatus::Active,
        }
    }

    /// Check field invariants before the task is persisted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "title".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.progress > 100 {
            return Err(ValidationError::ProgressOutOfRange(self.progress));
        }
        if !self.estimated_hours.is_finite() || self.estimated_hours <= 0.0 {
            return Err(ValidationError::InvalidEstimate(self.estimated_hours));
        }
        Ok(())
    }

    /// Percentage points still to do.
    pub fn progress_lack(&self) -> u8 {
        100u8.saturating_sub(self.progress)
    }

    /// Apply a partial update, stamping `updated_at`.
    pub fn apply(&mut self, patch: &TaskPatch, now: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(subject) = &patch.subject {
            self.subject = subject.clone();
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(hours) = patch.estimated_hours {
            self.estimated_hours = hours;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(progress) = patch.progress {
            self.progress = progress;
        }
        if let Some(at) = patch.last_check_in_at {
            self.last_check_in_at = Some(at);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = now;
    }
}

/// Partial update for a [`Task`]. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub estimated_hours: Option<f64>,
    pub priority: Option<Priority>,
    pub progress: Option<u8>,
    pub last_check_in_at: Option<DateTime<Utc>>,
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        *self == TaskPatch::default()
    }
}

/// A timestamped progress report against one task. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub id: String,
    pub task_id: String,
    pub date_time: DateTime<Utc>,
    /// Percentage-point change; negative means rework
    pub progress_delta: i32,
    pub mood: Mood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CheckIn {
    pub fn new(
        task_id: impl Into<String>,
        progress_delta: i32,
        mood: Mood,
        note: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        CheckIn {
            id: format!("checkin-{}-{}", now.timestamp(), uuid::Uuid::new_v4()),
            task_id: task_id.into(),
            date_time: now,
            progress_delta,
            mood,
            note,
        }
    }

    /// Note length in characters; zero when there is no note.
    pub fn note_len(&self) -> usize {
        self.note.as_deref().map_or(0, |n| n.chars().count())
    }
}
