//! Filtering and ordering for task lists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::str::FromStr;

use super::{Task, TaskStatus};
use crate::error::ValidationError;
use crate::risk::calculate_bomb_score;
use crate::time;

/// Days-left threshold for the deadline-soon filter.
const DEADLINE_SOON_DAYS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Done,
    Overdue,
    /// Active tasks due within three days
    DeadlineSoon,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task, now: DateTime<Utc>) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Active => task.status == TaskStatus::Active,
            TaskFilter::Done => task.status == TaskStatus::Done,
            TaskFilter::Overdue => task.status == TaskStatus::Overdue,
            TaskFilter::DeadlineSoon => {
                task.status == TaskStatus::Active
                    && time::whole_days_until_due(task.due_date, now) <= DEADLINE_SOON_DAYS
            }
        }
    }
}

impl FromStr for TaskFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TaskFilter::All),
            "active" => Ok(TaskFilter::Active),
            "done" => Ok(TaskFilter::Done),
            "overdue" => Ok(TaskFilter::Overdue),
            "deadline-soon" => Ok(TaskFilter::DeadlineSoon),
            other => Err(ValidationError::InvalidValue {
                field: "filter".to_string(),
                message: format!("unknown filter '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskSort {
    /// Earliest due date first
    #[default]
    DueDate,
    /// Most recent check-in first; never-checked-in last
    RecentCheckin,
    /// Least progress first
    LowProgress,
    /// Highest bomb score first
    BombScore,
}

impl FromStr for TaskSort {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "due-date" => Ok(TaskSort::DueDate),
            "recent-checkin" => Ok(TaskSort::RecentCheckin),
            "low-progress" => Ok(TaskSort::LowProgress),
            "bomb-score" => Ok(TaskSort::BombScore),
            other => Err(ValidationError::InvalidValue {
                field: "sort".to_string(),
                message: format!("unknown sort '{other}'"),
            }),
        }
    }
}

/// Filter then sort. All sorts are stable.
pub fn select_tasks(
    tasks: &[Task],
    filter: TaskFilter,
    sort: TaskSort,
    now: DateTime<Utc>,
) -> Vec<Task> {
    let mut selected: Vec<Task> = tasks
        .iter()
        .filter(|t| filter.matches(t, now))
        .cloned()
        .collect();

    match sort {
        TaskSort::DueDate => selected.sort_by_key(|t| t.due_date),
        TaskSort::RecentCheckin => selected.sort_by_key(|t| Reverse(t.last_check_in_at)),
        TaskSort::LowProgress => selected.sort_by_key(|t| t.progress),
        TaskSort::BombScore => {
            selected.sort_by_cached_key(|t| Reverse(calculate_bomb_score(t, now).score))
        }
    }
    selected
}
