//! Recording a progress check-in against a task.
//!
//! Produces the immutable [`CheckIn`] record together with the patch the
//! task needs: clamped progress, a fresh `lastCheckInAt`, and `done` once
//! progress reaches 100.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::{CheckIn, Mood, Task, TaskPatch, TaskStatus};

/// Result of recording a check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInOutcome {
    pub check_in: CheckIn,
    pub patch: TaskPatch,
    pub new_progress: u8,
}

/// Build the check-in and task patch for reporting `progress_delta`.
///
/// Progress is clamped into 0..=100. Blank notes are dropped.
pub fn record_check_in(
    task: &Task,
    progress_delta: i32,
    mood: Mood,
    note: Option<&str>,
    now: DateTime<Utc>,
) -> CheckInOutcome {
    let new_progress = i32::from(task.progress)
        .saturating_add(progress_delta)
        .clamp(0, 100) as u8;
    let note = note
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    let check_in = CheckIn::new(task.id.clone(), progress_delta, mood, note, now);
    let status = if new_progress == 100 {
        TaskStatus::Done
    } else {
        task.status
    };
    let patch = TaskPatch {
        progress: Some(new_progress),
        last_check_in_at: Some(now),
        status: Some(status),
        ..TaskPatch::default()
    };

    CheckInOutcome {
        check_in,
        patch,
        new_progress,
    }
}
