//! Coach feedback after a check-in.
//!
//! Picks a situation from the task's deadline pressure and the reported
//! delta, then renders the fixed template for the configured tone. The tone
//! is configuration handed in by the caller; scoring never sees it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::risk::get_top_bombs;
use crate::task::{CheckIn, Task};
use crate::time;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoachTone {
    Gentle,
    #[default]
    Normal,
    Savage,
}

impl CoachTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoachTone::Gentle => "gentle",
            CoachTone::Normal => "normal",
            CoachTone::Savage => "savage",
        }
    }
}

impl fmt::Display for CoachTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoachTone {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gentle" => Ok(CoachTone::Gentle),
            "normal" => Ok(CoachTone::Normal),
            "savage" => Ok(CoachTone::Savage),
            other => Err(ValidationError::InvalidValue {
                field: "tone".to_string(),
                message: format!("unknown coach tone '{other}'"),
            }),
        }
    }
}

/// A two-part coach message: what is true now, and what to do next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachMessage {
    pub fact: String,
    pub action: String,
}

impl CoachMessage {
    fn new(fact: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            fact: fact.into(),
            action: action.into(),
        }
    }
}

/// Which template family applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Situation {
    NoProgress,
    DeadlineBomb,
    LowProgress,
    Positive,
    Steady,
}

impl Situation {
    /// First match wins.
    pub fn detect(days_left: i64, progress_lack: u8, progress_delta: i32) -> Self {
        if progress_delta == 0 {
            Situation::NoProgress
        } else if days_left <= 2 && progress_lack > 60 {
            Situation::DeadlineBomb
        } else if progress_lack > 70 && days_left < 7 {
            Situation::LowProgress
        } else if progress_delta > 15 {
            Situation::Positive
        } else {
            Situation::Steady
        }
    }
}

/// Feedback for a check-in of `progress_delta` against `task`.
pub fn generate_coach_message(
    task: &Task,
    progress_delta: i32,
    tone: CoachTone,
    now: DateTime<Utc>,
) -> CoachMessage {
    let days_left = time::whole_days_until_due(task.due_date, now);
    let lack = task.progress_lack();

    match Situation::detect(days_left, lack, progress_delta) {
        Situation::NoProgress => no_progress(days_left, tone),
        Situation::DeadlineBomb => deadline_bomb(days_left, lack, tone),
        Situation::LowProgress => low_progress(days_left, lack, tone),
        Situation::Positive => positive(progress_delta, tone),
        Situation::Steady => steady(progress_delta, days_left, tone),
    }
}

/// Message for the most at-risk open task, using its latest check-in delta.
pub fn headline_message(
    tasks: &[Task],
    check_ins: &[CheckIn],
    tone: CoachTone,
    now: DateTime<Utc>,
) -> Option<(Task, CoachMessage)> {
    let top = get_top_bombs(tasks, 1, now).into_iter().next()?;
    let latest_delta = check_ins
        .iter()
        .filter(|c| c.task_id == top.task.id)
        .max_by_key(|c| c.date_time)
        .map_or(0, |c| c.progress_delta);
    let message = generate_coach_message(&top.task, latest_delta, tone, now);
    Some((top.task, message))
}

fn no_progress(days_left: i64, tone: CoachTone) -> CoachMessage {
    match tone {
        CoachTone::Savage => CoachMessage::new(
            if days_left <= 2 {
                "0% progress and deadline incoming. That's bold."
            } else {
                "Days with zero check-ins. Stop disappearing."
            },
            "Today: save 3 references and write 1 outline sentence.",
        ),
        CoachTone::Gentle => CoachMessage::new(
            "No progress recorded yet. That's okay, let's start now.",
            "Spend 10 minutes writing down 3 key points to cover.",
        ),
        CoachTone::Normal => CoachMessage::new(
            "0% means you haven't started yet.",
            "Spend 10 minutes and write a 3-line outline.",
        ),
    }
}

fn deadline_bomb(days_left: i64, lack: u8, tone: CoachTone) -> CoachMessage {
    let hours = days_left * 24;
    match tone {
        CoachTone::Savage => CoachMessage::new(
            format!("{hours}h left with {lack}% remaining. This is a bomb countdown."),
            "Write 5 sentences for the intro right now. Not tomorrow.",
        ),
        CoachTone::Gentle => CoachMessage::new(
            format!("You have {hours} hours and {lack}% to complete."),
            "Focus on writing one complete paragraph today.",
        ),
        CoachTone::Normal => CoachMessage::new(
            format!("Due in {hours}h with {lack}% left. Critical zone."),
            "Write 5 sentences for the intro right now.",
        ),
    }
}

fn low_progress(days_left: i64, lack: u8, tone: CoachTone) -> CoachMessage {
    match tone {
        CoachTone::Savage => CoachMessage::new(
            format!("{days_left} days left, {lack}% incomplete. Math says you're behind."),
            "Draft one full section today. Stop planning, start writing.",
        ),
        CoachTone::Gentle => CoachMessage::new(
            format!("{days_left} days to finish {lack}% of the work."),
            "Let's make steady progress: write one paragraph today.",
        ),
        CoachTone::Normal => CoachMessage::new(
            format!("{days_left} days for {lack}% work. You're behind schedule."),
            "Write one complete section today.",
        ),
    }
}

fn positive(delta: i32, tone: CoachTone) -> CoachMessage {
    match tone {
        CoachTone::Savage => CoachMessage::new(
            format!("+{delta}% is solid. Keep this energy."),
            "Don't lose momentum. Add another 10% tomorrow.",
        ),
        CoachTone::Gentle => CoachMessage::new(
            format!("Great work! +{delta}% progress today."),
            "You're building momentum. Keep going tomorrow.",
        ),
        CoachTone::Normal => CoachMessage::new(
            format!("+{delta}% is good progress."),
            "Maintain this pace. Do the same tomorrow.",
        ),
    }
}

fn steady(delta: i32, days_left: i64, tone: CoachTone) -> CoachMessage {
    match tone {
        CoachTone::Savage => CoachMessage::new(
            format!("+{delta}% is okay, but you can do better."),
            "Push for +15% next check-in. Small gains compound.",
        ),
        CoachTone::Gentle => CoachMessage::new(
            format!("You made progress: +{delta}%."),
            "Every step counts. Try for a bit more tomorrow.",
        ),
        CoachTone::Normal => CoachMessage::new(
            format!("+{delta}% progress with {days_left} days left."),
            "Aim for +10% in your next check-in.",
        ),
    }
}
