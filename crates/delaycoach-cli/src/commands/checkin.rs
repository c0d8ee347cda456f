//! Check-in commands for CLI.

use chrono::{DateTime, Utc};
use clap::Subcommand;
use delaycoach_core::{generate_coach_message, record_check_in, Config, Database, Mood};

#[derive(Subcommand)]
pub enum CheckinAction {
    /// Record progress against a task
    Add {
        /// Task ID
        task_id: String,
        /// Progress change in percentage points (may be negative)
        #[arg(long, allow_hyphen_values = true)]
        delta: i32,
        /// Mood: good, neutral or bad (default: neutral)
        #[arg(long, default_value = "neutral")]
        mood: Mood,
        /// Optional note
        #[arg(long)]
        note: Option<String>,
    },
    /// List check-ins
    List {
        /// Only check-ins for this task
        #[arg(long)]
        task: Option<String>,
    },
}

pub fn run(action: CheckinAction, now: DateTime<Utc>) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        CheckinAction::Add {
            task_id,
            delta,
            mood,
            note,
        } => {
            let task = db.get_task(&task_id)?;
            let outcome = record_check_in(&task, delta, mood, note.as_deref(), now);
            let task = db.record_check_in(&outcome, now)?;

            let tone = Config::load_or_default().coach.tone;
            let coach = generate_coach_message(&task, delta, tone, now);
            let summary = serde_json::json!({
                "checkIn": outcome.check_in,
                "task": task,
                "coach": coach,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        CheckinAction::List { task } => {
            let check_ins = match task {
                Some(id) => db.get_check_ins_for_task(&id)?,
                None => db.get_check_ins()?,
            };
            println!("{}", serde_json::to_string_pretty(&check_ins)?);
        }
    }
    Ok(())
}
