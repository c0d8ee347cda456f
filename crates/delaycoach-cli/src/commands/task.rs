//! Task management commands for CLI.

use chrono::{DateTime, NaiveDate, Utc};
use clap::Subcommand;
use delaycoach_core::risk::calculate_bomb_score;
use delaycoach_core::task::select_tasks;
use delaycoach_core::{
    get_risk_level, Database, Priority, ScoredTask, Task, TaskFilter, TaskPatch, TaskSort,
    TaskStatus,
};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// Subject or course
        #[arg(long, default_value = "")]
        subject: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: NaiveDate,
        /// Estimated effort in hours
        #[arg(long)]
        hours: f64,
        /// Priority: low, mid or high (default: mid)
        #[arg(long, default_value = "mid")]
        priority: Priority,
    },
    /// List tasks with their bomb scores
    List {
        /// Filter: all, active, done, overdue or deadline-soon
        #[arg(long, default_value = "all")]
        filter: TaskFilter,
        /// Sort: due-date, recent-checkin, low-progress or bomb-score
        #[arg(long, default_value = "due-date")]
        sort: TaskSort,
    },
    /// Get task details
    Show {
        /// Task ID
        id: String,
    },
    /// Update a task
    Update {
        /// Task ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New subject
        #[arg(long)]
        subject: Option<String>,
        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
        /// New estimate in hours
        #[arg(long)]
        hours: Option<f64>,
        /// New priority
        #[arg(long)]
        priority: Option<Priority>,
        /// New progress, 0-100
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        progress: Option<u8>,
        /// New status: active, done or overdue
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// Mark a task done at 100% progress
    Done {
        /// Task ID
        id: String,
    },
    /// Delete a task and its check-ins
    Delete {
        /// Task ID
        id: String,
    },
}

fn scored(task: Task, now: DateTime<Utc>) -> ScoredTask {
    let score = calculate_bomb_score(&task, now);
    ScoredTask {
        task,
        bomb_score: score.score,
        bomb_reason: score.reason,
    }
}

pub fn run(action: TaskAction, now: DateTime<Utc>) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        TaskAction::Add {
            title,
            subject,
            due,
            hours,
            priority,
        } => {
            let task = db.add_task(Task::new(title, subject, due, hours, priority, now))?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List { filter, sort } => {
            let tasks = db.get_tasks()?;
            let listed: Vec<ScoredTask> = select_tasks(&tasks, filter, sort, now)
                .into_iter()
                .map(|t| scored(t, now))
                .collect();
            println!("{}", serde_json::to_string_pretty(&listed)?);
        }
        TaskAction::Show { id } => {
            let task = db.get_task(&id)?;
            let check_ins = db.get_check_ins_for_task(&id)?;
            let entry = scored(task, now);
            let level = get_risk_level(entry.bomb_score);
            let badge = level.badge(Some(entry.bomb_score));
            let detail = serde_json::json!({
                "task": entry,
                "riskLevel": level,
                "badge": badge,
                "checkIns": check_ins,
            });
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
        TaskAction::Update {
            id,
            title,
            subject,
            due,
            hours,
            priority,
            progress,
            status,
        } => {
            let patch = TaskPatch {
                title,
                subject,
                due_date: due,
                estimated_hours: hours,
                priority,
                progress,
                last_check_in_at: None,
                status,
            };
            if patch.is_empty() {
                return Err("nothing to update".into());
            }
            let task = db.update_task(&id, &patch, now)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Done { id } => {
            let patch = TaskPatch {
                progress: Some(100),
                status: Some(TaskStatus::Done),
                ..TaskPatch::default()
            };
            let task = db.update_task(&id, &patch, now)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Delete { id } => {
            db.delete_task(&id)?;
            println!("Task deleted: {id}");
        }
    }
    Ok(())
}
