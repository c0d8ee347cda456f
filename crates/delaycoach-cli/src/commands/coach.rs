use chrono::{DateTime, Utc};
use delaycoach_core::{headline_message, Config, Database};

pub fn run(now: DateTime<Utc>) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let tone = Config::load_or_default().coach.tone;
    let tasks = db.get_tasks()?;
    let check_ins = db.get_check_ins()?;

    match headline_message(&tasks, &check_ins, tone, now) {
        Some((task, message)) => {
            let out = serde_json::json!({
                "taskId": task.id,
                "title": task.title,
                "tone": tone,
                "fact": message.fact,
                "action": message.action,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        None => println!("No open tasks."),
    }
    Ok(())
}
