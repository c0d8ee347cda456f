use chrono::{DateTime, Utc};
use delaycoach_core::{activity_report, get_procrastination_type, BehaviorStats, Database, TimeRange};

pub fn run(range: TimeRange, now: DateTime<Utc>) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let tasks = db.get_tasks()?;
    let check_ins = db.get_check_ins()?;

    let analysis = serde_json::json!({
        "profile": get_procrastination_type(&tasks, &check_ins, now),
        "stats": BehaviorStats::compute(&tasks, &check_ins, now),
        "activity": activity_report(&check_ins, range, now),
    });
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}
