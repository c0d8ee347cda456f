use chrono::{DateTime, Utc};
use delaycoach_core::{generate_sample_tasks, Database};

pub fn run(force: bool, now: DateTime<Utc>) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    if !force && !db.get_tasks()?.is_empty() {
        return Err("tasks already exist; pass --force to replace them".into());
    }

    let tasks = generate_sample_tasks(now);
    if force {
        db.reset_all()?;
    }
    db.save_tasks(&tasks)?;
    println!("Seeded {} sample tasks", tasks.len());
    Ok(())
}
