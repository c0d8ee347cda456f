use chrono::{DateTime, Utc};
use delaycoach_core::{get_top_bombs, within_alert_window, Config, Database};

pub fn run(limit: Option<usize>, now: DateTime<Utc>) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load_or_default();
    let limit = limit.unwrap_or(config.ranking.top_limit);
    let alert_hours = config.coach.alert_hours;

    let tasks = db.get_tasks()?;
    let ranked: Vec<serde_json::Value> = get_top_bombs(&tasks, limit, now)
        .into_iter()
        .map(|entry| {
            let level = entry.risk_level();
            let badge = level.badge(Some(entry.bomb_score));
            let alert = within_alert_window(&entry.task, alert_hours, now);
            serde_json::json!({
                "task": entry,
                "riskLevel": level,
                "badge": badge,
                "alert": alert,
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&ranked)?);
    Ok(())
}
