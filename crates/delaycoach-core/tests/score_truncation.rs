//! Fractional scores near tier boundaries.
//!
//! Effort-deficit points are fractional, so raw totals can land on .5
//! just under a tier threshold. The reported score truncates, which keeps
//! a raw 19.5 `safe` and a raw 59.5 `risk`.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use delaycoach_core::risk::ON_TRACK;
use delaycoach_core::{
    calculate_bomb_score, get_risk_level, get_top_bombs, Priority, RiskLevel, Task,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
}

fn task(id: &str, due_day: u32, progress: u8, estimated_hours: f64) -> Task {
    let due = NaiveDate::from_ymd_opt(2026, 3, due_day).unwrap();
    let mut task = Task::new("Task", "Subject", due, estimated_hours, Priority::Mid, now());
    task.id = id.to_string();
    task.progress = progress;
    task
}

#[test]
fn raw_nineteen_and_a_half_stays_safe() {
    // 108h left, lack 40 of 281.875h = 112.75h -> deficit 4.75h -> +9.5
    let mut t = task("t", 15, 60, 281.875);
    t.last_check_in_at = Some(now() - Duration::hours(1));
    let result = calculate_bomb_score(&t, now());
    // 10 (≤7 days) + 9.5
    assert_eq!(result.score, 19);
    assert_eq!(get_risk_level(result.score), RiskLevel::Safe);
    assert_eq!(result.reason, ON_TRACK);
}

#[test]
fn raw_fifty_nine_and_a_half_stays_risk() {
    // 36h left, lack 75 of 51h = 38.25h -> deficit 2.25h -> +4.5
    let mut t = task("t", 12, 25, 51.0);
    t.last_check_in_at = Some(now() - Duration::hours(1));
    let result = calculate_bomb_score(&t, now());
    // 35 (≤2 days) + 20 (lack 75) + 4.5
    assert_eq!(result.score, 59);
    assert_eq!(get_risk_level(result.score), RiskLevel::Risk);
    assert_eq!(result.reason, "Deadline in 48h, 60%+ incomplete");
}

#[test]
fn whole_sixty_ranks_ahead_of_fractional_fifty_nine() {
    let mut almost = task("almost", 12, 25, 51.0);
    almost.last_check_in_at = Some(now() - Duration::hours(1));
    // 20 (≤3 days) + 20 (lack 75) + 20 (never checked in)
    let bomb = task("bomb", 13, 25, 1.0);

    let top = get_top_bombs(&[almost, bomb], 2, now());
    let ids: Vec<&str> = top.iter().map(|t| t.task.id.as_str()).collect();
    assert_eq!(ids, vec!["bomb", "almost"]);
    assert_eq!(top[0].bomb_score, 60);
    assert_eq!(top[0].risk_level(), RiskLevel::Bomb);
    assert_eq!(top[1].bomb_score, 59);
    assert_eq!(top[1].risk_level(), RiskLevel::Risk);
}
