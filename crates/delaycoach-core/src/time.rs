//! Shared time math for deadline calculations.
//!
//! Every function takes `now` explicitly. The only place that reads the wall
//! clock is the binary's entry point.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

pub const HOURS_PER_DAY: f64 = 24.0;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// The instant a due date falls due: midnight UTC at the start of that day.
pub fn due_instant(due_date: NaiveDate) -> DateTime<Utc> {
    due_date.and_time(NaiveTime::MIN).and_utc()
}

/// Fractional hours from `from` to `to` (negative when `to` is earlier).
pub fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to.signed_duration_since(from);
    delta.num_milliseconds() as f64 / 1000.0 / SECONDS_PER_HOUR
}

/// Fractional hours left until the due date (negative once past due).
pub fn hours_until_due(due_date: NaiveDate, now: DateTime<Utc>) -> f64 {
    hours_between(now, due_instant(due_date))
}

/// Fractional days left until the due date.
pub fn days_until_due(due_date: NaiveDate, now: DateTime<Utc>) -> f64 {
    hours_until_due(due_date, now) / HOURS_PER_DAY
}

/// Whole days until due, rounded up. Used by the classifier, coach messages
/// and task views, which reason in calendar-ish days rather than hours.
pub fn whole_days_until_due(due_date: NaiveDate, now: DateTime<Utc>) -> i64 {
    days_until_due(due_date, now).ceil() as i64
}
