//! Check-in activity over time.
//!
//! Buckets check-ins by UTC calendar day for the trailing window of a
//! [`TimeRange`], oldest day first.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::task::CheckIn;

/// Window used when charting the full history.
const ALL_TIME_CHART_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[default]
    Week,
    Month,
    All,
}

impl TimeRange {
    /// Days of history kept by the filter; `None` keeps everything.
    pub fn days(&self) -> Option<i64> {
        match self {
            TimeRange::Week => Some(7),
            TimeRange::Month => Some(30),
            TimeRange::All => None,
        }
    }

    /// Number of daily buckets to chart.
    pub fn chart_days(&self) -> i64 {
        self.days().unwrap_or(ALL_TIME_CHART_DAYS)
    }
}

impl FromStr for TimeRange {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7" | "week" => Ok(TimeRange::Week),
            "30" | "month" => Ok(TimeRange::Month),
            "all" => Ok(TimeRange::All),
            other => Err(ValidationError::InvalidValue {
                field: "range".to_string(),
                message: format!("expected 7, 30 or all, got '{other}'"),
            }),
        }
    }
}

/// Check-in count for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub day: NaiveDate,
    pub count: usize,
}

/// Mean progress delta for one day, one decimal place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyProgress {
    pub day: NaiveDate,
    pub avg_progress: f64,
}

/// Summary of activity in a range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityReport {
    pub range: TimeRange,
    pub check_in_count: usize,
    /// `None` when the range holds no check-ins
    pub average_progress_delta: Option<f64>,
    pub daily_counts: Vec<DailyCount>,
    pub daily_progress: Vec<DailyProgress>,
}

/// Check-ins at or after the range cutoff.
pub fn filter_check_ins(check_ins: &[CheckIn], range: TimeRange, now: DateTime<Utc>) -> Vec<CheckIn> {
    match range.days() {
        None => check_ins.to_vec(),
        Some(days) => {
            let cutoff = now - Duration::days(days);
            check_ins
                .iter()
                .filter(|c| c.date_time >= cutoff)
                .cloned()
                .collect()
        }
    }
}

fn trailing_days(range: TimeRange, now: DateTime<Utc>) -> impl Iterator<Item = NaiveDate> {
    let today = now.date_naive();
    let span = range.chart_days();
    (0..span).rev().map(move |back| today - Duration::days(back))
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn daily_check_in_counts(
    check_ins: &[CheckIn],
    range: TimeRange,
    now: DateTime<Utc>,
) -> Vec<DailyCount> {
    let filtered = filter_check_ins(check_ins, range, now);
    trailing_days(range, now)
        .map(|day| DailyCount {
            day,
            count: filtered.iter().filter(|c| c.date_time.date_naive() == day).count(),
        })
        .collect()
}

pub fn daily_progress_trend(
    check_ins: &[CheckIn],
    range: TimeRange,
    now: DateTime<Utc>,
) -> Vec<DailyProgress> {
    let filtered = filter_check_ins(check_ins, range, now);
    trailing_days(range, now)
        .map(|day| {
            let deltas: Vec<f64> = filtered
                .iter()
                .filter(|c| c.date_time.date_naive() == day)
                .map(|c| f64::from(c.progress_delta))
                .collect();
            let avg = if deltas.is_empty() {
                0.0
            } else {
                deltas.iter().sum::<f64>() / deltas.len() as f64
            };
            DailyProgress {
                day,
                avg_progress: round_tenth(avg),
            }
        })
        .collect()
}

/// Mean delta over the filtered range, one decimal place.
pub fn average_progress_delta(
    check_ins: &[CheckIn],
    range: TimeRange,
    now: DateTime<Utc>,
) -> Option<f64> {
    let filtered = filter_check_ins(check_ins, range, now);
    if filtered.is_empty() {
        return None;
    }
    let sum: f64 = filtered.iter().map(|c| f64::from(c.progress_delta)).sum();
    Some(round_tenth(sum / filtered.len() as f64))
}

pub fn activity_report(check_ins: &[CheckIn], range: TimeRange, now: DateTime<Utc>) -> ActivityReport {
    ActivityReport {
        range,
        check_in_count: filter_check_ins(check_ins, range, now).len(),
        average_progress_delta: average_progress_delta(check_ins, range, now),
        daily_counts: daily_check_in_counts(check_ins, range, now),
        daily_progress: daily_progress_trend(check_ins, range, now),
    }
}
