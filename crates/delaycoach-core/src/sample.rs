//! Demo data for first-run exploration.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::task::{Priority, Task, TaskStatus};

struct SampleRow {
    id: &'static str,
    title: &'static str,
    subject: &'static str,
    due_in_days: i64,
    estimated_hours: f64,
    priority: Priority,
    created_days_ago: i64,
    updated_days_ago: i64,
    progress: u8,
    checked_in_hours_ago: Option<i64>,
    status: TaskStatus,
}

const SAMPLES: &[SampleRow] = &[
    SampleRow {
        id: "sample-1",
        title: "Research Paper Draft",
        subject: "Psychology",
        due_in_days: 2,
        estimated_hours: 15.0,
        priority: Priority::High,
        created_days_ago: 7,
        updated_days_ago: 7,
        progress: 20,
        checked_in_hours_ago: Some(48),
        status: TaskStatus::Active,
    },
    SampleRow {
        id: "sample-2",
        title: "Math Problem Set 7",
        subject: "Calculus",
        due_in_days: 1,
        estimated_hours: 8.0,
        priority: Priority::High,
        created_days_ago: 5,
        updated_days_ago: 5,
        progress: 5,
        checked_in_hours_ago: None,
        status: TaskStatus::Active,
    },
    SampleRow {
        id: "sample-3",
        title: "History Essay Outline",
        subject: "European History",
        due_in_days: 5,
        estimated_hours: 6.0,
        priority: Priority::Mid,
        created_days_ago: 3,
        updated_days_ago: 1,
        progress: 45,
        checked_in_hours_ago: Some(24),
        status: TaskStatus::Active,
    },
    SampleRow {
        id: "sample-4",
        title: "Lab Report - Chemistry",
        subject: "Chemistry",
        due_in_days: -1,
        estimated_hours: 10.0,
        priority: Priority::High,
        created_days_ago: 10,
        updated_days_ago: 10,
        progress: 60,
        checked_in_hours_ago: Some(72),
        status: TaskStatus::Overdue,
    },
    SampleRow {
        id: "sample-5",
        title: "Reading Assignment Ch 8-12",
        subject: "Literature",
        due_in_days: 10,
        estimated_hours: 5.0,
        priority: Priority::Low,
        created_days_ago: 2,
        updated_days_ago: 2,
        progress: 0,
        checked_in_hours_ago: None,
        status: TaskStatus::Active,
    },
    SampleRow {
        id: "sample-6",
        title: "Group Project Presentation",
        subject: "Business",
        due_in_days: 14,
        estimated_hours: 12.0,
        priority: Priority::Mid,
        created_days_ago: 1,
        updated_days_ago: 1,
        progress: 10,
        checked_in_hours_ago: Some(12),
        status: TaskStatus::Active,
    },
    SampleRow {
        id: "sample-7",
        title: "Final Project Proposal",
        subject: "Computer Science",
        due_in_days: 7,
        estimated_hours: 20.0,
        priority: Priority::High,
        created_days_ago: 14,
        updated_days_ago: 1,
        progress: 100,
        checked_in_hours_ago: Some(24),
        status: TaskStatus::Done,
    },
    SampleRow {
        id: "sample-8",
        title: "Biology Quiz Prep",
        subject: "Biology",
        due_in_days: 3,
        estimated_hours: 4.0,
        priority: Priority::Mid,
        created_days_ago: 1,
        updated_days_ago: 1,
        progress: 25,
        checked_in_hours_ago: Some(20),
        status: TaskStatus::Active,
    },
];

fn due_date(now: DateTime<Utc>, days: i64) -> NaiveDate {
    (now + Duration::days(days)).date_naive()
}

/// Eight demo tasks spread around `now`: one overdue, one done, the rest active.
pub fn generate_sample_tasks(now: DateTime<Utc>) -> Vec<Task> {
    SAMPLES
        .iter()
        .map(|row| Task {
            id: row.id.to_string(),
            title: row.title.to_string(),
            subject: row.subject.to_string(),
            due_date: due_date(now, row.due_in_days),
            estimated_hours: row.estimated_hours,
            priority: row.priority,
            created_at: now - Duration::days(row.created_days_ago),
            updated_at: now - Duration::days(row.updated_days_ago),
            progress: row.progress,
            last_check_in_at: row.checked_in_hours_ago.map(|h| now - Duration::hours(h)),
            status: row.status,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::{get_top_bombs, OVERDUE};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn samples_are_valid_and_unique() {
        let tasks = generate_sample_tasks(now());
        assert_eq!(tasks.len(), 8);
        for task in &tasks {
            task.validate().unwrap();
        }
        let ids: std::collections::HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn overdue_and_untouched_samples_top_the_ranking() {
        let tasks = generate_sample_tasks(now());
        let top = get_top_bombs(&tasks, 3, now());
        // both score 100; input order breaks the tie
        assert_eq!(top[0].task.id, "sample-2");
        assert_eq!(top[1].task.id, "sample-4");
        assert_eq!(top[1].bomb_reason, OVERDUE);
        assert!(top.iter().all(|t| t.task.id != "sample-7"));
    }
}
