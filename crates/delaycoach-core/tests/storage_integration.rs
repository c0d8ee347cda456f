//! Integration tests for on-disk storage.
//!
//! These tests exercise the full check-in workflow against a database file:
//! record, persist, reopen, score, and cascade-delete.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use delaycoach_core::{
    generate_sample_tasks, get_top_bombs, record_check_in, CoreError, Database, Mood, Priority,
    Task, TaskStatus,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
}

fn essay() -> Task {
    Task::new(
        "Essay",
        "History",
        NaiveDate::from_ymd_opt(2026, 3, 13).unwrap(),
        6.0,
        Priority::High,
        now(),
    )
}

#[test]
fn test_data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("delaycoach.db");

    let id = {
        let db = Database::open_at(&path).unwrap();
        db.add_task(essay()).unwrap().id
    };

    let db = Database::open_at(&path).unwrap();
    let tasks = db.get_tasks().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, id);
    assert_eq!(tasks[0].due_date, NaiveDate::from_ymd_opt(2026, 3, 13).unwrap());
}

#[test]
fn test_check_in_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open_at(&dir.path().join("delaycoach.db")).unwrap();
    let task = db.add_task(essay()).unwrap();

    let later = now() + Duration::hours(4);
    let outcome = record_check_in(&task, 60, Mood::Good, Some("outline"), later);
    let updated = db.record_check_in(&outcome, later).unwrap();
    assert_eq!(updated.progress, 60);
    assert_eq!(db.get_check_ins_for_task(&task.id).unwrap().len(), 1);
    assert_eq!(updated.last_check_in_at, Some(later));

    let outcome = record_check_in(&updated, 55, Mood::Good, None, later);
    let finished = db.update_task(&task.id, &outcome.patch, later).unwrap();
    assert_eq!(finished.progress, 100);
    assert_eq!(finished.status, TaskStatus::Done);

    let tasks = db.get_tasks().unwrap();
    assert!(get_top_bombs(&tasks, 3, later).is_empty());
}

#[test]
fn test_delete_cascades_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("delaycoach.db");
    let db = Database::open_at(&path).unwrap();
    let a = db.add_task(essay()).unwrap();
    let b = db.add_task(essay()).unwrap();
    for task in [&a, &b] {
        let outcome = record_check_in(task, 10, Mood::Neutral, None, now());
        db.add_check_in(outcome.check_in).unwrap();
    }

    db.delete_task(&a.id).unwrap();
    drop(db);

    let db = Database::open_at(&path).unwrap();
    assert!(db.get_check_ins_for_task(&a.id).unwrap().is_empty());
    assert_eq!(db.get_check_ins_for_task(&b.id).unwrap().len(), 1);
    assert!(matches!(
        db.get_task(&a.id),
        Err(CoreError::NotFound { entity: "task", .. })
    ));
}

#[test]
fn test_sample_data_persists_and_ranks() {
    let db = Database::open_memory().unwrap();
    db.save_tasks(&generate_sample_tasks(now())).unwrap();
    let tasks = db.get_tasks().unwrap();
    assert_eq!(tasks.len(), 8);

    let top = get_top_bombs(&tasks, 3, now());
    assert_eq!(top.len(), 3);
    assert!(top.iter().any(|t| t.task.id == "sample-4"));
}

#[test]
fn test_open_fails_for_unwritable_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("nested").join("delaycoach.db");
    assert!(matches!(
        Database::open_at(&path),
        Err(CoreError::Database(_))
    ));
}
