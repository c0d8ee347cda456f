//! Basic CLI E2E tests.
//!
//! Tests run the built binary against a throwaway HOME and verify outputs.

use chrono::{Duration, Utc};
use std::path::Path;
use std::process::Command;

/// Run a CLI command with `home` as the data root and return output.
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_delaycoach"))
        .args(args)
        .env("HOME", home)
        .env_remove("DELAYCOACH_ENV")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_json(home: &Path, args: &[&str]) -> serde_json::Value {
    let (code, stdout, stderr) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

fn days_from_today(days: i64) -> String {
    (Utc::now() + Duration::days(days))
        .date_naive()
        .format("%Y-%m-%d")
        .to_string()
}

fn add_task(home: &Path, title: &str, due_in_days: i64, hours: &str) -> String {
    let due = days_from_today(due_in_days);
    let task = run_json(
        home,
        &["task", "add", title, "--subject", "Math", "--due", &due, "--hours", hours],
    );
    task["id"].as_str().unwrap().to_string()
}

#[test]
fn test_task_add_and_list() {
    let home = tempfile::tempdir().unwrap();
    let id = add_task(home.path(), "Problem set", 10, "4");
    assert!(id.starts_with("task-"));

    let tasks = run_json(home.path(), &["task", "list"]);
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], id.as_str());
    assert_eq!(tasks[0]["status"], "active");
    assert!(tasks[0]["bombScore"].is_number());
}

#[test]
fn test_task_add_rejects_bad_date() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(
        home.path(),
        &["task", "add", "Essay", "--due", "2026-02-30", "--hours", "3"],
    );
    assert_ne!(code, 0);
}

#[test]
fn test_task_add_rejects_zero_hours() {
    let home = tempfile::tempdir().unwrap();
    let due = days_from_today(3);
    let (code, _, stderr) = run_cli(
        home.path(),
        &["task", "add", "Essay", "--due", &due, "--hours", "0"],
    );
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error:"));
}

#[test]
fn test_task_show_update_done_delete() {
    let home = tempfile::tempdir().unwrap();
    let id = add_task(home.path(), "Essay", 5, "6");

    let shown = run_json(home.path(), &["task", "show", &id]);
    assert_eq!(shown["task"]["title"], "Essay");
    assert!(shown["riskLevel"].is_string());

    let updated = run_json(home.path(), &["task", "update", &id, "--progress", "40"]);
    assert_eq!(updated["progress"], 40);

    let done = run_json(home.path(), &["task", "done", &id]);
    assert_eq!(done["status"], "done");
    assert_eq!(done["progress"], 100);

    let (code, stdout, _) = run_cli(home.path(), &["task", "delete", &id]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Task deleted"));

    let (code, _, stderr) = run_cli(home.path(), &["task", "show", &id]);
    assert_eq!(code, 1);
    assert!(stderr.contains("not found"));
}

#[test]
fn test_task_list_filter() {
    let home = tempfile::tempdir().unwrap();
    add_task(home.path(), "Soon", 1, "4");
    add_task(home.path(), "Later", 20, "4");

    let soon = run_json(home.path(), &["task", "list", "--filter", "deadline-soon"]);
    let soon = soon.as_array().unwrap();
    assert_eq!(soon.len(), 1);
    assert_eq!(soon[0]["title"], "Soon");
}

#[test]
fn test_checkin_add_updates_task() {
    let home = tempfile::tempdir().unwrap();
    let id = add_task(home.path(), "Lab report", 4, "8");

    let result = run_json(
        home.path(),
        &["checkin", "add", &id, "--delta", "30", "--mood", "good", "--note", "intro done"],
    );
    assert_eq!(result["task"]["progress"], 30);
    assert!(result["task"]["lastCheckInAt"].is_string());
    assert_eq!(result["checkIn"]["progressDelta"], 30);
    assert!(result["coach"]["fact"].is_string());

    let rework = run_json(home.path(), &["checkin", "add", &id, "--delta", "-50"]);
    assert_eq!(rework["task"]["progress"], 0);

    let listed = run_json(home.path(), &["checkin", "list", "--task", &id]);
    assert_eq!(listed.as_array().unwrap().len(), 2);
}

#[test]
fn test_checkin_unknown_task_fails() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["checkin", "add", "nope", "--delta", "5"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("not found"));
}

#[test]
fn test_bombs_respect_limit_and_skip_done() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(home.path(), &["seed"]);
    assert_eq!(code, 0);

    let bombs = run_json(home.path(), &["bombs"]);
    let bombs = bombs.as_array().unwrap();
    assert_eq!(bombs.len(), 3);
    assert!(bombs.iter().all(|b| b["task"]["status"] != "done"));

    let scores: Vec<u64> = bombs
        .iter()
        .map(|b| b["task"]["bombScore"].as_u64().unwrap())
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));

    let one = run_json(home.path(), &["bombs", "--limit", "1"]);
    assert_eq!(one.as_array().unwrap().len(), 1);
}

#[test]
fn test_seed_refuses_to_overwrite() {
    let home = tempfile::tempdir().unwrap();
    add_task(home.path(), "Mine", 3, "2");
    let (code, _, stderr) = run_cli(home.path(), &["seed"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("--force"));

    let (code, _, _) = run_cli(home.path(), &["seed", "--force"]);
    assert_eq!(code, 0);
    let tasks = run_json(home.path(), &["task", "list"]);
    assert_eq!(tasks.as_array().unwrap().len(), 8);
}

#[test]
fn test_risk_levels() {
    let home = tempfile::tempdir().unwrap();
    for (score, level) in [("0", "safe"), ("20", "caution"), ("40", "risk"), ("60", "bomb")] {
        let (code, stdout, _) = run_cli(home.path(), &["risk", score]);
        assert_eq!(code, 0);
        assert_eq!(stdout.trim(), level);
    }
    let (code, _, _) = run_cli(home.path(), &["risk", "101"]);
    assert_ne!(code, 0);
}

#[test]
fn test_analyze_empty_history() {
    let home = tempfile::tempdir().unwrap();
    let analysis = run_json(home.path(), &["analyze", "--range", "30"]);
    assert_eq!(analysis["profile"]["type"], "Getting Started");
    assert_eq!(analysis["activity"]["checkInCount"], 0);
    assert_eq!(analysis["activity"]["dailyCounts"].as_array().unwrap().len(), 30);
}

#[test]
fn test_coach_without_tasks() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["coach"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("No open tasks"));
}

#[test]
fn test_coach_uses_configured_tone() {
    let home = tempfile::tempdir().unwrap();
    add_task(home.path(), "Paper", 1, "10");
    let (code, _, _) = run_cli(home.path(), &["config", "set", "coach.tone", "savage"]);
    assert_eq!(code, 0);

    let coach = run_json(home.path(), &["coach"]);
    assert_eq!(coach["tone"], "savage");
    assert_eq!(coach["title"], "Paper");
}

#[test]
fn test_config_get_set_reset() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "ranking.top_limit"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "3");

    let (code, _, _) = run_cli(home.path(), &["config", "set", "ranking.top_limit", "5"]);
    assert_eq!(code, 0);
    let listed = run_json(home.path(), &["config", "list"]);
    assert_eq!(listed["ranking"]["top_limit"], 5);

    let (code, _, _) = run_cli(home.path(), &["config", "set", "coach.tone", "brutal"]);
    assert_eq!(code, 1);
    let (code, _, _) = run_cli(home.path(), &["config", "get", "coach.volume"]);
    assert_eq!(code, 1);

    let (code, _, _) = run_cli(home.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(home.path(), &["config", "get", "ranking.top_limit"]);
    assert_eq!(stdout.trim(), "3");
}

#[test]
fn test_reset_clears_data() {
    let home = tempfile::tempdir().unwrap();
    let id = add_task(home.path(), "Essay", 3, "2");
    run_json(home.path(), &["checkin", "add", &id, "--delta", "10"]);

    let (code, _, _) = run_cli(home.path(), &["reset"]);
    assert_eq!(code, 0);
    assert!(run_json(home.path(), &["task", "list"]).as_array().unwrap().is_empty());
    assert!(run_json(home.path(), &["checkin", "list"]).as_array().unwrap().is_empty());
}

#[test]
fn test_reset_restores_default_config() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(home.path(), &["config", "set", "ranking.top_limit", "5"]);
    assert_eq!(code, 0);
    let (code, _, _) = run_cli(home.path(), &["config", "set", "coach.tone", "savage"]);
    assert_eq!(code, 0);

    let (code, _, _) = run_cli(home.path(), &["reset"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(home.path(), &["config", "get", "ranking.top_limit"]);
    assert_eq!(stdout.trim(), "3");
    let (_, stdout, _) = run_cli(home.path(), &["config", "get", "coach.tone"]);
    assert_eq!(stdout.trim(), "normal");
}

#[test]
fn test_bombs_flag_deadlines_inside_alert_window() {
    let home = tempfile::tempdir().unwrap();
    add_task(home.path(), "Tomorrow", 1, "2");
    add_task(home.path(), "Later", 5, "2");

    let bombs = run_json(home.path(), &["bombs", "--limit", "5"]);
    let alert_for = |bombs: &serde_json::Value, title: &str| {
        bombs
            .as_array()
            .unwrap()
            .iter()
            .find(|b| b["task"]["title"] == title)
            .map(|b| b["alert"].as_bool().unwrap())
            .unwrap()
    };
    assert!(alert_for(&bombs, "Tomorrow"));
    assert!(!alert_for(&bombs, "Later"));

    let (code, _, _) = run_cli(home.path(), &["config", "set", "coach.alert_hours", "168"]);
    assert_eq!(code, 0);
    let bombs = run_json(home.path(), &["bombs", "--limit", "5"]);
    assert!(alert_for(&bombs, "Later"));
}
