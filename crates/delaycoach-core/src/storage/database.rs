//! SQLite-backed task and check-in storage.
//!
//! Entities live in a single key-value table, one JSON array per entity
//! type. Every write validates the records first, so anything read back
//! has a parseable due date and in-range progress.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;

use crate::checkin::CheckInOutcome;
use crate::error::{CoreError, DatabaseError, Result};
use crate::task::{CheckIn, Task, TaskPatch};

use super::data_dir;

pub const TASKS_KEY: &str = "delaycoach_tasks";
pub const CHECK_INS_KEY: &str = "delaycoach_checkins";

/// SQLite database for tasks and check-ins.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/delaycoach/delaycoach.db`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("delaycoach.db");
        Self::open_at(&path)
    }

    /// Open (or create) the database file at `path`.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a key from the kv store.
    pub fn kv_delete(&self, key: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    // === Tasks ===

    /// All stored tasks, in insertion order.
    ///
    /// # Errors
    /// Fails with [`CoreError::Json`] if the stored document is malformed,
    /// including unparseable due dates.
    pub fn get_tasks(&self) -> Result<Vec<Task>> {
        match self.kv_get(TASKS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the stored task list.
    pub fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        for task in tasks {
            task.validate()?;
        }
        self.kv_set(TASKS_KEY, &serde_json::to_string(tasks)?)?;
        tracing::debug!(count = tasks.len(), "saved tasks");
        Ok(())
    }

    pub fn get_task(&self, id: &str) -> Result<Task> {
        self.get_tasks()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| task_not_found(id))
    }

    pub fn add_task(&self, task: Task) -> Result<Task> {
        task.validate()?;
        let mut tasks = self.get_tasks()?;
        if tasks.iter().any(|t| t.id == task.id) {
            return Err(crate::error::ValidationError::InvalidValue {
                field: "id".to_string(),
                message: format!("task '{}' already exists", task.id),
            }
            .into());
        }
        tasks.push(task.clone());
        self.save_tasks(&tasks)?;
        tracing::debug!(task_id = %task.id, "added task");
        Ok(task)
    }

    /// Apply `patch` to the task with `id`, stamping `updated_at = now`.
    pub fn update_task(&self, id: &str, patch: &TaskPatch, now: DateTime<Utc>) -> Result<Task> {
        let mut tasks = self.get_tasks()?;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| task_not_found(id))?;
        task.apply(patch, now);
        task.validate()?;
        let updated = task.clone();
        self.save_tasks(&tasks)?;
        tracing::debug!(task_id = %id, "updated task");
        Ok(updated)
    }

    /// Delete a task and every check-in that references it, in a single transaction.
    pub fn delete_task(&self, id: &str) -> Result<()> {
        let mut tasks = self.get_tasks()?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(task_not_found(id));
        }
        let mut check_ins = self.get_check_ins()?;
        check_ins.retain(|c| c.task_id != id);

        let tasks_json = serde_json::to_string(&tasks)?;
        let check_ins_json = serde_json::to_string(&check_ins)?;

        self.conn.execute_batch("BEGIN IMMEDIATE TRANSACTION;")?;
        let result: Result<(), rusqlite::Error> = (|| {
            self.kv_set(TASKS_KEY, &tasks_json)?;
            self.kv_set(CHECK_INS_KEY, &check_ins_json)?;
            Ok(())
        })();
        match result {
            Ok(()) => {
                self.conn.execute_batch("COMMIT;")?;
                tracing::debug!(task_id = %id, "deleted task with check-ins");
                Ok(())
            }
            Err(err) => {
                let _ = self.conn.execute_batch("ROLLBACK;");
                Err(err.into())
            }
        }
    }

    // === Check-ins ===

    pub fn get_check_ins(&self) -> Result<Vec<CheckIn>> {
        match self.kv_get(CHECK_INS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn save_check_ins(&self, check_ins: &[CheckIn]) -> Result<()> {
        self.kv_set(CHECK_INS_KEY, &serde_json::to_string(check_ins)?)?;
        tracing::debug!(count = check_ins.len(), "saved check-ins");
        Ok(())
    }

    /// Append a check-in. The referenced task must exist.
    pub fn add_check_in(&self, check_in: CheckIn) -> Result<CheckIn> {
        if !self.get_tasks()?.iter().any(|t| t.id == check_in.task_id) {
            return Err(task_not_found(&check_in.task_id));
        }
        let mut check_ins = self.get_check_ins()?;
        check_ins.push(check_in.clone());
        self.save_check_ins(&check_ins)?;
        tracing::debug!(task_id = %check_in.task_id, delta = check_in.progress_delta, "added check-in");
        Ok(check_in)
    }

    /// Persist a recorded check-in and its task patch in one transaction.
    ///
    /// Either both the check-in and the updated task are stored, or neither is.
    pub fn record_check_in(&self, outcome: &CheckInOutcome, now: DateTime<Utc>) -> Result<Task> {
        let task_id = &outcome.check_in.task_id;
        let mut tasks = self.get_tasks()?;
        let task = tasks
            .iter_mut()
            .find(|t| &t.id == task_id)
            .ok_or_else(|| task_not_found(task_id))?;
        task.apply(&outcome.patch, now);
        task.validate()?;
        let updated = task.clone();

        let mut check_ins = self.get_check_ins()?;
        check_ins.push(outcome.check_in.clone());

        let tasks_json = serde_json::to_string(&tasks)?;
        let check_ins_json = serde_json::to_string(&check_ins)?;

        self.conn.execute_batch("BEGIN IMMEDIATE TRANSACTION;")?;
        let result: Result<(), rusqlite::Error> = (|| {
            self.kv_set(CHECK_INS_KEY, &check_ins_json)?;
            self.kv_set(TASKS_KEY, &tasks_json)?;
            Ok(())
        })();
        match result {
            Ok(()) => {
                self.conn.execute_batch("COMMIT;")?;
                tracing::debug!(
                    task_id = %task_id,
                    delta = outcome.check_in.progress_delta,
                    progress = updated.progress,
                    "recorded check-in"
                );
                Ok(updated)
            }
            Err(err) => {
                let _ = self.conn.execute_batch("ROLLBACK;");
                Err(err.into())
            }
        }
    }

    pub fn get_check_ins_for_task(&self, task_id: &str) -> Result<Vec<CheckIn>> {
        Ok(self
            .get_check_ins()?
            .into_iter()
            .filter(|c| c.task_id == task_id)
            .collect())
    }

    /// Remove all tasks and check-ins.
    pub fn reset_all(&self) -> Result<()> {
        self.conn.execute_batch("BEGIN IMMEDIATE TRANSACTION;")?;
        let result: Result<(), rusqlite::Error> = (|| {
            self.kv_delete(TASKS_KEY)?;
            self.kv_delete(CHECK_INS_KEY)?;
            Ok(())
        })();
        match result {
            Ok(()) => {
                self.conn.execute_batch("COMMIT;")?;
                tracing::debug!("reset all data");
                Ok(())
            }
            Err(err) => {
                let _ = self.conn.execute_batch("ROLLBACK;");
                Err(err.into())
            }
        }
    }
}

fn task_not_found(id: &str) -> CoreError {
    CoreError::NotFound {
        entity: "task",
        id: id.to_string(),
    }
}
