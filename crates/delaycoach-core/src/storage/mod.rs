mod config;
pub mod database;

pub use config::{CoachConfig, Config, RankingConfig};
pub use database::{Database, CHECK_INS_KEY, TASKS_KEY};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/delaycoach[-dev]/` based on DELAYCOACH_ENV.
///
/// Set DELAYCOACH_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DELAYCOACH_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("delaycoach-dev")
    } else {
        base_dir.join("delaycoach")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
