//! Runtime configuration resolved from the process environment.
//!
//! # Responsibility
//! - Locate the task database file.
//! - Resolve logging level and directory for `init_logging`.
//!
//! # Invariants
//! - Blank variables are treated as unset.
//! - `log_level` is always one of `trace|debug|info|warn|error`.
//! - `log_dir`, when set, is absolute.

use crate::logging::{default_log_level, normalize_level, normalize_log_dir};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Overrides the database file location.
pub const DB_PATH_ENV: &str = "TASKLIST_DB_PATH";
/// Overrides the log level.
pub const LOG_LEVEL_ENV: &str = "TASKLIST_LOG_LEVEL";
/// Enables file logging into the given absolute directory.
pub const LOG_DIR_ENV: &str = "TASKLIST_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "tasklist.sqlite3";

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub message: String,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid `{}`: {}", self.key, self.message)
    }
}

impl Error for ConfigError {}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Resolves configuration from `TASKLIST_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        let log_level = match read(LOG_LEVEL_ENV) {
            Some(value) => normalize_level(&value).map_err(|message| ConfigError {
                key: LOG_LEVEL_ENV,
                message,
            })?,
            None => default_log_level(),
        };

        let log_dir = read(LOG_DIR_ENV)
            .map(|value| {
                normalize_log_dir(&value).map_err(|message| ConfigError {
                    key: LOG_DIR_ENV,
                    message,
                })
            })
            .transpose()?;

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}

/// Default database location in the system temp directory.
pub fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}
