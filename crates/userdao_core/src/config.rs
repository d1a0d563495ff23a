//! Store and logging configuration.
//!
//! # Responsibility
//! - Describe where the users store lives and how connections are tuned.
//! - Carry logging bootstrap inputs as one value instead of loose strings.
//!
//! # Invariants
//! - A validated `StoreConfig` never points at an empty file path.
//! - Busy timeout is always non-zero after validation.

use crate::db::{DbError, DbResult};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Physical location of the users store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// Process-local database shared by every session of one factory.
    Memory,
    /// SQLite database file; each session opens its own connection.
    File(PathBuf),
}

/// Connection settings consumed by `SqliteSessionFactory`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub location: StoreLocation,
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl StoreConfig {
    /// In-memory store with the default busy timeout.
    pub fn in_memory() -> Self {
        Self {
            location: StoreLocation::Memory,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// File-backed store with the default busy timeout.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            location: StoreLocation::File(path.into()),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    /// Checks the configuration before any connection is opened.
    ///
    /// # Errors
    /// - `DbError::InvalidConfig` when the file path is empty.
    /// - `DbError::InvalidConfig` when the busy timeout is zero.
    pub fn validate(&self) -> DbResult<()> {
        if let StoreLocation::File(path) = &self.location {
            if path.as_os_str().is_empty() {
                return Err(DbError::InvalidConfig(
                    "store file path cannot be empty".to_string(),
                ));
            }
        }
        if self.busy_timeout.is_zero() {
            return Err(DbError::InvalidConfig(
                "busy timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn mode(&self) -> &'static str {
        match self.location {
            StoreLocation::Memory => "memory",
            StoreLocation::File(_) => "file",
        }
    }
}

/// Inputs for `init_logging`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// One of `trace|debug|info|warn|error` (case-insensitive).
    pub level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
    /// Mirror `error` records to stderr in addition to the log file.
    pub duplicate_errors_to_stderr: bool,
}

impl LogConfig {
    pub fn new(level: impl Into<String>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            level: level.into(),
            log_dir: log_dir.into(),
            duplicate_errors_to_stderr: false,
        }
    }
}
