//! Core configuration and one-call bootstrap.
//!
//! # Responsibility
//! - Resolve where the durable database lives and how logging is set up.
//! - Assemble a ready-to-use `ChecklistService` over SQLite storage.
//!
//! # Invariants
//! - An empty or whitespace `CHECKLIST_DB_PATH` is treated as unset.
//! - Bootstrap fails only on logging or database errors; a corrupt slot
//!   still yields a service seeded with the default collection.

use crate::db::{open_db, DbError};
use crate::logging::{default_log_level, init_logging, LoggingError};
use crate::model::seed::default_collection;
use crate::repo::list_repo::ListRepository;
use crate::service::checklist_service::ChecklistService;
use crate::storage::{SqliteStorage, StorageError};
use crate::store::InitialValue;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Environment variable overriding the database file location.
pub const DB_PATH_ENV: &str = "CHECKLIST_DB_PATH";
const DEFAULT_DB_FILE_NAME: &str = "checklist.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Database file; `None` resolves via `CHECKLIST_DB_PATH` or the temp dir.
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    /// Absolute log directory; logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Effective database path.
    pub fn resolve_db_path(&self) -> PathBuf {
        if let Some(path) = &self.db_path {
            return path.clone();
        }
        if let Ok(raw) = std::env::var(DB_PATH_ENV) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }
        std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
    }
}

#[derive(Debug)]
pub enum BootstrapError {
    Logging(LoggingError),
    Db(DbError),
    Storage(StorageError),
}

impl Display for BootstrapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(err) => write!(f, "logging init failed: {err}"),
            Self::Db(err) => write!(f, "database open failed: {err}"),
            Self::Storage(err) => write!(f, "storage init failed: {err}"),
        }
    }
}

impl Error for BootstrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<LoggingError> for BootstrapError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<DbError> for BootstrapError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<StorageError> for BootstrapError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Initializes logging (when configured), opens the database and loads the
/// collection, seeding it with `default_collection` on first run.
pub fn bootstrap(config: &CoreConfig) -> Result<ChecklistService<SqliteStorage>, BootstrapError> {
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir)?;
    }

    let db_path = config.resolve_db_path();
    let storage = SqliteStorage::try_new(open_db(&db_path)?)?;
    let lists = ListRepository::open(storage, InitialValue::factory(default_collection));
    info!(
        "event=bootstrap module=config status=ok list_count={}",
        lists.all_lists().len()
    );

    Ok(ChecklistService::new(lists))
}
