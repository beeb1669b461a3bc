//! Durable key/value slots backing the persistent store.
//!
//! # Responsibility
//! - Define the slot contract (`get_item`/`set_item`/`remove_item`) that the
//!   store persists serialized snapshots through.
//! - Keep backend details (SQLite, in-memory) out of the store and repositories.
//!
//! # Invariants
//! - Writes are last-write-wins per key; there is no partial-write recovery.
//! - Values are opaque text; backends never interpret them.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reported by a slot backend.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// Connection was not migrated before use.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    /// Backend-specific failure without a structured source.
    Backend(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "storage connection is not initialized: expected schema version {expected_version}, found {actual_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::Backend(message) => write!(f, "storage backend failure: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Named text slots in durable local storage.
pub trait SlotStorage {
    /// Returns the slot text, or `None` when the slot was never written.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    /// Writes `value` into the slot, replacing any previous text.
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    /// Removes the slot; absent slots are not an error.
    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

impl<S: SlotStorage + ?Sized> SlotStorage for &S {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }
}
