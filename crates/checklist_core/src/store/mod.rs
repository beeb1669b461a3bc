//! Binding of an in-memory snapshot to one durable storage slot.
//!
//! # Responsibility
//! - Load a value once (persisted text or injected default).
//! - Write the value back whenever it is replaced by a new snapshot.
//!
//! # Invariants
//! - Snapshots are replaced wholesale; change detection is by `Arc` identity.
//! - The in-memory snapshot stays authoritative when a write fails.

use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod persistent;

pub use persistent::{InitialValue, PersistOutcome, PersistentStore};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Storage(StorageError),
    /// Snapshot could not be serialized.
    Encode(serde_json::Error),
    /// Slot text is not a valid encoding of the expected shape.
    Decode {
        key: String,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode snapshot: {err}"),
            Self::Decode { key, source } => {
                write!(f, "failed to decode slot `{key}`: {source}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Decode { source, .. } => Some(source),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}
