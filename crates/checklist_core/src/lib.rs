//! Core state layer for the checklist app.
//! Lists and their todos live here, together with the slot persistence that
//! keeps them across sessions.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod store;

pub use config::{bootstrap, BootstrapError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::collection::Collection;
pub use model::list::{completion_percentage, List, ListId};
pub use model::seed::default_collection;
pub use model::todo::{Completion, Todo, TodoId};
pub use repo::list_repo::{ListRepository, SubscriptionId, LISTS_STORAGE_KEY};
pub use repo::todo_repo::TodoRepository;
pub use service::checklist_service::{ChecklistService, ListSummary};
pub use storage::{MemoryStorage, SlotStorage, SqliteStorage, StorageError, StorageResult};
pub use store::{InitialValue, PersistOutcome, PersistentStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
