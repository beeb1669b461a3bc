//! Repository layer over the persisted list collection.
//!
//! # Responsibility
//! - Provide list and todo CRUD as total, synchronous operations.
//! - Route every mutation through one persistence path (the list store).
//!
//! # Invariants
//! - Invalid input and unknown ids are silent no-ops, never errors.
//! - No-op mutations neither write storage nor notify listeners.
//! - Todos have no storage path of their own; they are written as part of
//!   their owning list.

pub mod list_repo;
pub mod todo_repo;
