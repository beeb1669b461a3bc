//! Domain model for lists and their to-do items.
//!
//! # Responsibility
//! - Define the canonical `List`/`Todo` records and the persisted `Collection`.
//! - Provide pure update helpers that return new values instead of mutating.
//!
//! # Invariants
//! - List ids are unique within a `Collection`; todo ids are unique within
//!   their owning `List`. Ids are never reassigned.
//! - Completion percentage is derived on demand and never stored.
//! - Deletion removes records outright; there are no tombstones.

pub mod collection;
pub mod list;
pub mod seed;
pub mod todo;
