//! Use-case services for list and todo views.
//!
//! # Responsibility
//! - Turn view-level intents (rename, toggle, edit) into repository calls.
//! - Keep view code decoupled from storage and snapshot details.

pub mod checklist_service;
