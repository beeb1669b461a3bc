//! To-do item model.
//!
//! # Invariants
//! - `id` is opaque and stable for the todo lifetime.
//! - `text` must contain at least one non-whitespace character to be stored.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque todo identifier, unique within the owning list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for TodoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TodoId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Completion state of a todo.
///
/// Serialized as `"done"` / `"ongoing"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Completion {
    Done,
    #[default]
    Ongoing,
}

impl Completion {
    /// Returns the opposite state, as a checkbox toggle would.
    pub fn toggled(self) -> Self {
        match self {
            Self::Done => Self::Ongoing,
            Self::Ongoing => Self::Done,
        }
    }

    pub fn is_done(self) -> bool {
        self == Self::Done
    }
}

/// Single actionable item owned by exactly one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub completed: Completion,
}

impl Todo {
    /// Creates an ongoing todo with a generated id.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(TodoId::generate(), text, Completion::Ongoing)
    }

    /// Creates a todo with a caller-provided id and state.
    pub fn with_id(id: impl Into<TodoId>, text: impl Into<String>, completed: Completion) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed,
        }
    }

    /// Returns whether `text` is acceptable for storage.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    pub fn is_done(&self) -> bool {
        self.completed.is_done()
    }

    /// Returns a copy with the completion state flipped.
    pub fn toggled(&self) -> Self {
        Self {
            completed: self.completed.toggled(),
            ..self.clone()
        }
    }
}
