//! List model and pure todo-update helpers.
//!
//! # Responsibility
//! - Own the ordered todos of one list.
//! - Derive the completion percentage shown by the overview progress bar.
//!
//! # Invariants
//! - Helpers never mutate `self`; each returns a new `List`.
//! - `todos` keeps insertion order.

use crate::model::todo::{Todo, TodoId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque list identifier, unique across the collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(String);

impl ListId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ListId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ListId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Named, ordered collection of todos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: ListId,
    pub name: String,
    pub todos: Vec<Todo>,
}

impl List {
    /// Creates an empty list with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(ListId::generate(), name)
    }

    /// Creates an empty list with a caller-provided id.
    pub fn with_id(id: impl Into<ListId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            todos: Vec::new(),
        }
    }

    /// Number of todos marked done.
    pub fn done_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.is_done()).count()
    }

    /// Percent of todos marked done, rounded half away from zero.
    ///
    /// Returns `0` for a list without todos.
    pub fn completion_percentage(&self) -> u8 {
        completion_percentage(self.done_count(), self.todos.len())
    }

    pub fn find_todo(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| &todo.id == id)
    }

    /// Returns why `todos` cannot be stored: `blank_todo_text` or
    /// `duplicate_todo_id`. `None` when every todo is valid.
    pub fn todo_violation(&self) -> Option<&'static str> {
        let mut seen = HashSet::with_capacity(self.todos.len());
        for todo in &self.todos {
            if !todo.has_text() {
                return Some("blank_todo_text");
            }
            if !seen.insert(&todo.id) {
                return Some("duplicate_todo_id");
            }
        }
        None
    }

    /// Returns a copy carrying `name`.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Returns a copy with `todo` appended.
    pub fn with_todo_appended(&self, todo: Todo) -> Self {
        let mut todos = Vec::with_capacity(self.todos.len() + 1);
        todos.extend(self.todos.iter().cloned());
        todos.push(todo);
        Self {
            todos,
            ..self.clone_header()
        }
    }

    /// Returns a copy where the todo sharing `todo.id` is replaced.
    ///
    /// Returns `None` when no such todo exists.
    pub fn with_todo_replaced(&self, todo: Todo) -> Option<Self> {
        let index = self.todos.iter().position(|item| item.id == todo.id)?;
        let mut todos = self.todos.clone();
        todos[index] = todo;
        Some(Self {
            todos,
            ..self.clone_header()
        })
    }

    /// Returns a copy without the todo `id`.
    ///
    /// Returns `None` when no such todo exists.
    pub fn without_todo(&self, id: &TodoId) -> Option<Self> {
        self.find_todo(id)?;
        let todos = self
            .todos
            .iter()
            .filter(|todo| &todo.id != id)
            .cloned()
            .collect();
        Some(Self {
            todos,
            ..self.clone_header()
        })
    }

    fn clone_header(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            todos: Vec::new(),
        }
    }
}

/// Rounds `100 * done / total` half away from zero; `0` when `total == 0`.
pub fn completion_percentage(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let done = done.min(total);
    let rounded = (200 * done + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::{completion_percentage, List};
    use crate::model::todo::{Completion, Todo, TodoId};

    fn todo(id: &str, completed: Completion) -> Todo {
        Todo::with_id(id, format!("item {id}"), completed)
    }

    #[test]
    fn percentage_matches_reference_points() {
        assert_eq!(completion_percentage(0, 0), 0);
        assert_eq!(completion_percentage(1, 3), 33);
        assert_eq!(completion_percentage(2, 3), 67);
        assert_eq!(completion_percentage(2, 2), 100);
        assert_eq!(completion_percentage(1, 8), 13);
        assert_eq!(completion_percentage(1, 2), 50);
    }

    #[test]
    fn empty_list_reports_zero_percent() {
        assert_eq!(List::with_id("l1", "Empty").completion_percentage(), 0);
    }

    #[test]
    fn helpers_leave_the_original_untouched() {
        let original = List::with_id("l1", "Groceries")
            .with_todo_appended(todo("t1", Completion::Ongoing));

        let appended = original.with_todo_appended(todo("t2", Completion::Done));
        let replaced = original
            .with_todo_replaced(todo("t1", Completion::Done))
            .unwrap();
        let removed = original.without_todo(&TodoId::from("t1")).unwrap();

        assert_eq!(original.todos.len(), 1);
        assert!(!original.todos[0].is_done());
        assert_eq!(appended.todos.len(), 2);
        assert!(replaced.todos[0].is_done());
        assert!(removed.todos.is_empty());
        assert_eq!(removed.id, original.id);
        assert_eq!(removed.name, original.name);
    }

    #[test]
    fn todo_violation_flags_blank_text_and_duplicate_ids() {
        let valid = List::with_id("l1", "Groceries")
            .with_todo_appended(todo("t1", Completion::Done))
            .with_todo_appended(todo("t2", Completion::Ongoing));
        let duplicate = valid.with_todo_appended(todo("t1", Completion::Ongoing));
        let blank = valid.with_todo_appended(Todo::with_id("t3", " ", Completion::Ongoing));

        assert_eq!(valid.todo_violation(), None);
        assert_eq!(duplicate.todo_violation(), Some("duplicate_todo_id"));
        assert_eq!(blank.todo_violation(), Some("blank_todo_text"));
    }

    #[test]
    fn missing_todo_yields_none() {
        let list = List::with_id("l1", "Groceries");

        assert!(list
            .with_todo_replaced(todo("ghost", Completion::Done))
            .is_none());
        assert!(list.without_todo(&TodoId::from("ghost")).is_none());
    }
}
