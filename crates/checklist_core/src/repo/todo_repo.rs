//! Todo repository bound to one list.
//!
//! # Invariants
//! - Reads resolve the bound list from the latest collection snapshot.
//! - Writes go through `ListRepository::update_list`, which only replaces
//!   existing lists; a deleted list is never resurrected.
//! - Todo ids stay unique within the list: adding a duplicate id is ignored.

use crate::model::list::{List, ListId};
use crate::model::todo::{Todo, TodoId};
use crate::repo::list_repo::ListRepository;
use crate::storage::SlotStorage;
use log::debug;

pub struct TodoRepository<'repo, S: SlotStorage> {
    lists: &'repo ListRepository<S>,
    list_id: ListId,
}

impl<'repo, S: SlotStorage> TodoRepository<'repo, S> {
    pub fn new(lists: &'repo ListRepository<S>, list_id: ListId) -> Self {
        Self { lists, list_id }
    }

    pub fn list_id(&self) -> &ListId {
        &self.list_id
    }

    /// Todos of the bound list; empty when the list no longer exists.
    pub fn all_todos(&self) -> Vec<Todo> {
        self.lists
            .get_list(&self.list_id)
            .map(|list| list.todos)
            .unwrap_or_default()
    }

    /// Appends a caller-built todo.
    ///
    /// Ignored when the text is blank, the id is already used in this list,
    /// or the list is gone.
    pub fn add_todo(&self, todo: Todo) {
        if !todo.has_text() {
            debug!("event=todo_add module=repo status=ignored reason=blank_text");
            return;
        }
        self.modify("todo_add", |list| {
            if list.find_todo(&todo.id).is_some() {
                return None;
            }
            Some(list.with_todo_appended(todo))
        });
    }

    /// Replaces the todo sharing `updated.id`.
    pub fn update_todo(&self, updated: Todo) {
        if !updated.has_text() {
            debug!("event=todo_update module=repo status=ignored reason=blank_text");
            return;
        }
        self.modify("todo_update", |list| list.with_todo_replaced(updated));
    }

    /// Removes the todo `id`.
    pub fn delete_todo(&self, id: &TodoId) {
        self.modify("todo_delete", |list| list.without_todo(id));
    }

    fn modify(&self, operation: &'static str, change: impl FnOnce(&List) -> Option<List>) {
        let Some(list) = self.lists.get_list(&self.list_id) else {
            debug!("event={operation} module=repo status=ignored reason=list_missing");
            return;
        };
        match change(&list) {
            Some(updated) => self.lists.update_list(updated),
            None => debug!("event={operation} module=repo status=ignored reason=not_found"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::collection::Collection;
    use crate::model::list::ListId;
    use crate::model::todo::{Completion, Todo};
    use crate::repo::list_repo::ListRepository;
    use crate::storage::MemoryStorage;
    use crate::store::InitialValue;

    #[test]
    fn duplicate_todo_ids_are_ignored() {
        let repo = ListRepository::open(
            MemoryStorage::new(),
            InitialValue::Value(Collection::default()),
        );
        let list_id = repo.add_list("Groceries").unwrap();
        let todos = repo.todos(list_id);

        todos.add_todo(Todo::with_id("t1", "Milk", Completion::Ongoing));
        todos.add_todo(Todo::with_id("t1", "Eggs", Completion::Done));

        let stored = todos.all_todos();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].text, "Milk");
    }

    #[test]
    fn unknown_list_reads_empty() {
        let repo = ListRepository::open(
            MemoryStorage::new(),
            InitialValue::Value(Collection::default()),
        );
        let todos = repo.todos(ListId::from("ghost"));

        todos.add_todo(Todo::with_id("t1", "Milk", Completion::Ongoing));

        assert!(todos.all_todos().is_empty());
        assert!(repo.all_lists().is_empty());
    }
}
