//! Checklist use-case service.
//!
//! # Responsibility
//! - Provide the entry points behind the list overview and per-list views.
//! - Derive overview rows (progress percentage) from the current snapshot.
//!
//! # Invariants
//! - Text inputs are trimmed; blank input is ignored.
//! - Service APIs never bypass repository no-op semantics.

use crate::model::list::ListId;
use crate::model::todo::{Completion, Todo, TodoId};
use crate::repo::list_repo::ListRepository;
use crate::repo::todo_repo::TodoRepository;
use crate::storage::SlotStorage;

/// One row of the list overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSummary {
    pub id: ListId,
    pub name: String,
    pub total: usize,
    pub done: usize,
    /// Rounded percent of done todos; `0` for empty lists.
    pub percentage: u8,
}

/// Facade over a `ListRepository` for view callers.
pub struct ChecklistService<S: SlotStorage> {
    lists: ListRepository<S>,
}

impl<S: SlotStorage> ChecklistService<S> {
    pub fn new(lists: ListRepository<S>) -> Self {
        Self { lists }
    }

    /// Underlying repository, e.g. to subscribe to changes.
    pub fn lists(&self) -> &ListRepository<S> {
        &self.lists
    }

    /// Overview rows in collection order.
    pub fn overview(&self) -> Vec<ListSummary> {
        self.lists
            .all_lists()
            .iter()
            .map(|list| ListSummary {
                id: list.id.clone(),
                name: list.name.clone(),
                total: list.todos.len(),
                done: list.done_count(),
                percentage: list.completion_percentage(),
            })
            .collect()
    }

    pub fn create_list(&self, name: &str) -> Option<ListId> {
        self.lists.add_list(name)
    }

    /// Renames a list; blank names and unknown ids are ignored.
    pub fn rename_list(&self, list_id: &ListId, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        if let Some(list) = self.lists.get_list(list_id) {
            self.lists.update_list(list.with_name(name));
        }
    }

    pub fn delete_list(&self, list_id: &ListId) {
        self.lists.delete_list(list_id);
    }

    pub fn todos(&self, list_id: &ListId) -> Vec<Todo> {
        self.todo_repo(list_id).all_todos()
    }

    /// Adds an ongoing todo with a generated id.
    ///
    /// Returns `None` when the text is blank or the list does not exist.
    pub fn create_todo(&self, list_id: &ListId, text: &str) -> Option<TodoId> {
        let text = text.trim();
        if text.is_empty() || self.lists.get_list(list_id).is_none() {
            return None;
        }
        let todo = Todo::new(text);
        let id = todo.id.clone();
        self.todo_repo(list_id).add_todo(todo);
        Some(id)
    }

    /// Replaces a todo's text, keeping its completion state.
    pub fn edit_todo_text(&self, list_id: &ListId, todo_id: &TodoId, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.replace_todo(list_id, todo_id, |todo| Todo {
            text: text.to_string(),
            ..todo
        });
    }

    /// Flips a todo between done and ongoing.
    pub fn toggle_todo(&self, list_id: &ListId, todo_id: &TodoId) {
        self.replace_todo(list_id, todo_id, |todo| todo.toggled());
    }

    pub fn set_todo_completion(&self, list_id: &ListId, todo_id: &TodoId, completed: Completion) {
        self.replace_todo(list_id, todo_id, |todo| Todo { completed, ..todo });
    }

    pub fn delete_todo(&self, list_id: &ListId, todo_id: &TodoId) {
        self.todo_repo(list_id).delete_todo(todo_id);
    }

    fn todo_repo(&self, list_id: &ListId) -> TodoRepository<'_, S> {
        self.lists.todos(list_id.clone())
    }

    fn replace_todo(&self, list_id: &ListId, todo_id: &TodoId, change: impl FnOnce(Todo) -> Todo) {
        let repo = self.todo_repo(list_id);
        let Some(todo) = repo.all_todos().into_iter().find(|todo| &todo.id == todo_id) else {
            return;
        };
        repo.update_todo(change(todo));
    }
}

#[cfg(test)]
mod tests {
    use super::ChecklistService;
    use crate::model::list::ListId;
    use crate::model::seed::default_collection;
    use crate::model::todo::TodoId;
    use crate::repo::list_repo::ListRepository;
    use crate::storage::MemoryStorage;
    use crate::store::InitialValue;

    fn seeded_service() -> ChecklistService<MemoryStorage> {
        ChecklistService::new(ListRepository::open(
            MemoryStorage::new(),
            InitialValue::factory(default_collection),
        ))
    }

    #[test]
    fn overview_reports_seed_progress() {
        let service = seeded_service();
        let rows = service.overview();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Checklist Progetto");
        assert_eq!((rows[0].done, rows[0].total, rows[0].percentage), (1, 6, 17));
        assert_eq!((rows[1].done, rows[1].total, rows[1].percentage), (2, 3, 67));
    }

    #[test]
    fn toggle_flips_completion_both_ways() {
        let service = seeded_service();
        let list_id = ListId::from("l-2");
        let todo_id = TodoId::from("t-9");

        service.toggle_todo(&list_id, &todo_id);
        assert_eq!(service.overview()[1].percentage, 100);

        service.toggle_todo(&list_id, &todo_id);
        assert_eq!(service.overview()[1].percentage, 67);
    }

    #[test]
    fn rename_trims_and_ignores_blank_names() {
        let service = seeded_service();
        let list_id = ListId::from("l-1");

        service.rename_list(&list_id, "   ");
        assert_eq!(service.overview()[0].name, "Checklist Progetto");

        service.rename_list(&list_id, "  Exam  ");
        assert_eq!(service.overview()[0].name, "Exam");
        assert_eq!(service.todos(&list_id).len(), 6);
    }

    #[test]
    fn edit_text_keeps_completion() {
        let service = seeded_service();
        let list_id = ListId::from("l-1");
        let todo_id = TodoId::from("t-1");

        service.edit_todo_text(&list_id, &todo_id, " Send proposal ");

        let edited = service
            .todos(&list_id)
            .into_iter()
            .find(|todo| todo.id == todo_id)
            .unwrap();
        assert_eq!(edited.text, "Send proposal");
        assert!(edited.is_done());
    }

    #[test]
    fn create_todo_requires_existing_list() {
        let service = seeded_service();

        assert!(service
            .create_todo(&ListId::from("ghost"), "Milk")
            .is_none());
        assert!(service.create_todo(&ListId::from("l-1"), "  ").is_none());

        let id = service.create_todo(&ListId::from("l-1"), " Milk ").unwrap();
        let todos = service.todos(&ListId::from("l-1"));
        let created = todos.last().unwrap();
        assert_eq!(created.id, id);
        assert_eq!(created.text, "Milk");
        assert!(!created.is_done());
    }
}
