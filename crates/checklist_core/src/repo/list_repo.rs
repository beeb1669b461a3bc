//! List repository and collection-change notifications.
//!
//! # Responsibility
//! - Own the current `Collection` snapshot and its persistent slot.
//! - Notify registered listeners after each effective mutation.
//!
//! # Invariants
//! - Each effective mutation installs a brand-new snapshot, persists it, then
//!   notifies listeners with that same snapshot.
//! - Listener callbacks run with no internal borrow held, so they may read
//!   the repository.

use crate::model::collection::Collection;
use crate::model::list::{List, ListId};
use crate::repo::todo_repo::TodoRepository;
use crate::storage::SlotStorage;
use crate::store::{InitialValue, PersistOutcome, PersistentStore};
use log::{debug, warn};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

/// Storage slot holding the serialized collection.
pub const LISTS_STORAGE_KEY: &str = "lists";

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&Arc<Collection>)>;

/// CRUD access to the collection of lists.
pub struct ListRepository<S: SlotStorage> {
    store: PersistentStore<Collection, S>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_subscription: Cell<u64>,
}

impl<S: SlotStorage> ListRepository<S> {
    /// Loads the collection from `storage`, using `initial` when nothing
    /// usable is persisted.
    pub fn open(storage: S, initial: InitialValue<Collection>) -> Self {
        Self::from_store(PersistentStore::load(storage, LISTS_STORAGE_KEY, initial))
    }

    pub fn from_store(store: PersistentStore<Collection, S>) -> Self {
        Self {
            store,
            listeners: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
        }
    }

    /// Current snapshot.
    pub fn all_lists(&self) -> Arc<Collection> {
        self.store.get()
    }

    pub fn get_list(&self, id: &ListId) -> Option<List> {
        self.store.get().find(id).cloned()
    }

    /// Appends a new empty list named `name.trim()`.
    ///
    /// Returns the generated id, or `None` when the trimmed name is blank.
    pub fn add_list(&self, name: &str) -> Option<ListId> {
        let name = name.trim();
        if name.is_empty() {
            debug!("event=list_add module=repo status=ignored reason=blank_name");
            return None;
        }

        let list = List::new(name);
        let id = list.id.clone();
        self.apply("list_add", |current| Some(current.with_list_appended(list)));
        Some(id)
    }

    /// Replaces the list sharing `updated.id`.
    ///
    /// Unknown ids, blank names, blank todo text and duplicate todo ids are
    /// ignored.
    pub fn update_list(&self, updated: List) {
        if updated.name.trim().is_empty() {
            debug!("event=list_update module=repo status=ignored reason=blank_name");
            return;
        }
        if let Some(reason) = updated.todo_violation() {
            debug!("event=list_update module=repo status=ignored reason={reason}");
            return;
        }
        self.apply("list_update", |current| current.with_list_replaced(updated));
    }

    /// Removes the list `id`; unknown ids are ignored.
    pub fn delete_list(&self, id: &ListId) {
        self.apply("list_delete", |current| current.without_list(id));
    }

    /// Returns a todo repository bound to `list_id`.
    pub fn todos(&self, list_id: ListId) -> TodoRepository<'_, S> {
        TodoRepository::new(self, list_id)
    }

    /// Registers `listener` for collection changes.
    pub fn subscribe(&self, listener: impl Fn(&Arc<Collection>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        let listener: Listener = Rc::new(listener);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    /// Removes a listener; returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn storage(&self) -> &S {
        self.store.storage()
    }

    fn apply(
        &self,
        operation: &'static str,
        mutate: impl FnOnce(&Collection) -> Option<Collection>,
    ) {
        let current = self.store.get();
        let Some(next) = mutate(current.as_ref()) else {
            debug!("event={operation} module=repo status=ignored reason=not_found");
            return;
        };

        let next = Arc::new(next);
        match self.store.set(Arc::clone(&next)) {
            PersistOutcome::Written | PersistOutcome::Unchanged => {
                debug!(
                    "event={operation} module=repo status=ok list_count={}",
                    next.len()
                );
            }
            PersistOutcome::Stale(err) => {
                warn!("event={operation} module=repo status=stale error={err}");
            }
        }

        self.notify(&next);
    }

    fn notify(&self, snapshot: &Arc<Collection>) {
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ListRepository;
    use crate::model::collection::Collection;
    use crate::storage::MemoryStorage;
    use crate::store::InitialValue;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn empty_repo() -> ListRepository<MemoryStorage> {
        ListRepository::open(MemoryStorage::new(), InitialValue::Value(Collection::default()))
    }

    #[test]
    fn listeners_see_each_effective_mutation() {
        let repo = empty_repo();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let subscription = repo.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.len()));

        let id = repo.add_list("Groceries").unwrap();
        repo.add_list("   ");
        repo.delete_list(&id);
        repo.delete_list(&id);

        assert_eq!(*seen.borrow(), vec![1, 0]);
        assert!(repo.unsubscribe(subscription));
        assert!(!repo.unsubscribe(subscription));

        repo.add_list("Chores");
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn prior_snapshots_are_not_mutated() {
        let repo = empty_repo();
        let before = repo.all_lists();

        repo.add_list("Groceries");

        assert!(before.is_empty());
        assert_eq!(repo.all_lists().len(), 1);
    }
}
