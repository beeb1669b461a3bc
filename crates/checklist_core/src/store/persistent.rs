//! Generic JSON-backed persistent snapshot store.
//!
//! # Invariants
//! - `load` never fails: unreadable or undecodable slots fall back to the
//!   initial value and are logged at `warn`.
//! - `set` with the snapshot already held is a no-op.

use crate::storage::SlotStorage;
use crate::store::{StoreError, StoreResult};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Value used when the slot holds nothing usable.
pub enum InitialValue<T> {
    /// Literal value.
    Value(T),
    /// Zero-argument factory, invoked only when the default is needed.
    Factory(Box<dyn FnOnce() -> T>),
}

impl<T> InitialValue<T> {
    pub fn factory(factory: impl FnOnce() -> T + 'static) -> Self {
        Self::Factory(Box::new(factory))
    }

    fn resolve(self) -> T {
        match self {
            Self::Value(value) => value,
            Self::Factory(factory) => factory(),
        }
    }
}

impl<T: Debug> Debug for InitialValue<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// Result of handing a snapshot to the store.
#[derive(Debug)]
#[must_use]
pub enum PersistOutcome {
    /// Snapshot became current and was written to the slot.
    Written,
    /// Snapshot was already current; nothing was written.
    Unchanged,
    /// Snapshot became current but the slot still holds older text.
    Stale(StoreError),
}

impl PersistOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written)
    }
}

/// In-memory snapshot bound to the storage slot `key`.
pub struct PersistentStore<T, S> {
    storage: S,
    key: String,
    current: RefCell<Arc<T>>,
}

impl<T, S> PersistentStore<T, S>
where
    T: Serialize + DeserializeOwned,
    S: SlotStorage,
{
    /// Loads the slot, falling back to `initial` when it is absent or corrupt.
    ///
    /// A default that replaced an empty or undecodable slot is written back
    /// once. A failed backend read also yields the default, but the slot is
    /// left untouched until the next `set`.
    pub fn load(storage: S, key: impl Into<String>, initial: InitialValue<T>) -> Self {
        let key = key.into();
        let (value, write_back) = match read_slot::<T, S>(&storage, &key) {
            Ok(Some(value)) => {
                info!("event=store_load module=store status=ok key={key} source=storage");
                (value, false)
            }
            Ok(None) => {
                info!("event=store_load module=store status=ok key={key} source=default");
                (initial.resolve(), true)
            }
            Err(err @ StoreError::Decode { .. }) => {
                warn!(
                    "event=store_load module=store status=fallback key={key} source=default error={err}"
                );
                (initial.resolve(), true)
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=fallback key={key} source=default write_back=skipped error={err}"
                );
                (initial.resolve(), false)
            }
        };

        Self::bind(storage, key, value, write_back)
    }

    /// Loads the slot, propagating read and decode failures.
    ///
    /// # Errors
    /// - `StoreError::Storage` when the backend read fails.
    /// - `StoreError::Decode` when the slot text does not match `T`.
    pub fn try_load(
        storage: S,
        key: impl Into<String>,
        initial: InitialValue<T>,
    ) -> StoreResult<Self> {
        let key = key.into();
        let (value, write_back) = match read_slot::<T, S>(&storage, &key)? {
            Some(value) => (value, false),
            None => (initial.resolve(), true),
        };
        Ok(Self::bind(storage, key, value, write_back))
    }

    fn bind(storage: S, key: String, value: T, write_back: bool) -> Self {
        let store = Self {
            storage,
            key,
            current: RefCell::new(Arc::new(value)),
        };
        if write_back {
            let snapshot = store.get();
            if let Err(err) = store.write(&snapshot) {
                warn!(
                    "event=store_persist module=store status=stale key={} error={err}",
                    store.key
                );
            }
        }
        store
    }

    /// Returns the current snapshot.
    pub fn get(&self) -> Arc<T> {
        Arc::clone(&self.current.borrow())
    }

    /// Makes `next` current and persists it if it is a new snapshot.
    pub fn set(&self, next: Arc<T>) -> PersistOutcome {
        if Arc::ptr_eq(&self.current.borrow(), &next) {
            return PersistOutcome::Unchanged;
        }

        *self.current.borrow_mut() = Arc::clone(&next);
        match self.write(&next) {
            Ok(()) => PersistOutcome::Written,
            Err(err) => {
                warn!(
                    "event=store_persist module=store status=stale key={} error={err}",
                    self.key
                );
                PersistOutcome::Stale(err)
            }
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn write(&self, value: &T) -> StoreResult<()> {
        let text = serde_json::to_string(value).map_err(StoreError::Encode)?;
        self.storage.set_item(&self.key, &text)?;
        debug!(
            "event=store_persist module=store status=ok key={} bytes={}",
            self.key,
            text.len()
        );
        Ok(())
    }
}

fn read_slot<T, S>(storage: &S, key: &str) -> StoreResult<Option<T>>
where
    T: DeserializeOwned,
    S: SlotStorage,
{
    let Some(text) = storage.get_item(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| StoreError::Decode {
            key: key.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::{InitialValue, PersistentStore};
    use crate::storage::{MemoryStorage, SlotStorage, StorageError, StorageResult};
    use crate::store::{PersistOutcome, StoreError};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::Arc;

    /// Slots that cannot be read; writes still land in `inner`.
    struct UnreadableStorage {
        inner: MemoryStorage,
    }

    impl SlotStorage for UnreadableStorage {
        fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Backend("disk unavailable".to_string()))
        }

        fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
            self.inner.set_item(key, value)
        }

        fn remove_item(&self, key: &str) -> StorageResult<()> {
            self.inner.remove_item(key)
        }
    }

    /// Slots that can be read but never written.
    struct ReadOnlyStorage {
        inner: MemoryStorage,
    }

    impl SlotStorage for ReadOnlyStorage {
        fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
            self.inner.get_item(key)
        }

        fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Backend("read-only".to_string()))
        }

        fn remove_item(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Backend("read-only".to_string()))
        }
    }

    #[test]
    fn failed_read_falls_back_without_overwriting_slot() {
        let storage = UnreadableStorage {
            inner: MemoryStorage::with_slot("numbers", "[1,2]"),
        };
        let store = PersistentStore::load(&storage, "numbers", InitialValue::Value(vec![9_u32]));

        assert_eq!(*store.get(), vec![9]);
        assert_eq!(
            storage.inner.get_item("numbers").unwrap().as_deref(),
            Some("[1,2]")
        );
    }

    #[test]
    fn failed_write_keeps_new_snapshot_current() {
        let storage = ReadOnlyStorage {
            inner: MemoryStorage::with_slot("numbers", "[1]"),
        };
        let store = PersistentStore::load(&storage, "numbers", InitialValue::Value(vec![]));

        let next = Arc::new(vec![1_u32, 2]);
        match store.set(Arc::clone(&next)) {
            PersistOutcome::Stale(StoreError::Storage(StorageError::Backend(message))) => {
                assert_eq!(message, "read-only")
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(Arc::ptr_eq(&store.get(), &next));
        assert_eq!(
            storage.inner.get_item("numbers").unwrap().as_deref(),
            Some("[1]")
        );
    }

    #[test]
    fn factory_runs_only_when_slot_is_empty() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let storage = MemoryStorage::with_slot("numbers", "[1,2]");

        let store: PersistentStore<Vec<u32>, _> = PersistentStore::load(
            &storage,
            "numbers",
            InitialValue::factory(move || {
                counter.set(counter.get() + 1);
                vec![9]
            }),
        );

        assert_eq!(*store.get(), vec![1, 2]);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn empty_slot_uses_literal_and_materializes_it() {
        let storage = MemoryStorage::new();
        let store = PersistentStore::load(&storage, "numbers", InitialValue::Value(vec![7_u32]));

        assert_eq!(*store.get(), vec![7]);
        assert_eq!(
            storage.get_item("numbers").unwrap().as_deref(),
            Some("[7]")
        );
    }

    #[test]
    fn corrupt_slot_falls_back_to_default() {
        let storage = MemoryStorage::with_slot("numbers", "{not json");
        let store = PersistentStore::load(&storage, "numbers", InitialValue::Value(vec![3_u32]));

        assert_eq!(*store.get(), vec![3]);
        assert_eq!(
            storage.get_item("numbers").unwrap().as_deref(),
            Some("[3]")
        );
    }

    #[test]
    fn try_load_reports_decode_errors() {
        let storage = MemoryStorage::with_slot("numbers", "\"text\"");
        let result =
            PersistentStore::<Vec<u32>, _>::try_load(&storage, "numbers", InitialValue::Value(vec![]));

        match result {
            Err(StoreError::Decode { key, .. }) => assert_eq!(key, "numbers"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected decode error"),
        }
    }

    #[test]
    fn set_writes_new_snapshots_and_skips_identical_ones() {
        let storage = MemoryStorage::new();
        let store = PersistentStore::load(&storage, "numbers", InitialValue::Value(vec![1_u32]));

        let current = store.get();
        assert!(!store.set(current).is_written());

        let next = Arc::new(vec![1, 2]);
        assert!(store.set(Arc::clone(&next)).is_written());
        assert!(Arc::ptr_eq(&store.get(), &next));
        assert_eq!(
            storage.get_item("numbers").unwrap().as_deref(),
            Some("[1,2]")
        );
    }
}
