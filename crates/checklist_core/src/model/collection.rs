//! The persisted set of all lists.
//!
//! # Invariants
//! - Every mutation helper returns a new `Collection`; snapshots held by
//!   callers never change.
//! - Helpers return `None` when the target id is absent so callers can skip
//!   persistence and notification for no-op mutations.

use crate::model::list::{List, ListId};
use serde::{Deserialize, Serialize};

/// Ordered sequence of lists, the unit of persistence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    lists: Vec<List>,
}

impl Collection {
    pub fn new(lists: Vec<List>) -> Self {
        Self { lists }
    }

    pub fn lists(&self) -> &[List] {
        &self.lists
    }

    pub fn iter(&self) -> std::slice::Iter<'_, List> {
        self.lists.iter()
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn find(&self, id: &ListId) -> Option<&List> {
        self.lists.iter().find(|list| &list.id == id)
    }

    pub fn contains(&self, id: &ListId) -> bool {
        self.find(id).is_some()
    }

    /// Returns a copy with `list` appended.
    pub fn with_list_appended(&self, list: List) -> Self {
        let mut lists = self.lists.clone();
        lists.push(list);
        Self { lists }
    }

    /// Returns a copy where the list sharing `list.id` is replaced.
    pub fn with_list_replaced(&self, list: List) -> Option<Self> {
        let index = self.lists.iter().position(|item| item.id == list.id)?;
        let mut lists = self.lists.clone();
        lists[index] = list;
        Some(Self { lists })
    }

    /// Returns a copy without the list `id`.
    pub fn without_list(&self, id: &ListId) -> Option<Self> {
        self.find(id)?;
        let lists = self
            .lists
            .iter()
            .filter(|list| &list.id != id)
            .cloned()
            .collect();
        Some(Self { lists })
    }
}
