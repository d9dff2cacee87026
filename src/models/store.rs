//! Work item store and scheduler state.
//!
//! `SchedulerState` pairs the store with its derived busy index. All
//! writes go through [`SchedulerState::upsert`] so the index never
//! drifts from the items it is derived from.

use std::collections::BTreeMap;

use super::{BusyIndex, WorkItem};

/// In-memory work items keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkItemStore {
    items: BTreeMap<String, WorkItem>,
}

impl WorkItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store. A later item replaces an earlier one with the same id.
    pub fn from_items(items: impl IntoIterator<Item = WorkItem>) -> Self {
        Self {
            items: items.into_iter().map(|i| (i.id.clone(), i)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&WorkItem> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Inserts or replaces an item, returning the previous one.
    pub fn insert(&mut self, item: WorkItem) -> Option<WorkItem> {
        self.items.insert(item.id.clone(), item)
    }

    /// Items in id order.
    pub fn iter(&self) -> impl Iterator<Item = &WorkItem> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Work item store plus the busy index derived from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchedulerState {
    pub store: WorkItemStore,
    pub index: BusyIndex,
}

impl SchedulerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: impl IntoIterator<Item = WorkItem>) -> Self {
        let store = WorkItemStore::from_items(items);
        let index = BusyIndex::from_items(store.iter());
        Self { store, index }
    }

    /// Replaces every item and rebuilds the index from scratch.
    pub fn replace_all(&mut self, items: impl IntoIterator<Item = WorkItem>) {
        *self = Self::from_items(items);
    }

    /// Writes an item and refreshes its busy interval.
    pub fn upsert(&mut self, item: WorkItem) -> Option<WorkItem> {
        self.index.remove(&item.id);
        if let Some(interval) = item.busy_interval() {
            self.index.insert(item.id.clone(), interval);
        }
        self.store.insert(item)
    }

    pub fn get(&self, id: &str) -> Option<&WorkItem> {
        self.store.get(id)
    }
}
