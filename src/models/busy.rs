//! Busy-interval index.
//!
//! Sorted set of time ranges occupied by placed, non-completed work items.
//! The index is always derived from the work item store: it can be rebuilt
//! from scratch at any time with [`BusyIndex::from_items`].
//!
//! # Invariant
//! Entries are sorted by start. Ties keep insertion order.

use serde::{Deserialize, Serialize};

use super::{Interval, WorkItem};

/// An occupied interval and the item occupying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub item_id: String,
    pub interval: Interval,
}

/// Sorted collection of occupied intervals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BusyIndex {
    entries: Vec<BusyInterval>,
}

impl BusyIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index from every item that occupies time.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a WorkItem>) -> Self {
        let mut index = Self::new();
        for item in items {
            if let Some(interval) = item.busy_interval() {
                index.insert(item.id.clone(), interval);
            }
        }
        index
    }

    /// Inserts an interval, keeping entries sorted by start.
    pub fn insert(&mut self, item_id: impl Into<String>, interval: Interval) {
        let pos = self
            .entries
            .partition_point(|e| e.interval.start <= interval.start);
        self.entries.insert(
            pos,
            BusyInterval {
                item_id: item_id.into(),
                interval,
            },
        );
    }

    /// Removes the interval owned by `item_id`.
    pub fn remove(&mut self, item_id: &str) -> Option<Interval> {
        let pos = self.entries.iter().position(|e| e.item_id == item_id)?;
        Some(self.entries.remove(pos).interval)
    }

    /// Replaces (or inserts) the interval owned by `item_id`.
    pub fn replace(&mut self, item_id: &str, interval: Interval) -> Option<Interval> {
        let previous = self.remove(item_id);
        self.insert(item_id, interval);
        previous
    }

    /// Interval owned by `item_id`.
    pub fn get(&self, item_id: &str) -> Option<&Interval> {
        self.entries
            .iter()
            .find(|e| e.item_id == item_id)
            .map(|e| &e.interval)
    }

    /// First entry overlapping `candidate` (half-open test), in start order.
    ///
    /// Entries owned by `exclude` are skipped. The scan stops at the first
    /// entry starting at or after `candidate.end`.
    pub fn first_conflict(
        &self,
        candidate: &Interval,
        exclude: Option<&str>,
    ) -> Option<&BusyInterval> {
        self.entries
            .iter()
            .take_while(|e| e.interval.start < candidate.end)
            .filter(|e| exclude != Some(e.item_id.as_str()))
            .find(|e| e.interval.overlaps(candidate))
    }

    /// Whether any two entries overlap.
    pub fn has_overlaps(&self) -> bool {
        let mut max_end = None;
        for e in &self.entries {
            if let Some(end) = max_end {
                if e.interval.start < end {
                    return true;
                }
            }
            max_end = max_end.max(Some(e.interval.end));
        }
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &BusyInterval> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
