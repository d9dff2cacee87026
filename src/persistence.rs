//! Persistence collaborator interface.
//!
//! The durable store is external. The scheduler issues one
//! `update_work_item` per changed item after applying the change locally,
//! and falls back to `fetch_all_work_items` to resynchronise after any
//! failure.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::PersistenceError;
use crate::models::{WorkItem, WorkItemUpdate};

/// Durable store for work items.
#[async_trait]
pub trait WorkItemRepository: Send + Sync {
    /// Persists a partial update of one item.
    async fn update_work_item(
        &self,
        id: &str,
        update: &WorkItemUpdate,
    ) -> Result<(), PersistenceError>;

    /// Returns the authoritative state of every item.
    async fn fetch_all_work_items(&self) -> Result<Vec<WorkItem>, PersistenceError>;
}

/// Repository kept in memory, with switchable failure modes.
///
/// Useful for embedding without a backend and for exercising the
/// reconciliation path.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    items: Mutex<BTreeMap<String, WorkItem>>,
    failing_ids: Mutex<HashSet<String>>,
    updates_unavailable: AtomicBool,
    fetch_unavailable: AtomicBool,
    update_calls: AtomicUsize,
}

impl InMemoryRepository {
    pub fn new(items: impl IntoIterator<Item = WorkItem>) -> Self {
        Self {
            items: Mutex::new(items.into_iter().map(|i| (i.id.clone(), i)).collect()),
            ..Default::default()
        }
    }

    /// Makes every subsequent update fail (or succeed again).
    pub fn set_updates_unavailable(&self, unavailable: bool) {
        self.updates_unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Makes every subsequent fetch fail (or succeed again).
    pub fn set_fetch_unavailable(&self, unavailable: bool) {
        self.fetch_unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Rejects updates for one item.
    pub async fn fail_updates_for(&self, id: impl Into<String>) {
        self.failing_ids.lock().await.insert(id.into());
    }

    /// Stored copy of an item.
    pub async fn get(&self, id: &str) -> Option<WorkItem> {
        self.items.lock().await.get(id).cloned()
    }

    /// Replaces or adds an item directly, bypassing the scheduler.
    pub async fn put(&self, item: WorkItem) {
        self.items.lock().await.insert(item.id.clone(), item);
    }

    /// Number of update calls received, failed ones included.
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WorkItemRepository for InMemoryRepository {
    async fn update_work_item(
        &self,
        id: &str,
        update: &WorkItemUpdate,
    ) -> Result<(), PersistenceError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);

        if self.updates_unavailable.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable("updates disabled".into()));
        }
        if self.failing_ids.lock().await.contains(id) {
            return Err(PersistenceError::Rejected(format!("update of {id} refused")));
        }

        let mut items = self.items.lock().await;
        let item = items
            .get_mut(id)
            .ok_or_else(|| PersistenceError::NotFound(id.to_string()))?;
        item.apply(update);
        debug!(item_id = %id, ?update, "work item updated");
        Ok(())
    }

    async fn fetch_all_work_items(&self) -> Result<Vec<WorkItem>, PersistenceError> {
        if self.fetch_unavailable.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable("fetch disabled".into()));
        }
        Ok(self.items.lock().await.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 10)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_update_applies_fields() {
        let repo = InMemoryRepository::new(vec![WorkItem::new("a", at(20)).with_hours(1.0)]);
        repo.update_work_item("a", &WorkItemUpdate::placement(at(9)))
            .await
            .unwrap();
        assert_eq!(repo.get("a").await.unwrap().placement_start, Some(at(9)));
        assert_eq!(repo.update_calls(), 1);
    }

    #[tokio::test]
    async fn test_update_unknown_item_fails() {
        let repo = InMemoryRepository::new(Vec::new());
        let err = repo
            .update_work_item("ghost", &WorkItemUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err, PersistenceError::NotFound("ghost".into()));
    }

    #[tokio::test]
    async fn test_failure_modes() {
        let repo = InMemoryRepository::new(vec![
            WorkItem::new("a", at(20)),
            WorkItem::new("b", at(20)),
        ]);
        repo.fail_updates_for("a").await;
        assert!(repo.update_work_item("a", &WorkItemUpdate::default()).await.is_err());
        assert!(repo.update_work_item("b", &WorkItemUpdate::default()).await.is_ok());

        repo.set_updates_unavailable(true);
        assert!(matches!(
            repo.update_work_item("b", &WorkItemUpdate::default()).await,
            Err(PersistenceError::Unavailable(_))
        ));

        repo.set_fetch_unavailable(true);
        assert!(repo.fetch_all_work_items().await.is_err());
        repo.set_fetch_unavailable(false);
        assert_eq!(repo.fetch_all_work_items().await.unwrap().len(), 2);
    }
}
