//! Host-facing scheduler session.
//!
//! A session owns the in-memory state for one user: the work item store
//! and its busy index, guarded by a single mutex, plus the set of items
//! with an outstanding persistence call.
//!
//! Every change follows the same two phases:
//!
//! 1. **Apply locally.** Validate and apply under the lock; the calendar
//!    reflects the change at once.
//! 2. **Confirm or reconcile.** Persist outside the lock. If any call
//!    fails, discard local state and refetch everything from the store.
//!    If the refetch fails too, revert the local patches.
//!
//! Scheduling and validation never wait on I/O. Only the repository calls
//! suspend, and they run without holding the lock, so operations on
//! different items proceed concurrently. A second change to an item whose
//! first change is still being saved is rejected.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDateTime;
use futures::future::join_all;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::SchedulerConfig;
use crate::error::{PersistenceError, Rejection, SchedulerError, SchedulerResult};
use crate::models::{BatchOutcome, BusyInterval, SchedulerState, Status, WorkItem};
use crate::mutation::{try_apply_local, Action, Mutation, MutationPolicy, Patch};
use crate::notify::{Notification, Notifier};
use crate::persistence::WorkItemRepository;
use crate::scheduler::{BatchScheduler, ScheduleKpi};
use crate::validation::{deadline_violations, validate_items, ValidationError};

#[derive(Debug, Default)]
struct Inner {
    state: SchedulerState,
    /// Items with a persistence call in flight.
    pending: HashSet<String>,
}

/// Scheduling session for one user's work items.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use chrono::NaiveDate;
/// use u_calendar::config::SchedulerConfig;
/// use u_calendar::models::WorkItem;
/// use u_calendar::notify::TracingNotifier;
/// use u_calendar::persistence::InMemoryRepository;
/// use u_calendar::session::SchedulerSession;
///
/// # #[tokio::main]
/// # async fn main() {
/// let day = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
/// let repo = Arc::new(InMemoryRepository::new(vec![
///     WorkItem::new("essay", day.and_hms_opt(20, 0, 0).unwrap()).with_hours(2.0),
/// ]));
/// let session =
///     SchedulerSession::new(SchedulerConfig::default(), repo, Arc::new(TracingNotifier)).unwrap();
/// session.load().await.unwrap();
///
/// let outcome = session.auto_schedule(day.and_hms_opt(10, 0, 0).unwrap()).await.unwrap();
/// assert_eq!(outcome.placed_count(), 1);
/// # }
/// ```
pub struct SchedulerSession {
    config: SchedulerConfig,
    scheduler: BatchScheduler,
    policy: MutationPolicy,
    inner: Mutex<Inner>,
    repository: Arc<dyn WorkItemRepository>,
    notifier: Arc<dyn Notifier>,
}

impl SchedulerSession {
    /// Creates an empty session. Call [`load`](Self::load) to fill it.
    pub fn new(
        config: SchedulerConfig,
        repository: Arc<dyn WorkItemRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> SchedulerResult<Self> {
        config.validate()?;
        Ok(Self {
            scheduler: BatchScheduler::from_config(&config),
            policy: MutationPolicy::from_config(&config),
            config,
            inner: Mutex::new(Inner::default()),
            repository,
            notifier,
        })
    }

    /// Replaces the batch scheduler, e.g. to use a custom rule engine.
    pub fn with_scheduler(mut self, scheduler: BatchScheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Initial load from the repository.
    pub async fn load(&self) -> SchedulerResult<usize> {
        self.reconcile().await
    }

    /// Replaces local state with the repository's and rebuilds the index.
    ///
    /// Integrity problems in the fetched data are logged, not rejected.
    /// Returns the number of items loaded.
    pub async fn reconcile(&self) -> SchedulerResult<usize> {
        let items = self
            .repository
            .fetch_all_work_items()
            .await
            .map_err(SchedulerError::Fetch)?;

        if let Err(errors) = validate_items(&items, &self.config.window) {
            for e in &errors {
                warn!(item_id = %e.item_id, kind = ?e.kind, "{}", e.message);
            }
        }

        let count = items.len();
        self.inner.lock().await.state.replace_all(items);
        info!(items = count, "state reconciled from repository");
        self.notifier.notify(&Notification::Reconciled { items: count });
        Ok(count)
    }

    /// Places every eligible backlog item and persists the placements.
    ///
    /// Placements appear locally before any save completes. All saves are
    /// issued concurrently; if any fails the whole state is refetched.
    /// Items that find no slot are listed in the outcome, not errors.
    pub async fn auto_schedule(&self, now: NaiveDateTime) -> SchedulerResult<BatchOutcome> {
        let (outcome, patches, kpi) = {
            let mut guard = self.inner.lock().await;
            let Inner { state, pending } = &mut *guard;

            let outcome = {
                let candidates = state.store.iter().filter(|item| !pending.contains(&item.id));
                self.scheduler.schedule_all(candidates, &mut state.index, now)
            };

            let mut patches = Vec::with_capacity(outcome.placed_count());
            for (id, interval) in &outcome.placements {
                let Some(before) = state.get(id).cloned() else {
                    continue;
                };
                patches.push(Patch::placement(state, before, interval.start));
                pending.insert(id.clone());
            }

            let kpi = ScheduleKpi::calculate(&outcome, &state.store);
            (outcome, patches, kpi)
        };

        if patches.is_empty() {
            let notification = if outcome.unplaced.is_empty() {
                Notification::NothingToSchedule
            } else {
                Notification::NoItemsPlaced {
                    unplaced: outcome.unplaced.clone(),
                }
            };
            self.notifier.notify(&notification);
            return Ok(outcome);
        }

        let results = join_all(
            patches
                .iter()
                .map(|p| self.repository.update_work_item(&p.item_id, &p.update)),
        )
        .await;
        self.confirm_or_reconcile(Action::AutoSchedule, &patches, results)
            .await?;

        info!(
            placed = kpi.placed,
            unplaced = kpi.unplaced,
            scheduled_hours = kpi.scheduled_hours,
            min_slack_hours = ?kpi.min_slack_hours,
            "auto-schedule saved"
        );
        self.notifier.notify(&Notification::Scheduled {
            placed: outcome.placed_count(),
            unplaced: outcome.unplaced.clone(),
        });
        Ok(outcome)
    }

    /// Drops an unscheduled item at `target`.
    pub async fn place_by_drop(&self, item_id: &str, target: NaiveDateTime) -> SchedulerResult<WorkItem> {
        self.apply(item_id, Mutation::PlaceByDrop { target }).await
    }

    /// Moves a placed, unlocked item to `target`.
    pub async fn move_item(&self, item_id: &str, target: NaiveDateTime) -> SchedulerResult<WorkItem> {
        self.apply(item_id, Mutation::Move { target }).await
    }

    /// Returns a placed item to the backlog. Requires user confirmation.
    pub async fn remove_placement(&self, item_id: &str, confirmed: bool) -> SchedulerResult<WorkItem> {
        self.apply(item_id, Mutation::Remove { confirmed }).await
    }

    pub async fn set_locked(&self, item_id: &str, locked: bool) -> SchedulerResult<WorkItem> {
        self.apply(item_id, Mutation::SetLocked(locked)).await
    }

    /// Completed ↔ pending. The placement is kept either way.
    pub async fn toggle_status(&self, item_id: &str) -> SchedulerResult<WorkItem> {
        self.apply(item_id, Mutation::ToggleStatus).await
    }

    pub async fn set_status(&self, item_id: &str, status: Status) -> SchedulerResult<WorkItem> {
        self.apply(item_id, Mutation::SetStatus(status)).await
    }

    /// Placed items whose placement now ends after their due time.
    ///
    /// Report only; placements are left as they are.
    pub async fn revalidate_deadlines(&self) -> Vec<ValidationError> {
        let violations = {
            let inner = self.inner.lock().await;
            deadline_violations(inner.state.store.iter())
        };
        for v in &violations {
            warn!(item_id = %v.item_id, "{}", v.message);
        }
        violations
    }

    /// Copy of every item in id order.
    pub async fn snapshot(&self) -> Vec<WorkItem> {
        self.inner.lock().await.state.store.iter().cloned().collect()
    }

    pub async fn get(&self, item_id: &str) -> Option<WorkItem> {
        self.inner.lock().await.state.get(item_id).cloned()
    }

    /// Occupied intervals in start order.
    pub async fn busy_intervals(&self) -> Vec<BusyInterval> {
        self.inner.lock().await.state.index.iter().cloned().collect()
    }

    /// Whether a save is outstanding for the item.
    pub async fn is_pending(&self, item_id: &str) -> bool {
        self.inner.lock().await.pending.contains(item_id)
    }

    async fn apply(&self, item_id: &str, mutation: Mutation) -> SchedulerResult<WorkItem> {
        let action = mutation.action();

        let patch = {
            let mut inner = self.inner.lock().await;
            let applied = if inner.pending.contains(item_id) {
                Err(Rejection::PendingChange(item_id.to_string()))
            } else {
                try_apply_local(&mut inner.state, item_id, &mutation, &self.policy)
            };
            match applied {
                Ok(patch) => {
                    inner.pending.insert(patch.item_id.clone());
                    patch
                }
                Err(reason) => {
                    warn!(item_id, %action, %reason, "change rejected");
                    self.notifier.notify(&Notification::Rejected {
                        action,
                        reason: reason.clone(),
                    });
                    return Err(reason.into());
                }
            }
        };

        let result = self
            .repository
            .update_work_item(&patch.item_id, &patch.update)
            .await;
        self.confirm_or_reconcile(action, std::slice::from_ref(&patch), vec![result])
            .await?;

        info!(item_id, %action, "change saved");
        self.notifier.notify(&Notification::Applied {
            action,
            item_id: item_id.to_string(),
        });
        Ok(patch.after)
    }

    /// Second phase of every change.
    ///
    /// On success the patches stand. On any failure the state is refetched;
    /// the patches are reverted only if that refetch fails as well. Either
    /// way the items are no longer pending afterwards.
    async fn confirm_or_reconcile(
        &self,
        action: Action,
        patches: &[Patch],
        results: Vec<Result<(), PersistenceError>>,
    ) -> SchedulerResult<()> {
        let mut first_error = None;
        for (patch, result) in patches.iter().zip(results) {
            if let Err(e) = result {
                warn!(item_id = %patch.item_id, %action, error = %e, "save failed");
                first_error.get_or_insert(e);
            }
        }

        let Some(source) = first_error else {
            self.clear_pending(patches).await;
            debug!(%action, count = patches.len(), "changes confirmed");
            return Ok(());
        };

        self.notifier
            .notify(&Notification::PersistenceFailed { action });
        if let Err(e) = self.reconcile().await {
            warn!(%action, error = %e, "reconciliation failed; reverting local changes");
            let mut inner = self.inner.lock().await;
            for patch in patches.iter().rev() {
                patch.revert(&mut inner.state);
            }
        }
        self.clear_pending(patches).await;

        Err(SchedulerError::Persistence { action, source })
    }

    async fn clear_pending(&self, patches: &[Patch]) {
        let mut inner = self.inner.lock().await;
        for patch in patches {
            inner.pending.remove(&patch.item_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::TieBreaker;
    use crate::models::{Interval, WorkItemUpdate};
    use crate::persistence::InMemoryRepository;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Semaphore;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn config() -> SchedulerConfig {
        SchedulerConfig {
            tie_breaker: TieBreaker::ById,
            ..Default::default()
        }
    }

    fn items() -> Vec<WorkItem> {
        vec![
            WorkItem::new("busy", at(12, 18))
                .with_hours(2.0)
                .with_placement(at(10, 13)),
            WorkItem::new("a", at(11, 18)).with_hours(2.0),
            WorkItem::new("b", at(12, 18)).with_hours(1.0),
        ]
    }

    type Seen = Arc<StdMutex<Vec<Notification>>>;

    async fn session_with(repo: Arc<dyn WorkItemRepository>) -> (SchedulerSession, Seen) {
        let seen: Seen = Arc::default();
        let sink = {
            let seen = Arc::clone(&seen);
            move |n: &Notification| seen.lock().unwrap().push(n.clone())
        };
        let session = SchedulerSession::new(config(), repo, Arc::new(sink)).unwrap();
        session.load().await.unwrap();
        seen.lock().unwrap().clear();
        (session, seen)
    }

    async fn setup() -> (SchedulerSession, Arc<InMemoryRepository>, Seen) {
        let repo = Arc::new(InMemoryRepository::new(items()));
        let (session, seen) = session_with(repo.clone()).await;
        (session, repo, seen)
    }

    /// Holds every update until a permit is released.
    #[derive(Debug)]
    struct GatedRepository {
        inner: InMemoryRepository,
        gate: Semaphore,
    }

    #[async_trait]
    impl WorkItemRepository for GatedRepository {
        async fn update_work_item(
            &self,
            id: &str,
            update: &WorkItemUpdate,
        ) -> Result<(), PersistenceError> {
            let permit = self
                .gate
                .acquire()
                .await
                .map_err(|e| PersistenceError::Unavailable(e.to_string()))?;
            permit.forget();
            self.inner.update_work_item(id, update).await
        }

        async fn fetch_all_work_items(&self) -> Result<Vec<WorkItem>, PersistenceError> {
            self.inner.fetch_all_work_items().await
        }
    }

    #[tokio::test]
    async fn test_load() {
        let (session, _repo, _seen) = setup().await;
        assert_eq!(session.snapshot().await.len(), 3);
        let busy = session.busy_intervals().await;
        assert_eq!(busy.len(), 1);
        assert_eq!(busy[0].item_id, "busy");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut bad = config();
        bad.window.start_hour = 23;
        let repo = Arc::new(InMemoryRepository::new(Vec::new()));
        assert!(matches!(
            SchedulerSession::new(bad, repo, Arc::new(crate::notify::TracingNotifier)),
            Err(SchedulerError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_auto_schedule_persists_placements() {
        let (session, repo, seen) = setup().await;
        let outcome = session.auto_schedule(at(10, 10)).await.unwrap();

        // a (due day 11) first: 10:00–12:00; b then resumes after busy.
        assert_eq!(
            outcome.placement_for("a"),
            Some(&Interval::new(at(10, 10), at(10, 12)))
        );
        assert_eq!(
            outcome.placement_for("b"),
            Some(&Interval::new(at(10, 12), at(10, 13)))
        );
        assert_eq!(repo.update_calls(), 2);
        assert_eq!(repo.get("a").await.unwrap().placement_start, Some(at(10, 10)));
        assert_eq!(session.get("b").await.unwrap().placement_start, Some(at(10, 12)));
        assert!(!session.is_pending("a").await);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![Notification::Scheduled {
                placed: 2,
                unplaced: vec![]
            }]
        );
    }

    #[tokio::test]
    async fn test_auto_schedule_twice_is_noop() {
        let (session, repo, seen) = setup().await;
        session.auto_schedule(at(10, 10)).await.unwrap();
        let busy = session.busy_intervals().await;

        let second = session.auto_schedule(at(10, 10)).await.unwrap();
        assert!(second.is_empty());
        assert_eq!(session.busy_intervals().await, busy);
        assert_eq!(repo.update_calls(), 2);
        assert_eq!(
            seen.lock().unwrap().last(),
            Some(&Notification::NothingToSchedule)
        );
    }

    #[tokio::test]
    async fn test_auto_schedule_nothing_placed() {
        let repo = Arc::new(InMemoryRepository::new(vec![
            WorkItem::new("late", at(10, 11)).with_hours(3.0)
        ]));
        let (session, seen) = session_with(repo.clone()).await;

        let outcome = session.auto_schedule(at(10, 10)).await.unwrap();
        assert_eq!(outcome.unplaced, vec!["late".to_string()]);
        assert_eq!(repo.update_calls(), 0);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![Notification::NoItemsPlaced {
                unplaced: vec!["late".into()]
            }]
        );
    }

    #[tokio::test]
    async fn test_auto_schedule_failure_reconciles() {
        let (session, repo, seen) = setup().await;
        repo.fail_updates_for("b").await;

        let err = session.auto_schedule(at(10, 10)).await.unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::Persistence {
                action: Action::AutoSchedule,
                ..
            }
        ));

        // a was saved, b was not: local state matches the repository again.
        assert_eq!(session.get("a").await.unwrap().placement_start, Some(at(10, 10)));
        assert!(!session.get("b").await.unwrap().is_placed());
        assert!(!session.is_pending("b").await);

        let seen = seen.lock().unwrap();
        assert!(seen.contains(&Notification::PersistenceFailed {
            action: Action::AutoSchedule
        }));
        assert!(seen.contains(&Notification::Reconciled { items: 3 }));
    }

    #[tokio::test]
    async fn test_failed_refetch_reverts_patches() {
        let (session, repo, _seen) = setup().await;
        repo.set_updates_unavailable(true);
        repo.set_fetch_unavailable(true);

        assert!(session.auto_schedule(at(10, 10)).await.is_err());
        assert!(!session.get("a").await.unwrap().is_placed());
        assert!(!session.get("b").await.unwrap().is_placed());
        assert_eq!(session.busy_intervals().await.len(), 1);
    }

    #[tokio::test]
    async fn test_place_by_drop() {
        let (session, repo, seen) = setup().await;
        let item = session.place_by_drop("a", at(10, 9)).await.unwrap();

        assert_eq!(item.placement_start, Some(at(10, 9)));
        assert_eq!(repo.get("a").await.unwrap().placement_start, Some(at(10, 9)));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![Notification::Applied {
                action: Action::Place,
                item_id: "a".into()
            }]
        );
    }

    #[tokio::test]
    async fn test_rejection_changes_nothing() {
        let (session, repo, seen) = setup().await;
        let before = session.snapshot().await;

        let err = session.place_by_drop("a", at(10, 12)).await.unwrap_err();
        assert!(matches!(err, SchedulerError::Rejected(Rejection::Overlap { .. })));
        assert_eq!(session.snapshot().await, before);
        assert_eq!(repo.update_calls(), 0);
        assert!(seen.lock().unwrap()[0].is_failure());
    }

    #[tokio::test]
    async fn test_move_failure_reconciles() {
        let (session, repo, seen) = setup().await;
        repo.set_updates_unavailable(true);

        let err = session.move_item("busy", at(10, 16)).await.unwrap_err();
        assert!(err.to_string().starts_with("failed to save move"));
        assert_eq!(session.get("busy").await.unwrap().placement_start, Some(at(10, 13)));
        assert_eq!(
            seen.lock().unwrap().first(),
            Some(&Notification::PersistenceFailed {
                action: Action::Move
            })
        );
    }

    #[tokio::test]
    async fn test_lock_remove_and_toggle() {
        let (session, repo, _seen) = setup().await;

        session.set_locked("busy", true).await.unwrap();
        assert!(matches!(
            session.move_item("busy", at(10, 16)).await,
            Err(SchedulerError::Rejected(Rejection::Locked(_)))
        ));

        assert!(session.remove_placement("busy", false).await.is_err());
        let removed = session.remove_placement("busy", true).await.unwrap();
        assert!(!removed.is_placed());
        assert!(!removed.locked);
        assert!(session.busy_intervals().await.is_empty());

        session.place_by_drop("a", at(10, 9)).await.unwrap();
        let done = session.toggle_status("a").await.unwrap();
        assert_eq!(done.status, Status::Completed);
        assert!(session.busy_intervals().await.is_empty());
        assert_eq!(repo.get("a").await.unwrap().status, Status::Completed);
        assert_eq!(repo.get("a").await.unwrap().placement_start, Some(at(10, 9)));

        session.set_status("a", Status::Pending).await.unwrap();
        assert_eq!(session.busy_intervals().await.len(), 1);
    }

    #[tokio::test]
    async fn test_pending_change_rejected() {
        let repo = Arc::new(GatedRepository {
            inner: InMemoryRepository::new(items()),
            gate: Semaphore::new(0),
        });
        let (session, _seen) = session_with(repo.clone()).await;
        let session = Arc::new(session);

        let first = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.move_item("busy", at(10, 16)).await }
        });
        while !session.is_pending("busy").await {
            tokio::task::yield_now().await;
        }

        let err = session.set_locked("busy", true).await.unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::Rejected(Rejection::PendingChange(_))
        ));
        assert_eq!(err.to_string(), "item busy has a pending change");

        // Other items are not blocked by the pending save.
        assert!(matches!(
            session.move_item("a", at(10, 9)).await,
            Err(SchedulerError::Rejected(Rejection::NotScheduled(_)))
        ));

        repo.gate.add_permits(1);
        first.await.unwrap().unwrap();
        assert!(!session.is_pending("busy").await);

        repo.gate.add_permits(1);
        assert!(session.set_locked("busy", true).await.is_ok());
    }

    #[tokio::test]
    async fn test_auto_schedule_skips_pending_items() {
        let repo = Arc::new(GatedRepository {
            inner: InMemoryRepository::new(items()),
            gate: Semaphore::new(0),
        });
        let (session, _seen) = session_with(repo.clone()).await;
        let session = Arc::new(session);

        // a stays a backlog candidate but has a save in flight.
        let unlock_a = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.set_locked("a", false).await }
        });
        while !session.is_pending("a").await {
            tokio::task::yield_now().await;
        }
        let batch = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.auto_schedule(at(10, 10)).await }
        });
        while !session.is_pending("b").await {
            tokio::task::yield_now().await;
        }

        repo.gate.add_permits(2);
        unlock_a.await.unwrap().unwrap();
        let outcome = batch.await.unwrap().unwrap();
        assert!(outcome.placement_for("a").is_none());
        assert!(!outcome.unplaced.contains(&"a".to_string()));
        assert_eq!(outcome.placement_for("b").map(|iv| iv.start), Some(at(10, 10)));
    }

    #[tokio::test]
    async fn test_concurrent_changes_on_different_items() {
        let (session, repo, _seen) = setup().await;
        let (a, b) = tokio::join!(
            session.place_by_drop("a", at(10, 9)),
            session.place_by_drop("b", at(10, 16)),
        );
        a.unwrap();
        b.unwrap();
        assert_eq!(repo.update_calls(), 2);
        assert_eq!(session.busy_intervals().await.len(), 3);
    }

    #[tokio::test]
    async fn test_load_tolerates_huge_estimates() {
        let repo = Arc::new(InMemoryRepository::new(vec![
            WorkItem::new("placed", at(12, 18))
                .with_hours(1e300)
                .with_placement(at(10, 9)),
            WorkItem::new("backlog", at(12, 18)).with_hours(1e300),
        ]));
        let (session, _seen) = session_with(repo).await;
        assert_eq!(session.snapshot().await.len(), 2);
        assert!(session.busy_intervals().await.is_empty());

        let outcome = session.auto_schedule(at(10, 10)).await.unwrap();
        assert_eq!(outcome.unplaced, vec!["backlog".to_string()]);
    }

    #[tokio::test]
    async fn test_revalidate_deadlines() {
        let (session, repo, _seen) = setup().await;
        assert!(session.revalidate_deadlines().await.is_empty());

        // Due moved earlier than the existing 13:00–15:00 placement ends.
        let mut edited = repo.get("busy").await.unwrap();
        edited.due = at(10, 14);
        repo.put(edited).await;
        session.reconcile().await.unwrap();

        let violations = session.revalidate_deadlines().await;
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].item_id, "busy");
        assert!(session.get("busy").await.unwrap().is_placed());
    }
}
