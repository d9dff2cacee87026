//! Greedy batch scheduler.
//!
//! # Algorithm
//!
//! 1. Keep only candidates: not completed, positive duration, unplaced, unlocked.
//! 2. Order by due date, then priority, then the rule engine's tie-breaker.
//! 3. Initialize one shared cursor from `now` (next window opening, or the
//!    next whole hour inside the window).
//! 4. For each candidate, search the earliest slot from the shared cursor.
//!    On success insert the interval into the busy index and advance the
//!    cursor to `start + 1 minute`; the slot search skips the new interval
//!    for later items. On failure record the item as unplaced and go on.
//!
//! The cursor advances to just past the placement start rather than its
//! end, so a later candidate still probes the gaps the index leaves open
//! after that point.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching

use chrono::{NaiveDateTime, TimeDelta};
use rand::Rng;
use tracing::{debug, info};

use super::slot::{PlacementResult, SlotFinder};
use crate::config::SchedulerConfig;
use crate::dispatching::{RuleEngine, SchedulingContext};
use crate::models::{BatchOutcome, BusyIndex, WorkItem, WorkWindow};

/// Greedy due-date-driven batch scheduler.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_calendar::models::{BusyIndex, WorkItem, WorkWindow};
/// use u_calendar::scheduler::BatchScheduler;
///
/// let day = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
/// let now = day.and_hms_opt(10, 0, 0).unwrap();
/// let due = day.and_hms_opt(20, 0, 0).unwrap();
/// let items = vec![WorkItem::new("essay", due).with_hours(2.0)];
///
/// let mut busy = BusyIndex::new();
/// let outcome = BatchScheduler::new(WorkWindow::new(9, 22)).schedule_all(&items, &mut busy, now);
/// assert_eq!(outcome.placed_count(), 1);
/// assert_eq!(busy.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct BatchScheduler {
    finder: SlotFinder,
    rule_engine: RuleEngine,
}

impl BatchScheduler {
    /// Creates a scheduler with due-then-priority ordering and random ties.
    pub fn new(window: WorkWindow) -> Self {
        Self {
            finder: SlotFinder::new(window),
            rule_engine: RuleEngine::due_then_priority(),
        }
    }

    /// Creates a scheduler from configuration.
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self {
            finder: SlotFinder::new(config.window).with_resume_gap(config.resume_gap()),
            rule_engine: RuleEngine::due_then_priority()
                .with_final_tie_breaker(config.tie_breaker),
        }
    }

    /// Replaces the rule engine used for ordering.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.rule_engine = engine;
        self
    }

    /// Replaces the slot finder.
    pub fn with_slot_finder(mut self, finder: SlotFinder) -> Self {
        self.finder = finder;
        self
    }

    pub fn window(&self) -> &WorkWindow {
        self.finder.window()
    }

    /// Places every candidate it can, inserting new intervals into `busy`.
    ///
    /// Non-candidates in `items` are ignored. Ordering ties are re-rolled
    /// with the thread RNG on every call.
    pub fn schedule_all<'a>(
        &self,
        items: impl IntoIterator<Item = &'a WorkItem>,
        busy: &mut BusyIndex,
        now: NaiveDateTime,
    ) -> BatchOutcome {
        self.schedule_all_with_rng(items, busy, now, &mut rand::rng())
    }

    /// Same as [`schedule_all`](Self::schedule_all) with a caller-supplied RNG.
    pub fn schedule_all_with_rng<'a, R: Rng + ?Sized>(
        &self,
        items: impl IntoIterator<Item = &'a WorkItem>,
        busy: &mut BusyIndex,
        now: NaiveDateTime,
        rng: &mut R,
    ) -> BatchOutcome {
        let candidates: Vec<&WorkItem> = items
            .into_iter()
            .filter(|item| item.is_batch_candidate())
            .collect();
        let mut outcome = BatchOutcome::new();

        if candidates.is_empty() {
            debug!("no batch candidates");
            return outcome;
        }

        let ctx = SchedulingContext::at_time(now);
        let order = self
            .rule_engine
            .sort_indices_with_rng(&candidates, &ctx, rng);

        let Some(mut cursor) = self.finder.window().initial_cursor(now) else {
            for &idx in &order {
                outcome.add_unplaced(candidates[idx].id.clone());
            }
            return outcome;
        };
        debug!(candidates = candidates.len(), %cursor, "batch scheduling started");

        for &idx in &order {
            let item = candidates[idx];
            match self.finder.find(item.duration(), item.due, cursor, busy) {
                PlacementResult::Placed(interval) => {
                    debug!(
                        item_id = %item.id,
                        start = %interval.start,
                        end = %interval.end,
                        "item placed"
                    );
                    cursor = interval
                        .start
                        .checked_add_signed(TimeDelta::minutes(1))
                        .unwrap_or(interval.end);
                    busy.insert(item.id.clone(), interval.clone());
                    outcome.add_placement(item.id.clone(), interval);
                }
                PlacementResult::Unplaceable => {
                    debug!(item_id = %item.id, due = %item.due, "no slot before due time");
                    outcome.add_unplaced(item.id.clone());
                }
            }
        }

        info!(
            placed = outcome.placed_count(),
            unplaced = outcome.unplaced_count(),
            "batch scheduling finished"
        );
        outcome
    }
}
