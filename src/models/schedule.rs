//! Batch outcome (solution) model.
//!
//! The result of one batch scheduling run: new placements keyed by item id,
//! plus the ids for which no feasible slot existed before the deadline.
//! Unplaced items are an expected outcome, not an error.

use std::collections::BTreeMap;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use super::Interval;

/// Placements produced by one batch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// New placements (item id → interval).
    pub placements: BTreeMap<String, Interval>,
    /// Candidates with no feasible slot, in processing order.
    pub unplaced: Vec<String>,
}

impl BatchOutcome {
    /// Creates an empty outcome.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a placement.
    pub fn add_placement(&mut self, item_id: impl Into<String>, interval: Interval) {
        self.placements.insert(item_id.into(), interval);
    }

    /// Records an unplaceable candidate.
    pub fn add_unplaced(&mut self, item_id: impl Into<String>) {
        self.unplaced.push(item_id.into());
    }

    /// Placement for a given item.
    pub fn placement_for(&self, item_id: &str) -> Option<&Interval> {
        self.placements.get(item_id)
    }

    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    pub fn unplaced_count(&self) -> usize {
        self.unplaced.len()
    }

    /// Whether the run had no candidates at all.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty() && self.unplaced.is_empty()
    }

    /// Total time booked by this run.
    pub fn scheduled_time(&self) -> TimeDelta {
        self.placements
            .values()
            .fold(TimeDelta::zero(), |acc, iv| acc + iv.duration())
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

    #[test]
    fn test_outcome_counts() {
        let mut outcome = BatchOutcome::new();
        assert!(outcome.is_empty());

        outcome.add_placement("a", Interval::new(at(9), at(11)));
        outcome.add_placement("b", Interval::new(at(11), at(12)));
        outcome.add_unplaced("c");

        assert!(!outcome.is_empty());
        assert_eq!(outcome.placed_count(), 2);
        assert_eq!(outcome.unplaced_count(), 1);
        assert_eq!(outcome.scheduled_time(), TimeDelta::hours(3));
        assert_eq!(outcome.placement_for("a").map(|iv| iv.end), Some(at(11)));
        assert!(outcome.placement_for("c").is_none());
    }

    #[test]
    fn test_only_unplaced_is_not_empty() {
        let mut outcome = BatchOutcome::new();
        outcome.add_unplaced("x");
        assert!(!outcome.is_empty());
        assert_eq!(outcome.placed_count(), 0);
        assert_eq!(outcome.scheduled_time(), TimeDelta::zero());
    }
}
