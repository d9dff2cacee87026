//! Earliest-fit slot search.
//!
//! # Algorithm
//!
//! Starting at `cursor = earliest_start`, repeat:
//! 1. If `cursor + duration` is past the deadline, the item is unplaceable.
//! 2. Before today's opening, jump to the opening.
//! 3. At or after today's closing, or if the item would end after it,
//!    jump to the next day's opening. Items are never split across days.
//! 4. If the candidate overlaps a busy interval (half-open test), resume at
//!    that interval's end plus the resume gap.
//! 5. Otherwise the candidate is the placement.
//!
//! The cursor only moves forward, so the deadline check in step 1 bounds
//! the loop.
//!
//! # Complexity
//! O(d + b) iterations for d days and b busy intervals up to the deadline,
//! each scanning the index prefix that starts before the candidate end.

use chrono::{NaiveDateTime, TimeDelta};
use tracing::trace;

use crate::models::{BusyIndex, Interval, WorkWindow};

/// Outcome of a slot search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementResult {
    Placed(Interval),
    Unplaceable,
}

impl PlacementResult {
    pub fn is_placed(&self) -> bool {
        matches!(self, PlacementResult::Placed(_))
    }

    pub fn interval(&self) -> Option<&Interval> {
        match self {
            PlacementResult::Placed(iv) => Some(iv),
            PlacementResult::Unplaceable => None,
        }
    }
}

/// Slot finder bound to a work window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotFinder {
    window: WorkWindow,
    resume_gap: TimeDelta,
}

impl SlotFinder {
    /// Creates a finder that resumes exactly at the end of a busy interval.
    pub fn new(window: WorkWindow) -> Self {
        Self {
            window,
            resume_gap: TimeDelta::zero(),
        }
    }

    /// Sets the spacer inserted after a conflicting busy interval.
    pub fn with_resume_gap(mut self, gap: TimeDelta) -> Self {
        self.resume_gap = gap.max(TimeDelta::zero());
        self
    }

    pub fn window(&self) -> &WorkWindow {
        &self.window
    }

    /// Finds the earliest valid, non-conflicting placement.
    ///
    /// Returns [`PlacementResult::Unplaceable`] when no single-day slot ends
    /// by `deadline`, when `duration` is not positive, or when it is longer
    /// than the work window itself.
    pub fn find(
        &self,
        duration: TimeDelta,
        deadline: NaiveDateTime,
        earliest_start: NaiveDateTime,
        busy: &BusyIndex,
    ) -> PlacementResult {
        if duration <= TimeDelta::zero()
            || duration > self.window.length()
            || earliest_start > deadline
        {
            return PlacementResult::Unplaceable;
        }

        let mut cursor = earliest_start;
        loop {
            let Some(proposed_end) = cursor.checked_add_signed(duration) else {
                return PlacementResult::Unplaceable;
            };
            if proposed_end > deadline {
                return PlacementResult::Unplaceable;
            }

            let day = cursor.date();
            let (Some(open), Some(close)) = (self.window.opens_on(day), self.window.closes_on(day))
            else {
                return PlacementResult::Unplaceable;
            };

            if cursor < open {
                cursor = open;
                continue;
            }

            if cursor >= close || proposed_end > close {
                match self.window.next_opening(cursor) {
                    Some(next) => {
                        cursor = next;
                        continue;
                    }
                    None => return PlacementResult::Unplaceable,
                }
            }

            let candidate = Interval::new(cursor, proposed_end);
            if let Some(conflict) = busy.first_conflict(&candidate, None) {
                trace!(
                    %cursor,
                    conflict_with = %conflict.item_id,
                    conflict_end = %conflict.interval.end,
                    "slot conflict"
                );
                match conflict.interval.end.checked_add_signed(self.resume_gap) {
                    Some(next) => {
                        cursor = next;
                        continue;
                    }
                    None => return PlacementResult::Unplaceable,
                }
            }

            return PlacementResult::Placed(candidate);
        }
    }
}

/// Finds the earliest slot with a zero resume gap.
pub fn find_slot(
    duration: TimeDelta,
    deadline: NaiveDateTime,
    earliest_start: NaiveDateTime,
    busy: &BusyIndex,
    window: &WorkWindow,
) -> PlacementResult {
    SlotFinder::new(*window).find(duration, deadline, earliest_start, busy)
}
