//! Scheduling context for dispatching rule evaluation.

use chrono::NaiveDateTime;

/// Runtime scheduling state passed to dispatching rules.
///
/// Holds the instant the batch run started; due-date rules score items
/// relative to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulingContext {
    /// Instant the run started.
    pub current_time: NaiveDateTime,
}

impl SchedulingContext {
    /// Creates a context at the given time.
    pub fn at_time(current_time: NaiveDateTime) -> Self {
        Self { current_time }
    }
}
