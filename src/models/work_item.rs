//! Work item model.
//!
//! A work item is a unit of due-dated work that the calendar scheduler
//! places into a single contiguous block inside the daily work window.
//!
//! # Lifecycle
//! Items are created by the host with no placement and `locked = false`.
//! The batch scheduler may set a placement; interactive mutations may set
//! or clear it, toggle the lock, or change status. Items are never deleted
//! here.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use super::Interval;

/// Work item priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Numeric rank (higher = more important).
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

/// Work item status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// A schedulable unit of work.
///
/// # Time Representation
/// Instants are naive local date-times on a single clock. The estimated
/// duration is kept in fractional hours and converted to whole minutes
/// for all calendar arithmetic (see [`WorkItem::duration`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Unique item identifier.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Owning group (course, project, ...) reference.
    pub group_id: String,
    /// Instant by which the work must be finished.
    pub due: NaiveDateTime,
    /// Scheduling priority.
    pub priority: Priority,
    /// Estimated effort in hours. Must be > 0 to be schedulable.
    pub estimated_hours: f64,
    /// Workflow status.
    pub status: Status,
    /// Placement start. `None` = unscheduled.
    pub placement_start: Option<NaiveDateTime>,
    /// Excluded from automatic and drag-based relocation while set.
    pub locked: bool,
}

impl WorkItem {
    /// Creates a pending, unscheduled, unlocked item.
    pub fn new(id: impl Into<String>, due: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            group_id: String::new(),
            due,
            priority: Priority::default(),
            estimated_hours: 0.0,
            status: Status::default(),
            placement_start: None,
            locked: false,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the owning group.
    pub fn with_group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = group_id.into();
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the estimated duration in hours.
    pub fn with_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = hours;
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Sets the placement start.
    pub fn with_placement(mut self, start: NaiveDateTime) -> Self {
        self.placement_start = Some(start);
        self
    }

    /// Sets the lock flag.
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Estimated duration rounded to whole minutes.
    ///
    /// Non-finite or negative estimates yield a zero duration. Estimates
    /// beyond the representable range saturate at `TimeDelta::MAX`, which
    /// no window can hold.
    pub fn duration(&self) -> TimeDelta {
        let minutes = (self.estimated_hours * 60.0).round();
        if minutes.is_finite() && minutes > 0.0 {
            TimeDelta::try_minutes(minutes as i64).unwrap_or(TimeDelta::MAX)
        } else {
            TimeDelta::zero()
        }
    }

    /// Whether the item has a positive duration.
    #[inline]
    pub fn is_schedulable(&self) -> bool {
        self.duration() > TimeDelta::zero()
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }

    #[inline]
    pub fn is_placed(&self) -> bool {
        self.placement_start.is_some()
    }

    /// Placement interval derived from start and duration.
    pub fn interval(&self) -> Option<Interval> {
        let start = self.placement_start?;
        let end = start.checked_add_signed(self.duration())?;
        Some(Interval::new(start, end))
    }

    /// Interval this item contributes to the busy index.
    ///
    /// Completed items keep their placement for history but free the time.
    pub fn busy_interval(&self) -> Option<Interval> {
        if self.is_completed() {
            None
        } else {
            self.interval()
        }
    }

    /// Whether the batch scheduler may place this item.
    pub fn is_batch_candidate(&self) -> bool {
        !self.is_completed() && self.is_schedulable() && !self.is_placed() && !self.locked
    }

    /// Applies a partial update in place.
    pub fn apply(&mut self, update: &WorkItemUpdate) {
        if let Some(start) = update.placement_start {
            self.placement_start = start;
        }
        if let Some(locked) = update.locked {
            self.locked = locked;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

/// Partial update sent to the persistence collaborator.
///
/// `placement_start: Some(None)` clears the placement.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement_start: Option<Option<NaiveDateTime>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl WorkItemUpdate {
    /// Sets a placement start.
    pub fn placement(start: NaiveDateTime) -> Self {
        Self {
            placement_start: Some(Some(start)),
            ..Default::default()
        }
    }

    /// Whether the update carries no field.
    pub fn is_empty(&self) -> bool {
        self.placement_start.is_none() && self.locked.is_none() && self.status.is_none()
    }
}
