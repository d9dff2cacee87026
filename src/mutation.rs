//! Interactive mutations with local-first apply.
//!
//! Every user action is validated against the current state and, if it
//! passes, applied to the store and busy index immediately. The result is a
//! [`Patch`] carrying the update to persist and the before-image needed to
//! undo it. A rejected mutation changes nothing.
//!
//! # Validation order
//!
//! | Mutation | Checks (in order) |
//! |----------|-------------------|
//! | PlaceByDrop | exists, not placed, not locked, has duration, deadline, overlap, window |
//! | Move | exists, not locked, placed, has duration, deadline, overlap (self excluded), window |
//! | Remove | exists, placed, confirmed |
//! | SetLocked | exists |
//! | ToggleStatus / SetStatus | exists, overlap when reopening a placed item |

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SchedulerConfig;
use crate::error::Rejection;
use crate::models::{Interval, SchedulerState, Status, WorkItem, WorkItemUpdate, WorkWindow};

/// User-facing name of an operation, used in notifications and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    AutoSchedule,
    Place,
    Move,
    Remove,
    Lock,
    Unlock,
    StatusChange,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::AutoSchedule => "auto-schedule",
            Action::Place => "placement",
            Action::Move => "move",
            Action::Remove => "removal",
            Action::Lock => "lock",
            Action::Unlock => "unlock",
            Action::StatusChange => "status change",
        };
        f.write_str(s)
    }
}

/// A single-item user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Drop an unscheduled item onto the calendar.
    PlaceByDrop { target: NaiveDateTime },
    /// Drag a placed, unlocked item to a new start.
    Move { target: NaiveDateTime },
    /// Send a placed item back to the backlog.
    Remove { confirmed: bool },
    SetLocked(bool),
    /// Completed ↔ pending.
    ToggleStatus,
    SetStatus(Status),
}

impl Mutation {
    pub fn action(&self) -> Action {
        match self {
            Mutation::PlaceByDrop { .. } => Action::Place,
            Mutation::Move { .. } => Action::Move,
            Mutation::Remove { .. } => Action::Remove,
            Mutation::SetLocked(true) => Action::Lock,
            Mutation::SetLocked(false) => Action::Unlock,
            Mutation::ToggleStatus | Mutation::SetStatus(_) => Action::StatusChange,
        }
    }
}

/// Validation settings shared by all mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MutationPolicy {
    /// Window drops and moves must fit in. `None` disables the check.
    pub window: Option<WorkWindow>,
}

impl MutationPolicy {
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self {
            window: config.enforce_window_on_drop.then_some(config.window),
        }
    }
}

/// An applied local change, reversible until confirmed.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub item_id: String,
    pub action: Action,
    /// Item as it was before the change.
    pub before: WorkItem,
    /// Item as it is now in local state.
    pub after: WorkItem,
    /// Fields to send to the persistence collaborator.
    pub update: WorkItemUpdate,
}

impl Patch {
    /// Records a batch placement already inserted into the index.
    pub(crate) fn placement(state: &mut SchedulerState, before: WorkItem, start: NaiveDateTime) -> Self {
        let after = before.clone().with_placement(start);
        state.store.insert(after.clone());
        Self {
            item_id: before.id.clone(),
            action: Action::AutoSchedule,
            before,
            after,
            update: WorkItemUpdate::placement(start),
        }
    }

    /// Restores the before-image in the store and index.
    pub fn revert(&self, state: &mut SchedulerState) {
        debug!(item_id = %self.item_id, action = %self.action, "reverting local change");
        state.upsert(self.before.clone());
    }
}

/// Validates `mutation` against `state` and applies it locally.
///
/// On `Err` the state is untouched.
pub fn try_apply_local(
    state: &mut SchedulerState,
    item_id: &str,
    mutation: &Mutation,
    policy: &MutationPolicy,
) -> Result<Patch, Rejection> {
    let before = state
        .get(item_id)
        .cloned()
        .ok_or_else(|| Rejection::NotFound(item_id.to_string()))?;

    let (after, update) = match *mutation {
        Mutation::PlaceByDrop { target } => {
            if before.is_placed() {
                return Err(Rejection::AlreadyScheduled(before.id));
            }
            if before.locked {
                return Err(Rejection::Locked(before.id));
            }
            check_target(state, &before, target, policy)?;
            (
                before.clone().with_placement(target),
                WorkItemUpdate::placement(target),
            )
        }
        Mutation::Move { target } => {
            if before.locked {
                return Err(Rejection::Locked(before.id));
            }
            if !before.is_placed() {
                return Err(Rejection::NotScheduled(before.id));
            }
            check_target(state, &before, target, policy)?;
            (
                before.clone().with_placement(target),
                WorkItemUpdate::placement(target),
            )
        }
        Mutation::Remove { confirmed } => {
            if !before.is_placed() {
                return Err(Rejection::NotScheduled(before.id));
            }
            if !confirmed {
                return Err(Rejection::NotConfirmed(before.id));
            }
            let mut after = before.clone();
            after.placement_start = None;
            after.locked = false;
            (
                after,
                WorkItemUpdate {
                    placement_start: Some(None),
                    locked: Some(false),
                    status: None,
                },
            )
        }
        Mutation::SetLocked(locked) => (
            before.clone().with_locked(locked),
            WorkItemUpdate {
                locked: Some(locked),
                ..Default::default()
            },
        ),
        Mutation::ToggleStatus | Mutation::SetStatus(_) => {
            let status = match *mutation {
                Mutation::SetStatus(status) => status,
                _ if before.is_completed() => Status::Pending,
                _ => Status::Completed,
            };
            let after = before.clone().with_status(status);
            if before.is_completed() {
                // Reopened items claim their retained placement again.
                if let Some(interval) = after.busy_interval() {
                    check_overlap(state, &after.id, &interval)?;
                }
            }
            (
                after,
                WorkItemUpdate {
                    status: Some(status),
                    ..Default::default()
                },
            )
        }
    };

    state.upsert(after.clone());
    debug!(item_id, action = %mutation.action(), "local change applied");

    Ok(Patch {
        item_id: item_id.to_string(),
        action: mutation.action(),
        before,
        after,
        update,
    })
}

/// Deadline, overlap, and window checks for a new start.
fn check_target(
    state: &SchedulerState,
    item: &WorkItem,
    target: NaiveDateTime,
    policy: &MutationPolicy,
) -> Result<(), Rejection> {
    if !item.is_schedulable() {
        return Err(Rejection::NoDuration(item.id.clone()));
    }

    let end = target
        .checked_add_signed(item.duration())
        .unwrap_or(NaiveDateTime::MAX);
    if end > item.due {
        return Err(Rejection::DeadlineExceeded {
            item_id: item.id.clone(),
            end,
            due: item.due,
        });
    }

    let interval = Interval::new(target, end);
    if !item.is_completed() {
        check_overlap(state, &item.id, &interval)?;
    }

    if let Some(window) = &policy.window {
        if !window.contains_interval(&interval) {
            return Err(Rejection::OutsideWindow(item.id.clone()));
        }
    }
    Ok(())
}

fn check_overlap(state: &SchedulerState, item_id: &str, interval: &Interval) -> Result<(), Rejection> {
    match state.index.first_conflict(interval, Some(item_id)) {
        Some(conflict) => Err(Rejection::Overlap {
            item_id: item_id.to_string(),
            other_id: conflict.item_id.clone(),
        }),
        None => Ok(()),
    }
}
