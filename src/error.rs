//! Error types.
//!
//! Three categories:
//! - [`Rejection`]: a mutation failed validation. Nothing was changed.
//! - [`PersistenceError`]: the durable store refused or failed a call.
//! - [`SchedulerError`]: what session operations return to the host.
//!
//! Items the batch scheduler cannot place are not errors; they are listed
//! in [`BatchOutcome::unplaced`](crate::models::BatchOutcome).

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::mutation::Action;

/// Validation rejection of an interactive mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("work item not found: {0}")]
    NotFound(String),

    #[error("item {0} is already scheduled")]
    AlreadyScheduled(String),

    #[error("item {0} is not scheduled")]
    NotScheduled(String),

    #[error("item {0} is locked")]
    Locked(String),

    #[error("item {0} has no estimated duration")]
    NoDuration(String),

    #[error("item {item_id} would end at {end}, after its due time {due}")]
    DeadlineExceeded {
        item_id: String,
        end: NaiveDateTime,
        due: NaiveDateTime,
    },

    #[error("item {item_id} overlaps scheduled item {other_id}")]
    Overlap { item_id: String, other_id: String },

    #[error("item {0} does not fit inside the daily work window")]
    OutsideWindow(String),

    #[error("removal of item {0} was not confirmed")]
    NotConfirmed(String),

    #[error("item {0} has a pending change")]
    PendingChange(String),
}

impl Rejection {
    /// Item the rejection refers to.
    pub fn item_id(&self) -> &str {
        match self {
            Rejection::NotFound(id)
            | Rejection::AlreadyScheduled(id)
            | Rejection::NotScheduled(id)
            | Rejection::Locked(id)
            | Rejection::NoDuration(id)
            | Rejection::OutsideWindow(id)
            | Rejection::NotConfirmed(id)
            | Rejection::PendingChange(id) => id,
            Rejection::DeadlineExceeded { item_id, .. } | Rejection::Overlap { item_id, .. } => {
                item_id
            }
        }
    }
}

/// Failure reported by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("persistence unavailable: {0}")]
    Unavailable(String),

    #[error("work item not found in store: {0}")]
    NotFound(String),

    #[error("store rejected update: {0}")]
    Rejected(String),
}

/// Errors returned by session operations.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("{0}")]
    Rejected(#[from] Rejection),

    #[error("failed to save {action}: {source}")]
    Persistence {
        action: Action,
        #[source]
        source: PersistenceError,
    },

    #[error("failed to fetch work items: {0}")]
    Fetch(#[source] PersistenceError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;
