//! User-facing notifications.
//!
//! The scheduler reports outcomes through a [`Notifier`]. How they reach
//! the user (toast, modal, log line) is up to the host.

use std::fmt;

use tracing::{info, warn};

use crate::error::Rejection;
use crate::mutation::Action;

/// Fixed set of outcomes surfaced to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// A batch run placed at least one item.
    Scheduled { placed: usize, unplaced: Vec<String> },
    /// A batch run found no candidates.
    NothingToSchedule,
    /// A batch run had candidates but placed none of them.
    NoItemsPlaced { unplaced: Vec<String> },
    /// A single-item action was applied and saved.
    Applied { action: Action, item_id: String },
    /// A single-item action failed validation; nothing changed.
    Rejected { action: Action, reason: Rejection },
    /// Saving failed; local state was refreshed from the store.
    PersistenceFailed { action: Action },
    /// Local state was replaced from the store.
    Reconciled { items: usize },
}

impl Notification {
    /// Whether the user should see this as a failure.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Notification::NoItemsPlaced { .. }
                | Notification::Rejected { .. }
                | Notification::PersistenceFailed { .. }
        )
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Scheduled { placed, unplaced } if unplaced.is_empty() => {
                write!(f, "Scheduled {placed} item(s)")
            }
            Notification::Scheduled { placed, unplaced } => write!(
                f,
                "Scheduled {placed} item(s); {} could not be placed before their due time",
                unplaced.len()
            ),
            Notification::NothingToSchedule => f.write_str("Nothing to schedule"),
            Notification::NoItemsPlaced { unplaced } => write!(
                f,
                "No items could be placed ({} item(s) have no free slot before their due time)",
                unplaced.len()
            ),
            Notification::Applied { action, item_id } => write!(f, "{action} of {item_id} saved"),
            Notification::Rejected { action, reason } => write!(f, "Cannot apply {action}: {reason}"),
            Notification::PersistenceFailed { action } => write!(
                f,
                "Failed to save {action}; calendar was refreshed from the server"
            ),
            Notification::Reconciled { items } => write!(f, "Loaded {items} item(s)"),
        }
    }
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

impl<F> Notifier for F
where
    F: Fn(&Notification) + Send + Sync,
{
    fn notify(&self, notification: &Notification) {
        self(notification)
    }
}

/// Forwards notifications to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        if notification.is_failure() {
            warn!(target: "u_calendar::notify", "{notification}");
        } else {
            info!(target: "u_calendar::notify", "{notification}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_messages() {
        assert_eq!(
            Notification::Scheduled {
                placed: 3,
                unplaced: vec![]
            }
            .to_string(),
            "Scheduled 3 item(s)"
        );
        assert!(Notification::Scheduled {
            placed: 1,
            unplaced: vec!["x".into()]
        }
        .to_string()
        .contains("1 could not be placed"));
        assert!(Notification::NoItemsPlaced {
            unplaced: vec!["x".into()]
        }
        .to_string()
        .starts_with("No items could be placed"));

        let rejected = Notification::Rejected {
            action: Action::Place,
            reason: Rejection::AlreadyScheduled("W1".into()),
        };
        assert_eq!(
            rejected.to_string(),
            "Cannot apply placement: item W1 is already scheduled"
        );
        assert!(rejected.is_failure());
    }

    #[test]
    fn test_closure_notifier() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            move |n: &Notification| seen.lock().unwrap().push(n.clone())
        };
        sink.notify(&Notification::NothingToSchedule);
        TracingNotifier.notify(&Notification::NothingToSchedule);

        assert_eq!(*seen.lock().unwrap(), vec![Notification::NothingToSchedule]);
    }
}
