//! Deadline-driven calendar scheduling for personal work items.
//!
//! Places assignments, tasks, and study sessions onto a calendar inside a
//! daily availability window so that each finishes before its due time and
//! no two occupy the same time. Placements can be produced in batch or
//! edited interactively, and are persisted through an external store with
//! optimistic local apply and reconciliation on failure.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `WorkItem`, `Interval`, `WorkWindow`,
//!   `BusyIndex`, `SchedulerState`, `BatchOutcome`
//! - **`scheduler`**: Earliest-feasible slot search and the greedy batch scheduler
//! - **`dispatching`**: Ordering rules (EDD, priority, SPT, slack) and the rule engine
//! - **`mutation`**: Validated interactive changes (drop, move, remove, lock, status)
//! - **`session`**: Host-facing facade tying state, persistence, and notifications
//! - **`persistence`**: Durable store interface and an in-memory implementation
//! - **`validation`**: Integrity checks and deadline re-validation
//! - **`notify`**: User-facing outcome notifications
//! - **`config`**: TOML-loadable scheduler settings
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Jackson (1955), "Scheduling a Production Line to Minimize Maximum Tardiness"

pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod mutation;
pub mod notify;
pub mod persistence;
pub mod scheduler;
pub mod session;
pub mod validation;

pub use config::SchedulerConfig;
pub use error::{PersistenceError, Rejection, SchedulerError, SchedulerResult};
pub use session::SchedulerSession;
