//! Slot search, greedy batch scheduling, and KPI evaluation.
//!
//! # Algorithm
//!
//! `SlotFinder` returns the earliest non-overlapping placement that fits in
//! one day's work window and ends by the deadline. `BatchScheduler` runs it
//! over an ordered backlog with a shared forward-moving cursor. It is greedy,
//! not optimal.
//!
//! # KPI
//!
//! `ScheduleKpi` summarises a batch run: placed/unplaced counts, booked
//! hours, and slack against due times.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

mod batch;
mod kpi;
mod slot;

pub use batch::BatchScheduler;
pub use kpi::ScheduleKpi;
pub use slot::{find_slot, PlacementResult, SlotFinder};
