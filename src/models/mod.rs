//! Calendar scheduling domain models.
//!
//! Provides the core data types: schedulable work items, derived intervals,
//! the daily work window, the busy-interval index, and batch outcomes.
//!
//! # Domain Mappings
//!
//! | u-calendar | Study planner | Team backlog | Personal agenda |
//! |------------|---------------|--------------|-----------------|
//! | WorkItem | Assignment/Reading | Ticket | To-do |
//! | group_id | Course | Project | List |
//! | WorkWindow | Study hours | Office hours | Waking hours |
//! | BusyIndex | Booked sessions | Booked focus time | Calendar blocks |

mod busy;
mod calendar;
mod schedule;
mod store;
mod work_item;

pub use busy::{BusyIndex, BusyInterval};
pub use calendar::{Interval, WorkWindow};
pub use schedule::BatchOutcome;
pub use store::{SchedulerState, WorkItemStore};
pub use work_item::{Priority, Status, WorkItem, WorkItemUpdate};
