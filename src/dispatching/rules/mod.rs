//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Due-date**: EDD, MST
//! - **Time-based**: SPT
//! - **Priority**: PRIORITY
//!
//! # Score Convention
//! All rules return lower scores for higher priority items.
//!
//! # References
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use super::{DispatchingRule, RuleScore, SchedulingContext};
use crate::models::WorkItem;

// ======================== Due-date rules ========================

/// Earliest Due Date.
///
/// Score is seconds from the context time to the item's due instant.
///
/// # Reference
/// Jackson (1955), optimal for minimizing maximum lateness on single machine.
#[derive(Debug, Clone, Copy)]
pub struct Edd;

impl DispatchingRule for Edd {
    fn name(&self) -> &'static str {
        "EDD"
    }

    fn evaluate(&self, item: &WorkItem, context: &SchedulingContext) -> RuleScore {
        item.due
            .signed_duration_since(context.current_time)
            .num_seconds() as f64
    }

    fn description(&self) -> &'static str {
        "Earliest Due Date"
    }
}

/// Minimum Slack Time.
///
/// Slack = (due - current_time) - duration, in seconds.
/// Prioritizes items with least slack (most urgent).
#[derive(Debug, Clone, Copy)]
pub struct Mst;

impl DispatchingRule for Mst {
    fn name(&self) -> &'static str {
        "MST"
    }

    fn evaluate(&self, item: &WorkItem, context: &SchedulingContext) -> RuleScore {
        let until_due = item.due.signed_duration_since(context.current_time);
        (until_due - item.duration()).num_seconds() as f64
    }

    fn description(&self) -> &'static str {
        "Minimum Slack Time"
    }
}

// ======================== Time-based rules ========================

/// Shortest Processing Time.
#[derive(Debug, Clone, Copy)]
pub struct Spt;

impl DispatchingRule for Spt {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(&self, item: &WorkItem, _context: &SchedulingContext) -> RuleScore {
        item.duration().num_minutes() as f64
    }

    fn description(&self) -> &'static str {
        "Shortest Processing Time"
    }
}

// ======================== Priority-based rule ========================

/// Priority rank rule: high before medium before low.
///
/// (Negated because lower score = higher priority in convention.)
#[derive(Debug, Clone, Copy)]
pub struct PriorityRank;

impl DispatchingRule for PriorityRank {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, item: &WorkItem, _context: &SchedulingContext) -> RuleScore {
        -f64::from(item.priority.rank())
    }

    fn description(&self) -> &'static str {
        "Priority Rank"
    }
}
