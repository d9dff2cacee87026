//! Dispatching rules and rule engine for backlog ordering.
//!
//! The batch scheduler processes candidates in the order produced here:
//! earliest due date first, then higher priority, then a final tie-breaker
//! that is re-rolled randomly on every run by default.
//!
//! # Usage
//!
//! ```
//! use u_calendar::dispatching::{RuleEngine, SchedulingContext, TieBreaker};
//! use u_calendar::dispatching::rules;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::Edd)
//!     .with_rule(rules::PriorityRank)
//!     .with_final_tie_breaker(TieBreaker::Random);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod context;
mod engine;
pub mod rules;

pub use context::SchedulingContext;
pub use engine::{RuleEngine, TieBreaker};

use crate::models::WorkItem;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (scheduled first).
pub type RuleScore = f64;

/// A dispatching rule that evaluates work item priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules should return smaller values
/// for items that should be scheduled first.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "EDD").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of an item given the current scheduling context.
    fn evaluate(&self, item: &WorkItem, context: &SchedulingContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
