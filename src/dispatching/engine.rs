//! Rule engine for multi-criteria dispatching.
//!
//! Composes dispatching rules in sequence (the next rule is consulted only
//! on ties) followed by a final tie-breaking strategy.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{DispatchingRule, RuleScore, SchedulingContext};
use crate::models::WorkItem;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreaker {
    /// Shuffle before a stable sort. Re-rolled on every call so repeated
    /// runs do not starve the same item.
    #[default]
    Random,
    /// Deterministic by item ID (lexicographic).
    ById,
    /// Keep input order.
    InputOrder,
}

/// A composable rule engine for backlog ordering.
///
/// # Example
/// ```
/// use u_calendar::dispatching::{RuleEngine, SchedulingContext, TieBreaker};
/// use u_calendar::dispatching::rules;
/// use u_calendar::models::{Priority, WorkItem};
/// use chrono::NaiveDate;
///
/// let due = NaiveDate::from_ymd_opt(2026, 3, 12).unwrap().and_hms_opt(18, 0, 0).unwrap();
/// let items = vec![
///     WorkItem::new("low", due).with_priority(Priority::Low),
///     WorkItem::new("high", due).with_priority(Priority::High),
/// ];
/// let engine = RuleEngine::new()
///     .with_rule(rules::Edd)
///     .with_rule(rules::PriorityRank)
///     .with_final_tie_breaker(TieBreaker::ById);
///
/// let now = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let order = engine.sort_indices(&items, &SchedulingContext::at_time(now));
/// assert_eq!(items[order[0]].id, "high");
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::Random,
            epsilon: 1e-9,
        }
    }

    /// The batch ordering: earliest due date, then highest priority.
    pub fn due_then_priority() -> Self {
        Self::new()
            .with_rule(super::rules::Edd)
            .with_rule(super::rules::PriorityRank)
    }

    /// Appends a rule, consulted only when all previous rules tie.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    pub fn tie_breaker(&self) -> TieBreaker {
        self.tie_breaker
    }

    /// Sorts items by priority (highest priority first).
    ///
    /// Returns indices into the original slice. Uses the thread RNG for
    /// [`TieBreaker::Random`].
    pub fn sort_indices<T: Borrow<WorkItem>>(
        &self,
        items: &[T],
        context: &SchedulingContext,
    ) -> Vec<usize> {
        self.sort_indices_with_rng(items, context, &mut rand::rng())
    }

    /// Same as [`sort_indices`](Self::sort_indices) with a caller-supplied RNG.
    pub fn sort_indices_with_rng<T: Borrow<WorkItem>, R: Rng + ?Sized>(
        &self,
        items: &[T],
        context: &SchedulingContext,
        rng: &mut R,
    ) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..items.len()).collect();
        if indices.is_empty() {
            return indices;
        }

        if self.tie_breaker == TieBreaker::Random {
            indices.shuffle(rng);
        }

        // Stable sort keeps the shuffled order among full ties.
        indices.sort_by(|&a, &b| {
            self.compare_sequential(items[a].borrow(), items[b].borrow(), context)
        });
        indices
    }

    /// Evaluates a single item and returns scores from each rule.
    pub fn evaluate(&self, item: &WorkItem, context: &SchedulingContext) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(item, context))
            .collect()
    }

    fn compare_sequential(
        &self,
        a: &WorkItem,
        b: &WorkItem,
        context: &SchedulingContext,
    ) -> Ordering {
        for rule in &self.rules {
            let score_a = rule.evaluate(a, context);
            let score_b = rule.evaluate(b, context);

            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal);
            }
        }

        match self.tie_breaker {
            TieBreaker::ById => a.id.cmp(&b.id),
            TieBreaker::Random | TieBreaker::InputOrder => Ordering::Equal,
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::due_then_priority()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
