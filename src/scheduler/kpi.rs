//! Batch run quality metrics (KPIs).
//!
//! Summarises a batch outcome for user-facing reporting.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Placed | Candidates that received a slot |
//! | Unplaced | Candidates with no slot before their due time |
//! | Placement Rate | placed / (placed + unplaced) |
//! | Scheduled Hours | Sum of placed durations |
//! | Min Slack | Smallest `due - placement end` |
//! | Avg Slack | Mean `due - placement end` |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use crate::models::{BatchOutcome, WorkItemStore};

/// Batch run indicators. Time values are in hours.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleKpi {
    pub placed: usize,
    pub unplaced: usize,
    /// Fraction of candidates placed (0.0..1.0). 1.0 when there were none.
    pub placement_rate: f64,
    pub scheduled_hours: f64,
    /// Tightest margin between a placement end and its due time.
    pub min_slack_hours: Option<f64>,
    pub avg_slack_hours: Option<f64>,
}

impl ScheduleKpi {
    /// Computes KPIs from an outcome and the items it refers to.
    ///
    /// Placements whose item is missing from `store` count towards
    /// `placed` and `scheduled_hours` but not towards slack.
    pub fn calculate(outcome: &BatchOutcome, store: &WorkItemStore) -> Self {
        let placed = outcome.placed_count();
        let unplaced = outcome.unplaced_count();
        let total = placed + unplaced;

        let slacks: Vec<f64> = outcome
            .placements
            .iter()
            .filter_map(|(id, iv)| {
                let item = store.get(id)?;
                Some(minutes_to_hours(item.due.signed_duration_since(iv.end).num_minutes()))
            })
            .collect();

        let min_slack_hours = slacks.iter().copied().reduce(f64::min);
        let avg_slack_hours = if slacks.is_empty() {
            None
        } else {
            Some(slacks.iter().sum::<f64>() / slacks.len() as f64)
        };

        Self {
            placed,
            unplaced,
            placement_rate: if total == 0 {
                1.0
            } else {
                placed as f64 / total as f64
            },
            scheduled_hours: minutes_to_hours(outcome.scheduled_time().num_minutes()),
            min_slack_hours,
            avg_slack_hours,
        }
    }
}

fn minutes_to_hours(minutes: i64) -> f64 {
    minutes as f64 / 60.0
}
