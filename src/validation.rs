//! Integrity checks for work item sets.
//!
//! Applied to authoritative state after a fetch, and on demand by the host.
//! Detects:
//! - Duplicate IDs
//! - Overlapping placements among non-completed items
//! - Placements that end after the item's due time (e.g. after a due-date edit)
//! - Placements that leave the daily work window
//!
//! Checks only report. Nothing here modifies items.

use std::collections::HashSet;

use crate::models::{Interval, WorkItem, WorkWindow};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending item.
    pub item_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two items share the same ID.
    DuplicateId,
    /// Two non-completed placements overlap.
    OverlappingPlacement,
    /// A placement ends after the item's due time.
    DeadlineViolation,
    /// A placement is not inside one day's work window.
    OutsideWindow,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, item_id: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            item_id: item_id.to_string(),
            message: message.into(),
        }
    }
}

/// Validates a set of work items.
///
/// Checks:
/// 1. No duplicate item IDs
/// 2. No overlapping placements among non-completed items
/// 3. Every non-completed placement ends by its due time
/// 4. Every non-completed placement fits in one day's window
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_items(items: &[WorkItem], window: &WorkWindow) -> ValidationResult {
    let mut errors = Vec::new();

    let mut ids = HashSet::new();
    for item in items {
        if !ids.insert(item.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                &item.id,
                format!("Duplicate work item ID: {}", item.id),
            ));
        }
    }

    errors.extend(overlapping_placements(items));
    errors.extend(deadline_violations(items));

    for item in items {
        if let Some(iv) = item.busy_interval() {
            if !window.contains_interval(&iv) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::OutsideWindow,
                    &item.id,
                    format!(
                        "Item '{}' placed {}–{} outside the {}:00–{}:00 window",
                        item.id, iv.start, iv.end, window.start_hour, window.end_hour
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Non-completed placed items whose placement ends after their due time.
///
/// Due times may be edited after placement; this is the re-validation pass
/// for that case.
pub fn deadline_violations<'a>(
    items: impl IntoIterator<Item = &'a WorkItem>,
) -> Vec<ValidationError> {
    items
        .into_iter()
        .filter_map(|item| {
            let iv = item.busy_interval()?;
            (iv.end > item.due).then(|| {
                ValidationError::new(
                    ValidationErrorKind::DeadlineViolation,
                    &item.id,
                    format!(
                        "Item '{}' ends at {} but is due at {}",
                        item.id, iv.end, item.due
                    ),
                )
            })
        })
        .collect()
}

/// Overlapping placements among non-completed items.
///
/// # Algorithm
/// Sort by start, sweep while tracking the interval with the latest end.
/// Each interval starting before that end overlaps it.
fn overlapping_placements(items: &[WorkItem]) -> Vec<ValidationError> {
    let mut placed: Vec<(&str, Interval)> = items
        .iter()
        .filter_map(|i| Some((i.id.as_str(), i.busy_interval()?)))
        .collect();
    placed.sort_by(|a, b| a.1.start.cmp(&b.1.start));

    let mut errors = Vec::new();
    let mut latest: Option<(&str, Interval)> = None;
    for (id, iv) in placed {
        if let Some((prev_id, prev)) = &latest {
            if iv.start < prev.end {
                errors.push(ValidationError::new(
                    ValidationErrorKind::OverlappingPlacement,
                    id,
                    format!("Item '{id}' overlaps item '{prev_id}'"),
                ));
            }
        }
        if latest.as_ref().map_or(true, |(_, prev)| iv.end > prev.end) {
            latest = Some((id, iv));
        }
    }
    errors
}
