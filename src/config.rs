//! Scheduler configuration.
//!
//! Loaded from TOML; every field has a default.
//!
//! ```toml
//! resume_gap_minutes = 0
//! tie_breaker = "random"        # or "by_id", "input_order"
//! enforce_window_on_drop = true
//!
//! [window]
//! start_hour = 9
//! end_hour = 22
//! ```

use std::path::Path;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::dispatching::TieBreaker;
use crate::error::{SchedulerError, SchedulerResult};
use crate::models::WorkWindow;

/// Upper bound for `resume_gap_minutes`: one day.
pub const MAX_RESUME_GAP_MINUTES: i64 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Daily availability window.
    pub window: WorkWindow,
    /// Spacer after a conflicting busy interval during slot search.
    pub resume_gap_minutes: i64,
    /// Final ordering tie-breaker for batch runs.
    pub tie_breaker: TieBreaker,
    /// Reject drops and moves that leave the work window.
    pub enforce_window_on_drop: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            window: WorkWindow::default(),
            resume_gap_minutes: 0,
            tie_breaker: TieBreaker::Random,
            enforce_window_on_drop: true,
        }
    }
}

impl SchedulerConfig {
    pub fn from_toml_str(content: &str) -> SchedulerResult<Self> {
        let config: SchedulerConfig =
            toml::from_str(content).map_err(|e| SchedulerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> SchedulerResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SchedulerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> SchedulerResult<()> {
        self.window.validate().map_err(SchedulerError::Config)?;
        if !(0..=MAX_RESUME_GAP_MINUTES).contains(&self.resume_gap_minutes) {
            return Err(SchedulerError::Config(format!(
                "resume_gap_minutes must be between 0 and {MAX_RESUME_GAP_MINUTES}, got {}",
                self.resume_gap_minutes
            )));
        }
        Ok(())
    }

    pub fn resume_gap(&self) -> TimeDelta {
        TimeDelta::minutes(self.resume_gap_minutes.clamp(0, MAX_RESUME_GAP_MINUTES))
    }
}
