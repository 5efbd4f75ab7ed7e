use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::PredictError;

/// One threshold crossing: when it happens and where on the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PassEdge {
    pub time: DateTime<Utc>,
    pub azimuth_deg: f64,
}

/// Result of one rise/set search.
///
/// `rise` and `set` are independent: a `set` earlier than `rise` is a valid
/// outcome and means a pass was already underway when the search started.
/// Callers must compare the times, never assume field order. `ever_up` /
/// `ever_down` record whether any sample sat above / below the threshold
/// during the scan, regardless of whether a matched pair was found.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PassWindow {
    pub rise: Option<PassEdge>,
    pub set: Option<PassEdge>,
    pub ever_up: bool,
    pub ever_down: bool,
}

impl PassWindow {
    pub fn rise_ok(&self) -> bool {
        self.rise.is_some()
    }

    pub fn set_ok(&self) -> bool {
        self.set.is_some()
    }
}

/// Where "now" falls relative to a pass window, with the distance to the
/// relevant edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassPhase {
    NoData,
    UpcomingRise { until_rise: Duration },
    InProgress { until_set: Duration },
    JustSet { since_set: Duration },
}

/// A matched, chronological pass from the scheduler.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScheduledPass {
    pub rise: PassEdge,
    pub set: PassEdge,
}

impl ScheduledPass {
    pub fn duration(&self) -> Duration {
        self.set.time - self.rise.time
    }
}

/// Tuning for the rise/set search and the pass scheduler.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Elevation threshold the target must cross, degrees.
    pub min_elevation_deg: f64,
    /// Coarse forward scan step, seconds.
    pub coarse_step_s: i64,
    /// Backward refinement step, seconds.
    pub fine_step_s: i64,
    /// How far past the start time the search is allowed to look, hours.
    pub horizon_hours: i64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_elevation_deg: 0.0,
            coarse_step_s: 90,
            fine_step_s: 2,
            horizon_hours: 48,
        }
    }
}

impl SearchConfig {
    pub fn coarse_step(&self) -> Duration {
        Duration::seconds(self.coarse_step_s)
    }

    pub fn fine_step(&self) -> Duration {
        Duration::seconds(self.fine_step_s)
    }

    pub fn horizon(&self) -> Duration {
        Duration::hours(self.horizon_hours)
    }

    pub fn validate(&self) -> Result<(), PredictError> {
        if self.coarse_step_s <= 0 || self.fine_step_s <= 0 {
            return Err(PredictError::InvalidConfig("step sizes must be positive"));
        }
        if self.fine_step_s >= self.coarse_step_s {
            return Err(PredictError::InvalidConfig(
                "fine step must be smaller than coarse step",
            ));
        }
        if self.horizon_hours <= 0 {
            return Err(PredictError::InvalidConfig("horizon must be positive"));
        }
        Ok(())
    }
}
