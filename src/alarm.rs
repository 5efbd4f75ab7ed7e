use chrono::Duration;
use serde::Serialize;

use crate::predict::PassPhase;

/// Signaling rate for the proximity indicator. Driving an actual LED or
/// GPIO line from this value is someone else's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmRate {
    Off,
    SteadyOn,
    BlinkSlow,
    BlinkFast,
}

/// Default distance-to-edge under which the alarm speeds up.
pub const NEAR_THRESHOLD_MINUTES: i64 = 35;

/// Map a pass phase to the indicator rate. Pure.
pub fn signal(phase: &PassPhase, near: Duration) -> AlarmRate {
    match phase {
        PassPhase::NoData | PassPhase::JustSet { .. } => AlarmRate::Off,
        PassPhase::UpcomingRise { until_rise } => {
            if *until_rise > near {
                AlarmRate::BlinkSlow
            } else {
                AlarmRate::BlinkFast
            }
        }
        PassPhase::InProgress { until_set } => {
            if *until_set > near {
                AlarmRate::SteadyOn
            } else {
                AlarmRate::BlinkFast
            }
        }
    }
}
