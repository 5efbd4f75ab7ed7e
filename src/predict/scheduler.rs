use chrono::{DateTime, Utc};
use log::debug;

use crate::orbit::{Observer, OrbitModel};
use crate::predict::pass_finder::find_next_pass;
use crate::predict::types::{ScheduledPass, SearchConfig};
use crate::predict::PredictError;

/// Enumerate upcoming passes by driving the rise/set search forward, one
/// pass at a time, until the elements' validity horizon is exceeded or a
/// search reports the target no longer crosses the threshold.
///
/// Each iteration restarts half an orbital period after the previous set so
/// the same pass is never found twice. Only well-ordered pairs
/// (`set.time > rise.time`) are returned; a window caught mid-pass is
/// skipped and the scan moves past its set.
pub fn upcoming_passes<M: OrbitModel>(
    orbit: &mut M,
    observer: &Observer,
    start: DateTime<Utc>,
    config: &SearchConfig,
) -> Result<Vec<ScheduledPass>, PredictError> {
    let mut passes = Vec::new();
    let valid_until = orbit.valid_until();
    let half_period = orbit.period() / 2;
    let mut cursor = start;

    while cursor <= valid_until {
        let window = find_next_pass(orbit, observer, cursor, config)?;
        if !window.ever_up || !window.ever_down {
            debug!("no further threshold crossings after {}", cursor);
            break;
        }
        let Some(set) = window.set else {
            break;
        };

        if let Some(rise) = window.rise {
            if set.time > rise.time {
                passes.push(ScheduledPass { rise, set });
            }
        }

        let next = set.time + half_period;
        if next <= cursor {
            // A degenerate period would otherwise pin the cursor in place.
            break;
        }
        cursor = next;
    }

    Ok(passes)
}
