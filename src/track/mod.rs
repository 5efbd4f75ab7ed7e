mod footprint;
mod ground_track;

pub use footprint::{footprint_rings, FootprintRing};
pub use ground_track::{ground_track, GroundTrack, TrackPoint};

use serde::Deserialize;

/// Tuning for the map sweep: one ground track plus one footprint ring per
/// elevation threshold. Recomputed only when the caller asks, never per
/// frame.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Samples across one orbital period.
    pub track_samples: usize,
    /// Every n-th track point is marked as a gap to draw a dashed line;
    /// 0 or 1 disables dashing.
    pub dash_stride: usize,
    /// Elevation thresholds to draw visibility rings for, degrees.
    pub footprint_elevations_deg: Vec<f64>,
    /// Azimuth samples around each ring.
    pub ring_points: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            track_samples: 512,
            dash_stride: 16,
            footprint_elevations_deg: vec![0.0, 30.0, 60.0],
            ring_points: 72,
        }
    }
}

/// Round to the 0.01 degree the map consumers work at; also what makes
/// consecutive-duplicate dropping meaningful for slow-moving targets.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
