use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{round2, SweepConfig};
use crate::orbit::OrbitModel;
use crate::predict::PredictError;

/// One vertex of the ground track. `gap` points are deliberately not drawn;
/// they carve the dashes out of the polyline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackPoint {
    pub lat_deg: f64,
    pub lon_deg: f64,
    pub gap: bool,
}

/// Subsatellite path over one orbital period starting at the sample for
/// "now", which is always index 0 and never a gap.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroundTrack {
    pub points: Vec<TrackPoint>,
}

/// Sample the orbit at evenly spaced times across one period and project
/// each sample to its subsatellite point. Consecutive duplicates (at 0.01
/// degree resolution) are dropped.
pub fn ground_track<M: OrbitModel>(
    orbit: &mut M,
    now: DateTime<Utc>,
    config: &SweepConfig,
) -> Result<GroundTrack, PredictError> {
    let samples = config.track_samples.max(2);
    let step = orbit.period() / samples as i32;
    let mut points: Vec<TrackPoint> = Vec::with_capacity(samples);

    for i in 0..samples {
        orbit.predict(now + step * i as i32)?;
        let ground = orbit.geocentric();
        let lat_deg = round2(ground.lat_deg);
        let lon_deg = round2(ground.lon_deg);

        if let Some(prev) = points.last() {
            if prev.lat_deg == lat_deg && prev.lon_deg == lon_deg {
                continue;
            }
        }

        let gap = i > 0 && config.dash_stride > 1 && i % config.dash_stride == 0;
        points.push(TrackPoint {
            lat_deg,
            lon_deg,
            gap,
        });
    }

    Ok(GroundTrack { points })
}
