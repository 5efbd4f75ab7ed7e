use std::f64::consts::{FRAC_PI_2, TAU};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{round2, SweepConfig};
use crate::geometry::solve_sphere;
use crate::orbit::{GroundPoint, OrbitModel};
use crate::predict::PredictError;

/// Closed curve of ground points from which the target is visible at exactly
/// one elevation threshold. The last point implicitly connects back to the
/// first.
#[derive(Debug, Clone, Serialize)]
pub struct FootprintRing {
    pub elevation_deg: f64,
    pub points: Vec<GroundPoint>,
}

/// Build one visibility ring per configured elevation threshold around the
/// current subsatellite point.
///
/// Each ring projects the visibility circle's angular radius outward at
/// evenly spaced azimuths with `solve_sphere`; the subsatellite colatitude
/// trig is computed once per ring and reused across all azimuths.
pub fn footprint_rings<M: OrbitModel>(
    orbit: &mut M,
    now: DateTime<Utc>,
    config: &SweepConfig,
) -> Result<Vec<FootprintRing>, PredictError> {
    orbit.predict(now)?;
    let ssp = orbit.geocentric();

    let colat = FRAC_PI_2 - ssp.lat_deg.to_radians();
    let (sin_colat, cos_colat) = colat.sin_cos();
    let steps = config.ring_points.max(3);

    let mut rings = Vec::with_capacity(config.footprint_elevations_deg.len());
    for &elevation_deg in &config.footprint_elevations_deg {
        let radius = orbit.viewing_radius(elevation_deg).to_radians();
        let mut points: Vec<GroundPoint> = Vec::with_capacity(steps);

        for i in 0..steps {
            let azimuth = TAU * i as f64 / steps as f64;
            let (cos_side, hour_angle) = solve_sphere(azimuth, radius, cos_colat, sin_colat);
            let lat_deg = round2((FRAC_PI_2 - cos_side.acos()).to_degrees());
            let lon_deg = round2(normalize_lon(ssp.lon_deg + hour_angle.to_degrees()));
            let point = GroundPoint { lat_deg, lon_deg };

            if points.last() == Some(&point) {
                continue;
            }
            points.push(point);
        }

        // The ring closes implicitly, so a last point equal to the first is
        // another consecutive duplicate.
        if points.len() > 1 && points.last() == points.first() {
            points.pop();
        }

        rings.push(FootprintRing {
            elevation_deg,
            points,
        });
    }

    Ok(rings)
}

/// Wrap to [-180, 180).
fn normalize_lon(lon_deg: f64) -> f64 {
    (lon_deg + 180.0).rem_euclid(360.0) - 180.0
}
