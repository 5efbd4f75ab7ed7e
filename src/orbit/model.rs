use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::{Observer, OrbitError};

/// Geocentric ground position of the tracked object, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroundPoint {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

/// Look angles and range of the tracked object as seen from an observer.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Topocentric {
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
    pub range_km: f64,
    pub range_rate_km_s: f64,
}

/// Ephemeris source for the prediction engine. `predict` advances the model
/// to a time; the accessors read out the state it landed on. Implementations
/// must be valid to read immediately after construction.
///
/// The engine never computes orbital mechanics itself; everything it knows
/// about the target comes through this trait.
pub trait OrbitModel {
    fn predict(&mut self, at: DateTime<Utc>) -> Result<(), OrbitError>;

    /// Subsatellite point for the last predicted time.
    fn geocentric(&self) -> GroundPoint;

    /// Look angles from `observer` for the last predicted time.
    fn topocentric(&self, observer: &Observer) -> Topocentric;

    /// Epoch of the underlying elements.
    fn epoch(&self) -> DateTime<Utc>;

    /// Last instant the elements are trusted; schedulers stop here.
    fn valid_until(&self) -> DateTime<Utc>;

    /// Angular radius, in degrees, of the circle on the ground from which the
    /// target is visible at `min_elevation_deg` or higher, at the altitude of
    /// the last predicted state.
    fn viewing_radius(&self, min_elevation_deg: f64) -> f64;

    /// Orbital period.
    fn period(&self) -> Duration;
}
