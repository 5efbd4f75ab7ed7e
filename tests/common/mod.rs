use chrono::{DateTime, Duration, TimeZone, Utc};

use satwatch::geometry::angular_separation;
use satwatch::orbit::{GroundPoint, Observer, OrbitError, OrbitModel, Topocentric, EARTH_RADIUS_KM};

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
}

/// Circular polar orbit in the 0/180 meridian plane, crossing directly over
/// (0, 0) once per revolution at integer multiples of the period. Earth
/// rotation is ignored so pass times stay analytic.
pub struct SyntheticOrbit {
    pub period: Duration,
    pub altitude_km: f64,
    pub valid_for: Duration,
    epoch: DateTime<Utc>,
    current: DateTime<Utc>,
}

impl SyntheticOrbit {
    pub fn new(period: Duration, altitude_km: f64, valid_for: Duration) -> Self {
        Self {
            period,
            altitude_km,
            valid_for,
            epoch: epoch(),
            current: epoch(),
        }
    }

    pub fn leo() -> Self {
        Self::new(Duration::minutes(95), 550.0, Duration::hours(24))
    }

    fn phase(&self) -> f64 {
        let elapsed = (self.current - self.epoch).num_milliseconds() as f64;
        let period = self.period.num_milliseconds() as f64;
        std::f64::consts::TAU * (elapsed / period)
    }

    fn orbit_radius_km(&self) -> f64 {
        EARTH_RADIUS_KM + self.altitude_km
    }

    /// Analytic duration of one zenith pass over (0, 0) at a 0 degree
    /// threshold: the arc inside the visibility circle divided by the
    /// angular rate.
    pub fn zenith_pass_duration(&self) -> Duration {
        let gamma_max = (EARTH_RADIUS_KM / self.orbit_radius_km()).acos();
        let fraction = gamma_max / std::f64::consts::PI;
        Duration::milliseconds((self.period.num_milliseconds() as f64 * fraction) as i64)
    }
}

impl OrbitModel for SyntheticOrbit {
    fn predict(&mut self, at: DateTime<Utc>) -> Result<(), OrbitError> {
        self.current = at;
        Ok(())
    }

    fn geocentric(&self) -> GroundPoint {
        let phi = self.phase();
        let lat = phi.sin().asin();
        let lon = if phi.cos() >= 0.0 { 0.0 } else { 180.0 };
        GroundPoint {
            lat_deg: lat.to_degrees(),
            lon_deg: lon,
        }
    }

    fn topocentric(&self, observer: &Observer) -> Topocentric {
        let ssp = self.geocentric();
        let gamma = angular_separation(
            ssp.lat_deg.to_radians(),
            ssp.lon_deg.to_radians(),
            observer.lat_rad(),
            observer.lon_rad(),
        );
        let ratio = EARTH_RADIUS_KM / self.orbit_radius_km();
        let elevation = (gamma.cos() - ratio).atan2(gamma.sin());
        let r = self.orbit_radius_km();
        let range_km = (EARTH_RADIUS_KM * EARTH_RADIUS_KM + r * r
            - 2.0 * EARTH_RADIUS_KM * r * gamma.cos())
        .sqrt();
        Topocentric {
            elevation_deg: elevation.to_degrees(),
            azimuth_deg: if ssp.lat_deg >= observer.latitude_deg {
                0.0
            } else {
                180.0
            },
            range_km,
            range_rate_km_s: 0.0,
        }
    }

    fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    fn valid_until(&self) -> DateTime<Utc> {
        self.epoch + self.valid_for
    }

    fn viewing_radius(&self, min_elevation_deg: f64) -> f64 {
        let elevation = min_elevation_deg.to_radians();
        let ratio = EARTH_RADIUS_KM / self.orbit_radius_km();
        ((ratio * elevation.cos()).clamp(-1.0, 1.0).acos() - elevation)
            .max(0.0)
            .to_degrees()
    }

    fn period(&self) -> Duration {
        self.period
    }
}

/// Degenerate model whose elevation never changes, for the never-rises and
/// circumpolar edge cases.
pub struct FixedElevation {
    pub elevation_deg: f64,
    pub valid_for: Duration,
}

impl OrbitModel for FixedElevation {
    fn predict(&mut self, _at: DateTime<Utc>) -> Result<(), OrbitError> {
        Ok(())
    }

    fn geocentric(&self) -> GroundPoint {
        GroundPoint {
            lat_deg: 0.0,
            lon_deg: 0.0,
        }
    }

    fn topocentric(&self, _observer: &Observer) -> Topocentric {
        Topocentric {
            elevation_deg: self.elevation_deg,
            azimuth_deg: 0.0,
            range_km: 1000.0,
            range_rate_km_s: 0.0,
        }
    }

    fn epoch(&self) -> DateTime<Utc> {
        epoch()
    }

    fn valid_until(&self) -> DateTime<Utc> {
        epoch() + self.valid_for
    }

    fn viewing_radius(&self, _min_elevation_deg: f64) -> f64 {
        20.0
    }

    fn period(&self) -> Duration {
        Duration::minutes(95)
    }
}
