use chrono::{DateTime, Duration, Utc};
use sgp4::{Constants, Elements};

use super::{
    GroundPoint, Observer, OrbitError, OrbitModel, Topocentric, EARTH_RADIUS_KM,
    EARTH_ROTATION_RAD_S,
};

/// Days after epoch that two-line elements are considered usable.
const ELEMENTS_VALIDITY_DAYS: i64 = 3;

/// SGP4-backed ephemeris. `predict` runs the propagator and caches the
/// earth-fixed state; the read accessors work off that cache.
pub struct Sgp4Model {
    name: String,
    norad_id: u64,
    elements: Elements,
    constants: Constants,
    state: State,
}

#[derive(Debug, Clone, Copy)]
struct State {
    position_ecef_km: [f64; 3],
    velocity_ecef_km_s: [f64; 3],
    radius_km: f64,
}

impl Sgp4Model {
    pub fn from_tle(
        name: Option<String>,
        line1: &str,
        line2: &str,
    ) -> Result<Self, OrbitError> {
        let elements = Elements::from_tle(name, line1.as_bytes(), line2.as_bytes())?;
        Self::from_elements(elements)
    }

    pub fn from_elements(elements: Elements) -> Result<Self, OrbitError> {
        if elements.mean_motion <= 0.0 {
            return Err(OrbitError::DegenerateElements);
        }
        let constants = Constants::from_elements(&elements)?;
        let name = elements
            .object_name
            .clone()
            .unwrap_or_else(|| format!("NORAD {}", elements.norad_id));
        let norad_id = elements.norad_id;
        let epoch = DateTime::from_naive_utc_and_offset(elements.datetime, Utc);
        let mut model = Self {
            name,
            norad_id,
            elements,
            constants,
            state: State {
                position_ecef_km: [0.0; 3],
                velocity_ecef_km_s: [0.0; 3],
                radius_km: EARTH_RADIUS_KM,
            },
        };
        // Seed the cache so the accessors are valid before the first predict.
        model.predict(epoch)?;
        Ok(model)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn norad_id(&self) -> u64 {
        self.norad_id
    }
}

impl OrbitModel for Sgp4Model {
    fn predict(&mut self, at: DateTime<Utc>) -> Result<(), OrbitError> {
        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&at.naive_utc())
            .map_err(|e| OrbitError::Propagation(e.to_string()))?;

        let prediction = self
            .constants
            .propagate(minutes)
            .map_err(|e| OrbitError::Propagation(e.to_string()))?;

        let sidereal =
            sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&at.naive_utc()));

        let position = teme_to_ecef_position(prediction.position, sidereal);
        let velocity = teme_to_ecef_velocity(prediction.position, prediction.velocity, sidereal);
        let radius_km = (position[0] * position[0]
            + position[1] * position[1]
            + position[2] * position[2])
            .sqrt();

        self.state = State {
            position_ecef_km: position,
            velocity_ecef_km_s: velocity,
            radius_km,
        };
        Ok(())
    }

    fn geocentric(&self) -> GroundPoint {
        let [x, y, z] = self.state.position_ecef_km;
        let lat = z.atan2((x * x + y * y).sqrt());
        let lon = y.atan2(x);
        GroundPoint {
            lat_deg: lat.to_degrees(),
            lon_deg: lon.to_degrees(),
        }
    }

    fn topocentric(&self, observer: &Observer) -> Topocentric {
        let sta_ecef = observer.position_ecef_km();
        let sta_vel = observer.velocity_ecef_km_s();
        let sat = &self.state;

        let dr = [
            sat.position_ecef_km[0] - sta_ecef[0],
            sat.position_ecef_km[1] - sta_ecef[1],
            sat.position_ecef_km[2] - sta_ecef[2],
        ];
        let range_km = (dr[0] * dr[0] + dr[1] * dr[1] + dr[2] * dr[2]).sqrt();

        let enu = ecef_to_enu(dr, observer.lat_rad(), observer.lon_rad());
        let azimuth = enu.0.atan2(enu.1).to_degrees().rem_euclid(360.0);
        let elevation = if range_km > 0.0 {
            (enu.2 / range_km).asin().to_degrees()
        } else {
            0.0
        };

        let los_unit = if range_km > 0.0 {
            [dr[0] / range_km, dr[1] / range_km, dr[2] / range_km]
        } else {
            [0.0, 0.0, 0.0]
        };
        let rel_vel = [
            sat.velocity_ecef_km_s[0] - sta_vel[0],
            sat.velocity_ecef_km_s[1] - sta_vel[1],
            sat.velocity_ecef_km_s[2] - sta_vel[2],
        ];
        let range_rate_km_s =
            rel_vel[0] * los_unit[0] + rel_vel[1] * los_unit[1] + rel_vel[2] * los_unit[2];

        Topocentric {
            elevation_deg: elevation,
            azimuth_deg: azimuth,
            range_km,
            range_rate_km_s,
        }
    }

    fn epoch(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.elements.datetime, Utc)
    }

    fn valid_until(&self) -> DateTime<Utc> {
        self.epoch() + Duration::days(ELEMENTS_VALIDITY_DAYS)
    }

    fn viewing_radius(&self, min_elevation_deg: f64) -> f64 {
        let elevation = min_elevation_deg.to_radians();
        // Horizon geometry: the visibility circle subtends
        // acos((Re / r) cos e) - e at the geocenter.
        let ratio = (EARTH_RADIUS_KM / self.state.radius_km).min(1.0);
        let radius = (ratio * elevation.cos()).clamp(-1.0, 1.0).acos() - elevation;
        radius.max(0.0).to_degrees()
    }

    fn period(&self) -> Duration {
        let seconds = 86_400.0 / self.elements.mean_motion;
        Duration::milliseconds((seconds * 1000.0).round() as i64)
    }
}

pub fn teme_to_ecef_position(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

pub fn teme_to_ecef_velocity(pos_teme: [f64; 3], vel_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    let pos = teme_to_ecef_position(pos_teme, gmst);
    let rotated = [
        vel_teme[0] * cos_gmst + vel_teme[1] * sin_gmst,
        -vel_teme[0] * sin_gmst + vel_teme[1] * cos_gmst,
        vel_teme[2],
    ];
    let rotation = [
        -EARTH_ROTATION_RAD_S * pos[1],
        EARTH_ROTATION_RAD_S * pos[0],
        0.0,
    ];
    [
        rotated[0] - rotation[0],
        rotated[1] - rotation[1],
        rotated[2] - rotation[2],
    ]
}

pub fn ecef_to_enu(dr: [f64; 3], lat_rad: f64, lon_rad: f64) -> (f64, f64, f64) {
    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let sin_lon = lon_rad.sin();
    let cos_lon = lon_rad.cos();

    let east = -sin_lon * dr[0] + cos_lon * dr[1];
    let north = -sin_lat * cos_lon * dr[0] - sin_lat * sin_lon * dr[1] + cos_lat * dr[2];
    let up = cos_lat * cos_lon * dr[0] + cos_lat * sin_lon * dr[1] + sin_lat * dr[2];
    (east, north, up)
}
