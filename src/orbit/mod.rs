mod error;
mod model;
mod observer;
mod sgp4_model;
mod tle;

pub use error::OrbitError;
pub use model::{GroundPoint, OrbitModel, Topocentric};
pub use observer::Observer;
pub use sgp4_model::Sgp4Model;
pub use tle::{parse_tle_text, TleRecord};

pub const EARTH_RADIUS_KM: f64 = 6378.137;
pub const EARTH_ROTATION_RAD_S: f64 = 7.292_115e-5;
