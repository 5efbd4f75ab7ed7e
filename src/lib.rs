pub mod alarm;
pub mod geometry;
pub mod orbit;
pub mod predict;
pub mod track;
pub mod tracker;

pub use alarm::AlarmRate;
pub use orbit::{GroundPoint, Observer, OrbitError, OrbitModel, Sgp4Model, Topocentric};
pub use predict::{
    classify, find_next_pass, upcoming_passes, PassEdge, PassPhase, PassWindow, PredictError,
    ScheduledPass, SearchConfig,
};
pub use track::{footprint_rings, ground_track, FootprintRing, GroundTrack, SweepConfig, TrackPoint};
pub use tracker::{Sweep, Tracker};
