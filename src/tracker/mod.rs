mod tracker;

pub use tracker::{Sweep, Tracker};
