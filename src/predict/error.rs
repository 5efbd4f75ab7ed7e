use thiserror::Error;

use crate::orbit::OrbitError;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("orbit model error: {0}")]
    Orbit(#[from] OrbitError),
    #[error("invalid search config: {0}")]
    InvalidConfig(&'static str),
}
