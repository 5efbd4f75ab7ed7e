mod classifier;
mod error;
mod pass_finder;
mod scheduler;
mod types;

pub use classifier::classify;
pub use error::PredictError;
pub use pass_finder::find_next_pass;
pub use scheduler::upcoming_passes;
pub use types::{PassEdge, PassPhase, PassWindow, ScheduledPass, SearchConfig};
