pub mod analysis;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod result;
pub mod signal_processing;
pub mod units;

pub use config::{SimulationConfig, SimulationParams};
pub use error::{ItofError, Result};
pub use pipeline::{Simulator, simulate};
pub use result::SimulationResult;
