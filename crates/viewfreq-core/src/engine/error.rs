use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::gaussian::GaussianLogError;
use crate::core::io::modes::ModeRecordError;
use crate::core::io::xyz::CoordinateError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Cannot animate an empty geometry")]
    EmptyGeometry,

    #[error("Cannot animate a mode without displacements")]
    EmptyDisplacements,

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Mode {requested} not found ({available} mode(s) available)")]
    ModeNotFound { requested: usize, available: usize },

    #[error("Failed to read Gaussian transcript: {source}")]
    Log {
        #[from]
        source: GaussianLogError,
    },

    #[error("Coordinate text error: {source}")]
    Coordinates {
        #[from]
        source: CoordinateError,
    },

    #[error("Mode record error: {source}")]
    ModeRecord {
        #[from]
        source: ModeRecordError,
    },

    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}
