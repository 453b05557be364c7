use std::path::PathBuf;

use thiserror::Error;

/// Startup configuration failures. Any of these refuses to start the loop.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("calibration distance range must satisfy min < max, got {min}..{max}")]
    InvalidDistanceRange { min: f64, max: f64 },
    #[error("calibration output range must satisfy min < max, got {min}..{max}")]
    InvalidOutputRange { min: f64, max: f64 },
    #[error("calibration bounds must be finite numbers")]
    NonFiniteBound,
    #[error("actuator command is empty")]
    EmptyCommand,
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
