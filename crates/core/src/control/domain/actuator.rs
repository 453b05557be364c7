use thiserror::Error;

use super::control_channel::ControlLevel;

#[derive(Error, Debug)]
pub enum ActuatorError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    Status { program: String, status: String },
    #[error("backend rejected level: {0}")]
    Backend(String),
}

/// Domain interface for a device that applies a level (speaker volume,
/// screen brightness).
///
/// Calls are synchronous; blocking for a few milliseconds is acceptable at
/// camera frame rates.
pub trait Actuator: Send {
    fn set_level(&mut self, level: ControlLevel) -> Result<(), ActuatorError>;
}
