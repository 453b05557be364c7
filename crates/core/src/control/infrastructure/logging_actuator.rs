use crate::control::domain::actuator::{Actuator, ActuatorError};
use crate::control::domain::control_channel::{ControlChannel, ControlLevel};

/// Dry-run backend: reports each level change through the `log` facade.
pub struct LoggingActuator {
    channel: ControlChannel,
    last_percent: Option<i64>,
}

impl LoggingActuator {
    pub fn new(channel: ControlChannel) -> Self {
        Self {
            channel,
            last_percent: None,
        }
    }
}

impl Actuator for LoggingActuator {
    fn set_level(&mut self, level: ControlLevel) -> Result<(), ActuatorError> {
        let percent = level.percent.round() as i64;
        if self.last_percent != Some(percent) {
            log::info!("{} -> {percent}%", self.channel);
            self.last_percent = Some(percent);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_always_succeeds_and_tracks_last_percent() {
        let mut actuator = LoggingActuator::new(ControlChannel::Volume);
        actuator
            .set_level(ControlLevel {
                value: 0.31,
                percent: 31.0,
            })
            .unwrap();
        assert_eq!(actuator.last_percent, Some(31));

        actuator
            .set_level(ControlLevel {
                value: 0.314,
                percent: 31.4,
            })
            .unwrap();
        assert_eq!(actuator.last_percent, Some(31));
    }
}
