use thiserror::Error;

use super::actuator::{Actuator, ActuatorError};
use super::control_channel::ControlChannel;
use super::control_reading::ControlReadings;
use crate::gesture::domain::hand_role::HandRole;

#[derive(Error, Debug)]
#[error("{channel} actuator failed: {source}")]
pub struct DispatchError {
    pub channel: ControlChannel,
    #[source]
    pub source: ActuatorError,
}

/// What happened to a dispatched value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The actuator accepted the level.
    Applied,
    /// The channel has no backend; the level was only recorded for display.
    DisplayOnly,
}

/// Routes mapped values to the actuator owning each channel.
///
/// The brightness actuator is optional and decided once at construction;
/// without it the channel stays display-only for the dispatcher's lifetime.
pub struct ControlDispatcher {
    volume: Box<dyn Actuator>,
    brightness: Option<Box<dyn Actuator>>,
    readings: ControlReadings,
}

impl ControlDispatcher {
    pub fn new(volume: Box<dyn Actuator>, brightness: Option<Box<dyn Actuator>>) -> Self {
        let readings = ControlReadings::new(brightness.is_some());
        Self {
            volume,
            brightness,
            readings,
        }
    }

    pub fn brightness_available(&self) -> bool {
        self.brightness.is_some()
    }

    pub fn readings(&self) -> &ControlReadings {
        &self.readings
    }

    /// Sends `value` (in the channel's calibrated units) to the role's actuator.
    ///
    /// On failure the previous reading is kept.
    pub fn dispatch(&mut self, role: HandRole, value: f64) -> Result<Dispatch, DispatchError> {
        let channel = ControlChannel::for_role(role);
        let level = channel.level(value);

        let actuator = match channel {
            ControlChannel::Volume => Some(&mut self.volume),
            ControlChannel::Brightness => self.brightness.as_mut(),
        };

        let outcome = match actuator {
            Some(actuator) => {
                actuator
                    .set_level(level)
                    .map_err(|source| DispatchError { channel, source })?;
                Dispatch::Applied
            }
            None => Dispatch::DisplayOnly,
        };

        self.readings.record(channel, level.percent);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::domain::control_channel::ControlLevel;
    use approx::assert_relative_eq;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct RecordingActuator {
        levels: Arc<Mutex<Vec<ControlLevel>>>,
    }

    impl RecordingActuator {
        fn new() -> (Self, Arc<Mutex<Vec<ControlLevel>>>) {
            let levels = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    levels: levels.clone(),
                },
                levels,
            )
        }
    }

    impl Actuator for RecordingActuator {
        fn set_level(&mut self, level: ControlLevel) -> Result<(), ActuatorError> {
            self.levels.lock().unwrap().push(level);
            Ok(())
        }
    }

    struct FailingActuator;

    impl Actuator for FailingActuator {
        fn set_level(&mut self, _level: ControlLevel) -> Result<(), ActuatorError> {
            Err(ActuatorError::Backend("device unplugged".to_string()))
        }
    }

    // --- Tests ---

    #[test]
    fn test_left_role_drives_volume() {
        let (volume, volume_levels) = RecordingActuator::new();
        let (brightness, brightness_levels) = RecordingActuator::new();
        let mut dispatcher = ControlDispatcher::new(Box::new(volume), Some(Box::new(brightness)));

        let outcome = dispatcher.dispatch(HandRole::Left, 0.5).unwrap();

        assert_eq!(outcome, Dispatch::Applied);
        let levels = volume_levels.lock().unwrap();
        assert_eq!(levels.len(), 1);
        assert_relative_eq!(levels[0].value, 0.5);
        assert!(brightness_levels.lock().unwrap().is_empty());
        assert_eq!(dispatcher.readings().volume_percent(), Some(50.0));
    }

    #[test]
    fn test_right_role_drives_brightness_as_whole_percent() {
        let (volume, volume_levels) = RecordingActuator::new();
        let (brightness, brightness_levels) = RecordingActuator::new();
        let mut dispatcher = ControlDispatcher::new(Box::new(volume), Some(Box::new(brightness)));

        dispatcher.dispatch(HandRole::Right, 64.7).unwrap();

        let levels = brightness_levels.lock().unwrap();
        assert_eq!(levels.len(), 1);
        assert_relative_eq!(levels[0].value, 64.0);
        assert!(volume_levels.lock().unwrap().is_empty());
        assert_eq!(dispatcher.readings().brightness_percent(), Some(64.0));
    }

    #[test]
    fn test_missing_brightness_backend_is_display_only() {
        let (volume, _) = RecordingActuator::new();
        let mut dispatcher = ControlDispatcher::new(Box::new(volume), None);

        assert!(!dispatcher.brightness_available());
        let outcome = dispatcher.dispatch(HandRole::Right, 80.0).unwrap();

        assert_eq!(outcome, Dispatch::DisplayOnly);
        assert!(!dispatcher.readings().brightness_enabled());
        assert_eq!(dispatcher.readings().brightness_percent(), Some(80.0));
    }

    #[test]
    fn test_volume_failure_keeps_previous_reading() {
        let mut dispatcher = ControlDispatcher::new(Box::new(FailingActuator), None);

        let err = dispatcher.dispatch(HandRole::Left, 0.7).unwrap_err();

        assert_eq!(err.channel, ControlChannel::Volume);
        assert!(err.to_string().contains("device unplugged"));
        assert!(dispatcher.readings().volume_percent().is_none());
    }

    #[test]
    fn test_brightness_failure_keeps_previous_reading() {
        let (volume, _) = RecordingActuator::new();
        let mut dispatcher =
            ControlDispatcher::new(Box::new(volume), Some(Box::new(FailingActuator)));

        assert!(dispatcher.dispatch(HandRole::Right, 40.0).is_err());
        assert!(dispatcher.readings().brightness_percent().is_none());
        assert!(dispatcher.readings().brightness_enabled());
    }

    #[test]
    fn test_later_dispatch_overwrites_reading() {
        let (volume, _) = RecordingActuator::new();
        let mut dispatcher = ControlDispatcher::new(Box::new(volume), None);

        dispatcher.dispatch(HandRole::Left, 0.2).unwrap();
        dispatcher.dispatch(HandRole::Left, 0.9).unwrap();

        assert_relative_eq!(dispatcher.readings().volume_percent().unwrap(), 90.0);
    }
}
