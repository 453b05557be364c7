use crate::gesture::domain::hand_role::HandRole;

/// A device setting driven by one hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlChannel {
    Volume,
    Brightness,
}

/// Value handed to an actuator.
///
/// `value` is in the unit the backend expects (a 0.0-1.0 scalar for volume,
/// a whole percent for brightness); `percent` is the same level on a 0-100
/// scale for display and command templates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlLevel {
    pub value: f64,
    pub percent: f64,
}

impl ControlChannel {
    /// Left hand drives volume, right hand drives brightness.
    pub fn for_role(role: HandRole) -> Self {
        match role {
            HandRole::Left => ControlChannel::Volume,
            HandRole::Right => ControlChannel::Brightness,
        }
    }

    /// Converts a calibrated output into what the backend receives.
    ///
    /// Brightness backends take whole percents, so the value is truncated.
    pub fn level(self, mapped: f64) -> ControlLevel {
        match self {
            ControlChannel::Volume => ControlLevel {
                value: mapped,
                percent: mapped * 100.0,
            },
            ControlChannel::Brightness => {
                let whole = mapped.trunc();
                ControlLevel {
                    value: whole,
                    percent: whole,
                }
            }
        }
    }
}

impl std::fmt::Display for ControlChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlChannel::Volume => write!(f, "volume"),
            ControlChannel::Brightness => write!(f, "brightness"),
        }
    }
}
