use super::control_channel::ControlChannel;

/// Last dispatched level of each channel, as 0-100 percentages.
///
/// A reading holds until a hand for that channel shows up again; absent
/// hands never reset it. `None` means nothing has been dispatched yet.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlReadings {
    volume: Option<f64>,
    brightness: Option<f64>,
    brightness_enabled: bool,
}

impl ControlReadings {
    pub fn new(brightness_enabled: bool) -> Self {
        Self {
            volume: None,
            brightness: None,
            brightness_enabled,
        }
    }

    pub fn get(&self, channel: ControlChannel) -> Option<f64> {
        match channel {
            ControlChannel::Volume => self.volume,
            ControlChannel::Brightness => self.brightness,
        }
    }

    pub fn volume_percent(&self) -> Option<f64> {
        self.volume
    }

    /// Computed even when the channel is disabled, so callers can still
    /// show what the gesture would have set.
    pub fn brightness_percent(&self) -> Option<f64> {
        self.brightness
    }

    pub fn brightness_enabled(&self) -> bool {
        self.brightness_enabled
    }

    pub(crate) fn record(&mut self, channel: ControlChannel, percent: f64) {
        match channel {
            ControlChannel::Volume => self.volume = Some(percent),
            ControlChannel::Brightness => self.brightness = Some(percent),
        }
    }
}

impl std::fmt::Display for ControlReadings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.volume {
            Some(v) => write!(f, "Volume: {v:.2}%")?,
            None => write!(f, "Volume: --")?,
        }
        match (self.brightness_enabled, self.brightness) {
            (false, _) => write!(f, " | Brightness: disabled"),
            (true, Some(b)) => write!(f, " | Brightness: {b:.0}%"),
            (true, None) => write!(f, " | Brightness: --"),
        }
    }
}
