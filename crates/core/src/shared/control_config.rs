use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::config_error::ConfigError;
use super::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::gesture::domain::calibration::CalibrationRange;
use crate::gesture::domain::frame_classifier::TieBreak;
use crate::gesture::domain::gesture_mapper::GestureMapper;

/// Calibration and classification settings, stored as JSON.
///
/// Every field is optional on disk; missing ones take the defaults.
/// Calibration ranges are validated while parsing, so a loaded config is
/// always usable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlConfig {
    #[serde(default = "default_volume")]
    pub volume: CalibrationRange,
    #[serde(default = "default_brightness")]
    pub brightness: CalibrationRange,
    #[serde(default)]
    pub tie_break: TieBreak,
}

fn default_volume() -> CalibrationRange {
    CalibrationRange::DEFAULT_VOLUME
}

fn default_brightness() -> CalibrationRange {
    CalibrationRange::DEFAULT_BRIGHTNESS
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            brightness: default_brightness(),
            tie_break: TieBreak::default(),
        }
    }
}

impl ControlConfig {
    /// `<config_dir>/handdial/config.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Explicit path if given, else the default location if it exists,
    /// else built-in defaults. An explicit path that cannot be read is an error.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            log::info!("Loading config from {}", path.display());
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                log::info!("Loading config from {}", path.display());
                Self::load(&path)
            }
            _ => {
                log::info!("No config file found, using default calibration");
                Ok(Self::default())
            }
        }
    }

    pub fn mapper(&self) -> GestureMapper {
        GestureMapper::new(self.volume, self.brightness)
    }
}
