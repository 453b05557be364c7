use serde::{Deserialize, Serialize};

use crate::shared::config_error::ConfigError;
use crate::shared::constants::{
    DEFAULT_MAX_BRIGHTNESS, DEFAULT_MAX_DISTANCE, DEFAULT_MAX_VOLUME, DEFAULT_MIN_BRIGHTNESS,
    DEFAULT_MIN_DISTANCE, DEFAULT_MIN_VOLUME,
};

/// Affine mapping from a gesture distance to a control output, clamped.
///
/// Formula: `out = (d - min_d) / (max_d - min_d) * (max_o - min_o) + min_o`,
/// clamped to `[min_o, max_o]`. Both intervals must be strictly increasing,
/// which `new` enforces so `map` never divides by zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCalibration", into = "RawCalibration")]
pub struct CalibrationRange {
    min_distance: f64,
    max_distance: f64,
    min_output: f64,
    max_output: f64,
}

impl CalibrationRange {
    /// 0.05-0.30 pinch distance to a 0.0-1.0 volume scalar.
    pub const DEFAULT_VOLUME: Self = Self::from_bounds(
        DEFAULT_MIN_DISTANCE,
        DEFAULT_MAX_DISTANCE,
        DEFAULT_MIN_VOLUME,
        DEFAULT_MAX_VOLUME,
    );

    /// 0.05-0.30 pinch distance to 10-100 percent brightness.
    pub const DEFAULT_BRIGHTNESS: Self = Self::from_bounds(
        DEFAULT_MIN_DISTANCE,
        DEFAULT_MAX_DISTANCE,
        DEFAULT_MIN_BRIGHTNESS,
        DEFAULT_MAX_BRIGHTNESS,
    );

    /// Skips validation; only for the built-in constants above.
    const fn from_bounds(
        min_distance: f64,
        max_distance: f64,
        min_output: f64,
        max_output: f64,
    ) -> Self {
        Self {
            min_distance,
            max_distance,
            min_output,
            max_output,
        }
    }

    pub fn new(
        min_distance: f64,
        max_distance: f64,
        min_output: f64,
        max_output: f64,
    ) -> Result<Self, ConfigError> {
        let bounds = [min_distance, max_distance, min_output, max_output];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(ConfigError::NonFiniteBound);
        }
        if min_distance >= max_distance {
            return Err(ConfigError::InvalidDistanceRange {
                min: min_distance,
                max: max_distance,
            });
        }
        if min_output >= max_output {
            return Err(ConfigError::InvalidOutputRange {
                min: min_output,
                max: max_output,
            });
        }
        Ok(Self::from_bounds(
            min_distance,
            max_distance,
            min_output,
            max_output,
        ))
    }

    pub fn map(&self, distance: f64) -> f64 {
        let t = (distance - self.min_distance) / (self.max_distance - self.min_distance);
        let out = t * (self.max_output - self.min_output) + self.min_output;
        // NaN input falls to the floor rather than leaking into actuators.
        if out.is_nan() {
            return self.min_output;
        }
        out.clamp(self.min_output, self.max_output)
    }

    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    pub fn min_output(&self) -> f64 {
        self.min_output
    }

    pub fn max_output(&self) -> f64 {
        self.max_output
    }
}

/// Unvalidated on-disk form of a [`CalibrationRange`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct RawCalibration {
    min_distance: f64,
    max_distance: f64,
    min_output: f64,
    max_output: f64,
}

impl TryFrom<RawCalibration> for CalibrationRange {
    type Error = ConfigError;

    fn try_from(raw: RawCalibration) -> Result<Self, Self::Error> {
        CalibrationRange::new(
            raw.min_distance,
            raw.max_distance,
            raw.min_output,
            raw.max_output,
        )
    }
}

impl From<CalibrationRange> for RawCalibration {
    fn from(range: CalibrationRange) -> Self {
        Self {
            min_distance: range.min_distance,
            max_distance: range.max_distance,
            min_output: range.min_output,
            max_output: range.max_output,
        }
    }
}
