use thiserror::Error;

use super::calibration::CalibrationRange;
use super::hand_role::HandRole;
use crate::control::domain::control_channel::ControlChannel;
use crate::shared::hand::HandDetection;
use crate::shared::landmark::Landmark;

#[derive(Error, Debug, PartialEq)]
pub enum GestureError {
    #[error("hand is missing the {0:?} landmark")]
    MissingLandmark(Landmark),
}

/// Pinch distance: thumb tip to index finger tip, in normalized units.
pub fn measure(detection: &HandDetection) -> Result<f64, GestureError> {
    let thumb = detection
        .get(Landmark::ThumbTip)
        .ok_or(GestureError::MissingLandmark(Landmark::ThumbTip))?;
    let index = detection
        .get(Landmark::IndexFingerTip)
        .ok_or(GestureError::MissingLandmark(Landmark::IndexFingerTip))?;
    Ok(thumb.distance_to(&index))
}

/// A mapped gesture, ready for dispatch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureReading {
    pub channel: ControlChannel,
    pub distance: f64,
    /// Output in the channel's calibrated units (volume scalar, brightness percent).
    pub value: f64,
}

/// Turns a hand into a control value using one calibration per channel.
///
/// Ranges are validated when built, so mapping itself cannot fail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureMapper {
    volume: CalibrationRange,
    brightness: CalibrationRange,
}

impl GestureMapper {
    pub fn new(volume: CalibrationRange, brightness: CalibrationRange) -> Self {
        Self { volume, brightness }
    }

    pub fn range(&self, channel: ControlChannel) -> &CalibrationRange {
        match channel {
            ControlChannel::Volume => &self.volume,
            ControlChannel::Brightness => &self.brightness,
        }
    }

    pub fn map_to_range(&self, channel: ControlChannel, distance: f64) -> f64 {
        self.range(channel).map(distance)
    }

    pub fn read(
        &self,
        role: HandRole,
        detection: &HandDetection,
    ) -> Result<GestureReading, GestureError> {
        let channel = ControlChannel::for_role(role);
        let distance = measure(detection)?;
        Ok(GestureReading {
            channel,
            distance,
            value: self.map_to_range(channel, distance),
        })
    }
}
