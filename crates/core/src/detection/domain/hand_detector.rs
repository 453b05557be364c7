use crate::shared::frame::Frame;
use crate::shared::hand::HandDetection;

/// Domain interface for hand-landmark detection.
///
/// Returns zero or more hands, each with normalized keypoints. Detectors
/// may track across frames, hence `&mut self`.
pub trait HandDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<HandDetection>, Box<dyn std::error::Error>>;
}
