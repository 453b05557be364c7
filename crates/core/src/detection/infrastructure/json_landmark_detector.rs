use serde::Deserialize;
use thiserror::Error;

use crate::detection::domain::hand_detector::HandDetector;
use crate::shared::frame::Frame;
use crate::shared::hand::HandDetection;
use crate::shared::landmark::{Point, LANDMARK_COUNT};

#[derive(Error, Debug)]
pub enum LandmarkDecodeError {
    #[error("frame {index} is not valid landmark JSON: {source}")]
    Json {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("upstream capture failed on frame {index}: {message}")]
    Upstream { index: usize, message: String },
}

/// One line of detector output: either hands, or an upstream failure.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum FrameMessage {
    Hands { hands: Vec<HandMessage> },
    Error { error: String },
}

#[derive(Deserialize, Debug)]
struct HandMessage {
    landmarks: Vec<PointMessage>,
}

/// Extra fields such as `z` or `visibility` are ignored.
#[derive(Deserialize, Debug, Clone, Copy)]
struct PointMessage {
    x: f64,
    y: f64,
}

/// Decodes landmark documents written by an out-of-process detector.
///
/// Expected shape, landmarks in the 21-point index order:
/// `{"hands":[{"landmarks":[{"x":0.51,"y":0.83}, ...]}]}`.
/// A document `{"error":"..."}` reports that the upstream capture failed.
#[derive(Default)]
pub struct JsonLandmarkDetector;

impl JsonLandmarkDetector {
    pub fn new() -> Self {
        Self
    }
}

impl HandDetector for JsonLandmarkDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<HandDetection>, Box<dyn std::error::Error>> {
        let index = frame.index();
        let message: FrameMessage = serde_json::from_slice(frame.data())
            .map_err(|source| LandmarkDecodeError::Json { index, source })?;

        match message {
            FrameMessage::Error { error } => Err(LandmarkDecodeError::Upstream {
                index,
                message: error,
            }
            .into()),
            FrameMessage::Hands { hands } => Ok(hands.iter().map(to_detection).collect()),
        }
    }
}

fn to_detection(hand: &HandMessage) -> HandDetection {
    if hand.landmarks.len() > LANDMARK_COUNT {
        log::debug!(
            "Hand has {} landmarks, ignoring those past {LANDMARK_COUNT}",
            hand.landmarks.len()
        );
    }
    let points: Vec<Point> = hand
        .landmarks
        .iter()
        .map(|p| Point::new(p.x, p.y))
        .collect();
    HandDetection::from_indexed(&points)
}
