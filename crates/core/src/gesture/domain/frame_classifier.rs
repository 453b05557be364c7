use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::hand_role::HandRole;
use crate::shared::hand::HandDetection;
use crate::shared::landmark::Landmark;

/// Which detection keeps a role slot when several hands land on the same side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The last detection in detector order wins.
    #[default]
    LastSeen,
    /// The first detection in detector order wins.
    FirstSeen,
    /// The detection with the largest landmark bounding box wins; equal
    /// areas keep the earlier detection.
    LargestHand,
}

impl TieBreak {
    pub const ALL: &[TieBreak] = &[TieBreak::LastSeen, TieBreak::FirstSeen, TieBreak::LargestHand];

    fn replaces(self, current: &HandDetection, candidate: &HandDetection) -> bool {
        match self {
            TieBreak::LastSeen => true,
            TieBreak::FirstSeen => false,
            TieBreak::LargestHand => candidate.bounding_area() > current.bounding_area(),
        }
    }
}

impl std::fmt::Display for TieBreak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TieBreak::LastSeen => write!(f, "last_seen"),
            TieBreak::FirstSeen => write!(f, "first_seen"),
            TieBreak::LargestHand => write!(f, "largest_hand"),
        }
    }
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last_seen" => Ok(TieBreak::LastSeen),
            "first_seen" => Ok(TieBreak::FirstSeen),
            "largest_hand" => Ok(TieBreak::LargestHand),
            other => {
                let valid: Vec<String> = TieBreak::ALL.iter().map(|t| t.to_string()).collect();
                Err(format!(
                    "Tie-break must be one of: {}, got '{other}'",
                    valid.join(", ")
                ))
            }
        }
    }
}

/// At most one detection per role for a single frame.
#[derive(Debug, Default, PartialEq)]
pub struct ClassifiedHands<'a> {
    pub left: Option<&'a HandDetection>,
    pub right: Option<&'a HandDetection>,
}

impl<'a> ClassifiedHands<'a> {
    pub fn get(&self, role: HandRole) -> Option<&'a HandDetection> {
        match role {
            HandRole::Left => self.left,
            HandRole::Right => self.right,
        }
    }

    pub fn count(&self) -> usize {
        self.left.is_some() as usize + self.right.is_some() as usize
    }

    fn slot(&mut self, role: HandRole) -> &mut Option<&'a HandDetection> {
        match role {
            HandRole::Left => &mut self.left,
            HandRole::Right => &mut self.right,
        }
    }
}

/// Splits a frame's detections into left and right roles by wrist position.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClassifier {
    tie_break: TieBreak,
}

impl FrameClassifier {
    pub fn new(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Detections without a usable wrist are dropped; they cannot be placed.
    pub fn classify<'a>(&self, detections: &'a [HandDetection]) -> ClassifiedHands<'a> {
        let mut hands = ClassifiedHands::default();
        for (i, detection) in detections.iter().enumerate() {
            let Some(wrist) = detection.get(Landmark::Wrist) else {
                log::debug!("Discarding hand {i}: no wrist landmark");
                continue;
            };
            if !wrist.x.is_finite() {
                log::debug!("Discarding hand {i}: non-finite wrist x");
                continue;
            }

            let role = HandRole::from_wrist_x(wrist.x);
            let slot = hands.slot(role);
            match *slot {
                None => *slot = Some(detection),
                Some(current) if self.tie_break.replaces(current, detection) => {
                    log::debug!("Hand {i} replaces earlier {role} hand ({})", self.tie_break);
                    *slot = Some(detection);
                }
                Some(_) => {
                    log::debug!("Hand {i} dropped, {role} slot kept ({})", self.tie_break);
                }
            }
        }
        hands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::landmark::Point;
    use rstest::rstest;

    fn hand_at(wrist_x: f64) -> HandDetection {
        HandDetection::default().with(Landmark::Wrist, Point::new(wrist_x, 0.8))
    }

    /// Hand whose bounding box is `size` x `size` around the wrist.
    fn sized_hand(wrist_x: f64, size: f64) -> HandDetection {
        hand_at(wrist_x).with(Landmark::IndexFingerTip, Point::new(wrist_x + size, 0.8 - size))
    }

    #[test]
    fn test_empty_frame() {
        let classifier = FrameClassifier::default();
        let hands = classifier.classify(&[]);
        assert!(hands.left.is_none());
        assert!(hands.right.is_none());
        assert_eq!(hands.count(), 0);
    }

    #[rstest]
    #[case::right_side(0.2, HandRole::Right)]
    #[case::midpoint(0.5, HandRole::Left)]
    #[case::left_side(0.8, HandRole::Left)]
    fn test_single_hand_role(#[case] x: f64, #[case] role: HandRole) {
        let detections = vec![hand_at(x)];
        let hands = FrameClassifier::default().classify(&detections);
        assert_eq!(hands.count(), 1);
        assert_eq!(hands.get(role), Some(&detections[0]));
    }

    #[test]
    fn test_two_hands_fill_both_slots() {
        let detections = vec![hand_at(0.7), hand_at(0.3)];
        let hands = FrameClassifier::default().classify(&detections);
        assert_eq!(hands.left, Some(&detections[0]));
        assert_eq!(hands.right, Some(&detections[1]));
        assert_eq!(hands.count(), 2);
    }

    #[test]
    fn test_missing_wrist_is_discarded() {
        let no_wrist = HandDetection::default().with(Landmark::ThumbTip, Point::new(0.2, 0.2));
        let detections = vec![no_wrist];
        let hands = FrameClassifier::default().classify(&detections);
        assert_eq!(hands.count(), 0);
    }

    #[test]
    fn test_nan_wrist_is_discarded() {
        let detections = vec![hand_at(f64::NAN), hand_at(0.6)];
        let hands = FrameClassifier::default().classify(&detections);
        assert!(hands.right.is_none());
        assert_eq!(hands.left, Some(&detections[1]));
    }

    #[test]
    fn test_last_seen_is_default() {
        assert_eq!(FrameClassifier::default().tie_break(), TieBreak::LastSeen);
    }

    #[test]
    fn test_last_seen_overwrites() {
        let detections = vec![hand_at(0.1), hand_at(0.2), hand_at(0.3)];
        let hands = FrameClassifier::new(TieBreak::LastSeen).classify(&detections);
        assert_eq!(hands.right, Some(&detections[2]));
        assert!(hands.left.is_none());
    }

    #[test]
    fn test_first_seen_keeps_first() {
        let detections = vec![hand_at(0.6), hand_at(0.9), hand_at(0.1)];
        let hands = FrameClassifier::new(TieBreak::FirstSeen).classify(&detections);
        assert_eq!(hands.left, Some(&detections[0]));
        assert_eq!(hands.right, Some(&detections[2]));
    }

    #[test]
    fn test_largest_hand_wins() {
        let detections = vec![sized_hand(0.1, 0.05), sized_hand(0.2, 0.2), sized_hand(0.3, 0.1)];
        let hands = FrameClassifier::new(TieBreak::LargestHand).classify(&detections);
        assert_eq!(hands.right, Some(&detections[1]));
    }

    #[test]
    fn test_largest_hand_equal_area_keeps_earlier() {
        let detections = vec![sized_hand(0.6, 0.1), sized_hand(0.7, 0.1)];
        let hands = FrameClassifier::new(TieBreak::LargestHand).classify(&detections);
        assert_eq!(hands.left, Some(&detections[0]));
    }

    #[rstest]
    #[case("last_seen", TieBreak::LastSeen)]
    #[case("first_seen", TieBreak::FirstSeen)]
    #[case("largest_hand", TieBreak::LargestHand)]
    fn test_tie_break_parse_and_display(#[case] text: &str, #[case] expected: TieBreak) {
        assert_eq!(text.parse::<TieBreak>().unwrap(), expected);
        assert_eq!(expected.to_string(), text);
    }

    #[test]
    fn test_tie_break_parse_rejects_unknown() {
        let err = "nearest".parse::<TieBreak>().unwrap_err();
        assert_eq!(
            err,
            "Tie-break must be one of: last_seen, first_seen, largest_hand, got 'nearest'"
        );
    }

    #[test]
    fn test_tie_break_serde_names() {
        let json = serde_json::to_string(&TieBreak::LargestHand).unwrap();
        assert_eq!(json, "\"largest_hand\"");
        let parsed: TieBreak = serde_json::from_str("\"first_seen\"").unwrap();
        assert_eq!(parsed, TieBreak::FirstSeen);
    }
}
