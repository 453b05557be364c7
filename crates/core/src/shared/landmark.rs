//! Hand keypoint vocabulary in the detector's index order.

/// A named keypoint on a detected hand.
///
/// Discriminants follow the 21-point hand model used by common landmark
/// detectors, so a detector's positional output converts directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Landmark {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexFingerMcp = 5,
    IndexFingerPip = 6,
    IndexFingerDip = 7,
    IndexFingerTip = 8,
    MiddleFingerMcp = 9,
    MiddleFingerPip = 10,
    MiddleFingerDip = 11,
    MiddleFingerTip = 12,
    RingFingerMcp = 13,
    RingFingerPip = 14,
    RingFingerDip = 15,
    RingFingerTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

pub const LANDMARK_COUNT: usize = 21;

impl Landmark {
    pub const ALL: [Landmark; LANDMARK_COUNT] = [
        Landmark::Wrist,
        Landmark::ThumbCmc,
        Landmark::ThumbMcp,
        Landmark::ThumbIp,
        Landmark::ThumbTip,
        Landmark::IndexFingerMcp,
        Landmark::IndexFingerPip,
        Landmark::IndexFingerDip,
        Landmark::IndexFingerTip,
        Landmark::MiddleFingerMcp,
        Landmark::MiddleFingerPip,
        Landmark::MiddleFingerDip,
        Landmark::MiddleFingerTip,
        Landmark::RingFingerMcp,
        Landmark::RingFingerPip,
        Landmark::RingFingerDip,
        Landmark::RingFingerTip,
        Landmark::PinkyMcp,
        Landmark::PinkyPip,
        Landmark::PinkyDip,
        Landmark::PinkyTip,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// A normalized, image-relative 2-D point. Both axes nominally lie in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
