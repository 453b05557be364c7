use std::collections::BTreeMap;

use super::landmark::{Landmark, Point};

/// One detected hand in one frame: landmark name to normalized point.
///
/// Detectors may omit landmarks they could not place; consumers decide
/// what a missing keypoint means for them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandDetection {
    landmarks: BTreeMap<Landmark, Point>,
}

impl HandDetection {
    pub fn new(landmarks: BTreeMap<Landmark, Point>) -> Self {
        Self { landmarks }
    }

    /// Builds a detection from points in detector index order.
    ///
    /// Points beyond the known landmark count are ignored.
    pub fn from_indexed(points: &[Point]) -> Self {
        let landmarks = points
            .iter()
            .enumerate()
            .filter_map(|(i, p)| Landmark::from_index(i).map(|lm| (lm, *p)))
            .collect();
        Self { landmarks }
    }

    pub fn with(mut self, landmark: Landmark, point: Point) -> Self {
        self.landmarks.insert(landmark, point);
        self
    }

    pub fn get(&self, landmark: Landmark) -> Option<Point> {
        self.landmarks.get(&landmark).copied()
    }

    pub fn landmarks(&self) -> &BTreeMap<Landmark, Point> {
        &self.landmarks
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Area of the axis-aligned box around all finite landmarks.
    ///
    /// A larger box means the hand is closer to the camera. Returns 0.0
    /// for fewer than two finite points.
    pub fn bounding_area(&self) -> f64 {
        let mut points = self.landmarks.values().filter(|p| p.is_finite());
        let Some(first) = points.next() else {
            return 0.0;
        };
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        (max_x - min_x) * (max_y - min_y)
    }
}
