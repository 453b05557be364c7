use crate::shared::constants::HAND_SPLIT_X;

/// Control role of a hand, derived from where its wrist sits in the frame.
///
/// The camera image is mirrored relative to the user, so a wrist on the
/// left half of the image belongs to the user's right hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandRole {
    Left,
    Right,
}

impl HandRole {
    /// `x < 0.5` is `Right`, everything else (including exactly 0.5) is `Left`.
    pub fn from_wrist_x(x: f64) -> Self {
        if x < HAND_SPLIT_X {
            HandRole::Right
        } else {
            HandRole::Left
        }
    }
}

impl std::fmt::Display for HandRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandRole::Left => write!(f, "left"),
            HandRole::Right => write!(f, "right"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::far_left(0.0, HandRole::Right)]
    #[case::left_half(0.25, HandRole::Right)]
    #[case::just_below_split(0.4999, HandRole::Right)]
    #[case::at_split(0.5, HandRole::Left)]
    #[case::right_half(0.75, HandRole::Left)]
    #[case::far_right(1.0, HandRole::Left)]
    fn test_from_wrist_x(#[case] x: f64, #[case] expected: HandRole) {
        assert_eq!(HandRole::from_wrist_x(x), expected);
    }

    #[test]
    fn test_out_of_frame_values_still_classify() {
        assert_eq!(HandRole::from_wrist_x(-0.1), HandRole::Right);
        assert_eq!(HandRole::from_wrist_x(1.2), HandRole::Left);
    }

    #[test]
    fn test_display() {
        assert_eq!(HandRole::Left.to_string(), "left");
        assert_eq!(HandRole::Right.to_string(), "right");
    }
}
