pub mod hand_detector;
