pub mod json_landmark_detector;
