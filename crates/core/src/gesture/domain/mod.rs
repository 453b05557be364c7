pub mod calibration;
pub mod frame_classifier;
pub mod gesture_mapper;
pub mod hand_role;
