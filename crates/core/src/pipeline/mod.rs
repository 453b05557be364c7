pub mod control_logger;
pub mod gesture_control_use_case;
