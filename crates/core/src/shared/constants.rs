/// Wrist x-coordinate splitting the frame into the two control roles.
pub const HAND_SPLIT_X: f64 = 0.5;

pub const DEFAULT_MIN_DISTANCE: f64 = 0.05;
pub const DEFAULT_MAX_DISTANCE: f64 = 0.3;

/// Volume is driven as a 0.0-1.0 scalar and shown as a percentage.
pub const DEFAULT_MIN_VOLUME: f64 = 0.0;
pub const DEFAULT_MAX_VOLUME: f64 = 1.0;

/// Brightness never goes fully dark.
pub const DEFAULT_MIN_BRIGHTNESS: f64 = 10.0;
pub const DEFAULT_MAX_BRIGHTNESS: f64 = 100.0;

pub const CONFIG_DIR_NAME: &str = "handdial";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Consecutive read failures after which a landmark stream is treated as closed.
pub const MAX_CONSECUTIVE_READ_ERRORS: usize = 30;
