pub mod config_error;
pub mod constants;
pub mod control_config;
pub mod frame;
pub mod hand;
pub mod landmark;
