pub mod command_actuator;
pub mod logging_actuator;
pub mod terminal_display;
