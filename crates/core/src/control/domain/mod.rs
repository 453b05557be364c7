pub mod actuator;
pub mod control_channel;
pub mod control_dispatcher;
pub mod control_reading;
pub mod readings_display;
