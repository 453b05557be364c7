pub mod capture;
pub mod control;
pub mod detection;
pub mod gesture;
pub mod pipeline;
pub mod shared;
