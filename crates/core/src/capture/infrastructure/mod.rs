pub mod detector_process;
pub mod landmark_stream;
