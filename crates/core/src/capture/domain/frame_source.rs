use crate::shared::frame::Frame;

/// Produces frames in capture order.
///
/// The iterator ending means the source is exhausted. An `Err` item is a
/// failed read of one frame; callers skip it and keep pulling.
pub trait FrameSource: Send {
    fn frames(&mut self)
        -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;
}
