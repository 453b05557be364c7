use super::control_reading::ControlReadings;

/// Presentation surface for the current control levels.
///
/// Called once per completed frame; implementations decide how (or whether)
/// to redraw.
pub trait ReadingsDisplay: Send {
    fn render(&mut self, readings: &ControlReadings);

    /// Called once when the loop ends. Default: no-op.
    fn finish(&mut self) {}
}

/// Display that draws nothing. Used with `--quiet` and in tests.
pub struct NullReadingsDisplay;

impl ReadingsDisplay for NullReadingsDisplay {
    fn render(&mut self, _readings: &ControlReadings) {}
}
