use std::io::{self, Write};

use crate::control::domain::control_reading::ControlReadings;
use crate::control::domain::readings_display::ReadingsDisplay;

/// Single-line status display, redrawn in place with a carriage return.
///
/// Only redraws when the rendered text changes.
pub struct TerminalDisplay<W: Write + Send> {
    out: W,
    last_line: Option<String>,
}

impl TerminalDisplay<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_line: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> ReadingsDisplay for TerminalDisplay<W> {
    fn render(&mut self, readings: &ControlReadings) {
        let line = readings.to_string();
        if self.last_line.as_deref() == Some(line.as_str()) {
            return;
        }
        // Pad so a shorter line fully covers the previous one.
        let width = self.last_line.as_ref().map_or(0, |l| l.len());
        let _ = write!(self.out, "\r{line:<width$}");
        let _ = self.out.flush();
        self.last_line = Some(line);
    }

    fn finish(&mut self) {
        if self.last_line.is_some() {
            let _ = writeln!(self.out);
            let _ = self.out.flush();
        }
    }
}
