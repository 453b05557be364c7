use std::io::BufReader;
use std::process::{Child, ChildStdout, Command, Stdio};

use super::landmark_stream::{LandmarkStreamError, LandmarkStreamReader};
use crate::capture::domain::frame_source::FrameSource;
use crate::shared::frame::Frame;

/// Runs an external hand-landmark detector and reads its stdout as a
/// landmark stream.
///
/// The detector owns the camera and the model; it is expected to print one
/// landmark document per captured frame. The command line is split on
/// whitespace. The child is killed when this source is dropped.
pub struct DetectorProcess {
    command: String,
    child: Child,
    stream: LandmarkStreamReader<BufReader<ChildStdout>>,
}

impl DetectorProcess {
    pub fn spawn(command_line: &str) -> Result<Self, LandmarkStreamError> {
        let mut parts = command_line.split_whitespace();
        let program = parts.next().ok_or(LandmarkStreamError::EmptyCommand)?;

        log::info!("Starting hand detector: {command_line}");
        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| LandmarkStreamError::Spawn {
                command: command_line.to_string(),
                source,
            })?;

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(LandmarkStreamError::NoStdout(command_line.to_string()));
        };

        Ok(Self {
            command: command_line.to_string(),
            child,
            stream: LandmarkStreamReader::new(BufReader::new(stdout)),
        })
    }
}

impl FrameSource for DetectorProcess {
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        self.stream.frames()
    }
}

impl Drop for DetectorProcess {
    fn drop(&mut self) {
        match self.child.try_wait() {
            Ok(Some(status)) => log::info!("Hand detector exited with {status}"),
            _ => {
                log::info!("Stopping hand detector: {}", self.command);
                let _ = self.child.kill();
                let _ = self.child.wait();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_command_rejected() {
        assert!(matches!(
            DetectorProcess::spawn("  "),
            Err(LandmarkStreamError::EmptyCommand)
        ));
    }

    #[test]
    fn test_unknown_program_fails_to_spawn() {
        assert!(matches!(
            DetectorProcess::spawn("definitely-not-a-real-detector-91c2"),
            Err(LandmarkStreamError::Spawn { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_reads_child_stdout_until_exit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frames.jsonl");
        std::fs::write(&path, "{\"hands\":[]}\n\n{\"hands\":[]}\n").unwrap();

        let mut process = DetectorProcess::spawn(&format!("cat {}", path.display())).unwrap();
        let frames: Vec<_> = process.frames().map(|f| f.unwrap()).collect();

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].index(), 1);
    }
}
