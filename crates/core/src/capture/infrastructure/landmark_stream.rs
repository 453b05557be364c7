use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::capture::domain::frame_source::FrameSource;
use crate::shared::constants::MAX_CONSECUTIVE_READ_ERRORS;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum LandmarkStreamError {
    #[error("failed to open landmark stream {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read landmark frame: {0}")]
    Read(#[source] io::Error),
    #[error("detector command is empty")]
    EmptyCommand,
    #[error("failed to start detector {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("detector {0} has no stdout")]
    NoStdout(String),
}

/// Reads newline-delimited landmark documents, one frame per line.
///
/// Blank lines are skipped. Lines are passed on as raw bytes; parsing is
/// the detector's job. After too many consecutive read failures the stream
/// is treated as closed.
pub struct LandmarkStreamReader<R> {
    reader: R,
    next_index: usize,
    consecutive_errors: usize,
}

impl<R: BufRead + Send> LandmarkStreamReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            next_index: 0,
            consecutive_errors: 0,
        }
    }

    fn next_frame(&mut self) -> Option<Result<Frame, Box<dyn std::error::Error>>> {
        loop {
            let mut line = Vec::new();
            match self.reader.read_until(b'\n', &mut line) {
                Ok(0) => return None,
                Ok(_) => {
                    self.consecutive_errors = 0;
                    while line.last().is_some_and(|b| b.is_ascii_whitespace()) {
                        line.pop();
                    }
                    if line.iter().all(|b| b.is_ascii_whitespace()) {
                        continue;
                    }
                    let frame = Frame::new(line, self.next_index);
                    self.next_index += 1;
                    return Some(Ok(frame));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.consecutive_errors += 1;
                    if self.consecutive_errors >= MAX_CONSECUTIVE_READ_ERRORS {
                        log::error!(
                            "Giving up on landmark stream after {} failed reads: {e}",
                            self.consecutive_errors
                        );
                        return None;
                    }
                    self.next_index += 1;
                    return Some(Err(LandmarkStreamError::Read(e).into()));
                }
            }
        }
    }
}

impl LandmarkStreamReader<Box<dyn BufRead + Send>> {
    /// Opens a file, or stdin when `path` is `-`.
    pub fn open(path: &Path) -> Result<Self, LandmarkStreamError> {
        let reader: Box<dyn BufRead + Send> = if path == Path::new("-") {
            Box::new(BufReader::new(io::stdin()))
        } else {
            let file = File::open(path).map_err(|source| LandmarkStreamError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            Box::new(BufReader::new(file))
        };
        Ok(Self::new(reader))
    }
}

impl<R: BufRead + Send> FrameSource for LandmarkStreamReader<R> {
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        Box::new(std::iter::from_fn(move || self.next_frame()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn collect<R: BufRead + Send>(reader: &mut LandmarkStreamReader<R>) -> Vec<Frame> {
        reader.frames().map(|f| f.unwrap()).collect()
    }

    #[test]
    fn test_one_frame_per_line() {
        let input = "{\"hands\":[]}\n{\"hands\":[{}]}\n";
        let mut reader = LandmarkStreamReader::new(Cursor::new(input));
        let frames = collect(&mut reader);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].data(), b"{\"hands\":[]}");
        assert_eq!(frames[0].index(), 0);
        assert_eq!(frames[1].index(), 1);
    }

    #[test]
    fn test_blank_lines_skipped_and_crlf_trimmed() {
        let input = "\n  \r\n{\"hands\":[]}\r\n\n";
        let mut reader = LandmarkStreamReader::new(Cursor::new(input));
        let frames = collect(&mut reader);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data(), b"{\"hands\":[]}");
        assert_eq!(frames[0].index(), 0);
    }

    #[test]
    fn test_last_line_without_newline() {
        let mut reader = LandmarkStreamReader::new(Cursor::new("{\"hands\":[]}"));
        assert_eq!(collect(&mut reader).len(), 1);
    }

    #[test]
    fn test_empty_input_is_exhausted() {
        let mut reader = LandmarkStreamReader::new(Cursor::new(""));
        assert!(reader.frames().next().is_none());
    }

    /// Fails `failures` times, then yields `rest`.
    struct FlakyReader {
        failures: usize,
        rest: Cursor<Vec<u8>>,
    }

    impl Read for FlakyReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.failures > 0 {
                self.failures -= 1;
                return Err(io::Error::new(io::ErrorKind::Other, "camera hiccup"));
            }
            self.rest.read(buf)
        }
    }

    #[test]
    fn test_read_error_is_reported_then_stream_continues() {
        let flaky = FlakyReader {
            failures: 1,
            rest: Cursor::new(b"{\"hands\":[]}\n".to_vec()),
        };
        let mut reader = LandmarkStreamReader::new(BufReader::new(flaky));
        let items: Vec<_> = reader.frames().collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_err());
        let frame = items[1].as_ref().unwrap();
        assert_eq!(frame.index(), 1);
    }

    #[test]
    fn test_persistent_read_errors_end_stream() {
        let flaky = FlakyReader {
            failures: usize::MAX,
            rest: Cursor::new(Vec::new()),
        };
        let mut reader = LandmarkStreamReader::new(BufReader::new(flaky));
        let errors = reader.frames().count();
        assert_eq!(errors, MAX_CONSECUTIVE_READ_ERRORS - 1);
    }

    #[test]
    fn test_open_missing_file() {
        let err = LandmarkStreamReader::open(Path::new("/nonexistent/landmarks.jsonl"))
            .err()
            .unwrap();
        assert!(matches!(err, LandmarkStreamError::Open { .. }));
    }

    #[test]
    fn test_open_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.jsonl");
        std::fs::write(&path, "{\"hands\":[]}\n{\"hands\":[]}\n").unwrap();
        let mut reader = LandmarkStreamReader::open(&path).unwrap();
        assert_eq!(reader.frames().count(), 2);
    }
}
