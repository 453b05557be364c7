/// One frame's worth of detector output: a single UTF-8 JSON landmark
/// document, tagged with its position in the stream.
///
/// Parsing happens in the detector; sources pass the bytes through untouched.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, index: usize) -> Self {
        Self { data, index }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_payload_and_index() {
        let frame = Frame::new(br#"{"hands":[]}"#.to_vec(), 3);
        assert_eq!(frame.data(), br#"{"hands":[]}"#);
        assert_eq!(frame.index(), 3);
    }
}
