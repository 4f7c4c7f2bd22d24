use std::io::{self, Write};

use crate::stream::{ByteWriter, encoded_len};

/// Field frame headers of one pending value.
///
/// A value is encoded into a single buffer with its frame headers left out.
/// Each header is recorded at the buffer position it belongs to and spliced
/// in when the buffer is copied to the sink, so nested frames cost no extra
/// copies.
#[derive(Debug, Default)]
pub(super) struct Frames {
    /// `(position, header)` in the order frames were opened.
    headers: Vec<(usize, u64)>,
    /// Encoded size of every header closed so far.
    header_bytes: usize,
}

/// A frame whose body is still being written.
#[must_use]
pub(super) struct OpenFrame {
    slot: usize,
    start: usize,
    closed_before: usize,
}

impl Frames {
    /// Starts a frame whose body begins at `position`.
    pub(super) fn open(&mut self, position: usize) -> OpenFrame {
        self.headers.push((position, 0));
        OpenFrame {
            slot: self.headers.len() - 1,
            start: position,
            closed_before: self.header_bytes,
        }
    }

    /// Ends `frame` at `position`.
    ///
    /// Frames opened after `frame` must be closed first; their headers count
    /// towards its length.
    pub(super) fn close(&mut self, frame: OpenFrame, position: usize, tracked: bool) {
        let nested = self.header_bytes - frame.closed_before;
        let len = (position - frame.start + nested) as u64;
        let header = (len << 1) | u64::from(tracked);
        self.headers[frame.slot].1 = header;
        self.header_bytes += encoded_len(header);
    }

    /// Copies `body` to `sink` with every header in place.
    pub(super) fn splice<W: Write>(&self, body: &[u8], sink: &mut ByteWriter<W>) -> io::Result<()> {
        let mut copied = 0;
        for &(position, header) in &self.headers {
            sink.write_all(&body[copied..position])?;
            sink.write_varint(header)?;
            copied = position;
        }
        sink.write_all(&body[copied..])
    }

    pub(super) fn clear(&mut self) {
        self.headers.clear();
        self.header_bytes = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spliced(frames: &Frames, body: &[u8]) -> Vec<u8> {
        let mut out = ByteWriter::new(Vec::new());
        frames.splice(body, &mut out).unwrap();
        out.into_inner()
    }

    #[test]
    fn nested_frames_count_inner_headers() {
        let mut frames = Frames::default();
        let outer = frames.open(1);
        let inner = frames.open(3);
        frames.close(inner, 4, true);
        frames.close(outer, 4, false);

        // "A" [ "BC" [ "D" ] ]
        assert_eq!(spliced(&frames, b"ABCD"), [b'A', 8, b'B', b'C', 3, b'D']);
    }

    #[test]
    fn sibling_and_empty_frames() {
        let mut frames = Frames::default();
        let first = frames.open(0);
        frames.close(first, 0, false);
        let second = frames.open(0);
        frames.close(second, 2, false);

        assert_eq!(spliced(&frames, b"xy"), [0, 4, b'x', b'y']);
    }

    #[test]
    fn multi_byte_headers() {
        let body = vec![7_u8; 100];
        let mut frames = Frames::default();
        let outer = frames.open(0);
        let inner = frames.open(0);
        frames.close(inner, 100, false);
        frames.close(outer, 100, false);

        let bytes = spliced(&frames, &body);
        // outer: 102 bytes -> 204, inner: 100 bytes -> 200
        assert_eq!(bytes[..4], [0xCC, 0x01, 0xC8, 0x01]);
        assert_eq!(bytes.len(), 104);

        frames.clear();
        assert_eq!(spliced(&frames, b"z"), [b'z']);
    }
}
