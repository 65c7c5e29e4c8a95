use bytes::BytesMut;

use crate::codec::{Frame, MAX_PAYLOAD};

/// Collects bytes until the length byte says a frame is complete.
///
/// A frame is complete when `buffer.len() == buffer[0] + 1`. The buffer is
/// empty again as soon as a frame is handed out.
#[derive(Debug)]
pub struct FrameAccumulator {
    buf: BytesMut,
}

impl FrameAccumulator {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(MAX_PAYLOAD + 1),
        }
    }

    /// Append one byte; returns the frame it completes, if any.
    pub fn feed(&mut self, byte: u8) -> Option<Frame> {
        self.buf.extend_from_slice(&[byte]);
        if self.is_done() {
            let bytes = self.buf.split().freeze();
            Some(Frame::from_complete(bytes))
        } else {
            None
        }
    }

    fn is_done(&self) -> bool {
        match self.buf.first() {
            Some(&len) => self.buf.len() == len as usize + 1,
            None => false,
        }
    }

    /// Number of bytes of the current partial frame.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Throw away a partial frame.
    pub fn reset(&mut self) {
        self.buf.clear();
    }
}

impl Default for FrameAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
