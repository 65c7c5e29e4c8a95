use std::io::{ErrorKind, Read};

use bytes::{Buf, BytesMut};
use tracing::trace;

use crate::accumulator::FrameAccumulator;
use crate::codec::Frame;
use crate::error::{FrameError, Result};

const READ_CHUNK_SIZE: usize = 64;

/// Reads complete frames from any `Read` stream with a read timeout.
///
/// Bytes that arrive after a completed frame are kept for the next call.
pub struct FrameReader<T> {
    inner: T,
    pending: BytesMut,
    acc: FrameAccumulator,
}

impl<T: Read> FrameReader<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            pending: BytesMut::with_capacity(READ_CHUNK_SIZE),
            acc: FrameAccumulator::new(),
        }
    }

    /// Read until a frame completes or the stream times out.
    ///
    /// Returns `Ok(None)` when a read times out with no frame completed; a
    /// partial frame stays buffered. Returns `Err(FrameError::ConnectionClosed)`
    /// on EOF.
    pub fn read_frame(&mut self) -> Result<Option<Frame>> {
        loop {
            while self.pending.has_remaining() {
                if let Some(frame) = self.acc.feed(self.pending.get_u8()) {
                    trace!(len = frame.len(), "frame complete");
                    return Ok(Some(frame));
                }
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if is_timeout(&err) => return Ok(None),
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                return Err(FrameError::ConnectionClosed);
            }

            self.pending.extend_from_slice(&chunk[..read]);
        }
    }

    /// Bytes of a frame still being assembled.
    pub fn partial_len(&self) -> usize {
        self.acc.buffered()
    }

    /// Drop buffered bytes and any partial frame.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.acc.reset();
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

fn is_timeout(err: &std::io::Error) -> bool {
    matches!(err.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io::Cursor;

    use super::*;

    /// Replays scripted read results, then reports EOF.
    struct Script {
        steps: VecDeque<std::io::Result<Vec<u8>>>,
    }

    impl Script {
        fn new(steps: Vec<std::io::Result<Vec<u8>>>) -> Self {
            Self {
                steps: steps.into(),
            }
        }
    }

    impl Read for Script {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match self.steps.pop_front() {
                None => Ok(0),
                Some(Err(err)) => Err(err),
                Some(Ok(bytes)) => {
                    buf[..bytes.len()].copy_from_slice(&bytes);
                    Ok(bytes.len())
                }
            }
        }
    }

    fn timed_out() -> std::io::Result<Vec<u8>> {
        Err(std::io::Error::from(ErrorKind::TimedOut))
    }

    #[test]
    fn read_single_frame() {
        let mut reader = FrameReader::new(Cursor::new(vec![0x03, 0x01, 0x00, 0x02]));
        let frame = reader.read_frame().unwrap().unwrap();
        assert_eq!(frame.as_bytes(), &[0x03, 0x01, 0x00, 0x02]);
        assert_eq!(reader.partial_len(), 0);
    }

    #[test]
    fn keeps_bytes_past_frame_boundary() {
        let wire = vec![0x02, 0x11, 0x00, 0x03, 0x50, 0x05, 0x09];
        let mut reader = FrameReader::new(Cursor::new(wire));

        let first = reader.read_frame().unwrap().unwrap();
        let second = reader.read_frame().unwrap().unwrap();
        assert_eq!(first.as_bytes(), &[0x02, 0x11, 0x00]);
        assert_eq!(second.as_bytes(), &[0x03, 0x50, 0x05, 0x09]);
    }

    #[test]
    fn timeout_is_idle_and_partial_frame_survives() {
        let mut reader = FrameReader::new(Script::new(vec![
            Ok(vec![0x03, 0x01]),
            timed_out(),
            Ok(vec![0x00, 0x02]),
        ]));

        assert!(reader.read_frame().unwrap().is_none());
        assert_eq!(reader.partial_len(), 2);

        let frame = reader.read_frame().unwrap().unwrap();
        assert_eq!(frame.as_bytes(), &[0x03, 0x01, 0x00, 0x02]);
    }

    #[test]
    fn would_block_counts_as_timeout() {
        let mut reader = FrameReader::new(Script::new(vec![Err(std::io::Error::from(
            ErrorKind::WouldBlock,
        ))]));
        assert!(reader.read_frame().unwrap().is_none());
    }

    #[test]
    fn interrupted_read_retries() {
        let mut reader = FrameReader::new(Script::new(vec![
            Err(std::io::Error::from(ErrorKind::Interrupted)),
            Ok(vec![0x01, 0xFF]),
        ]));
        let frame = reader.read_frame().unwrap().unwrap();
        assert_eq!(frame.as_bytes(), &[0x01, 0xFF]);
    }

    #[test]
    fn byte_by_byte_delivery() {
        let steps = [0x04u8, 0x11, 0x00, 0x07, 0x01]
            .iter()
            .map(|&b| Ok(vec![b]))
            .collect();
        let mut reader = FrameReader::new(Script::new(steps));
        let frame = reader.read_frame().unwrap().unwrap();
        assert_eq!(frame.len(), 5);
    }

    #[test]
    fn eof_reports_connection_closed() {
        let mut reader = FrameReader::new(Cursor::new(vec![0x05, 0x01]));
        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, FrameError::ConnectionClosed));
    }

    #[test]
    fn other_errors_propagate() {
        let mut reader = FrameReader::new(Script::new(vec![Err(std::io::Error::from(
            ErrorKind::NotConnected,
        ))]));
        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, FrameError::Io(e) if e.kind() == ErrorKind::NotConnected));
    }

    #[test]
    fn clear_drops_partial_state() {
        let mut reader = FrameReader::new(Script::new(vec![
            Ok(vec![0x09, 0x01, 0x02]),
            timed_out(),
            Ok(vec![0x01, 0x42]),
        ]));
        assert!(reader.read_frame().unwrap().is_none());
        reader.clear();
        let frame = reader.read_frame().unwrap().unwrap();
        assert_eq!(frame.as_bytes(), &[0x01, 0x42]);
    }
}
