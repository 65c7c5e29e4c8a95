use std::io::{ErrorKind, Read, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::error::Result;
use crate::traits::CloneStream;

type Slot<T> = Arc<Mutex<Option<T>>>;

/// A stream shared between the receive loop and command senders.
///
/// The read half and the write half are separate handles to the same device,
/// each behind its own lock. One `read` call, or one `write` call (all bytes
/// followed by a flush), is one critical section, so a frame can never be
/// split by a concurrent writer and the receive loop never starves senders.
pub struct SharedStream<T> {
    read: Slot<T>,
    write: Slot<T>,
}

impl<T> Clone for SharedStream<T> {
    fn clone(&self) -> Self {
        Self {
            read: Arc::clone(&self.read),
            write: Arc::clone(&self.write),
        }
    }
}

impl<T: CloneStream> SharedStream<T> {
    /// A stream with no device attached. Every read and write fails until
    /// [`attach`](Self::attach) is called.
    pub fn detached() -> Self {
        Self {
            read: Arc::new(Mutex::new(None)),
            write: Arc::new(Mutex::new(None)),
        }
    }

    /// Wrap an open device.
    pub fn new(stream: T) -> Result<Self> {
        let shared = Self::detached();
        shared.attach(stream)?;
        Ok(shared)
    }

    /// Attach an open device, replacing any previous one.
    pub fn attach(&self, stream: T) -> Result<()> {
        let reader = stream.try_clone_stream()?;
        *lock(&self.read) = Some(reader);
        *lock(&self.write) = Some(stream);
        Ok(())
    }

    /// Handle that reads through the shared read half.
    pub fn reader(&self) -> ReadHandle<T> {
        ReadHandle {
            slot: Arc::clone(&self.read),
        }
    }

    /// Handle that writes through the shared write half.
    pub fn writer(&self) -> WriteHandle<T> {
        WriteHandle {
            slot: Arc::clone(&self.write),
        }
    }

    /// Drop buffered input on the device.
    pub fn discard_input(&self) -> Result<()> {
        match lock(&self.read).as_mut() {
            Some(stream) => stream.discard_input(),
            None => Err(not_connected().into()),
        }
    }

    /// Close both halves.
    ///
    /// Waits for an in-flight read to return (at most one read timeout), then
    /// drops the device handles. Returns `false` if already closed.
    pub fn close(&self) -> bool {
        let had_writer = lock(&self.write).take().is_some();
        let had_reader = lock(&self.read).take().is_some();
        if had_writer || had_reader {
            debug!("closed shared stream");
        }
        had_writer || had_reader
    }

    /// Whether a device is attached.
    pub fn is_open(&self) -> bool {
        lock(&self.write).is_some()
    }
}

/// Read side of a [`SharedStream`].
pub struct ReadHandle<T> {
    slot: Slot<T>,
}

impl<T> Clone for ReadHandle<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T: Read> Read for ReadHandle<T> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match lock(&self.slot).as_mut() {
            Some(stream) => stream.read(buf),
            None => Err(not_connected()),
        }
    }
}

/// Write side of a [`SharedStream`].
pub struct WriteHandle<T> {
    slot: Slot<T>,
}

impl<T> Clone for WriteHandle<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T: Write> Write for WriteHandle<T> {
    /// Writes all of `buf` and flushes under a single lock acquisition.
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match lock(&self.slot).as_mut() {
            Some(stream) => {
                stream.write_all(buf)?;
                stream.flush()?;
                Ok(buf.len())
            }
            None => Err(not_connected()),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match lock(&self.slot).as_mut() {
            Some(stream) => stream.flush(),
            None => Err(not_connected()),
        }
    }
}

fn not_connected() -> std::io::Error {
    std::io::Error::new(ErrorKind::NotConnected, "transport closed")
}

// A panic while holding the lock leaves the device handle itself intact.
fn lock<T>(slot: &Mutex<T>) -> MutexGuard<'_, T> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::time::{Duration, Instant};

    use super::*;

    #[derive(Clone, Default)]
    struct Loopback {
        inbound: Arc<Mutex<VecDeque<u8>>>,
        written: Arc<Mutex<Vec<Vec<u8>>>>,
        read_delay: Duration,
    }

    impl Read for Loopback {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let mut inbound = self.inbound.lock().unwrap();
            if inbound.is_empty() {
                drop(inbound);
                std::thread::sleep(self.read_delay);
                return Err(std::io::Error::from(ErrorKind::TimedOut));
            }
            let n = inbound.len().min(buf.len());
            for slot in buf.iter_mut().take(n) {
                *slot = inbound.pop_front().unwrap();
            }
            Ok(n)
        }
    }

    impl Write for Loopback {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            // Accept at most two bytes per call to exercise write_all.
            let n = buf.len().min(2);
            let mut written = self.written.lock().unwrap();
            match written.last_mut() {
                Some(last) if last.len() < 64 => last.extend_from_slice(&buf[..n]),
                _ => written.push(buf[..n].to_vec()),
            }
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.written.lock().unwrap().push(Vec::new());
            Ok(())
        }
    }

    impl CloneStream for Loopback {
        fn try_clone_stream(&self) -> Result<Self> {
            Ok(self.clone())
        }

        fn discard_input(&mut self) -> Result<()> {
            self.inbound.lock().unwrap().clear();
            Ok(())
        }
    }

    #[test]
    fn detached_stream_rejects_io() {
        let shared = SharedStream::<Loopback>::detached();
        assert!(!shared.is_open());

        let mut buf = [0u8; 4];
        let err = shared.reader().read(&mut buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotConnected);

        let err = shared.writer().write(b"x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotConnected);
    }

    #[test]
    fn write_is_complete_and_flushed_in_one_call() {
        let device = Loopback::default();
        let written = Arc::clone(&device.written);
        let shared = SharedStream::new(device).unwrap();

        let n = shared.writer().write(&[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(n, 5);

        let written = written.lock().unwrap();
        assert_eq!(written[0], vec![1, 2, 3, 4, 5]);
        assert!(written[1].is_empty(), "flush follows the payload");
    }

    #[test]
    fn reader_sees_device_bytes() {
        let device = Loopback::default();
        device.inbound.lock().unwrap().extend([0x03, 0x01, 0x00, 0x02]);
        let shared = SharedStream::new(device).unwrap();

        let mut buf = [0u8; 8];
        let n = shared.reader().read(&mut buf).unwrap();
        assert_eq!(&buf[..n], &[0x03, 0x01, 0x00, 0x02]);
    }

    #[test]
    fn discard_input_drops_pending_bytes() {
        let device = Loopback {
            read_delay: Duration::from_millis(1),
            ..Loopback::default()
        };
        device.inbound.lock().unwrap().extend([0xAA, 0xBB]);
        let shared = SharedStream::new(device).unwrap();

        shared.discard_input().unwrap();
        let mut buf = [0u8; 8];
        let err = shared.reader().read(&mut buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TimedOut);
    }

    #[test]
    fn close_waits_for_in_flight_read_then_disconnects() {
        let device = Loopback {
            read_delay: Duration::from_millis(100),
            ..Loopback::default()
        };
        let shared = SharedStream::new(device).unwrap();
        let mut reader = shared.reader();

        let blocked = std::thread::spawn(move || {
            let mut buf = [0u8; 1];
            let first = reader.read(&mut buf).unwrap_err().kind();
            let second = reader.read(&mut buf).unwrap_err().kind();
            (first, second)
        });

        std::thread::sleep(Duration::from_millis(20));
        let started = Instant::now();
        assert!(shared.close());
        assert!(started.elapsed() < Duration::from_millis(500));
        assert!(!shared.is_open());
        assert!(!shared.close(), "second close is a no-op");

        let (first, second) = blocked.join().unwrap();
        assert_eq!(first, ErrorKind::TimedOut);
        assert_eq!(second, ErrorKind::NotConnected);
    }
}
