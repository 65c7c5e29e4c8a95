use std::io::{Read, Write};

use crate::error::Result;

/// A byte stream that can be split into independent read and write handles.
///
/// The serial device is full duplex: a clone of the handle reads while the
/// original writes. Test doubles implement this over shared in-memory queues.
pub trait CloneStream: Read + Write + Send + Sized + 'static {
    /// Create a second handle to the same underlying device.
    fn try_clone_stream(&self) -> Result<Self>;

    /// Drop any bytes the device has buffered but nobody has read yet.
    fn discard_input(&mut self) -> Result<()> {
        Ok(())
    }
}
