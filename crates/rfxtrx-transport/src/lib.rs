//! Serial transport for the RFXtrx433 USB transceiver.
//!
//! This is the lowest layer of rfxtrx. It opens the serial line with the
//! settings the transceiver expects and hands out a [`SharedStream`] whose
//! read and write halves can be used from different threads without tearing
//! each other's bytes.

pub mod error;
pub mod serial;
pub mod shared;
pub mod traits;

pub use error::{Result, TransportError};
pub use serial::{
    available_ports, PortInfo, SerialConfig, SerialStream, DEFAULT_BAUD_RATE, DEFAULT_DEVICE_PATH,
    DEFAULT_READ_TIMEOUT,
};
pub use shared::{ReadHandle, SharedStream, WriteHandle};
pub use traits::CloneStream;
