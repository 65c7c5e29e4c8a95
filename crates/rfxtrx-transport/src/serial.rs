use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::Duration;

use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, SerialPortType, StopBits};
use tracing::debug;

use crate::error::{Result, TransportError};
use crate::traits::CloneStream;

/// Line speed the RFXtrx433 firmware runs at.
pub const DEFAULT_BAUD_RATE: u32 = 38_400;

/// Device node the transceiver usually enumerates as on Linux.
pub const DEFAULT_DEVICE_PATH: &str = "/dev/ttyUSB0";

/// Per-read timeout. A read that sees no bytes within this window returns
/// `ErrorKind::TimedOut`, which callers treat as idle.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(300);

/// Serial line configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    /// Path of the serial device.
    pub path: PathBuf,
    /// Line speed in baud.
    pub baud_rate: u32,
    /// Upper bound for a single blocking read.
    pub read_timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DEVICE_PATH),
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

/// An open serial line to the transceiver (8N1, no flow control).
pub struct SerialStream {
    port: Box<dyn SerialPort>,
    path: PathBuf,
}

impl SerialStream {
    /// Open the device described by `config`.
    pub fn open(config: &SerialConfig) -> Result<Self> {
        let port = serialport::new(config.path.to_string_lossy(), config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(config.read_timeout)
            .open()
            .map_err(|source| TransportError::Open {
                path: config.path.clone(),
                source,
            })?;

        debug!(path = ?config.path, baud = config.baud_rate, "opened serial device");

        Ok(Self {
            port,
            path: config.path.clone(),
        })
    }

    /// The device path this stream was opened on.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Change the per-read timeout.
    pub fn set_read_timeout(&mut self, timeout: Duration) -> Result<()> {
        self.port.set_timeout(timeout).map_err(Into::into)
    }
}

impl Read for SerialStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.port.read(buf)
    }
}

impl Write for SerialStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.port.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.port.flush()
    }
}

impl CloneStream for SerialStream {
    fn try_clone_stream(&self) -> Result<Self> {
        let port = self.port.try_clone()?;
        Ok(Self {
            port,
            path: self.path.clone(),
        })
    }

    fn discard_input(&mut self) -> Result<()> {
        self.port.clear(ClearBuffer::Input).map_err(Into::into)
    }
}

impl std::fmt::Debug for SerialStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialStream")
            .field("path", &self.path)
            .finish()
    }
}

/// A serial port visible to the operating system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortInfo {
    pub name: String,
    /// USB vendor and product id, when the port sits on a USB bus.
    pub usb_id: Option<(u16, u16)>,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
}

/// List serial ports. RFXtrx433 units show up as FTDI USB ports (0403:6001).
pub fn available_ports() -> Result<Vec<PortInfo>> {
    let ports = serialport::available_ports().map_err(TransportError::Enumerate)?;
    Ok(ports
        .into_iter()
        .map(|port| match port.port_type {
            SerialPortType::UsbPort(usb) => PortInfo {
                name: port.port_name,
                usb_id: Some((usb.vid, usb.pid)),
                manufacturer: usb.manufacturer,
                product: usb.product,
            },
            _ => PortInfo {
                name: port.port_name,
                usb_id: None,
                manufacturer: None,
                product: None,
            },
        })
        .collect())
}
