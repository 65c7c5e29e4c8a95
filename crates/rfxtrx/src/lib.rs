//! Protocol engine for the RFXtrx433 USB RF transceiver.
//!
//! rfxtrx talks to 433 MHz temperature sensors, remote-controlled switches,
//! and wall buttons through the transceiver's length-prefixed serial protocol.
//!
//! # Crate Structure
//!
//! - [`transport`] - Serial port access and shared read/write handles
//! - [`frame`] - Single-byte length framing and the byte accumulator
//! - [`packet`] - Message decoding and command encoding
//! - [`session`] - Handshake, receive loop, and redundant switch commands

/// Re-export transport types.
pub mod transport {
    pub use rfxtrx_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use rfxtrx_frame::*;
}

/// Re-export packet types.
pub mod packet {
    pub use rfxtrx_packet::*;
}

/// Re-export session types.
pub mod session {
    pub use rfxtrx_session::*;
}

pub use rfxtrx_packet::{DeviceStateEvent, Event, StatusEvent, TemperatureEvent};
pub use rfxtrx_session::{EventHandler, Session, SessionConfig, SessionError, SessionState};
