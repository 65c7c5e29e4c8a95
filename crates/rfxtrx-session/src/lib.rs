//! Transceiver session management for the RFXtrx433.
//!
//! A [`Session`] opens the serial device, runs the initialization handshake,
//! then receives frames on a dedicated thread and hands decoded events to an
//! [`EventHandler`]. Switch commands can be sent from any other thread; each
//! is repeated a few times because the RF protocol has no acknowledgement.

pub mod config;
pub mod error;
pub mod handler;
pub mod observer;
pub mod sequence;
pub mod session;

pub use config::{SessionConfig, BOOT_SETTLE, RESEND_DELAY, RESEND_TIMES};
pub use error::{Result, SessionError};
pub use handler::EventHandler;
pub use observer::{Diagnostic, NullObserver, Observer, TracingObserver};
pub use sequence::InterfaceSequence;
pub use session::{Session, SessionState};
