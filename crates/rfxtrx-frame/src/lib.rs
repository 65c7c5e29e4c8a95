//! Length-prefixed framing for the RFXtrx433 serial protocol.
//!
//! Every message on the wire, in both directions, is:
//! - A 1-byte length counting the bytes that follow it
//! - A type byte, a subtype byte, and a type-specific payload
//!
//! Frames are accumulated one byte at a time, so a reader can resume
//! wherever a read timeout left it.

pub mod accumulator;
pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use accumulator::FrameAccumulator;
pub use codec::{encode_frame, Frame, MAX_PAYLOAD};
pub use error::{FrameError, Result};
pub use reader::FrameReader;
pub use writer::FrameWriter;
