//! Message layouts of the RFXtrx433 protocol.
//!
//! Decoding is a pure function of frame bytes: [`decode`] classifies a frame
//! by type and subtype and extracts typed fields, returning a [`Message`].
//! Encoding builds the payloads of interface commands and Lighting2/AC
//! switch commands; framing them is the job of `rfxtrx-frame`.

pub mod constants;
pub mod decode;
pub mod encode;
pub mod error;
pub mod event;
pub mod raw;

pub use constants::{type_name, InterfaceCommand};
pub use decode::decode;
pub use encode::{
    encode_interface_command, SwitchCommand, INTERFACE_PAYLOAD_LEN, SWITCH_PAYLOAD_LEN,
};
pub use error::DecodeError;
pub use event::{DeviceStateEvent, Event, Message, StatusEvent, TemperatureEvent};
pub use raw::RawDump;
