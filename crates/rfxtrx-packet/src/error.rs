/// Reasons a frame does not decode into a message.
///
/// None of these are fatal: the receive loop logs them and moves on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The frame ends before its type and subtype bytes.
    #[error("frame too short to carry type and subtype ({len} bytes)")]
    Empty { len: usize },

    /// The frame is shorter than its message layout requires.
    #[error("{kind} frame too short ({actual} bytes, need {needed})")]
    TooShort {
        kind: &'static str,
        needed: usize,
        actual: usize,
    },

    /// The message type is not one this decoder understands.
    #[error("unknown packet type 0x{packet_type:02x}")]
    UnknownType { packet_type: u8 },

    /// The type is known but the subtype is not.
    #[error("unknown {kind} subtype 0x{subtype:02x}")]
    UnknownSubtype { kind: &'static str, subtype: u8 },
}
