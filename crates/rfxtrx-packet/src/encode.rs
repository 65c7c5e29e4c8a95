use bytes::{BufMut, BytesMut};

use crate::constants::{
    InterfaceCommand, SUBTYPE_INTERFACE_COMMAND, SUBTYPE_LIGHTING2_AC, TYPE_INTERFACE_CONTROL,
    TYPE_LIGHTING2,
};

/// Payload size of an interface command.
pub const INTERFACE_PAYLOAD_LEN: usize = 4;

/// Payload size of a Lighting2/AC switch command.
pub const SWITCH_PAYLOAD_LEN: usize = 12;

/// Append an interface command payload: type, subtype, sequence, command.
pub fn encode_interface_command(command: InterfaceCommand, sequence: u8, dst: &mut BytesMut) {
    dst.reserve(INTERFACE_PAYLOAD_LEN);
    dst.put_u8(TYPE_INTERFACE_CONTROL);
    dst.put_u8(SUBTYPE_INTERFACE_COMMAND);
    dst.put_u8(sequence);
    dst.put_u8(command.code());
}

/// A Lighting2/AC on/off command.
///
/// Sequence numbers come from the caller, which tracks them per device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchCommand {
    pub device_address: u32,
    pub unit_id: u8,
    pub state_on: bool,
    pub sequence: u8,
}

impl SwitchCommand {
    /// Append the payload: type, subtype, sequence, address (big-endian),
    /// unit, state, then group, dim level and a reserved byte, all zero.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(SWITCH_PAYLOAD_LEN);
        dst.put_u8(TYPE_LIGHTING2);
        dst.put_u8(SUBTYPE_LIGHTING2_AC);
        dst.put_u8(self.sequence);
        dst.put_u32(self.device_address);
        dst.put_u8(self.unit_id);
        dst.put_u8(u8::from(self.state_on));
        dst.put_u8(0); // group
        dst.put_u8(0); // dim
        dst.put_u8(0); // reserved
    }

    pub fn to_payload(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(SWITCH_PAYLOAD_LEN);
        self.encode(&mut buf);
        buf
    }
}
