//! Protocol type, subtype, and command codes.

/// Host-to-device interface control.
pub const TYPE_INTERFACE_CONTROL: u8 = 0x00;
pub const SUBTYPE_INTERFACE_COMMAND: u8 = 0x00;

/// Device responses to interface commands.
pub const TYPE_INTERFACE_RESPONSE: u8 = 0x01;
pub const SUBTYPE_INTERFACE_RESPONSE: u8 = 0x00;

/// Raw RF captures the firmware could not decode.
pub const TYPE_UNDECODED: u8 = 0x03;
pub const SUBTYPE_UNDECODED_LACROSSE: u8 = 0x04;

/// Lighting2: switches and wall buttons.
pub const TYPE_LIGHTING2: u8 = 0x11;
pub const SUBTYPE_LIGHTING2_AC: u8 = 0x00;
pub const SUBTYPE_LIGHTING2_ANSLUT: u8 = 0x02;

/// Remote controls. Recognised by name only.
pub const TYPE_REMOTE: u8 = 0x30;

/// Temperature sensors.
pub const TYPE_TEMPERATURE: u8 = 0x50;
pub const SUBTYPE_TEMP_LACROSSE: u8 = 0x05;
pub const SUBTYPE_TEMP_VIKING_02811: u8 = 0x07;

/// Returns a human-readable name for a message type.
pub fn type_name(packet_type: u8) -> &'static str {
    match packet_type {
        TYPE_INTERFACE_CONTROL => "INTERFACE_CONTROL",
        TYPE_INTERFACE_RESPONSE => "INTERFACE_RESPONSE",
        TYPE_UNDECODED => "UNDECODED",
        TYPE_LIGHTING2 => "LIGHTING2",
        TYPE_REMOTE => "REMOTE",
        TYPE_TEMPERATURE => "TEMPERATURE",
        _ => "UNKNOWN",
    }
}

/// Interface control commands understood by the transceiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterfaceCommand {
    Reset,
    Status,
    EnableAll,
    EnableUndecoded,
}

impl InterfaceCommand {
    pub const fn code(self) -> u8 {
        match self {
            InterfaceCommand::Reset => 0x00,
            InterfaceCommand::Status => 0x02,
            InterfaceCommand::EnableAll => 0x04,
            InterfaceCommand::EnableUndecoded => 0x05,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(InterfaceCommand::Reset),
            0x02 => Some(InterfaceCommand::Status),
            0x04 => Some(InterfaceCommand::EnableAll),
            0x05 => Some(InterfaceCommand::EnableUndecoded),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            InterfaceCommand::Reset => "RESET",
            InterfaceCommand::Status => "STATUS",
            InterfaceCommand::EnableAll => "ENABLE_ALL",
            InterfaceCommand::EnableUndecoded => "ENABLE_UNDECODED",
        }
    }
}

impl std::fmt::Display for InterfaceCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_codes() {
        for cmd in [
            InterfaceCommand::Reset,
            InterfaceCommand::Status,
            InterfaceCommand::EnableAll,
            InterfaceCommand::EnableUndecoded,
        ] {
            assert_eq!(InterfaceCommand::from_code(cmd.code()), Some(cmd));
        }
        assert_eq!(InterfaceCommand::Status.code(), 0x02);
        assert_eq!(InterfaceCommand::from_code(0x01), None);
    }

    #[test]
    fn type_names() {
        assert_eq!(type_name(0x50), "TEMPERATURE");
        assert_eq!(type_name(0x11), "LIGHTING2");
        assert_eq!(type_name(0xFF), "UNKNOWN");
    }
}
