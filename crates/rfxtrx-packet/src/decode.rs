use crate::constants::{
    InterfaceCommand, SUBTYPE_INTERFACE_RESPONSE, SUBTYPE_LIGHTING2_AC,
    SUBTYPE_TEMP_LACROSSE, SUBTYPE_TEMP_VIKING_02811, SUBTYPE_UNDECODED_LACROSSE,
    TYPE_INTERFACE_RESPONSE, TYPE_LIGHTING2, TYPE_TEMPERATURE, TYPE_UNDECODED,
};
use crate::error::DecodeError;
use crate::event::{DeviceStateEvent, Message, StatusEvent, TemperatureEvent};
use crate::raw::RawDump;

// Offsets are into the whole frame; byte 0 is the length.
const TYPE_OFFSET: usize = 1;
const SUBTYPE_OFFSET: usize = 2;

// Shortest frame each layout can be read from (last offset used + 1).
const MIN_RESPONSE_LEN: usize = 5;
const MIN_STATUS_LEN: usize = 7;
const MIN_TEMPERATURE_LEN: usize = 9;
const MIN_LIGHTING2_LEN: usize = 12;

const TEMP_SIGN_BIT: u16 = 0x8000;

/// Decode a complete frame (length byte included).
///
/// Pure: the same bytes always yield the same result.
pub fn decode(frame: &[u8]) -> Result<Message, DecodeError> {
    if frame.len() <= SUBTYPE_OFFSET {
        return Err(DecodeError::Empty { len: frame.len() });
    }

    match frame[TYPE_OFFSET] {
        TYPE_INTERFACE_RESPONSE => decode_interface_response(frame),
        TYPE_TEMPERATURE => decode_temperature(frame),
        TYPE_LIGHTING2 => decode_lighting2(frame),
        TYPE_UNDECODED => decode_undecoded(frame),
        packet_type => Err(DecodeError::UnknownType { packet_type }),
    }
}

fn decode_interface_response(frame: &[u8]) -> Result<Message, DecodeError> {
    let subtype = frame[SUBTYPE_OFFSET];
    if subtype != SUBTYPE_INTERFACE_RESPONSE {
        return Err(DecodeError::UnknownSubtype {
            kind: "interface",
            subtype,
        });
    }
    require(frame, "interface response", MIN_RESPONSE_LEN)?;

    let command = frame[4];
    if command != InterfaceCommand::Status.code() {
        return Ok(Message::InterfaceResponse { command });
    }
    require(frame, "status response", MIN_STATUS_LEN)?;

    Ok(Message::Status(StatusEvent {
        firmware_revision: frame[6],
    }))
}

fn decode_temperature(frame: &[u8]) -> Result<Message, DecodeError> {
    let subtype = frame[SUBTYPE_OFFSET];
    if subtype != SUBTYPE_TEMP_LACROSSE && subtype != SUBTYPE_TEMP_VIKING_02811 {
        return Err(DecodeError::UnknownSubtype {
            kind: "temperature",
            subtype,
        });
    }
    require(frame, "temperature", MIN_TEMPERATURE_LEN)?;

    let raw = u16::from_be_bytes([frame[6], frame[7]]);
    let magnitude = f64::from(raw & !TEMP_SIGN_BIT) / 10.0;
    let temperature_celsius = if raw & TEMP_SIGN_BIT != 0 {
        -magnitude
    } else {
        magnitude
    };

    Ok(Message::Temperature(TemperatureEvent {
        sensor_address: u16::from_be_bytes([frame[4], frame[5]]),
        sequence: frame[3],
        temperature_celsius,
        signal_level: frame[8] >> 4,
        battery_low: frame[8] & 0x0F == 0,
    }))
}

fn decode_lighting2(frame: &[u8]) -> Result<Message, DecodeError> {
    let subtype = frame[SUBTYPE_OFFSET];
    if subtype != SUBTYPE_LIGHTING2_AC {
        return Err(DecodeError::UnknownSubtype {
            kind: "lighting2",
            subtype,
        });
    }
    require(frame, "lighting2", MIN_LIGHTING2_LEN)?;

    Ok(Message::DeviceState(DeviceStateEvent {
        device_address: u32::from_be_bytes([frame[4], frame[5], frame[6], frame[7]]),
        unit_id: frame[8],
        state_on: frame[9] != 0,
        signal_level: frame[11] >> 4,
    }))
}

fn decode_undecoded(frame: &[u8]) -> Result<Message, DecodeError> {
    let subtype = frame[SUBTYPE_OFFSET];
    if subtype != SUBTYPE_UNDECODED_LACROSSE {
        return Err(DecodeError::UnknownSubtype {
            kind: "undecoded",
            subtype,
        });
    }
    Ok(Message::Undecoded {
        subtype,
        dump: RawDump::new(&frame[SUBTYPE_OFFSET..]),
    })
}

fn require(frame: &[u8], kind: &'static str, needed: usize) -> Result<(), DecodeError> {
    if frame.len() < needed {
        return Err(DecodeError::TooShort {
            kind,
            needed,
            actual: frame.len(),
        });
    }
    Ok(())
}
