use serde::Serialize;

use crate::raw::RawDump;

/// Firmware status reported in response to a STATUS command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusEvent {
    pub firmware_revision: u8,
}

/// A reading from a temperature sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureEvent {
    pub sensor_address: u16,
    pub sequence: u8,
    /// Degrees Celsius, 0.1 resolution.
    pub temperature_celsius: f64,
    /// 0..=15.
    pub signal_level: u8,
    pub battery_low: bool,
}

/// A Lighting2/AC state report.
///
/// Switches and wall buttons send the same message; telling them apart is
/// up to whoever keeps the device registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceStateEvent {
    pub device_address: u32,
    pub unit_id: u8,
    pub state_on: bool,
    /// 0..=15.
    pub signal_level: u8,
}

/// Structured events handed to the device registry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Status(StatusEvent),
    Temperature(TemperatureEvent),
    DeviceState(DeviceStateEvent),
}

impl Event {
    /// Short name for logs and tables.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Status(_) => "status",
            Event::Temperature(_) => "temperature",
            Event::DeviceState(_) => "device_state",
        }
    }
}

/// Everything a well-formed frame can decode to.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Status(StatusEvent),
    Temperature(TemperatureEvent),
    DeviceState(DeviceStateEvent),
    /// A response to an interface command other than STATUS.
    InterfaceResponse { command: u8 },
    /// A raw capture, rendered for inspection.
    Undecoded { subtype: u8, dump: RawDump },
}

impl Message {
    /// The registry-facing event, if this message carries one.
    pub fn into_event(self) -> Option<Event> {
        match self {
            Message::Status(ev) => Some(Event::Status(ev)),
            Message::Temperature(ev) => Some(Event::Temperature(ev)),
            Message::DeviceState(ev) => Some(Event::DeviceState(ev)),
            Message::InterfaceResponse { .. } | Message::Undecoded { .. } => None,
        }
    }
}
