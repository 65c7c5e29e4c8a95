use rfxtrx_packet::{type_name, DecodeError, Event, InterfaceCommand, RawDump, SwitchCommand};
use tracing::{debug, info, warn};

use crate::session::SessionState;

/// Things worth reporting that are not registry events.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    StateChanged {
        from: SessionState,
        to: SessionState,
    },
    CommandSent {
        command: InterfaceCommand,
        sequence: u8,
    },
    /// The handshake gave up waiting for a response.
    ResponseTimeout {
        command: InterfaceCommand,
    },
    FirmwareRevision(u8),
    SwitchSent {
        command: SwitchCommand,
        attempt: u32,
        of: u32,
    },
    BatteryLow {
        sensor_address: u16,
    },
    /// A response to an interface command other than STATUS.
    UnhandledResponse {
        command: u8,
    },
    Undecoded {
        subtype: u8,
        dump: RawDump,
    },
    /// A frame that did not decode. Reception continues.
    DecodeFailed(DecodeError),
    /// An event arrived before the handshake finished.
    EventDroppedDuringInit(Event),
}

/// Sink for session diagnostics.
///
/// Called synchronously from whichever thread produced the diagnostic.
pub trait Observer: Send + Sync {
    fn observe(&self, diagnostic: &Diagnostic);
}

/// Reports diagnostics as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn observe(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::StateChanged { from, to } => {
                info!(%from, %to, "session state changed");
            }
            Diagnostic::CommandSent { command, sequence } => {
                debug!(%command, sequence, "sent interface command");
            }
            Diagnostic::ResponseTimeout { command } => {
                debug!(%command, "no response before read timeout");
            }
            Diagnostic::FirmwareRevision(revision) => {
                info!(revision, "transceiver firmware revision");
            }
            Diagnostic::SwitchSent {
                command,
                attempt,
                of,
            } => {
                debug!(
                    device_address = format_args!("0x{:x}", command.device_address),
                    unit_id = command.unit_id,
                    state_on = command.state_on,
                    sequence = command.sequence,
                    attempt,
                    of,
                    "sent switch command"
                );
            }
            Diagnostic::BatteryLow { sensor_address } => {
                warn!(sensor_address, "sensor battery is low");
            }
            Diagnostic::UnhandledResponse { command } => {
                debug!(
                    command = format_args!("0x{command:02x}"),
                    "ignoring interface response"
                );
            }
            Diagnostic::Undecoded { subtype, dump } => {
                debug!(subtype, "undecoded capture\n{dump}");
            }
            Diagnostic::DecodeFailed(err) => match err {
                DecodeError::UnknownType { packet_type } => {
                    debug!(
                        packet_type = format_args!("0x{packet_type:02x}"),
                        name = type_name(*packet_type),
                        "dropping frame of unknown type"
                    );
                }
                other => debug!(error = %other, "dropping frame"),
            },
            Diagnostic::EventDroppedDuringInit(event) => {
                debug!(kind = event.kind(), "event received during handshake dropped");
            }
        }
    }
}

/// Discards all diagnostics.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn observe(&self, _diagnostic: &Diagnostic) {}
}
