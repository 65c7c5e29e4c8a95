use rfxtrx::session::{Session, SessionConfig};
use rfxtrx::transport::SerialConfig;

use crate::cmd::StatusArgs;
use crate::exit::{session_error, CliResult, SUCCESS};
use crate::output::{print_status, OutputFormat};

pub fn run(_args: StatusArgs, serial: SerialConfig, format: OutputFormat) -> CliResult<i32> {
    let device = serial.path.clone();
    let session = Session::new(SessionConfig {
        serial,
        ..SessionConfig::default()
    });

    session
        .init()
        .map_err(|err| session_error("handshake failed", err))?;
    let firmware_revision = session.firmware_revision();
    session.halt();

    print_status(&device, firmware_revision, format);
    Ok(SUCCESS)
}
