use rfxtrx::session::{Session, SessionConfig};
use rfxtrx::transport::SerialConfig;

use crate::cmd::SwitchArgs;
use crate::exit::{session_error, CliResult, SUCCESS};
use crate::output::{print_switch, OutputFormat};

pub fn run(args: SwitchArgs, serial: SerialConfig, format: OutputFormat) -> CliResult<i32> {
    let config = SessionConfig {
        serial,
        ..SessionConfig::default()
    };
    let transmissions = config.resend_times;
    let session = Session::new(config);

    session
        .init()
        .map_err(|err| session_error("handshake failed", err))?;

    let state_on = args.state.is_on();
    let result = session.set_switch(args.device_address, args.unit_id, args.sequence, state_on);
    session.halt();
    result.map_err(|err| session_error("switch failed", err))?;

    print_switch(
        args.device_address,
        args.unit_id,
        state_on,
        args.sequence,
        transmissions,
        format,
    );
    Ok(SUCCESS)
}
