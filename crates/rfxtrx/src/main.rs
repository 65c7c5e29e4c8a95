mod cmd;
mod exit;
mod logging;
mod output;

use std::path::PathBuf;

use clap::Parser;
use rfxtrx::transport::{SerialConfig, DEFAULT_BAUD_RATE, DEFAULT_DEVICE_PATH};

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "rfxtrx", version, about = "RFXtrx433 transceiver CLI")]
struct Cli {
    /// Serial device the transceiver is attached to.
    #[arg(
        long,
        short = 'd',
        value_name = "PATH",
        env = "RFXTRX_DEVICE",
        default_value = DEFAULT_DEVICE_PATH,
        global = true
    )]
    device: PathBuf,

    /// Line speed.
    #[arg(long, value_name = "BAUD", default_value_t = DEFAULT_BAUD_RATE, global = true)]
    baud: u32,

    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn serial_config(&self) -> SerialConfig {
        SerialConfig {
            path: self.device.clone(),
            baud_rate: self.baud,
            ..SerialConfig::default()
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                exit::USAGE
            } else {
                exit::SUCCESS
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let serial = cli.serial_config();
    let result = cmd::run(cli.command, serial, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_switch_subcommand() {
        let cli = Cli::try_parse_from([
            "rfxtrx", "switch", "0x1a2b3c", "3", "on", "--sequence", "7",
        ])
        .expect("switch args should parse");

        match cli.command {
            Command::Switch(args) => {
                assert_eq!(args.device_address, 0x001A_2B3C);
                assert_eq!(args.unit_id, 3);
                assert!(args.state.is_on());
                assert_eq!(args.sequence, 7);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_switch_state() {
        let err = Cli::try_parse_from(["rfxtrx", "switch", "1a2b3c", "3", "dim"])
            .expect_err("dim is not a switch state");
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn rejects_address_wider_than_32_bits() {
        let err = Cli::try_parse_from(["rfxtrx", "switch", "1ffffffff", "1", "off"])
            .expect_err("address should not fit");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn device_flag_is_global() {
        let cli = Cli::try_parse_from(["rfxtrx", "status", "--device", "/dev/ttyACM3"])
            .expect("status args should parse");
        let serial = cli.serial_config();
        assert_eq!(serial.path, PathBuf::from("/dev/ttyACM3"));
        assert_eq!(serial.baud_rate, DEFAULT_BAUD_RATE);
    }

    #[test]
    fn parses_monitor_options() {
        let cli = Cli::try_parse_from(["rfxtrx", "monitor", "--count", "5", "--undecoded"])
            .expect("monitor args should parse");
        match cli.command {
            Command::Monitor(args) => {
                assert_eq!(args.count, Some(5));
                assert!(args.undecoded);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
