use clap::{Args, Subcommand, ValueEnum};
use rfxtrx::transport::SerialConfig;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod monitor;
pub mod ports;
pub mod status;
pub mod switch;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize the transceiver and print received events.
    Monitor(MonitorArgs),
    /// Initialize the transceiver and report its firmware revision.
    Status(StatusArgs),
    /// Switch a Lighting2/AC device on or off.
    Switch(SwitchArgs),
    /// List serial ports.
    Ports(PortsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, serial: SerialConfig, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Monitor(args) => monitor::run(args, serial, format),
        Command::Status(args) => status::run(args, serial, format),
        Command::Switch(args) => switch::run(args, serial, format),
        Command::Ports(args) => ports::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct MonitorArgs {
    /// Exit after printing this many events.
    #[arg(long)]
    pub count: Option<usize>,
    /// Enable raw captures of undecoded signals instead of all protocols.
    #[arg(long)]
    pub undecoded: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {}

#[derive(Args, Debug)]
pub struct SwitchArgs {
    /// Device address in hex (for example 0x1a2b3c).
    #[arg(value_parser = parse_address)]
    pub device_address: u32,
    /// Unit code within the device.
    pub unit_id: u8,
    /// Target state.
    #[arg(value_enum)]
    pub state: SwitchState,
    /// Sequence number carried in the command.
    #[arg(long, default_value_t = 0)]
    pub sequence: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SwitchState {
    On,
    Off,
}

impl SwitchState {
    pub fn is_on(self) -> bool {
        self == SwitchState::On
    }
}

#[derive(Args, Debug)]
pub struct PortsArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended version information.
    #[arg(long)]
    pub extended: bool,
}

fn parse_address(value: &str) -> Result<u32, String> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u32::from_str_radix(digits, 16)
        .map_err(|err| format!("invalid hex device address {value:?}: {err}"))
}
