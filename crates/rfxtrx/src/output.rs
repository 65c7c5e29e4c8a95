use std::io::IsTerminal;
use std::path::Path;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use rfxtrx::packet::Event;
use rfxtrx::transport::PortInfo;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

pub fn print_event(event: &Event, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(event),
        OutputFormat::Table => {
            let (source, detail) = event_columns(event);
            let mut table = new_table(vec!["EVENT", "SOURCE", "DETAIL"]);
            table.add_row(vec![event.kind().to_string(), source, detail]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let (source, detail) = event_columns(event);
            println!("{} source={source} {detail}", event.kind());
        }
    }
}

fn event_columns(event: &Event) -> (String, String) {
    match event {
        Event::Status(status) => (
            "interface".to_string(),
            format!("firmware={}", status.firmware_revision),
        ),
        Event::Temperature(reading) => (
            format!("0x{:04x}", reading.sensor_address),
            format!(
                "temperature={:.1}C signal={} battery={} seq={}",
                reading.temperature_celsius,
                reading.signal_level,
                if reading.battery_low { "low" } else { "ok" },
                reading.sequence
            ),
        ),
        Event::DeviceState(state) => (
            format!("0x{:08x}/{}", state.device_address, state.unit_id),
            format!(
                "state={} signal={}",
                on_off(state.state_on),
                state.signal_level
            ),
        ),
    }
}

#[derive(Serialize)]
struct StatusOutput<'a> {
    device: &'a Path,
    ready: bool,
    firmware_revision: Option<u8>,
}

pub fn print_status(device: &Path, firmware_revision: Option<u8>, format: OutputFormat) {
    let firmware = firmware_revision
        .map(|rev| rev.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    match format {
        OutputFormat::Json => print_json(&StatusOutput {
            device,
            ready: true,
            firmware_revision,
        }),
        OutputFormat::Table => {
            let mut table = new_table(vec!["DEVICE", "STATE", "FIRMWARE"]);
            table.add_row(vec![
                device.display().to_string(),
                "ready".to_string(),
                firmware,
            ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("device={} state=ready firmware={firmware}", device.display());
        }
    }
}

#[derive(Serialize)]
struct SwitchOutput {
    device_address: String,
    unit_id: u8,
    state: &'static str,
    sequence: u8,
    transmissions: u32,
}

pub fn print_switch(
    device_address: u32,
    unit_id: u8,
    state_on: bool,
    sequence: u8,
    transmissions: u32,
    format: OutputFormat,
) {
    let out = SwitchOutput {
        device_address: format!("0x{device_address:08x}"),
        unit_id,
        state: on_off(state_on),
        sequence,
        transmissions,
    };
    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => {
            let mut table = new_table(vec!["ADDRESS", "UNIT", "STATE", "SEQ", "SENT"]);
            table.add_row(vec![
                out.device_address,
                unit_id.to_string(),
                out.state.to_string(),
                sequence.to_string(),
                transmissions.to_string(),
            ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "switched {}/{unit_id} {} (seq={sequence}, sent {transmissions}x)",
                out.device_address, out.state
            );
        }
    }
}

#[derive(Serialize)]
struct PortOutput<'a> {
    name: &'a str,
    usb_id: Option<String>,
    manufacturer: Option<&'a str>,
    product: Option<&'a str>,
}

impl<'a> From<&'a PortInfo> for PortOutput<'a> {
    fn from(port: &'a PortInfo) -> Self {
        Self {
            name: &port.name,
            usb_id: port.usb_id.map(|(vid, pid)| format!("{vid:04x}:{pid:04x}")),
            manufacturer: port.manufacturer.as_deref(),
            product: port.product.as_deref(),
        }
    }
}

pub fn print_ports(ports: &[PortInfo], format: OutputFormat) {
    let rows: Vec<PortOutput<'_>> = ports.iter().map(PortOutput::from).collect();
    match format {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Table => {
            let mut table = new_table(vec!["PORT", "USB ID", "MANUFACTURER", "PRODUCT"]);
            for row in &rows {
                table.add_row(vec![
                    row.name.to_string(),
                    row.usb_id.clone().unwrap_or_else(|| "-".to_string()),
                    row.manufacturer.unwrap_or("-").to_string(),
                    row.product.unwrap_or("-").to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for row in &rows {
                println!(
                    "{} usb={} {} {}",
                    row.name,
                    row.usb_id.as_deref().unwrap_or("-"),
                    row.manufacturer.unwrap_or(""),
                    row.product.unwrap_or("")
                );
            }
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn on_off(state_on: bool) -> &'static str {
    if state_on {
        "on"
    } else {
        "off"
    }
}
