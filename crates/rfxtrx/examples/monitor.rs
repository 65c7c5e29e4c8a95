//! Print transceiver events for ten seconds.
//!
//! Usage: `cargo run --example monitor -- /dev/ttyUSB0`

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rfxtrx::transport::SerialConfig;
use rfxtrx::{Event, Session, SessionConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(rfxtrx::transport::DEFAULT_DEVICE_PATH));

    let session = Arc::new(Session::new(SessionConfig {
        serial: SerialConfig {
            path,
            ..SerialConfig::default()
        },
        ..SessionConfig::default()
    }));

    session.init()?;
    println!("firmware revision: {:?}", session.firmware_revision());

    let receiver = session.spawn(|event: Event| match event {
        Event::Temperature(reading) => println!(
            "sensor 0x{:04x}: {:.1} C (battery {})",
            reading.sensor_address,
            reading.temperature_celsius,
            if reading.battery_low { "low" } else { "ok" }
        ),
        Event::DeviceState(state) => println!(
            "device 0x{:08x}/{}: {}",
            state.device_address,
            state.unit_id,
            if state.state_on { "on" } else { "off" }
        ),
        Event::Status(status) => println!("firmware revision: {}", status.firmware_revision),
    })?;

    std::thread::sleep(Duration::from_secs(10));
    session.halt();

    match receiver.join() {
        Ok(result) => result?,
        Err(_) => return Err("receive thread panicked".into()),
    }
    Ok(())
}
