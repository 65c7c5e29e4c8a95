#![cfg(all(unix, feature = "cli"))]

use std::process::{Command, Output};

fn missing_device() -> String {
    format!("/dev/rfxtrx-cli-missing-{}", std::process::id())
}

fn rfxtrx(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rfxtrx"))
        .args(["--log-level", "error"])
        .args(args)
        .env_remove("RFXTRX_DEVICE")
        .output()
        .expect("rfxtrx should run")
}

#[test]
fn version_prints_package_version() {
    let output = rfxtrx(&["version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), format!("rfxtrx {}", env!("CARGO_PKG_VERSION")));
}

#[test]
fn extended_version_lists_protocol_defaults() {
    let output = rfxtrx(&["version", "--extended"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("name: rfxtrx"));
    assert!(stdout.contains("defaults: device=/dev/ttyUSB0 baud=38400"));
    assert!(stdout.contains("protocol: resend=3x150ms boot_settle=2s"));
}

#[test]
fn status_on_missing_device_is_a_transport_error() {
    let device = missing_device();
    let output = rfxtrx(&["--device", &device, "status"]);
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("handshake failed"), "stderr: {stderr}");
    assert!(stderr.contains(&device), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn device_can_come_from_environment() {
    let device = missing_device();
    let output = Command::new(env!("CARGO_BIN_EXE_rfxtrx"))
        .args(["--log-level", "error", "monitor", "--count", "1"])
        .env("RFXTRX_DEVICE", &device)
        .output()
        .expect("rfxtrx should run");
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains(&device));
}

#[test]
fn switch_on_missing_device_fails_before_sending() {
    let device = missing_device();
    let output = rfxtrx(&["-d", &device, "--format", "json", "switch", "0x1a2b3c", "1", "on"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
}

#[test]
fn switch_rejects_bad_address() {
    let output = rfxtrx(&["switch", "not-hex", "1", "on"]);
    assert_eq!(output.status.code(), Some(64));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid hex device address"), "stderr: {stderr}");
}

#[test]
fn help_exits_cleanly() {
    let output = rfxtrx(&["--help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("monitor"));
}

#[test]
fn ports_json_is_an_array() {
    let output = rfxtrx(&["--format", "json", "ports"]);
    // Enumeration can be unavailable in minimal containers.
    if output.status.code() == Some(3) {
        return;
    }
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.trim_start().starts_with('['), "stdout: {stdout}");
}
