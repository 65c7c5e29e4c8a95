use std::time::Duration;

use rfxtrx_transport::SerialConfig;

/// How many times each switch command goes out.
pub const RESEND_TIMES: u32 = 3;

/// Pause after each switch command transmission.
pub const RESEND_DELAY: Duration = Duration::from_millis(150);

/// Time the transceiver needs to reboot after RESET.
pub const BOOT_SETTLE: Duration = Duration::from_secs(2);

/// Configuration for a transceiver session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Serial line settings. The read timeout also bounds how long the
    /// handshake waits for each response and how quickly `halt` returns.
    pub serial: SerialConfig,
    pub boot_settle: Duration,
    pub resend_times: u32,
    pub resend_delay: Duration,
    /// Ask the transceiver to forward raw captures it cannot decode instead
    /// of enabling all protocols.
    pub enable_undecoded: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            serial: SerialConfig::default(),
            boot_settle: BOOT_SETTLE,
            resend_times: RESEND_TIMES,
            resend_delay: RESEND_DELAY,
            enable_undecoded: false,
        }
    }
}
