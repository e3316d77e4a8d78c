//! Compile-time configuration.
//!
//! Credentials and the robot name come from the build environment (or a `.env` file next
//! to `Cargo.toml`), see `build.rs`. Everything else is a fixed constant.

use crate::join::JoinPolicy;

/// Network to join in station mode.
pub const WIFI_SSID: &str = env!("WIFI_SSID");
pub const WIFI_PASSWORD: &str = env!("WIFI_PASSWORD");

/// Display name shown on the control page.
pub const ROBOT_NAME: &str = env!("ROBOT_NAME");

/// Motor enable duty on a 16-bit scale (40000 / 65535 ≈ 61%).
pub const MOTOR_SPEED: u16 = 40_000;
pub const PWM_FREQUENCY_HZ: u32 = 1_000;

pub const HTTP_PORT: u16 = 80;
/// Bytes of request text read per connection; anything past this is never inspected.
pub const REQUEST_BUFFER_LEN: usize = 1024;
pub const SOCKET_TIMEOUT_SECS: u64 = 10;
/// Pause before re-opening the listening socket after a failed accept.
pub const ACCEPT_RETRY_MS: u32 = 100;

pub const BLINK_INTERVAL_MS: u32 = 1_000;

pub const JOIN_POLICY: JoinPolicy = JoinPolicy {
    attempts: 10,
    attempt_timeout_ms: 10_000,
    retry_delay_ms: 1_000,
};
pub const DHCP_TIMEOUT_SECS: u64 = 30;
