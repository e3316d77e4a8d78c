//! Firmware library for a Wi-Fi controlled two-motor robot on the Raspberry Pi Pico 2 W.
//!
//! Decision logic (request dispatch, motor pin levels, join retries, the blink loop) is
//! written against the `embedded-hal` and `embedded-io-async` traits so it runs under
//! `cargo test` on the host. The `pico2` feature adds the board modules that bind those
//! traits to Embassy peripherals.
#![cfg_attr(not(test), no_std)]

pub mod blink;
pub mod chassis;
pub mod command;
pub mod config;
mod error;
pub mod http;
pub mod join;
pub mod pwm;

#[cfg(feature = "pico2")]
pub mod hardware;
#[cfg(feature = "pico2")]
pub mod server;
#[cfg(feature = "pico2")]
pub mod wifi;

pub use chassis::{Chassis, MotorState};
pub use command::Command;
pub use error::{Error, Result};
pub use http::ControlPage;
