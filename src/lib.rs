//! Bit-banged DHT22 Reader for Embedded Rust
//!
//! This crate reads the DHT22 (AM2302) temperature and humidity sensor by
//! timing the edges of its single-wire protocol, on top of the [`embedded-hal`]
//! delay trait and a small pin-numbered GPIO capability.
//!
//! # Features
//! - Blocking read with a configurable retry policy (unbounded by default)
//! - Cached "most recent reading" queries
//! - Plain digital output control and a hysteresis thermostat built on it
//! - Designed for `no_std` environments
//!
//! # Dependencies
//! - [`Gpio`] for pin mode, level reads and writes (see [`PinBank`] to use
//!   [`InputPin`] + [`OutputPin`] pins directly)
//! - [`DelayNs`] for accurate timing
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` and logs rejected readings
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`InputPin`]: embedded_hal::digital::InputPin
//! [`OutputPin`]: embedded_hal::digital::OutputPin
//! [`DelayNs`]: embedded_hal::delay::DelayNs

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod dht22;
pub mod error;
pub mod frame;
pub mod gpio;
pub mod thermostat;

pub use config::ReadConfig;
pub use dht22::{Dht22, Reading};
pub use error::DhtError;
pub use frame::RawFrame;
pub use gpio::{BankError, Gpio, Level, PinBank, PinMode};
pub use thermostat::{Thermostat, ThermostatConfig};
