//! Hardware driver implementations
//!
//! This crate provides the protocol engines behind the traits defined in
//! `gaus-core`:
//!
//! - DHT11/DHT22 family single-wire sensor decoder ([`sensor::dht`])
//! - Adafruit seesaw register-bus GPIO expander ([`expander::seesaw`])
//! - Mini TFT wing backlight/reset/buttons on top of the seesaw
//!   ([`expander::tft_wing`])
//!
//! Drivers only depend on the `gaus-hal` traits and `embedded-hal` delays,
//! so they run unchanged on any board and against host-side mocks.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// This must go first so the logging macros are visible to the other modules
#[macro_use]
mod fmt;

pub mod expander;
pub mod sensor;
pub mod timing;

#[cfg(test)]
mod mock;

pub use expander::{MiniTftWing, Seesaw, SeesawError};
pub use sensor::{Dht, DhtError, SensorFrame};
