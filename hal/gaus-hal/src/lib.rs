//! Gaus Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the Gaus drivers are written
//! against. Chip-specific HALs (RP2040, ESP32, ...) implement them so the
//! same driver code runs on any board, and so the drivers can be exercised
//! on the host against simulated hardware.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  gaus-drivers (DHT decoder, seesaw)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  gaus-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │   gaus-hal-   │       │  host mocks   │
//! │    rp2040     │       │   (tests)     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::FlexPin`] - Digital I/O
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`time::MonotonicClock`] - Free-running microsecond clock
//!
//! Blocking delays use [`embedded_hal::delay::DelayNs`] directly.

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod time;

// Re-export key traits at crate root for convenience
pub use gpio::{FlexPin, InputPin, OutputPin, Pull};
pub use i2c::{HalI2c, I2cBus, I2cConfig};
pub use time::MonotonicClock;
