//! RP2040-specific HAL for the Gaus drivers
//!
//! Implements the `gaus-hal` traits on top of `embassy-rp` and
//! `embassy-time`:
//!
//! - [`gpio::RpFlexPin`]: bidirectional pin for single-wire sensors
//! - [`time::EmbassyClock`]: monotonic clock from the embassy time driver
//! - [`i2c`]: blocking I2C master wrapped as an [`gaus_hal::I2cBus`]

#![no_std]

pub mod gpio;
pub mod i2c;
pub mod time;

pub use gpio::RpFlexPin;
pub use i2c::RpI2c;
pub use time::EmbassyClock;
