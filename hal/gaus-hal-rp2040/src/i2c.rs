//! Blocking I2C master

use embassy_rp::i2c::{self, Blocking, I2c};
use gaus_hal::{HalI2c, I2cConfig};

/// RP2040 blocking I2C master as an [`gaus_hal::I2cBus`]
///
/// The embassy driver reads with a NACK on the final byte, as the drivers
/// expect.
pub type RpI2c<'d, T> = HalI2c<I2c<'d, T, Blocking>>;

/// Translate the board I2C settings into an embassy config
pub fn config(settings: &I2cConfig) -> i2c::Config {
    let mut config = i2c::Config::default();
    config.frequency = settings.frequency;
    config
}
