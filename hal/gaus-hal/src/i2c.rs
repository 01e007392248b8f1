//! I2C master abstraction

/// I2C bus master
///
/// Each call is one complete transaction: START, address, data, STOP.
/// Register-addressed devices that need processing time between being told
/// what to read and being asked for it use two separate calls with a delay
/// in between rather than a repeated start.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// Every byte must be ACKed by the device; a NACK is reported as an error.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// The master ACKs every received byte except the last one, which is
    /// NACKed to tell the device the transfer is over.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;
}

/// Adapter exposing any `embedded-hal` 1.0 I2C bus as an [`I2cBus`]
///
/// `embedded-hal` already specifies the ACK/NACK behaviour required above,
/// so the adapter is a straight pass-through.
pub struct HalI2c<T>(pub T);

impl<T> HalI2c<T> {
    /// Wrap an `embedded-hal` bus
    pub fn new(bus: T) -> Self {
        Self(bus)
    }

    /// Return the wrapped bus
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: embedded_hal::i2c::I2c> I2cBus for HalI2c<T> {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        embedded_hal::i2c::I2c::write(&mut self.0, address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        embedded_hal::i2c::I2c::read(&mut self.0, address, buf)
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };
}
