//! Adafruit seesaw I2C peripheral driver
//!
//! The seesaw is a small microcontroller exposing GPIO, PWM, ADC and friends
//! as a flat register space behind a single I2C address.
//!
//! # Transactions
//!
//! ```text
//! write:  [S] addr+W  module  function  payload...  [P]
//! read:   [S] addr+W  module  function  [P]   (settle delay)
//!         [S] addr+R  data...  (last byte NACKed)  [P]
//! ```
//!
//! Everything else on this driver is built from those two primitives.
//! Pins 0-31 are port A, pins 32-63 port B; port B is reached by sending
//! 8-byte bulk payloads (port A word then port B word, both big-endian).

use embedded_hal::delay::DelayNs;
use gaus_core::config::SeesawConfig;
use gaus_core::traits::{GpioExpander, PinMask, PinMode};
use gaus_hal::I2cBus;
use heapless::Vec;

use super::registers::{GpioReg, RegisterAddress, StatusReg, HW_ID_CODE, SW_RESET_VALUE};

/// Largest payload accepted by [`Seesaw::write`]
pub const MAX_PAYLOAD: usize = 32;

/// Module and function bytes preceding every payload
const HEADER_LEN: usize = 2;

/// Seesaw driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SeesawError<E> {
    /// Transaction failed on the bus (NACK, arbitration loss, ...)
    Bus(E),
    /// The hardware ID register did not read [`HW_ID_CODE`]
    IdentityMismatch {
        /// Value actually read
        found: u8,
    },
    /// Pin number above 63
    InvalidPin(u8),
    /// Write payload longer than [`MAX_PAYLOAD`]
    PayloadTooLarge(usize),
    /// Read of zero bytes requested
    EmptyRead,
}

/// Seesaw driver
///
/// Owns the bus. There is no locking; one operation at a time.
pub struct Seesaw<I2C, D> {
    i2c: I2C,
    delay: D,
    config: SeesawConfig,
}

impl<I2C, D> Seesaw<I2C, D>
where
    I2C: I2cBus,
    D: DelayNs,
{
    /// Create a new driver; no bus traffic until [`Seesaw::begin`]
    pub fn new(i2c: I2C, delay: D, config: SeesawConfig) -> Self {
        Self { i2c, delay, config }
    }

    /// 7-bit bus address
    pub fn address(&self) -> u8 {
        self.config.address
    }

    /// Get the configuration
    pub fn config(&self) -> &SeesawConfig {
        &self.config
    }

    /// Borrow the bus, e.g. to talk to other devices sharing it
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Release the bus and delay
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// Reset the peripheral and check that it is a seesaw
    ///
    /// All peripheral registers return to their defaults.
    pub fn begin(&mut self) -> Result<(), SeesawError<I2C::Error>> {
        self.sw_reset()?;

        let found = self.read8(StatusReg::HwId)?;
        if found != HW_ID_CODE {
            error!(
                "seesaw at {:#x}: hardware id {:#x}, expected {:#x}",
                self.config.address, found, HW_ID_CODE
            );
            return Err(SeesawError::IdentityMismatch { found });
        }

        debug!("seesaw at {:#x} ready", self.config.address);
        Ok(())
    }

    /// Software reset
    pub fn sw_reset(&mut self) -> Result<(), SeesawError<I2C::Error>> {
        self.write8(StatusReg::SwReset, SW_RESET_VALUE)
    }

    /// Firmware version: date code in bits 31-16, product id in bits 15-0
    pub fn version(&mut self) -> Result<u32, SeesawError<I2C::Error>> {
        let mut buf = [0u8; 4];
        let settle_us = self.config.settle_delay_us;
        self.read(StatusReg::Version, &mut buf, settle_us)?;
        Ok(u32::from_be_bytes(buf))
    }

    /// Write `data` to a register in one transaction
    pub fn write(
        &mut self,
        reg: impl Into<RegisterAddress>,
        data: &[u8],
    ) -> Result<(), SeesawError<I2C::Error>> {
        let reg = reg.into();
        if data.len() > MAX_PAYLOAD {
            return Err(SeesawError::PayloadTooLarge(data.len()));
        }

        let mut frame: Vec<u8, { HEADER_LEN + MAX_PAYLOAD }> = Vec::new();
        frame
            .extend_from_slice(&reg.bytes())
            .and_then(|_| frame.extend_from_slice(data))
            .map_err(|_| SeesawError::PayloadTooLarge(data.len()))?;

        trace!(
            "seesaw write {:#x}/{:#x} ({} bytes)",
            reg.module,
            reg.function,
            data.len()
        );
        self.i2c
            .write(self.config.address, &frame)
            .map_err(|e| Self::bus_failure(reg, e))
    }

    /// Read `buf.len()` bytes from a register
    ///
    /// Addresses the register, waits `settle_us` for the peripheral to fetch
    /// the value, then reads it back in a second transaction.
    pub fn read(
        &mut self,
        reg: impl Into<RegisterAddress>,
        buf: &mut [u8],
        settle_us: u32,
    ) -> Result<(), SeesawError<I2C::Error>> {
        let reg = reg.into();
        if buf.is_empty() {
            return Err(SeesawError::EmptyRead);
        }

        let address = self.config.address;
        self.i2c
            .write(address, &reg.bytes())
            .map_err(|e| Self::bus_failure(reg, e))?;
        self.delay.delay_us(settle_us);
        self.i2c
            .read(address, buf)
            .map_err(|e| Self::bus_failure(reg, e))
    }

    /// Read a single-byte register
    pub fn read8(&mut self, reg: impl Into<RegisterAddress>) -> Result<u8, SeesawError<I2C::Error>> {
        let mut buf = [0u8; 1];
        let settle_us = self.config.settle_delay_us;
        self.read(reg, &mut buf, settle_us)?;
        Ok(buf[0])
    }

    /// Write a single-byte register
    pub fn write8(
        &mut self,
        reg: impl Into<RegisterAddress>,
        value: u8,
    ) -> Result<(), SeesawError<I2C::Error>> {
        self.write(reg, &[value])
    }

    /// Configure one pin
    pub fn pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), SeesawError<I2C::Error>> {
        let mask = Self::pin_mask(pin)?;
        if mask.touches_port_b() {
            self.pin_mode_bulk_ab(0, mask.port_b(), mode)
        } else {
            self.pin_mode_bulk(mask.port_a(), mode)
        }
    }

    /// Configure port A pins
    pub fn pin_mode_bulk(&mut self, pins: u32, mode: PinMode) -> Result<(), SeesawError<I2C::Error>> {
        self.apply_mode(&pins.to_be_bytes(), mode)
    }

    /// Configure pins on both ports
    pub fn pin_mode_bulk_ab(
        &mut self,
        pins_a: u32,
        pins_b: u32,
        mode: PinMode,
    ) -> Result<(), SeesawError<I2C::Error>> {
        self.apply_mode(&PinMask::from_ports(pins_a, pins_b).to_be_bytes(), mode)
    }

    /// Drive one pin
    pub fn digital_write(&mut self, pin: u8, high: bool) -> Result<(), SeesawError<I2C::Error>> {
        let mask = Self::pin_mask(pin)?;
        if mask.touches_port_b() {
            self.digital_write_bulk_ab(0, mask.port_b(), high)
        } else {
            self.digital_write_bulk(mask.port_a(), high)
        }
    }

    /// Drive port A pins
    pub fn digital_write_bulk(&mut self, pins: u32, high: bool) -> Result<(), SeesawError<I2C::Error>> {
        self.write(Self::level_register(high), &pins.to_be_bytes())
    }

    /// Drive pins on both ports
    pub fn digital_write_bulk_ab(
        &mut self,
        pins_a: u32,
        pins_b: u32,
        high: bool,
    ) -> Result<(), SeesawError<I2C::Error>> {
        let payload = PinMask::from_ports(pins_a, pins_b).to_be_bytes();
        self.write(Self::level_register(high), &payload)
    }

    /// Read one pin
    pub fn digital_read(&mut self, pin: u8) -> Result<bool, SeesawError<I2C::Error>> {
        let mask = Self::pin_mask(pin)?;
        let level = if mask.touches_port_b() {
            self.digital_read_bulk_b(mask.port_b())?
        } else {
            self.digital_read_bulk(mask.port_a())?
        };
        Ok(level != 0)
    }

    /// Read port A levels, masked by `pins`
    pub fn digital_read_bulk(&mut self, pins: u32) -> Result<u32, SeesawError<I2C::Error>> {
        let mut buf = [0u8; 4];
        let settle_us = self.config.settle_delay_us;
        self.read(GpioReg::Bulk, &mut buf, settle_us)?;
        Ok(u32::from_be_bytes(buf) & pins)
    }

    /// Read port B levels, masked by `pins` (bit 0 = pin 32)
    pub fn digital_read_bulk_b(&mut self, pins: u32) -> Result<u32, SeesawError<I2C::Error>> {
        Ok(self.digital_read_bulk_ab(PinMask::from_ports(0, pins))?.port_b())
    }

    /// Read both ports, masked by `pins`
    pub fn digital_read_bulk_ab(&mut self, pins: PinMask) -> Result<PinMask, SeesawError<I2C::Error>> {
        let mut buf = [0u8; 8];
        let settle_us = self.config.settle_delay_us;
        self.read(GpioReg::Bulk, &mut buf, settle_us)?;
        Ok(PinMask::from_be_bytes(buf) & pins)
    }

    /// Issue the register writes for `mode`, stopping at the first failure
    ///
    /// The peripheral has no atomic mode register: pulls are "input with
    /// bias enabled and the output latch at the idle level".
    fn apply_mode(&mut self, payload: &[u8], mode: PinMode) -> Result<(), SeesawError<I2C::Error>> {
        match mode {
            PinMode::Output => self.write(GpioReg::DirSetBulk, payload),
            PinMode::Input => self.write(GpioReg::DirClrBulk, payload),
            PinMode::InputPullUp => {
                self.write(GpioReg::DirClrBulk, payload)?;
                self.write(GpioReg::PullEnSet, payload)?;
                self.write(GpioReg::BulkSet, payload)
            }
            PinMode::InputPullDown => {
                self.write(GpioReg::DirClrBulk, payload)?;
                self.write(GpioReg::PullEnSet, payload)?;
                self.write(GpioReg::BulkClr, payload)
            }
        }
    }

    fn level_register(high: bool) -> GpioReg {
        if high {
            GpioReg::BulkSet
        } else {
            GpioReg::BulkClr
        }
    }

    fn pin_mask(pin: u8) -> Result<PinMask, SeesawError<I2C::Error>> {
        PinMask::pin(pin).ok_or(SeesawError::InvalidPin(pin))
    }

    fn bus_failure(reg: RegisterAddress, e: I2C::Error) -> SeesawError<I2C::Error> {
        warn!(
            "seesaw bus error on register {:#x}/{:#x}",
            reg.module, reg.function
        );
        SeesawError::Bus(e)
    }
}

impl<I2C, D> GpioExpander for Seesaw<I2C, D>
where
    I2C: I2cBus,
    D: DelayNs,
{
    type Error = SeesawError<I2C::Error>;

    fn pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), Self::Error> {
        Seesaw::pin_mode(self, pin, mode)
    }

    fn pin_mode_mask(&mut self, pins: PinMask, mode: PinMode) -> Result<(), Self::Error> {
        if pins.touches_port_b() {
            self.pin_mode_bulk_ab(pins.port_a(), pins.port_b(), mode)
        } else {
            self.pin_mode_bulk(pins.port_a(), mode)
        }
    }

    fn digital_write(&mut self, pin: u8, high: bool) -> Result<(), Self::Error> {
        Seesaw::digital_write(self, pin, high)
    }

    fn digital_write_mask(&mut self, pins: PinMask, high: bool) -> Result<(), Self::Error> {
        if pins.touches_port_b() {
            self.digital_write_bulk_ab(pins.port_a(), pins.port_b(), high)
        } else {
            self.digital_write_bulk(pins.port_a(), high)
        }
    }

    fn digital_read(&mut self, pin: u8) -> Result<bool, Self::Error> {
        Seesaw::digital_read(self, pin)
    }

    fn digital_read_mask(&mut self, pins: PinMask) -> Result<PinMask, Self::Error> {
        if pins.touches_port_b() {
            self.digital_read_bulk_ab(pins)
        } else {
            Ok(PinMask::from_ports(self.digital_read_bulk(pins.port_a())?, 0))
        }
    }
}
