//! Seesaw register map
//!
//! Registers are addressed by a (module base, function) byte pair sent
//! before any payload. Multi-byte values travel big-endian.

/// Default 7-bit I2C address of the seesaw on the mini TFT wing
pub const SEESAW_ADDRESS: u8 = gaus_core::config::types::DEFAULT_SEESAW_ADDRESS;

/// Value of [`StatusReg::HwId`] on a genuine seesaw
pub const HW_ID_CODE: u8 = 0x55;

/// Byte written to [`StatusReg::SwReset`] to trigger a reset
pub const SW_RESET_VALUE: u8 = 0xFF;

/// EEPROM cell holding the power-up I2C address (on parts that support it)
pub const EEPROM_I2C_ADDR: u8 = 0x3F;

/// Module base addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Module {
    Status = 0x00,
    Gpio = 0x01,
    Sercom0 = 0x02,
    Timer = 0x08,
    Adc = 0x09,
    Dac = 0x0A,
    Interrupt = 0x0B,
    Dap = 0x0C,
    Eeprom = 0x0D,
    Neopixel = 0x0E,
    Touch = 0x0F,
    Keypad = 0x10,
    Encoder = 0x11,
}

/// Full register address: module base plus function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterAddress {
    /// Module base
    pub module: u8,
    /// Function within the module
    pub function: u8,
}

impl RegisterAddress {
    /// Address a function of a known module
    pub const fn new(module: Module, function: u8) -> Self {
        Self {
            module: module as u8,
            function,
        }
    }

    /// Address header as sent on the wire
    pub const fn bytes(self) -> [u8; 2] {
        [self.module, self.function]
    }
}

/// Implements `From<$reg> for RegisterAddress` for a module's function enum
macro_rules! function_registers {
    ($($reg:ty => $module:expr),* $(,)?) => {
        $(
            impl From<$reg> for RegisterAddress {
                fn from(reg: $reg) -> Self {
                    RegisterAddress::new($module, reg as u8)
                }
            }
        )*
    };
}

/// Status module functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StatusReg {
    /// Hardware ID, reads [`HW_ID_CODE`]
    HwId = 0x01,
    /// Date code (upper 16 bits) and product id (lower 16 bits)
    Version = 0x02,
    /// Bitmask of compiled-in modules
    Options = 0x03,
    /// Die temperature
    Temp = 0x04,
    /// Software reset, write [`SW_RESET_VALUE`]
    SwReset = 0x7F,
}

/// GPIO module functions
///
/// Bulk registers take 4 bytes (port A) or 8 bytes (port A then port B).
/// Separate set/clear registers let callers change pins without a
/// read-modify-write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum GpioReg {
    /// Make pins outputs
    DirSetBulk = 0x02,
    /// Make pins inputs
    DirClrBulk = 0x03,
    /// Current pin levels
    Bulk = 0x04,
    /// Drive pins high (or select pull-up on inputs)
    BulkSet = 0x05,
    /// Drive pins low (or select pull-down on inputs)
    BulkClr = 0x06,
    /// Invert pin outputs
    BulkToggle = 0x07,
    IntEnSet = 0x08,
    IntEnClr = 0x09,
    IntFlag = 0x0A,
    /// Enable bias resistors
    PullEnSet = 0x0B,
    /// Disable bias resistors
    PullEnClr = 0x0C,
}

/// Timer/PWM module functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TimerReg {
    Status = 0x00,
    /// PWM duty: `[pwm index, hi, lo]`
    Pwm = 0x01,
    /// PWM frequency: `[pwm index, hi, lo]`
    Freq = 0x02,
}

/// ADC module functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AdcReg {
    Status = 0x00,
    IntEn = 0x02,
    IntEnClr = 0x03,
    WinMode = 0x04,
    WinThresh = 0x05,
    /// Channel 0 data; channel `n` is at this offset plus `n`
    ChannelOffset = 0x07,
}

/// SERCOM module functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SercomReg {
    Status = 0x00,
    IntEn = 0x02,
    IntEnClr = 0x03,
    Baud = 0x04,
    Data = 0x05,
}

/// NeoPixel module functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum NeopixelReg {
    Status = 0x00,
    Pin = 0x01,
    Speed = 0x02,
    BufLength = 0x03,
    Buf = 0x04,
    Show = 0x05,
}

/// Touch module functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TouchReg {
    /// Channel 0 data; channel `n` is at this offset plus `n`
    ChannelOffset = 0x10,
}

/// Keypad module functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum KeypadReg {
    Status = 0x00,
    Event = 0x01,
    IntEnSet = 0x02,
    IntEnClr = 0x03,
    Count = 0x04,
    Fifo = 0x10,
}

/// Rotary encoder module functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum EncoderReg {
    Status = 0x00,
    IntEnSet = 0x02,
    IntEnClr = 0x03,
    Position = 0x04,
    Delta = 0x05,
}

function_registers! {
    StatusReg => Module::Status,
    GpioReg => Module::Gpio,
    TimerReg => Module::Timer,
    AdcReg => Module::Adc,
    SercomReg => Module::Sercom0,
    NeopixelReg => Module::Neopixel,
    TouchReg => Module::Touch,
    KeypadReg => Module::Keypad,
    EncoderReg => Module::Encoder,
}
