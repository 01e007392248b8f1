//! GPIO expander traits and pin-mask types
//!
//! Expanders address up to 64 pins split into two 32-bit ports. Pins 0-31
//! live on port A, pins 32-63 on port B.

use core::ops::{BitAnd, BitOr, Not};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pin configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PinMode {
    /// Floating input
    Input,
    /// Push-pull output
    Output,
    /// Input with pull-up enabled
    InputPullUp,
    /// Input with pull-down enabled
    InputPullDown,
}

/// Set of expander pins, one bit per pin
///
/// Bit `n` is pin `n`. The low word is port A, the high word port B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinMask(u64);

impl PinMask {
    /// Pins per port
    pub const PORT_WIDTH: u8 = 32;

    /// Highest addressable pin number
    pub const MAX_PIN: u8 = 63;

    /// No pins
    pub const EMPTY: PinMask = PinMask(0);

    /// Create a mask from raw bits
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Create a mask from separate port words
    pub const fn from_ports(port_a: u32, port_b: u32) -> Self {
        Self(((port_b as u64) << 32) | port_a as u64)
    }

    /// Mask with a single pin set, `None` if the pin does not exist
    pub const fn pin(pin: u8) -> Option<Self> {
        if pin > Self::MAX_PIN {
            None
        } else {
            Some(Self(1 << pin))
        }
    }

    /// Raw bits
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Port A word (pins 0-31)
    pub const fn port_a(self) -> u32 {
        self.0 as u32
    }

    /// Port B word (pins 32-63, bit 0 = pin 32)
    pub const fn port_b(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Whether any port B pin is selected
    pub const fn touches_port_b(self) -> bool {
        self.port_b() != 0
    }

    /// Whether `pin` is selected
    pub const fn contains(self, pin: u8) -> bool {
        pin <= Self::MAX_PIN && self.0 & (1 << pin) != 0
    }

    /// Whether no pin is selected
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of selected pins
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Wire encoding: port A big-endian followed by port B big-endian
    pub fn to_be_bytes(self) -> [u8; 8] {
        let mut out = [0u8; 8];
        out[..4].copy_from_slice(&self.port_a().to_be_bytes());
        out[4..].copy_from_slice(&self.port_b().to_be_bytes());
        out
    }

    /// Inverse of [`PinMask::to_be_bytes`]
    pub fn from_be_bytes(bytes: [u8; 8]) -> Self {
        let a = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let b = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        Self::from_ports(a, b)
    }
}

impl BitOr for PinMask {
    type Output = PinMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        PinMask(self.0 | rhs.0)
    }
}

impl BitAnd for PinMask {
    type Output = PinMask;

    fn bitand(self, rhs: Self) -> Self::Output {
        PinMask(self.0 & rhs.0)
    }
}

impl Not for PinMask {
    type Output = PinMask;

    fn not(self) -> Self::Output {
        PinMask(!self.0)
    }
}

/// Trait for remote GPIO banks reached over a bus
///
/// Every method is one or more bus transactions. Multi-step operations are
/// not atomic: if one transaction fails, earlier ones have already been
/// applied and the remote pin state must be treated as unknown.
pub trait GpioExpander {
    /// Error type of the underlying transport
    type Error;

    /// Configure a single pin
    fn pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), Self::Error>;

    /// Configure every pin in `pins`
    fn pin_mode_mask(&mut self, pins: PinMask, mode: PinMode) -> Result<(), Self::Error>;

    /// Drive a single output pin
    fn digital_write(&mut self, pin: u8, high: bool) -> Result<(), Self::Error>;

    /// Drive every pin in `pins` to the same level
    fn digital_write_mask(&mut self, pins: PinMask, high: bool) -> Result<(), Self::Error>;

    /// Read a single pin
    fn digital_read(&mut self, pin: u8) -> Result<bool, Self::Error>;

    /// Read the pins in `pins`; unselected bits are zero
    fn digital_read_mask(&mut self, pins: PinMask) -> Result<PinMask, Self::Error>;
}
