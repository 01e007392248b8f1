//! Mini TFT featherwing: backlight, display reset and buttons
//!
//! The wing puts a seesaw in front of the display's reset line, the
//! backlight PWM and a 5-way joystick plus two buttons.

use embedded_hal::delay::DelayNs;
use gaus_core::config::SeesawConfig;
use gaus_core::traits::PinMode;
use gaus_hal::I2cBus;

use super::registers::TimerReg;
use super::seesaw::{Seesaw, SeesawError};

/// Seesaw pin wired to the display reset line
pub const RESET_PIN: u8 = 8;

/// PWM channel driving the backlight
const BACKLIGHT_PWM: u8 = 0x00;

/// Snapshot of the wing's buttons
///
/// Raw port A levels masked by [`Buttons::ALL`]. Buttons pull their pin to
/// ground, so a clear bit means pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(u32);

impl Buttons {
    pub const UP: u32 = 1 << 2;
    pub const LEFT: u32 = 1 << 3;
    pub const DOWN: u32 = 1 << 4;
    pub const RIGHT: u32 = 1 << 7;
    pub const B: u32 = 1 << 9;
    pub const A: u32 = 1 << 10;
    pub const SELECT: u32 = 1 << 11;

    /// Every button pin
    pub const ALL: u32 =
        Self::UP | Self::DOWN | Self::LEFT | Self::RIGHT | Self::A | Self::B | Self::SELECT;

    /// Wrap raw levels; bits outside [`Buttons::ALL`] are dropped
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & Self::ALL)
    }

    /// Raw levels
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether every button in `button` is held down
    pub const fn is_pressed(self, button: u32) -> bool {
        button & Self::ALL != 0 && self.0 & button == 0
    }

    /// Mask of the buttons held down
    pub const fn pressed(self) -> u32 {
        !self.0 & Self::ALL
    }

    /// Whether no button is held down
    pub const fn is_idle(self) -> bool {
        self.pressed() == 0
    }
}

/// Mini TFT wing driver
pub struct MiniTftWing<I2C, D> {
    seesaw: Seesaw<I2C, D>,
}

impl<I2C, D> MiniTftWing<I2C, D>
where
    I2C: I2cBus,
    D: DelayNs,
{
    /// Create a new driver; no bus traffic until [`MiniTftWing::begin`]
    pub fn new(i2c: I2C, delay: D, config: SeesawConfig) -> Self {
        Self {
            seesaw: Seesaw::new(i2c, delay, config),
        }
    }

    /// Reset and identify the seesaw, then set up the reset line and buttons
    pub fn begin(&mut self) -> Result<(), SeesawError<I2C::Error>> {
        self.seesaw.begin()?;
        self.seesaw.pin_mode(RESET_PIN, PinMode::Output)?;
        self.seesaw.pin_mode_bulk(Buttons::ALL, PinMode::InputPullUp)?;
        info!("mini TFT wing ready");
        Ok(())
    }

    /// Set the backlight duty; `0xFFFF` is fully on, `0` off
    pub fn set_backlight(&mut self, value: u16) -> Result<(), SeesawError<I2C::Error>> {
        self.seesaw.write(TimerReg::Pwm, &Self::pwm_payload(value))
    }

    /// Set the backlight PWM frequency in Hz
    pub fn set_backlight_freq(&mut self, freq: u16) -> Result<(), SeesawError<I2C::Error>> {
        self.seesaw.write(TimerReg::Freq, &Self::pwm_payload(freq))
    }

    /// Drive the display reset line
    pub fn tft_reset(&mut self, level: bool) -> Result<(), SeesawError<I2C::Error>> {
        self.seesaw.digital_write(RESET_PIN, level)
    }

    /// Sample all buttons in one bulk read
    pub fn read_buttons(&mut self) -> Result<Buttons, SeesawError<I2C::Error>> {
        let levels = self.seesaw.digital_read_bulk(Buttons::ALL)?;
        Ok(Buttons::from_bits(levels))
    }

    /// Underlying seesaw, for anything the wing does not wrap
    pub fn seesaw_mut(&mut self) -> &mut Seesaw<I2C, D> {
        &mut self.seesaw
    }

    /// Return the underlying seesaw
    pub fn into_inner(self) -> Seesaw<I2C, D> {
        self.seesaw
    }

    fn pwm_payload(value: u16) -> [u8; 3] {
        let [hi, lo] = value.to_be_bytes();
        [BACKLIGHT_PWM, hi, lo]
    }
}
