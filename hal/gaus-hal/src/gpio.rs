//! Digital pin traits
//!
//! Fixed-direction pins plus [`FlexPin`] for lines shared between host and
//! device.

/// Pin the MCU drives
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

/// Pin the MCU samples
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Internal bias resistor selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// Floating input
    #[default]
    None,
    /// Weak pull-up to VCC
    Up,
    /// Weak pull-down to GND
    Down,
}

/// Pin whose direction can be switched at runtime
///
/// Single-wire protocols share one line between host and device: the host
/// drives it as an output to signal, then releases it to an input so the
/// device can answer while the bias resistor holds the idle level.
pub trait FlexPin: OutputPin + InputPin {
    /// Switch the pin to input mode with the given bias
    fn set_as_input(&mut self, pull: Pull);

    /// Switch the pin to output mode
    ///
    /// The output level is whatever was last written with
    /// [`OutputPin::set_state`]; callers should set the level right after.
    fn set_as_output(&mut self);

    /// Release the line: input with pull-up, letting the bus float high
    fn release(&mut self) {
        self.set_as_input(Pull::Up);
    }

    /// Actively drive the line low
    fn drive_low(&mut self) {
        self.set_as_output();
        self.set_low();
    }
}
