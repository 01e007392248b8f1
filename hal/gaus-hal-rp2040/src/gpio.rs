//! GPIO wrappers

use embassy_rp::gpio::{self, Flex};
use gaus_hal::{FlexPin, InputPin, OutputPin, Pull};

/// Bidirectional pin backed by [`Flex`]
pub struct RpFlexPin<'d> {
    pin: Flex<'d>,
}

impl<'d> RpFlexPin<'d> {
    /// Wrap a flex pin; it starts as a floating input
    pub fn new(mut pin: Flex<'d>) -> Self {
        pin.set_as_input();
        pin.set_pull(gpio::Pull::None);
        Self { pin }
    }

    /// Return the wrapped pin
    pub fn into_inner(self) -> Flex<'d> {
        self.pin
    }
}

fn to_rp_pull(pull: Pull) -> gpio::Pull {
    match pull {
        Pull::None => gpio::Pull::None,
        Pull::Up => gpio::Pull::Up,
        Pull::Down => gpio::Pull::Down,
    }
}

impl OutputPin for RpFlexPin<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }
}

impl InputPin for RpFlexPin<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

impl FlexPin for RpFlexPin<'_> {
    fn set_as_input(&mut self, pull: Pull) {
        self.pin.set_pull(to_rp_pull(pull));
        self.pin.set_as_input();
    }

    fn set_as_output(&mut self) {
        self.pin.set_as_output();
    }
}
