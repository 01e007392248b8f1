//! Monotonic clock from the embassy time driver

use embassy_time::Instant;
use gaus_hal::MonotonicClock;

/// Clock reading [`Instant::now`]
///
/// Resolution follows the configured embassy tick rate; the RP2040 time
/// driver ticks at 1 MHz.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl MonotonicClock for EmbassyClock {
    fn now_micros(&self) -> u64 {
        Instant::now().as_micros()
    }
}
