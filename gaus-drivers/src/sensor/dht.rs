//! DHT11/DHT22 family single-wire sensor driver
//!
//! # Protocol
//!
//! ```text
//!   host start        sensor ack        bit 0         bit 1
//! ──┐          ┌────┐       ┌──────┐     ┌───┐     ┌───────┐     ┌──
//!   │          │    │       │      │     │   │     │       │     │
//!   └──────────┘    └───────┘      └─────┘   └─────┘       └─────┘
//!    ≥18 ms      ~40µs  80 µs   80 µs  50 µs 26µs  50 µs  70 µs
//! ```
//!
//! 1. The host releases the line for 1 ms, then drives it low for the
//!    start pulse (20 ms for 11-class parts, 1.1 ms for 22-class parts)
//!    and releases it again.
//! 2. The sensor answers with an 80 µs low and an 80 µs high pulse.
//! 3. Forty data bits follow, see [`super::frame`].
//!
//! Steps 2 and 3 are timed by busy-polling the line inside a critical
//! section: any preemption during those ~5 ms corrupts the pulse
//! comparison.
//!
//! # Rate limiting
//!
//! The sensor needs about two seconds between conversions. Calls made
//! inside that window return the cached result of the previous attempt
//! (successful or not) without touching the line, unless forced.

use embedded_hal::delay::DelayNs;
use gaus_core::config::DhtConfig;
use gaus_core::traits::{ClimateSensor, SensorReading};
use gaus_hal::{FlexPin, MonotonicClock, Pull};

use super::frame::{PulseTimings, SensorFrame, FRAME_BITS};
use crate::timing::{Deadline, RateLimiter};

/// Idle time with the line released before the start pulse (ms)
const WAKE_DELAY_MS: u32 = 1;

/// Wait after ending the start pulse before the sensor's answer is due (µs)
const RESPONSE_DELAY_US: u32 = 60;

/// Pulse that failed to arrive in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseStage {
    /// Sensor acknowledgment, low phase
    ResponseLow,
    /// Sensor acknowledgment, high phase
    ResponseHigh,
    /// Sync pulse of the given data bit
    BitLow(u8),
    /// Value pulse of the given data bit
    BitHigh(u8),
}

/// DHT conversion errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DhtError {
    /// An expected edge did not arrive within the per-pulse budget
    Timeout(PulseStage),
    /// All 40 bits arrived but the checksum byte does not match
    ChecksumMismatch {
        /// Checksum computed over the data bytes
        expected: u8,
        /// Checksum byte sent by the sensor
        received: u8,
    },
}

/// DHT sensor driver
///
/// Owns the data pin for its whole lifetime. One instance per sensor.
pub struct Dht<P, C, D> {
    pin: P,
    clock: C,
    delay: D,
    config: DhtConfig,
    limiter: RateLimiter,
    last_frame: Option<SensorFrame>,
    last_error: Option<DhtError>,
}

impl<P, C, D> Dht<P, C, D>
where
    P: FlexPin,
    C: MonotonicClock,
    D: DelayNs,
{
    /// Create a new driver bound to `pin`
    ///
    /// The pin is released with its pull-up enabled. The rate limiter starts
    /// out expired so the first read always performs a conversion.
    pub fn new(mut pin: P, clock: C, delay: D, config: DhtConfig) -> Self {
        pin.set_as_input(Pull::Up);
        let limiter = RateLimiter::new_ready(clock.now_millis(), config.min_interval_ms);

        Self {
            pin,
            clock,
            delay,
            config,
            limiter,
            last_frame: None,
            last_error: None,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &DhtConfig {
        &self.config
    }

    /// Frame of the most recent successful conversion, if the most recent
    /// conversion succeeded
    pub fn last_frame(&self) -> Option<SensorFrame> {
        self.last_frame
    }

    /// Cause of the most recent failed conversion
    ///
    /// Diagnostic only; the reading API reports every failure as NaN.
    pub fn last_error(&self) -> Option<DhtError> {
        self.last_error
    }

    /// Cached result of the most recent attempt
    pub fn last_reading(&self) -> SensorReading {
        match self.last_frame {
            Some(frame) => frame.reading(self.config.kind),
            None => SensorReading::INVALID,
        }
    }

    /// Release the hardware resources
    pub fn release(self) -> (P, C, D) {
        (self.pin, self.clock, self.delay)
    }

    /// Read the sensor, honouring the minimum interval unless `force` is set
    pub fn read(&mut self, force: bool) -> SensorReading {
        let now = self.clock.now_millis();
        let previous = self.limiter.last_ms();
        if !self.limiter.try_acquire(now, force) {
            return self.last_reading();
        }
        debug!("DHT conversion at {} ms (previous {} ms)", now, previous);

        match self.convert() {
            Ok(frame) => {
                self.last_frame = Some(frame);
                self.last_error = None;
            }
            Err(e) => {
                self.last_frame = None;
                self.last_error = Some(e);
            }
        }
        self.last_reading()
    }

    /// Run one full decode cycle
    fn convert(&mut self) -> Result<SensorFrame, DhtError> {
        self.send_start_signal();

        let captured = critical_section::with(|_| self.capture_pulses());
        let timings = captured.inspect_err(|e| {
            if let DhtError::Timeout(stage) = e {
                warn!("DHT timeout waiting for {:?}", stage);
            }
        })?;

        let frame = timings.decode();
        debug!(
            "DHT frame {:?}, checksum {}",
            frame.bytes(),
            frame.computed_checksum()
        );

        frame.validate().inspect_err(|_| {
            error!("DHT checksum failure");
        })
    }

    /// Host start signal, leaves the line released
    fn send_start_signal(&mut self) {
        // Let the pull-up bring the line to a clean idle high
        self.pin.release();
        self.delay.delay_ms(WAKE_DELAY_MS);

        self.pin.drive_low();
        self.delay.delay_us(self.config.kind.start_pulse_us());

        self.pin.release();
        self.delay.delay_us(RESPONSE_DELAY_US);
    }

    /// Time the acknowledgment and all data pulses
    ///
    /// Must run without preemption. Aborts at the first missing edge.
    fn capture_pulses(&mut self) -> Result<PulseTimings, DhtError> {
        self.expect_pulse(false)
            .ok_or(DhtError::Timeout(PulseStage::ResponseLow))?;
        self.expect_pulse(true)
            .ok_or(DhtError::Timeout(PulseStage::ResponseHigh))?;

        let mut timings = PulseTimings::new();
        for bit in 0..FRAME_BITS {
            let low = self
                .expect_pulse(false)
                .ok_or(DhtError::Timeout(PulseStage::BitLow(bit as u8)))?;
            let high = self
                .expect_pulse(true)
                .ok_or(DhtError::Timeout(PulseStage::BitHigh(bit as u8)))?;
            timings.record(bit, low, high);
        }
        Ok(timings)
    }

    /// Count polling iterations while the line stays at `level`
    ///
    /// Returns `None` if the level does not change within the pulse budget.
    /// Returns `Some(0)` immediately if the line is not at `level` at all.
    fn expect_pulse(&self, level: bool) -> Option<u32> {
        let deadline = Deadline::start(&self.clock, self.config.pulse_timeout_us);
        let mut count = 0u32;

        while self.pin.is_high() == level {
            count += 1;
            if deadline.expired(&self.clock) {
                return None;
            }
        }
        Some(count)
    }
}

impl<P, C, D> ClimateSensor for Dht<P, C, D>
where
    P: FlexPin,
    C: MonotonicClock,
    D: DelayNs,
{
    fn reading(&mut self, force: bool) -> SensorReading {
        self.read(force)
    }
}
