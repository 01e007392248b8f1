//! DHT data frame decoding
//!
//! A transmission carries 40 bits, MSB first, grouped into five bytes:
//!
//! ```text
//! ┌────────────┬─────────────┬────────────┬─────────────┬──────────┐
//! │ RH integer │ RH fraction │ T integer  │ T fraction  │ CHECKSUM │
//! │ 1B         │ 1B          │ 1B (bit 7  │ 1B          │ 1B       │
//! │            │             │  = sign)   │             │          │
//! └────────────┴─────────────┴────────────┴─────────────┴──────────┘
//! ```
//!
//! The checksum is the low byte of the sum of the first four bytes.
//! 22-class sensors reinterpret each byte pair as a 16-bit big-endian value
//! in tenths.
//!
//! Each bit is a ~50 µs low "sync" pulse followed by a high pulse of ~26 µs
//! (0) or ~70 µs (1). Bits are classified by comparing the two durations
//! rather than against a fixed threshold, so the loop-count based timing
//! works at any CPU clock.

use gaus_core::config::DhtKind;
use gaus_core::traits::SensorReading;

use super::dht::DhtError;

/// Bytes per transmission
pub const FRAME_LEN: usize = 5;

/// Data bits per transmission
pub const FRAME_BITS: usize = FRAME_LEN * 8;

/// Timed pulses per transmission (one low + one high per bit)
pub const PULSE_COUNT: usize = FRAME_BITS * 2;

/// Sign flag in the temperature integer byte
const SIGN_BIT: u8 = 0x80;

/// Classify one bit from its sync-low and data-high durations
///
/// A high pulse longer than the sync pulse is a 1. Equal durations are
/// read as 0.
#[inline]
pub fn decode_bit(low: u32, high: u32) -> bool {
    high > low
}

/// Pulse durations captured for one transmission
///
/// Durations are in arbitrary but consistent units (busy-loop iterations);
/// only their ratios matter.
#[derive(Debug, Clone)]
pub struct PulseTimings {
    counts: [u32; PULSE_COUNT],
}

impl Default for PulseTimings {
    fn default() -> Self {
        Self::new()
    }
}

impl PulseTimings {
    /// Empty capture
    pub const fn new() -> Self {
        Self {
            counts: [0; PULSE_COUNT],
        }
    }

    /// Record the low and high durations of data bit `bit`
    pub fn record(&mut self, bit: usize, low: u32, high: u32) {
        self.counts[2 * bit] = low;
        self.counts[2 * bit + 1] = high;
    }

    /// Low and high durations of data bit `bit`
    pub fn bit(&self, bit: usize) -> (u32, u32) {
        (self.counts[2 * bit], self.counts[2 * bit + 1])
    }

    /// Assemble the captured bits into a frame, MSB first
    ///
    /// The checksum is not checked here.
    pub fn decode(&self) -> SensorFrame {
        let mut bytes = [0u8; FRAME_LEN];
        for i in 0..FRAME_BITS {
            let (low, high) = self.bit(i);
            bytes[i / 8] <<= 1;
            if decode_bit(low, high) {
                bytes[i / 8] |= 1;
            }
        }
        SensorFrame(bytes)
    }
}

/// One raw 5-byte DHT transmission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorFrame([u8; FRAME_LEN]);

impl SensorFrame {
    /// Wrap raw bytes, checksum included
    pub const fn from_bytes(bytes: [u8; FRAME_LEN]) -> Self {
        Self(bytes)
    }

    /// Build a frame from four data bytes, appending their checksum
    pub fn with_checksum(data: [u8; 4]) -> Self {
        let checksum = Self::checksum_of(&data);
        Self([data[0], data[1], data[2], data[3], checksum])
    }

    fn checksum_of(data: &[u8]) -> u8 {
        data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
    }

    /// Raw bytes
    pub fn bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    /// Checksum byte as received
    pub fn checksum(&self) -> u8 {
        self.0[4]
    }

    /// Checksum computed over the data bytes
    pub fn computed_checksum(&self) -> u8 {
        Self::checksum_of(&self.0[..4])
    }

    /// Whether the received checksum matches the data
    pub fn is_valid(&self) -> bool {
        self.checksum() == self.computed_checksum()
    }

    /// Return the frame if its checksum matches
    pub fn validate(self) -> Result<Self, DhtError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(DhtError::ChecksumMismatch {
                expected: self.computed_checksum(),
                received: self.checksum(),
            })
        }
    }

    /// Relative humidity in %RH
    pub fn humidity(&self, kind: DhtKind) -> f32 {
        let [int, frac, ..] = self.0;
        if kind.is_wide() {
            u16::from_be_bytes([int, frac]) as f32 * 0.1
        } else {
            int as f32 + frac as f32 * 0.1
        }
    }

    /// Temperature in °C
    pub fn temperature(&self, kind: DhtKind) -> f32 {
        let int = self.0[2];
        let frac = self.0[3];
        let magnitude = if kind.is_wide() {
            u16::from_be_bytes([int & !SIGN_BIT, frac]) as f32 * 0.1
        } else {
            // Only the low nibble of the 11-class fraction byte carries data
            (int & !SIGN_BIT) as f32 + (frac & 0x0F) as f32 * 0.1
        };
        if int & SIGN_BIT != 0 {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Interpret the frame, producing an invalid reading on checksum mismatch
    pub fn reading(&self, kind: DhtKind) -> SensorReading {
        if !self.is_valid() {
            return SensorReading::INVALID;
        }
        SensorReading::new(self.humidity(kind), self.temperature(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaus_core::traits::TemperatureScale;
    use proptest::prelude::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_humidity_decode() {
        let frame = SensorFrame::with_checksum([0x32, 0x03, 0x15, 0x00]);
        assert!(approx(frame.humidity(DhtKind::Dht11), 50.3));
        assert!(approx(frame.temperature(DhtKind::Dht11), 21.0));
    }

    #[test]
    fn test_negative_temperature() {
        let frame = SensorFrame::with_checksum([0x32, 0x00, 0x81, 0x05]);
        let reading = frame.reading(DhtKind::Dht11);
        assert!(reading.valid);
        assert!(approx(reading.temperature, -1.5));
        assert!(approx(reading.temperature(TemperatureScale::Fahrenheit), 29.3));
    }

    #[test]
    fn test_fraction_high_nibble_ignored() {
        let frame = SensorFrame::with_checksum([0x28, 0x00, 0x14, 0xF7]);
        assert!(approx(frame.temperature(DhtKind::Dht11), 20.7));
    }

    #[test]
    fn test_wide_decode() {
        // 65.2 %RH, -10.1 °C
        let frame = SensorFrame::with_checksum([0x02, 0x8C, 0x80, 0x65]);
        assert!(approx(frame.humidity(DhtKind::Dht22), 65.2));
        assert!(approx(frame.temperature(DhtKind::Dht22), -10.1));

        // 35.1 °C
        let frame = SensorFrame::with_checksum([0x01, 0xF4, 0x01, 0x5F]);
        assert!(approx(frame.humidity(DhtKind::Dht21), 50.0));
        assert!(approx(frame.temperature(DhtKind::Dht21), 35.1));
    }

    #[test]
    fn test_checksum_mismatch() {
        let frame = SensorFrame::from_bytes([0x32, 0x03, 0x15, 0x00, 0x4B]);
        assert!(!frame.is_valid());
        assert_eq!(
            frame.validate(),
            Err(DhtError::ChecksumMismatch {
                expected: 0x4A,
                received: 0x4B
            })
        );
        assert!(!frame.reading(DhtKind::Dht11).valid);
    }

    #[test]
    fn test_checksum_wraps() {
        let frame = SensorFrame::with_checksum([0xFF, 0xFF, 0x02, 0x01]);
        assert_eq!(frame.checksum(), 0x01);
        assert!(frame.validate().is_ok());
    }

    #[test]
    fn test_bit_tie_reads_zero() {
        assert!(!decode_bit(50, 50));
        assert!(!decode_bit(50, 26));
        assert!(decode_bit(50, 51));
    }

    #[test]
    fn test_pulse_assembly_msb_first() {
        let mut timings = PulseTimings::new();
        let bytes = [0b1000_0001u8, 0x00, 0xFF, 0x5A, 0xDA];
        for bit in 0..FRAME_BITS {
            let one = bytes[bit / 8] & (0x80 >> (bit % 8)) != 0;
            timings.record(bit, 50, if one { 70 } else { 50 });
        }
        assert_eq!(timings.decode().bytes(), &bytes);
    }

    proptest! {
        #[test]
        fn prop_checksum_invariant(data in any::<[u8; 4]>(), checksum in any::<u8>()) {
            let frame = SensorFrame::from_bytes([data[0], data[1], data[2], data[3], checksum]);
            let sum = data.iter().map(|&b| b as u32).sum::<u32>() % 256;
            prop_assert_eq!(frame.is_valid(), checksum as u32 == sum);

            let reading = frame.reading(DhtKind::Dht11);
            if checksum as u32 != sum {
                prop_assert!(!reading.valid);
                prop_assert!(reading.humidity().is_nan());
                prop_assert!(reading.temperature(TemperatureScale::Celsius).is_nan());
            } else {
                prop_assert!(reading.valid);
                prop_assert!(!reading.humidity().is_nan());
            }
        }
    }
}
