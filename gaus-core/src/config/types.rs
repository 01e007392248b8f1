//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default seesaw I2C address (mini TFT wing)
pub const DEFAULT_SEESAW_ADDRESS: u8 = 0x5E;

/// Default pause between addressing a seesaw register and reading it back
pub const DEFAULT_SETTLE_DELAY_US: u32 = 125;

/// Minimum time between two sensor conversions
pub const DEFAULT_MIN_INTERVAL_MS: u32 = 2_000;

/// Default per-edge timeout while timing sensor pulses
pub const DEFAULT_PULSE_TIMEOUT_US: u32 = 1_000;

/// DHT sensor family member
///
/// The family shares one wire protocol but differs in start-pulse length
/// and in how the data bytes are scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DhtKind {
    /// DHT11: integer + tenths bytes, 1 °C / 1 %RH resolution
    #[default]
    Dht11,
    /// DHT12: same framing as the DHT11
    Dht12,
    /// DHT21 / AM2301: 16-bit tenths values
    Dht21,
    /// DHT22 / AM2302: 16-bit tenths values
    Dht22,
}

impl DhtKind {
    /// AM2301 is electrically a DHT21
    pub const AM2301: DhtKind = DhtKind::Dht21;

    /// Whether readings are encoded as 16-bit big-endian tenths
    pub fn is_wide(self) -> bool {
        matches!(self, DhtKind::Dht21 | DhtKind::Dht22)
    }

    /// Length of the host start pulse in microseconds
    ///
    /// The 11-class datasheet asks for at least 18 ms; 20 ms gives margin.
    /// The 22-class asks for at least 1 ms.
    pub fn start_pulse_us(self) -> u32 {
        if self.is_wide() {
            1_100
        } else {
            20_000
        }
    }
}

/// DHT sensor driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DhtConfig {
    /// Sensor family member
    pub kind: DhtKind,
    /// Minimum interval between conversions (ms)
    pub min_interval_ms: u32,
    /// Timeout for each individual pulse edge (µs)
    pub pulse_timeout_us: u32,
}

impl Default for DhtConfig {
    fn default() -> Self {
        Self {
            kind: DhtKind::Dht11,
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
            pulse_timeout_us: DEFAULT_PULSE_TIMEOUT_US,
        }
    }
}

/// Seesaw peripheral configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeesawConfig {
    /// 7-bit I2C address
    pub address: u8,
    /// Settle delay used by the derived register reads (µs)
    pub settle_delay_us: u32,
}

impl Default for SeesawConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_SEESAW_ADDRESS,
            settle_delay_us: DEFAULT_SETTLE_DELAY_US,
        }
    }
}

/// Board wiring and polling configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    /// MCU GPIO number of the DHT data line
    pub dht_pin: u8,
    /// DHT driver settings
    pub dht: DhtConfig,
    /// Seesaw driver settings
    pub seesaw: SeesawConfig,
    /// I2C clock frequency in Hz
    pub i2c_frequency_hz: u32,
    /// How often the caller polls the sensor and buttons (ms)
    pub poll_interval_ms: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            dht_pin: 4,
            dht: DhtConfig::default(),
            seesaw: SeesawConfig::default(),
            i2c_frequency_hz: 100_000,
            poll_interval_ms: 5_000,
        }
    }
}

impl BoardConfig {
    /// Validate the configuration
    ///
    /// Returns the name of the first offending field.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.seesaw.address > 0x7F {
            return Err("seesaw.address");
        }
        if self.dht.pulse_timeout_us == 0 {
            return Err("dht.pulse_timeout_us");
        }
        if self.i2c_frequency_hz == 0 {
            return Err("i2c_frequency_hz");
        }
        // Polling faster than the sensor converts only returns cached data
        if self.poll_interval_ms < self.dht.min_interval_ms {
            return Err("poll_interval_ms");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BoardConfig::default();
        assert_eq!(config.seesaw.address, 0x5E);
        assert_eq!(config.seesaw.settle_delay_us, 125);
        assert_eq!(config.dht.min_interval_ms, 2_000);
        assert_eq!(config.dht.pulse_timeout_us, 1_000);
        assert_eq!(config.dht.kind, DhtKind::Dht11);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_start_pulse_per_kind() {
        assert!(DhtKind::Dht11.start_pulse_us() >= 18_000);
        assert_eq!(DhtKind::Dht12.start_pulse_us(), DhtKind::Dht11.start_pulse_us());
        assert_eq!(DhtKind::Dht22.start_pulse_us(), 1_100);
        assert_eq!(DhtKind::AM2301, DhtKind::Dht21);
        assert!(DhtKind::AM2301.is_wide());
        assert!(!DhtKind::Dht12.is_wide());
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let mut config = BoardConfig::default();
        config.seesaw.address = 0x80;
        assert_eq!(config.validate(), Err("seesaw.address"));

        let mut config = BoardConfig::default();
        config.poll_interval_ms = 500;
        assert_eq!(config.validate(), Err("poll_interval_ms"));

        let mut config = BoardConfig::default();
        config.dht.pulse_timeout_us = 0;
        assert_eq!(config.validate(), Err("dht.pulse_timeout_us"));
    }
}
