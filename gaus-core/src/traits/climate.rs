//! Temperature/humidity sensor traits

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Temperature unit requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TemperatureScale {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureScale {
    /// Convert a Celsius value into this scale
    pub fn from_celsius(self, celsius: f32) -> f32 {
        match self {
            TemperatureScale::Celsius => celsius,
            TemperatureScale::Fahrenheit => celsius * 1.8 + 32.0,
        }
    }
}

/// One decoded sensor sample
///
/// `valid == false` means the conversion failed (timeout or checksum) and
/// both values are NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReading {
    /// Relative humidity in %RH
    pub humidity: f32,
    /// Temperature in °C
    pub temperature: f32,
    /// Whether the values come from a checksum-valid frame
    pub valid: bool,
}

impl SensorReading {
    /// Failed reading
    pub const INVALID: SensorReading = SensorReading {
        humidity: f32::NAN,
        temperature: f32::NAN,
        valid: false,
    };

    /// Create a valid reading
    pub fn new(humidity: f32, temperature: f32) -> Self {
        Self {
            humidity,
            temperature,
            valid: true,
        }
    }

    /// Humidity, or NaN for a failed reading
    pub fn humidity(&self) -> f32 {
        if self.valid {
            self.humidity
        } else {
            f32::NAN
        }
    }

    /// Temperature in the requested scale, or NaN for a failed reading
    pub fn temperature(&self, scale: TemperatureScale) -> f32 {
        if self.valid {
            scale.from_celsius(self.temperature)
        } else {
            f32::NAN
        }
    }
}

impl Default for SensorReading {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Trait for combined temperature/humidity sensors
///
/// Implementations are expected to rate-limit conversions internally:
/// calls made too soon after the previous conversion return the cached
/// result unless `force` is set.
pub trait ClimateSensor {
    /// Return the current sample, converting if allowed
    fn reading(&mut self, force: bool) -> SensorReading;

    /// Temperature in the given scale, NaN on failure
    fn read_temperature(&mut self, scale: TemperatureScale, force: bool) -> f32 {
        self.reading(force).temperature(scale)
    }

    /// Relative humidity in %RH, NaN on failure
    fn read_humidity(&mut self, force: bool) -> f32 {
        self.reading(force).humidity()
    }
}
