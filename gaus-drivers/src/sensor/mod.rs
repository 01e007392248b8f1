//! Temperature/humidity sensor drivers

pub mod dht;
pub mod frame;

pub use dht::{Dht, DhtError, PulseStage};
pub use frame::{PulseTimings, SensorFrame};
pub use gaus_core::traits::{ClimateSensor, SensorReading, TemperatureScale};
