//! Hardware-facing traits
//!
//! These traits define the interface between application code and the
//! protocol drivers in `gaus-drivers`.

pub mod climate;
pub mod expander;

pub use climate::{ClimateSensor, SensorReading, TemperatureScale};
pub use expander::{GpioExpander, PinMask, PinMode};
