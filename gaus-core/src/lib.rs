//! Board-agnostic core types for the Gaus climate station
//!
//! This crate contains everything the drivers share that does not depend
//! on a particular chip or bus implementation:
//!
//! - Sensor and GPIO-expander traits
//! - Reading and pin-mask value types
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod traits;
