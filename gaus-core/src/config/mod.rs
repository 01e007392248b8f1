//! Configuration types
//!
//! Plain data with defaults matching the hardware datasheets. Boards override
//! individual fields; nothing here touches hardware.

pub mod types;

pub use types::{BoardConfig, DhtConfig, DhtKind, SeesawConfig};
