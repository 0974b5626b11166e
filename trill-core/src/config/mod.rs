//! Sensor configuration
//!
//! Board-agnostic configuration structures. With the `toml` feature a
//! configuration can be loaded from a `[sensor]` table.

#[cfg(feature = "toml")]
pub mod toml;
pub mod types;

pub use types::*;
