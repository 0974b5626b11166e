//! Board-agnostic core logic for Trill touch sensors
//!
//! This crate contains everything about a Trill sensor that does not need
//! a bus:
//!
//! - Device registry (names, channel counts, layouts, rescale constants)
//! - Device state, including the prepared-for-read state machine
//! - Frame decoding (raw channels, touches, sizes, buttons)
//! - Sensor configuration
//! - The [`traits::TouchSensor`] abstraction and ring position tracking

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod decode;
pub mod device;
pub mod state;
pub mod tracking;
pub mod traits;

pub use config::{Mode, ScanSpeed, SensorConfig};
pub use decode::{DecodeError, RawFrame, TouchSet};
pub use device::{DeviceVariant, RescaleFactors, Scales};
pub use state::{DeviceState, ReadEvent, ReadState};
