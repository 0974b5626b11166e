//! Hardware driver implementations
//!
//! This crate drives Trill sensors over a [`trill_hal::I2cBus`]:
//!
//! - Command protocol (identify, mode, scan settings, thresholds, baseline)
//! - Data reads (raw channels, touch centroids)
//! - The [`trill_core::traits::TouchSensor`] implementation

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod trill;

pub use trill::{DeviceDetails, SetupError, SetupStage, Trill, TrillError};
