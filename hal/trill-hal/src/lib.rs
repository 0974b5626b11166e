//! Trill Hardware Abstraction Layer
//!
//! This crate defines the bus seam between the Trill driver and whatever
//! platform actually moves bytes on the wire (Linux i2c-dev, an MCU
//! peripheral, a test double).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  trill-drivers (command protocol)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  trill-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ EmbeddedHalBus│       │  native bus   │
//! │ (embedded-hal)│       │ (byte counts) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - addressed byte-count read/write

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::{EmbeddedHalBus, I2cBus};
