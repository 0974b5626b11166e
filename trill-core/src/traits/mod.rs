//! Sensor abstraction traits
//!
//! These traits define the interface between application logic and a
//! concrete, bus-backed sensor driver.

pub mod touch;

pub use touch::TouchSensor;
