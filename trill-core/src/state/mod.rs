//! Device state
//!
//! Everything the driver remembers about the sensor between bus
//! transactions, plus the explicit prepared-for-read state machine.

pub mod device;
pub mod events;
pub mod machine;

pub use device::DeviceState;
pub use events::ReadEvent;
pub use machine::ReadState;
