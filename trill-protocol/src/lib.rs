//! Trill I2C wire protocol
//!
//! Every transaction with a Trill sensor is either a command frame written
//! to the command window, a one-byte write that moves the read pointer to
//! the data window, or a plain read of a fixed-layout response.
//!
//! ```text
//! command:  ┌────────────┬─────────┬──────────────┐
//!           │ CMD_OFFSET │ COMMAND │ ARGS (0-2B)  │
//!           └────────────┴─────────┴──────────────┘
//! prepare:  ┌─────────────┐
//!           │ DATA_OFFSET │
//!           └─────────────┘
//! ```
//!
//! Response layouts (raw channels, centroids, identity) live in [`layout`].

#![no_std]
#![deny(unsafe_code)]

pub mod commands;
pub mod frame;
pub mod layout;

pub use commands::{OFFSET_COMMAND, OFFSET_DATA};
pub use frame::{Command, CommandFrame, Identity, ResponseError, MAX_FRAME_SIZE};
pub use layout::CentroidLayout;
