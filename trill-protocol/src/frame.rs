//! Command frame encoding and identity response parsing
//!
//! Command frame format:
//! - OFFSET (1 byte): [`OFFSET_COMMAND`]
//! - COMMAND (1 byte): command identifier from [`cmd`]
//! - ARGS (0-2 bytes): 8-bit value, or 16-bit value big-endian
//!
//! The prepare-for-read frame is the single byte [`OFFSET_DATA`].

use crate::commands::{
    cmd, NUM_BITS_MAX, NUM_BITS_MIN, OFFSET_COMMAND, OFFSET_DATA, SPEED_SLOW,
};
use crate::layout::IDENTITY_LENGTH;

/// Longest command frame in bytes
pub const MAX_FRAME_SIZE: usize = 4;

/// Errors from parsing a response frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResponseError {
    /// The response did not have the expected length
    Length {
        /// Bytes the layout requires
        expected: usize,
        /// Bytes actually received
        actual: usize,
    },
}

impl core::fmt::Display for ResponseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Length { expected, actual } => {
                write!(f, "expected {expected} response bytes, got {actual}")
            }
        }
    }
}

/// An encoded command ready to be written to the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandFrame {
    bytes: [u8; MAX_FRAME_SIZE],
    len: u8,
}

impl CommandFrame {
    const fn new(bytes: [u8; MAX_FRAME_SIZE], len: u8) -> Self {
        Self { bytes, len }
    }

    /// The bytes to put on the wire
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Frame length in bytes
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Frames always carry at least the offset byte
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Commands understood by a Trill sensor
///
/// Argument values are stored already clamped to what the device accepts;
/// use the constructors to get the clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Request the identity frame
    Identify,
    /// Select an operating mode (raw mode code)
    Mode(u8),
    /// Scan speed (0-3) and resolution in bits (9-16)
    ScanSettings { speed: u8, num_bits: u8 },
    /// Noise threshold in raw counts
    NoiseThreshold(u8),
    /// Sensing prescaler
    Prescaler(u8),
    /// IDAC value
    Idac(u8),
    /// Minimum touch size
    MinimumSize(u16),
    /// Auto-scan interval
    AutoScanInterval(u16),
    /// Re-capture the baseline
    BaselineUpdate,
    /// Move the read pointer to the data window
    PrepareDataRead,
}

impl Command {
    /// Scan settings with speed clamped to 0-3 and resolution to 9-16 bits
    pub fn scan_settings(speed: u8, num_bits: u8) -> Self {
        Self::ScanSettings {
            speed: speed.min(SPEED_SLOW),
            num_bits: num_bits.clamp(NUM_BITS_MIN, NUM_BITS_MAX),
        }
    }

    /// Noise threshold from a fraction of full scale at the given resolution
    ///
    /// The result is `fraction * 2^num_bits`, rounded to nearest and
    /// saturated to a byte.
    pub fn noise_threshold(fraction: f32, num_bits: u8) -> Self {
        let full_scale = (1u32 << num_bits.min(NUM_BITS_MAX)) as f32;
        let counts = fraction * full_scale;
        // NaN compares false on both sides and lands on 0
        let counts = if counts > 255.0 {
            255.0
        } else if counts >= 0.0 {
            counts
        } else {
            0.0
        };
        Self::NoiseThreshold((counts + 0.5) as u8)
    }

    /// Whether the command changes device configuration
    ///
    /// Every command except [`Command::PrepareDataRead`] leaves the read
    /// pointer in the command window.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::PrepareDataRead)
    }

    /// Encode into a wire frame
    pub fn encode(&self) -> CommandFrame {
        let c = OFFSET_COMMAND;
        match *self {
            Self::Identify => CommandFrame::new([c, cmd::IDENTIFY, 0, 0], 2),
            Self::Mode(mode) => CommandFrame::new([c, cmd::MODE, mode, 0], 3),
            Self::ScanSettings { speed, num_bits } => {
                CommandFrame::new([c, cmd::SCAN_SETTINGS, speed, num_bits], 4)
            }
            Self::NoiseThreshold(value) => {
                CommandFrame::new([c, cmd::NOISE_THRESHOLD, value, 0], 3)
            }
            Self::Prescaler(value) => CommandFrame::new([c, cmd::PRESCALER, value, 0], 3),
            Self::Idac(value) => CommandFrame::new([c, cmd::IDAC, value, 0], 3),
            Self::MinimumSize(size) => {
                let [hi, lo] = size.to_be_bytes();
                CommandFrame::new([c, cmd::MINIMUM_SIZE, hi, lo], 4)
            }
            Self::AutoScanInterval(interval) => {
                let [hi, lo] = interval.to_be_bytes();
                CommandFrame::new([c, cmd::AUTO_SCAN_INTERVAL, hi, lo], 4)
            }
            Self::BaselineUpdate => CommandFrame::new([c, cmd::BASELINE_UPDATE, 0, 0], 2),
            Self::PrepareDataRead => CommandFrame::new([OFFSET_DATA, 0, 0, 0], 1),
        }
    }
}

/// Parsed identity response
///
/// Layout: `[_, device code, firmware version, _]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Identity {
    /// Device type code, see [`crate::commands::device_code`]
    pub device_code: u8,
    /// Firmware version
    pub firmware_version: u8,
}

impl Identity {
    /// Parse an identity frame, which must be exactly 4 bytes
    pub fn parse(response: &[u8]) -> Result<Self, ResponseError> {
        if response.len() != IDENTITY_LENGTH {
            return Err(ResponseError::Length {
                expected: IDENTITY_LENGTH,
                actual: response.len(),
            });
        }

        Ok(Self {
            device_code: response[1],
            firmware_version: response[2],
        })
    }
}
