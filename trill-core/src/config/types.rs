//! Configuration type definitions

use trill_protocol::commands::{mode_code, NUM_BITS_DEFAULT, NUM_BITS_MAX, NUM_BITS_MIN};

use crate::device::DeviceVariant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lowest 7-bit address a device may use
pub const ADDRESS_MIN: u8 = 0x08;

/// Highest 7-bit address a device may use
pub const ADDRESS_MAX: u8 = 0x77;

/// Noise threshold applied by [`SensorConfig::for_variant`]
pub const DEFAULT_NOISE_THRESHOLD: f32 = 0.06;

/// Operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    /// Resolve to the variant's default mode when applied
    #[default]
    Auto,
    /// Discrete touch locations and sizes
    Centroid,
    /// Raw per-channel readings
    Raw,
    /// Per-channel baseline
    Baseline,
    /// Per-channel reading minus baseline
    #[cfg_attr(feature = "serde", serde(alias = "diff"))]
    Differential,
}

impl Mode {
    /// Wire code, `None` for [`Mode::Auto`]
    pub const fn code(&self) -> Option<u8> {
        match self {
            Self::Auto => None,
            Self::Centroid => Some(mode_code::CENTROID),
            Self::Raw => Some(mode_code::RAW),
            Self::Baseline => Some(mode_code::BASELINE),
            Self::Differential => Some(mode_code::DIFF),
        }
    }

    /// Replace [`Mode::Auto`] by the variant's default mode
    pub const fn resolve(self, variant: DeviceVariant) -> Option<Self> {
        match self {
            Self::Auto => variant.default_mode(),
            other => Some(other),
        }
    }
}

/// Scan speed, fastest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScanSpeed {
    #[default]
    UltraFast,
    Fast,
    Normal,
    Slow,
}

impl ScanSpeed {
    /// Wire value (0-3)
    pub const fn value(&self) -> u8 {
        match self {
            Self::UltraFast => 0,
            Self::Fast => 1,
            Self::Normal => 2,
            Self::Slow => 3,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Address outside the 7-bit non-reserved range
    InvalidAddress,
    /// Resolution outside 9-16 bits
    InvalidBitDepth,
    /// Noise threshold not a fraction in [0, 1]
    InvalidThreshold,
    /// Configuration text could not be parsed
    Parse,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Self::InvalidAddress => "I2C address out of range",
            Self::InvalidBitDepth => "scan resolution must be 9-16 bits",
            Self::InvalidThreshold => "noise threshold must be within 0.0-1.0",
            Self::Parse => "malformed configuration",
        };
        f.write_str(msg)
    }
}

/// Everything needed to bring a sensor from power-on to reading data
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SensorConfig {
    /// 7-bit I2C address
    pub address: u8,
    /// Operating mode
    pub mode: Mode,
    /// Scan speed
    pub scan_speed: ScanSpeed,
    /// Scan resolution in bits (9-16)
    pub num_bits: u8,
    /// Noise threshold as a fraction of full scale
    pub noise_threshold: Option<f32>,
    /// Sensing prescaler
    pub prescaler: Option<u8>,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            address: 0x20,
            mode: Mode::Auto,
            scan_speed: ScanSpeed::UltraFast,
            num_bits: NUM_BITS_DEFAULT,
            noise_threshold: None,
            prescaler: None,
        }
    }
}

impl SensorConfig {
    /// Factory settings for a variant
    pub fn for_variant(variant: DeviceVariant) -> Self {
        let defaults = Self::default();
        Self {
            address: variant.default_address().unwrap_or(defaults.address),
            noise_threshold: Some(DEFAULT_NOISE_THRESHOLD),
            ..defaults
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(ADDRESS_MIN..=ADDRESS_MAX).contains(&self.address) {
            return Err(ConfigError::InvalidAddress);
        }
        if !(NUM_BITS_MIN..=NUM_BITS_MAX).contains(&self.num_bits) {
            return Err(ConfigError::InvalidBitDepth);
        }
        if let Some(threshold) = self.noise_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::InvalidThreshold);
            }
        }
        Ok(())
    }
}
