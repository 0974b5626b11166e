//! Device registry
//!
//! Static per-variant facts: display names, channel counts, centroid
//! layouts, rescale constants, default addresses and default modes.

use trill_protocol::commands::{device_code, NUM_BITS_MAX, NUM_BITS_MIN};
use trill_protocol::layout::{
    CentroidLayout, NUM_CHANNELS_BAR, NUM_CHANNELS_MAX, NUM_CHANNELS_RING,
};

use crate::config::Mode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Trill hardware variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DeviceVariant {
    /// Not identified (or identification failed)
    #[default]
    None,
    /// Answered identify with a code we do not know
    Unknown,
    /// 1D linear slider
    Bar,
    /// 2D square pad
    Square,
    /// 1D breakout with freely assignable electrodes
    Craft,
    /// 1D circular slider with two buttons
    Ring,
    /// 2D hexagonal pad
    Hex,
}

/// Full-scale constants for one variant
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RescaleFactors {
    /// Full scale of the vertical (or only) position
    pub position: f32,
    /// Full scale of the horizontal position (2D only)
    pub secondary_position: f32,
    /// Full scale of touch size at 12-bit resolution
    pub size: f32,
}

impl RescaleFactors {
    const fn new(position: f32, secondary_position: f32, size: f32) -> Self {
        Self {
            position,
            secondary_position,
            size,
        }
    }
}

/// Multipliers turning raw readings into normalized values
///
/// Derived from the variant's [`RescaleFactors`] and the configured scan
/// resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Scales {
    pub position: f32,
    pub secondary_position: f32,
    pub size: f32,
    pub raw: f32,
}

impl Scales {
    /// Derive scales for a resolution of `num_bits`
    ///
    /// Sizes are reported relative to 12-bit scans, so they are stretched
    /// by `2^(12 - num_bits)`. `num_bits` is clamped to 9-16.
    pub fn new(factors: RescaleFactors, num_bits: u8) -> Self {
        let num_bits = num_bits.clamp(NUM_BITS_MIN, NUM_BITS_MAX);
        let size_stretch = if num_bits <= 12 {
            (1u32 << (12 - num_bits)) as f32
        } else {
            1.0 / (1u32 << (num_bits - 12)) as f32
        };

        Self {
            position: 1.0 / factors.position,
            secondary_position: 1.0 / factors.secondary_position,
            size: size_stretch / factors.size,
            raw: 1.0 / (1u32 << num_bits) as f32,
        }
    }
}

impl DeviceVariant {
    /// Every variant that corresponds to real hardware
    pub const KNOWN: [Self; 5] = [Self::Bar, Self::Square, Self::Craft, Self::Ring, Self::Hex];

    /// Map an identity device code to a variant
    pub const fn from_code(code: u8) -> Self {
        match code {
            device_code::BAR => Self::Bar,
            device_code::SQUARE => Self::Square,
            device_code::CRAFT => Self::Craft,
            device_code::RING => Self::Ring,
            device_code::HEX => Self::Hex,
            _ => Self::Unknown,
        }
    }

    /// Human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::None => "No device",
            Self::Unknown => "Unknown device",
            Self::Bar => "Bar",
            Self::Square => "Square",
            Self::Craft => "Craft",
            Self::Ring => "Ring",
            Self::Hex => "Hex",
        }
    }

    /// Whether the device has been identified at all
    pub const fn is_identified(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Rescale constants
    pub const fn rescale_factors(&self) -> RescaleFactors {
        match self {
            Self::None | Self::Unknown => RescaleFactors::new(1.0, 1.0, 1.0),
            Self::Bar => RescaleFactors::new(3200.0, 1.0, 4566.0),
            Self::Square => RescaleFactors::new(1792.0, 1792.0, 2700.0),
            Self::Craft => RescaleFactors::new(4096.0, 1.0, 1.0),
            Self::Ring => RescaleFactors::new(3584.0, 1.0, 5000.0),
            Self::Hex => RescaleFactors::new(1920.0, 1664.0, 4000.0),
        }
    }

    /// Number of sensing channels
    pub const fn num_channels(&self) -> usize {
        match self {
            Self::Bar => NUM_CHANNELS_BAR,
            Self::Ring => NUM_CHANNELS_RING,
            _ => NUM_CHANNELS_MAX,
        }
    }

    /// Centroid response layout
    pub const fn centroid_layout(&self) -> CentroidLayout {
        match self {
            Self::Square | Self::Hex => CentroidLayout::TWO_AXIS,
            Self::Ring => CentroidLayout::RING,
            _ => CentroidLayout::ONE_AXIS,
        }
    }

    /// Maximum touches per axis
    pub const fn max_touches(&self) -> u8 {
        self.centroid_layout().max_touches
    }

    /// Square and Hex
    pub const fn is_two_axis(&self) -> bool {
        matches!(self, Self::Square | Self::Hex)
    }

    /// Bar, Ring and Craft
    pub const fn is_one_axis(&self) -> bool {
        matches!(self, Self::Bar | Self::Ring | Self::Craft)
    }

    /// Factory I2C address
    pub const fn default_address(&self) -> Option<u8> {
        match self {
            Self::Bar => Some(0x20),
            Self::Square => Some(0x28),
            Self::Craft => Some(0x30),
            Self::Ring => Some(0x38),
            Self::Hex => Some(0x40),
            Self::None | Self::Unknown => None,
        }
    }

    /// Mode that [`Mode::Auto`] resolves to
    pub const fn default_mode(&self) -> Option<Mode> {
        match self {
            Self::Craft => Some(Mode::Differential),
            Self::Bar | Self::Square | Self::Ring | Self::Hex => Some(Mode::Centroid),
            Self::None | Self::Unknown => None,
        }
    }
}

impl core::fmt::Display for DeviceVariant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
