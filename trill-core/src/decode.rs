//! Frame decoding
//!
//! Pure functions over a [`RawFrame`]. Offsets always come from a
//! [`CentroidLayout`] and every access is bounds-checked, so a frame that
//! is shorter than its layout yields [`DecodeError::NoData`] instead of
//! garbage.

use heapless::Vec;
use trill_protocol::layout::{
    count_touches, read_u12_be, read_u16_be, CentroidLayout, NUM_CHANNELS_MAX, RAW_LENGTH,
};

/// Capacity of a frame: the largest response is the raw-channel one
pub const RAW_FRAME_CAPACITY: usize = RAW_LENGTH;

/// Errors from decode accessors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// The device has not been identified
    UnidentifiedDevice,
    /// The accessor is not valid in the current mode or for this variant
    InvalidModeForOperation,
    /// Touch or button index beyond the variant's maximum
    IndexOutOfRange,
    /// No complete frame holds the requested slot
    NoData,
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Self::UnidentifiedDevice => "device not identified",
            Self::InvalidModeForOperation => "operation not valid in current mode",
            Self::IndexOutOfRange => "index out of range",
            Self::NoData => "no data available",
        };
        f.write_str(msg)
    }
}

/// The most recent complete response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFrame {
    bytes: Vec<u8, RAW_FRAME_CAPACITY>,
}

impl RawFrame {
    /// An empty frame
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Build a frame from a complete response
    ///
    /// Returns `None` if `bytes` exceeds [`RAW_FRAME_CAPACITY`].
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        Vec::from_slice(bytes).ok().map(|bytes| Self { bytes })
    }

    /// Frame contents
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Valid length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether no frame has been captured
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Read a 16-bit slot
    pub fn word(&self, offset: usize) -> Option<u16> {
        read_u16_be(&self.bytes, offset)
    }

    /// Read a 12-bit slot
    pub fn word_12bit(&self, offset: usize) -> Option<u16> {
        read_u12_be(&self.bytes, offset)
    }
}

/// Decoded touch counts, packed the way the device reports them
///
/// Low nibble: vertical (or only) axis. High nibble: horizontal axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSet(u8);

impl TouchSet {
    /// No touches
    pub const EMPTY: Self = Self(0);

    /// Pack two counts, each saturated to a nibble
    pub const fn new(vertical: u8, horizontal: u8) -> Self {
        let v = if vertical > 0x0F { 0x0F } else { vertical };
        let h = if horizontal > 0x0F { 0x0F } else { horizontal };
        Self((h << 4) | v)
    }

    /// Rebuild from the packed byte
    pub const fn from_packed(packed: u8) -> Self {
        Self(packed)
    }

    /// The packed byte
    pub const fn packed(&self) -> u8 {
        self.0
    }

    /// Vertical (or only) touch count
    pub const fn vertical(&self) -> u8 {
        self.0 & 0x0F
    }

    /// Horizontal touch count
    pub const fn horizontal(&self) -> u8 {
        self.0 >> 4
    }

    /// Touches present on both axes
    pub fn paired(&self) -> u8 {
        self.vertical().min(self.horizontal())
    }
}

/// Count touches in a centroid frame
///
/// The horizontal scan only runs for two-axis layouts.
pub fn decode_touches(frame: &RawFrame, layout: &CentroidLayout) -> TouchSet {
    let bytes = frame.as_bytes();
    let vertical = count_touches(bytes, layout.location_offset(0), layout.max_touches);
    let horizontal = if layout.two_axis {
        count_touches(
            bytes,
            layout.horizontal_location_offset(0),
            layout.max_touches,
        )
    } else {
        0
    };
    TouchSet::new(vertical, horizontal)
}

/// Decode `channels` raw readings, scaled by `raw_scale`
///
/// Channels not covered by the frame are left out.
pub fn decode_channels(
    frame: &RawFrame,
    channels: usize,
    raw_scale: f32,
) -> Vec<f32, NUM_CHANNELS_MAX> {
    let mut values = Vec::new();
    for channel in 0..channels.min(NUM_CHANNELS_MAX) {
        let Some(raw) = frame.word_12bit(2 * channel) else {
            break;
        };
        // Capacity equals the channel ceiling
        let _ = values.push(raw as f32 * raw_scale);
    }
    values
}

/// Read one 16-bit slot and scale it
pub fn scaled_slot(frame: &RawFrame, offset: usize, scale: f32) -> Result<f32, DecodeError> {
    frame
        .word(offset)
        .map(|raw| raw as f32 * scale)
        .ok_or(DecodeError::NoData)
}

/// Read one 12-bit slot and scale it
pub fn scaled_slot_12bit(
    frame: &RawFrame,
    offset: usize,
    scale: f32,
) -> Result<f32, DecodeError> {
    frame
        .word_12bit(offset)
        .map(|raw| raw as f32 * scale)
        .ok_or(DecodeError::NoData)
}

/// Mean of `count` readings, 0 when there are none
///
/// Readings that fail to decode contribute nothing to the sum.
pub fn mean_of<F>(count: u8, mut reading: F) -> f32
where
    F: FnMut(u8) -> Result<f32, DecodeError>,
{
    if count == 0 {
        return 0.0;
    }
    let sum: f32 = (0..count).filter_map(|i| reading(i).ok()).sum();
    sum / count as f32
}
