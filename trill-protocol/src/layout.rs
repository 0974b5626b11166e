//! Response frame layouts
//!
//! In raw-channel modes the data window holds one 16-bit big-endian word
//! per channel, of which the low 12 bits are significant.
//!
//! In centroid mode the window is a sequence of regions, each holding
//! `max_touches` 16-bit big-endian slots:
//!
//! ```text
//! ┌───────────┬───────────┬──────────────┬──────────────┐
//! │ locations │ sizes     │ h. locations │ h. sizes     │  2D (Square, Hex)
//! └───────────┴───────────┴──────────────┴──────────────┘
//! ┌───────────┬───────────┬──────────────┐
//! │ locations │ sizes     │ buttons (2)  │                 Ring
//! └───────────┴───────────┴──────────────┘
//! ┌───────────┬───────────┐
//! │ locations │ sizes     │                                Bar, Craft
//! └───────────┴───────────┘
//! ```
//!
//! An unused location slot holds [`NO_TOUCH`].

/// Length of the identity response
pub const IDENTITY_LENGTH: usize = 4;

/// Channels on a Bar
pub const NUM_CHANNELS_BAR: usize = 26;

/// Channels on a Ring
pub const NUM_CHANNELS_RING: usize = 28;

/// Channels on every other device
pub const NUM_CHANNELS_MAX: usize = 30;

/// Length of a raw-channel response (2 bytes per channel)
pub const RAW_LENGTH: usize = NUM_CHANNELS_MAX * 2;

/// Maximum simultaneous touches on one-axis devices
pub const MAX_TOUCHES_1D: u8 = 5;

/// Maximum simultaneous touches per axis on two-axis devices
pub const MAX_TOUCHES_2D: u8 = 4;

/// Centroid response length for Bar and Craft
pub const CENTROID_LENGTH_DEFAULT: usize = 20;

/// Centroid response length for Square and Hex
pub const CENTROID_LENGTH_2D: usize = 32;

/// Centroid response length for Ring
pub const CENTROID_LENGTH_RING: usize = 24;

/// Slot value marking the end of the touch list
pub const NO_TOUCH: u16 = 0xFFFF;

/// Mask for 12-bit channel and button readings
pub const VALUE_MASK_12BIT: u16 = 0x0FFF;

/// Buttons reported by a Ring
pub const RING_BUTTONS: u8 = 2;

/// Region offsets of a centroid response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CentroidLayout {
    /// Slots per region
    pub max_touches: u8,
    /// Whether horizontal regions follow the vertical ones
    pub two_axis: bool,
    /// Button slots following the size region
    pub buttons: u8,
}

impl CentroidLayout {
    /// Bar and Craft
    pub const ONE_AXIS: Self = Self {
        max_touches: MAX_TOUCHES_1D,
        two_axis: false,
        buttons: 0,
    };

    /// Square and Hex
    pub const TWO_AXIS: Self = Self {
        max_touches: MAX_TOUCHES_2D,
        two_axis: true,
        buttons: 0,
    };

    /// Ring
    pub const RING: Self = Self {
        max_touches: MAX_TOUCHES_1D,
        two_axis: false,
        buttons: RING_BUTTONS,
    };

    const fn region(&self, n: usize) -> usize {
        2 * n * self.max_touches as usize
    }

    /// Total response length in bytes
    pub const fn length(&self) -> usize {
        let regions = if self.two_axis { 4 } else { 2 };
        self.region(regions) + 2 * self.buttons as usize
    }

    /// Offset of the vertical (or only) location slot `touch`
    pub const fn location_offset(&self, touch: u8) -> usize {
        2 * touch as usize
    }

    /// Offset of the vertical (or only) size slot `touch`
    pub const fn size_offset(&self, touch: u8) -> usize {
        self.region(1) + 2 * touch as usize
    }

    /// Offset of the horizontal location slot `touch`
    pub const fn horizontal_location_offset(&self, touch: u8) -> usize {
        self.region(2) + 2 * touch as usize
    }

    /// Offset of the horizontal size slot `touch`
    pub const fn horizontal_size_offset(&self, touch: u8) -> usize {
        self.region(3) + 2 * touch as usize
    }

    /// Offset of button `button`
    pub const fn button_offset(&self, button: u8) -> usize {
        self.region(2) + 2 * button as usize
    }
}

/// Read a 16-bit big-endian word, `None` past the end of `buf`
pub fn read_u16_be(buf: &[u8], offset: usize) -> Option<u16> {
    let hi = *buf.get(offset)?;
    let lo = *buf.get(offset + 1)?;
    Some(u16::from_be_bytes([hi, lo]))
}

/// Read a 16-bit big-endian word and keep the low 12 bits
pub fn read_u12_be(buf: &[u8], offset: usize) -> Option<u16> {
    read_u16_be(buf, offset).map(|v| v & VALUE_MASK_12BIT)
}

/// Count leading slots before the first [`NO_TOUCH`], starting at `start`
///
/// Scans at most `max_touches` slots. Slots past the end of `buf` end the
/// scan.
pub fn count_touches(buf: &[u8], start: usize, max_touches: u8) -> u8 {
    let mut count = 0;
    while count < max_touches {
        match read_u16_be(buf, start + 2 * count as usize) {
            Some(NO_TOUCH) | None => break,
            Some(_) => count += 1,
        }
    }
    count
}
