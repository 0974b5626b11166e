//! Per-device runtime state and the decode accessors built on it

use heapless::Vec;
use trill_protocol::commands::{NUM_BITS_DEFAULT, NUM_BITS_MAX, NUM_BITS_MIN};
use trill_protocol::frame::Identity;
use trill_protocol::layout::{NUM_CHANNELS_MAX, RING_BUTTONS};

use super::events::ReadEvent;
use super::machine::ReadState;
use crate::config::Mode;
use crate::decode::{
    decode_channels, decode_touches, mean_of, scaled_slot, scaled_slot_12bit, DecodeError,
    RawFrame, TouchSet,
};
use crate::device::{DeviceVariant, Scales};

/// What the driver knows about one sensor
///
/// Scales are kept in step with the variant and resolution: every setter
/// that changes either recomputes them.
#[derive(Debug, Clone)]
pub struct DeviceState {
    variant: DeviceVariant,
    firmware_version: u8,
    mode: Mode,
    num_bits: u8,
    scales: Scales,
    read_state: ReadState,
    frame: RawFrame,
    touches: TouchSet,
    raw_data: Vec<f32, NUM_CHANNELS_MAX>,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceState {
    /// State of a sensor nobody has talked to yet
    pub fn new() -> Self {
        let variant = DeviceVariant::None;
        Self {
            variant,
            firmware_version: 0,
            mode: Mode::Auto,
            num_bits: NUM_BITS_DEFAULT,
            scales: Scales::new(variant.rescale_factors(), NUM_BITS_DEFAULT),
            read_state: ReadState::Unprepared,
            frame: RawFrame::new(),
            touches: TouchSet::EMPTY,
            raw_data: Vec::new(),
        }
    }

    pub fn variant(&self) -> DeviceVariant {
        self.variant
    }

    pub fn firmware_version(&self) -> u8 {
        self.firmware_version
    }

    /// Current mode; [`Mode::Auto`] until a mode has been applied
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn num_bits(&self) -> u8 {
        self.num_bits
    }

    pub fn scales(&self) -> &Scales {
        &self.scales
    }

    pub fn read_state(&self) -> ReadState {
        self.read_state
    }

    /// Most recent complete response
    pub fn frame(&self) -> &RawFrame {
        &self.frame
    }

    /// Touch counts decoded from the most recent centroid frame
    pub fn touches(&self) -> TouchSet {
        self.touches
    }

    /// Channel values decoded from the most recent raw frame
    pub fn raw_data(&self) -> &[f32] {
        &self.raw_data
    }

    /// Record a successful identification
    pub fn apply_identity(&mut self, identity: Identity) -> DeviceVariant {
        self.variant = DeviceVariant::from_code(identity.device_code);
        self.firmware_version = identity.firmware_version;
        self.update_scales();
        self.variant
    }

    /// Forget the device after a failed identification
    pub fn clear_identity(&mut self) {
        self.variant = DeviceVariant::None;
        self.update_scales();
        self.clear_data();
    }

    /// Record a mode change
    ///
    /// Data captured in the previous mode no longer describes the device.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.clear_data();
    }

    /// Record a new scan resolution, clamped to 9-16 bits
    pub fn set_num_bits(&mut self, num_bits: u8) {
        self.num_bits = num_bits.clamp(NUM_BITS_MIN, NUM_BITS_MAX);
        self.update_scales();
    }

    /// Advance the prepared-for-read state machine
    pub fn handle(&mut self, event: ReadEvent) {
        self.read_state = self.read_state.transition(event);
    }

    fn update_scales(&mut self) {
        self.scales = Scales::new(self.variant.rescale_factors(), self.num_bits);
    }

    fn clear_data(&mut self) {
        self.frame = RawFrame::new();
        self.touches = TouchSet::EMPTY;
        self.raw_data.clear();
    }

    /// Fail unless the device has been identified
    pub fn require_identified(&self) -> Result<(), DecodeError> {
        if self.variant.is_identified() {
            Ok(())
        } else {
            Err(DecodeError::UnidentifiedDevice)
        }
    }

    /// Centroid response length for the current variant
    pub fn centroid_length(&self) -> usize {
        self.variant.centroid_layout().length()
    }

    /// Store a raw-channel frame and decode its channels
    pub fn commit_raw(&mut self, frame: RawFrame) -> &[f32] {
        self.raw_data = decode_channels(&frame, self.num_channels(), self.scales.raw);
        self.frame = frame;
        &self.raw_data
    }

    /// Store a centroid frame and decode its touch counts
    pub fn commit_centroid(&mut self, frame: RawFrame) -> TouchSet {
        self.touches = decode_touches(&frame, &self.variant.centroid_layout());
        self.frame = frame;
        self.touches
    }

    /// Forget the touch counts after a failed centroid read
    ///
    /// The previous frame is kept; only complete reads replace it.
    pub fn clear_touches(&mut self) {
        self.touches = TouchSet::EMPTY;
    }

    /// Channels on this device
    pub fn num_channels(&self) -> usize {
        self.variant.num_channels()
    }

    fn is_centroid(&self) -> bool {
        self.mode == Mode::Centroid
    }

    /// One-axis device in centroid mode
    pub fn is_1d(&self) -> bool {
        self.is_centroid() && self.variant.is_one_axis()
    }

    /// Two-axis device in centroid mode
    pub fn is_2d(&self) -> bool {
        self.is_centroid() && self.variant.is_two_axis()
    }

    /// Vertical (or only) touches; 0 outside centroid mode
    pub fn number_of_touches(&self) -> u8 {
        if !self.is_centroid() {
            return 0;
        }
        self.touches.vertical()
    }

    /// Horizontal touches; 0 unless a two-axis device in centroid mode
    pub fn number_of_horizontal_touches(&self) -> u8 {
        if !self.is_2d() {
            return 0;
        }
        self.touches.horizontal()
    }

    fn check_touch(&self, touch: u8, needs_two_axis: bool) -> Result<(), DecodeError> {
        self.require_identified()?;
        if !self.is_centroid() || (needs_two_axis && !self.variant.is_two_axis()) {
            return Err(DecodeError::InvalidModeForOperation);
        }
        if touch >= self.variant.max_touches() {
            return Err(DecodeError::IndexOutOfRange);
        }
        Ok(())
    }

    /// Location of touch `touch` on the vertical (or only) axis
    pub fn touch_location(&self, touch: u8) -> Result<f32, DecodeError> {
        self.check_touch(touch, false)?;
        let offset = self.variant.centroid_layout().location_offset(touch);
        scaled_slot(&self.frame, offset, self.scales.position)
    }

    /// Size of touch `touch` on the vertical (or only) axis
    pub fn touch_size(&self, touch: u8) -> Result<f32, DecodeError> {
        self.check_touch(touch, false)?;
        let offset = self.variant.centroid_layout().size_offset(touch);
        scaled_slot(&self.frame, offset, self.scales.size)
    }

    /// Location of horizontal touch `touch`
    pub fn touch_horizontal_location(&self, touch: u8) -> Result<f32, DecodeError> {
        self.check_touch(touch, true)?;
        let offset = self.variant.centroid_layout().horizontal_location_offset(touch);
        scaled_slot(&self.frame, offset, self.scales.secondary_position)
    }

    /// Size of horizontal touch `touch`
    pub fn touch_horizontal_size(&self, touch: u8) -> Result<f32, DecodeError> {
        self.check_touch(touch, true)?;
        let offset = self.variant.centroid_layout().horizontal_size_offset(touch);
        scaled_slot(&self.frame, offset, self.scales.size)
    }

    /// Reading of Ring button `button` (0 or 1)
    pub fn button_value(&self, button: u8) -> Result<f32, DecodeError> {
        self.require_identified()?;
        if !self.is_centroid() || self.variant != DeviceVariant::Ring {
            return Err(DecodeError::InvalidModeForOperation);
        }
        if button >= RING_BUTTONS {
            return Err(DecodeError::IndexOutOfRange);
        }
        let offset = self.variant.centroid_layout().button_offset(button);
        scaled_slot_12bit(&self.frame, offset, self.scales.raw)
    }

    /// Mean location of all vertical touches, 0 with no touches
    pub fn compound_touch_location(&self) -> f32 {
        mean_of(self.number_of_touches(), |i| self.touch_location(i))
    }

    /// Mean location of all horizontal touches, 0 with no touches
    pub fn compound_touch_horizontal_location(&self) -> f32 {
        mean_of(self.number_of_horizontal_touches(), |i| {
            self.touch_horizontal_location(i)
        })
    }

    /// Mean touch size, 0 with no touches
    ///
    /// On two-axis devices only touches present on both axes count.
    pub fn compound_touch_size(&self) -> f32 {
        let count = if self.is_2d() {
            self.number_of_touches()
                .min(self.number_of_horizontal_touches())
        } else {
            self.number_of_touches()
        };
        mean_of(count, |i| self.touch_size(i))
    }
}
