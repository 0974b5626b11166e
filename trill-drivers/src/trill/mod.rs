//! Trill capacitive touch sensor driver
//!
//! Every Trill sensor (Bar, Square, Craft, Ring, Hex) speaks the same I2C
//! protocol:
//!
//! - Commands are written to the command window at offset 0 and need
//!   [`COMMAND_SETTLE_US`] to take effect.
//! - Data is read from offset 4. After any command the read pointer sits
//!   in the command window, so a one-byte "prepare" write must move it back
//!   before the next read. The driver tracks this and prepares on demand.
//! - Identification reads a 4-byte frame `[_, device code, firmware, _]`.
//!
//! # Usage
//!
//! ```ignore
//! let mut trill = Trill::new(i2c, delay, 0x38);
//! trill.setup(&SensorConfig::for_variant(DeviceVariant::Ring))?;
//! loop {
//!     trill.read_locations()?;
//!     for i in 0..trill.number_of_touches() {
//!         let location = trill.touch_location(i)?;
//!     }
//! }
//! ```

mod error;

pub use error::{SetupError, SetupStage, TrillError};

use embedded_hal::delay::DelayNs;
use trill_core::config::{Mode, SensorConfig};
use trill_core::decode::{DecodeError, RawFrame, TouchSet, RAW_FRAME_CAPACITY};
use trill_core::device::DeviceVariant;
use trill_core::state::{DeviceState, ReadEvent, ReadState};
use trill_core::traits::TouchSensor;
use trill_hal::I2cBus;
use trill_protocol::commands::COMMAND_SETTLE_US;
use trill_protocol::layout::{IDENTITY_LENGTH, RAW_LENGTH};
use trill_protocol::{Command, Identity};

/// Driver for one Trill sensor
pub struct Trill<B, D> {
    bus: B,
    delay: D,
    address: u8,
    state: DeviceState,
}

impl<B: I2cBus, D: DelayNs> Trill<B, D> {
    /// Create a driver for the sensor at `address`
    ///
    /// Nothing is sent until [`Trill::identify`] or [`Trill::setup`].
    pub fn new(bus: B, delay: D, address: u8) -> Self {
        Self {
            bus,
            delay,
            address,
            state: DeviceState::new(),
        }
    }

    /// Give back the bus and delay
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    /// Bring a sensor from power-on to reading data
    ///
    /// Validates `config`, identifies the device, then applies mode, scan
    /// settings, noise threshold and prescaler, captures a baseline and
    /// prepares for reading. Stops at the first failing step.
    pub fn setup(&mut self, config: &SensorConfig) -> Result<DeviceVariant, SetupError<B::Error>> {
        config.validate().map_err(SetupError::Config)?;
        self.address = config.address;

        let variant = self.identify().map_err(at(SetupStage::Identify))?;
        self.set_mode(config.mode).map_err(at(SetupStage::Mode))?;
        self.set_scan_settings(config.scan_speed.value(), config.num_bits)
            .map_err(at(SetupStage::ScanSettings))?;
        if let Some(threshold) = config.noise_threshold {
            self.set_noise_threshold(threshold)
                .map_err(at(SetupStage::NoiseThreshold))?;
        }
        if let Some(prescaler) = config.prescaler {
            self.set_prescaler(prescaler)
                .map_err(at(SetupStage::Prescaler))?;
        }
        self.update_baseline().map_err(at(SetupStage::Baseline))?;
        self.prepare_for_data_read()
            .map_err(at(SetupStage::Prepare))?;

        info!(
            "Trill {} ready at {=u8:#x}",
            variant.name(),
            self.address
        );
        Ok(variant)
    }

    // ---- Command protocol ----

    /// Write one command frame and let the device settle
    ///
    /// Configuration commands move the read pointer to the command window
    /// before anything reaches the bus, so a failed write also leaves the
    /// driver unprepared.
    fn send(&mut self, command: Command) -> Result<(), TrillError<B::Error>> {
        let frame = command.encode();
        if command.is_configuration() {
            self.state.handle(ReadEvent::CommandIssued);
        }

        let written = self
            .bus
            .write(self.address, frame.as_bytes())
            .map_err(TrillError::Bus)?;
        if written != frame.len() {
            warn!("Trill short write: {} of {} bytes", written, frame.len());
            return Err(TrillError::BusWriteShortfall {
                expected: frame.len(),
                written,
            });
        }

        self.delay.delay_us(COMMAND_SETTLE_US);
        Ok(())
    }

    /// Ask the device what it is
    ///
    /// Any failure forgets the previous identity.
    pub fn identify(&mut self) -> Result<DeviceVariant, TrillError<B::Error>> {
        match self.read_identity() {
            Ok(variant) => {
                info!(
                    "Trill identified: {} firmware {}",
                    variant.name(),
                    self.state.firmware_version()
                );
                Ok(variant)
            }
            Err(e) => {
                warn!("Trill identify failed at {=u8:#x}", self.address);
                self.state.clear_identity();
                Err(e)
            }
        }
    }

    fn read_identity(&mut self) -> Result<DeviceVariant, TrillError<B::Error>> {
        self.send(Command::Identify)?;

        let mut buf = [0u8; IDENTITY_LENGTH];
        // The first read after identify returns a stale frame
        let _ = self.bus.read(self.address, &mut buf);
        let read = self
            .bus
            .read(self.address, &mut buf)
            .map_err(TrillError::Bus)?;

        let identity = Identity::parse(&buf[..read.min(IDENTITY_LENGTH)])
            .map_err(|_| TrillError::BusReadShortfall {
                expected: IDENTITY_LENGTH,
                read,
            })?;
        Ok(self.state.apply_identity(identity))
    }

    /// Select an operating mode
    ///
    /// [`Mode::Auto`] resolves to the variant's default. On success the
    /// previous frame and touches are discarded.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), TrillError<B::Error>> {
        let resolved = mode
            .resolve(self.state.variant())
            .ok_or(TrillError::InvalidModeForOperation)?;
        let code = resolved
            .code()
            .ok_or(TrillError::InvalidModeForOperation)?;

        self.send(Command::Mode(code))?;
        self.state.set_mode(resolved);
        debug!("Trill mode set to {}", code);
        Ok(())
    }

    /// Set scan speed (0 fastest to 3 slowest) and resolution (9-16 bits)
    ///
    /// Out-of-range values are clamped. Scales follow the new resolution.
    pub fn set_scan_settings(&mut self, speed: u8, num_bits: u8) -> Result<(), TrillError<B::Error>> {
        let command = Command::scan_settings(speed, num_bits);
        self.send(command)?;
        if let Command::ScanSettings { num_bits, .. } = command {
            self.state.set_num_bits(num_bits);
        }
        Ok(())
    }

    /// Set the noise threshold as a fraction of full scale
    pub fn set_noise_threshold(&mut self, threshold: f32) -> Result<(), TrillError<B::Error>> {
        self.send(Command::noise_threshold(threshold, self.state.num_bits()))
    }

    pub fn set_prescaler(&mut self, prescaler: u8) -> Result<(), TrillError<B::Error>> {
        self.send(Command::Prescaler(prescaler))
    }

    pub fn set_idac_value(&mut self, value: u8) -> Result<(), TrillError<B::Error>> {
        self.send(Command::Idac(value))
    }

    /// Smallest size the device reports as a touch
    pub fn set_minimum_touch_size(&mut self, size: u16) -> Result<(), TrillError<B::Error>> {
        self.send(Command::MinimumSize(size))
    }

    /// Interval between automatic scans
    pub fn set_auto_scan_interval(&mut self, interval: u16) -> Result<(), TrillError<B::Error>> {
        self.send(Command::AutoScanInterval(interval))
    }

    /// Re-capture the untouched baseline
    pub fn update_baseline(&mut self) -> Result<(), TrillError<B::Error>> {
        self.send(Command::BaselineUpdate)
    }

    /// Move the read pointer to the data window
    pub fn prepare_for_data_read(&mut self) -> Result<(), TrillError<B::Error>> {
        match self.send(Command::PrepareDataRead) {
            Ok(()) => {
                self.state.handle(ReadEvent::PrepareComplete);
                Ok(())
            }
            Err(e) => {
                self.state.handle(ReadEvent::PrepareFailed);
                Err(e)
            }
        }
    }

    // ---- Data reads ----

    fn read_frame(&mut self, expected: usize) -> Result<RawFrame, TrillError<B::Error>> {
        if !self.state.variant().is_identified() {
            return Err(TrillError::UnidentifiedDevice);
        }
        if !self.state.read_state().is_prepared() {
            debug!("Trill re-preparing before read");
            self.prepare_for_data_read()?;
        }

        let mut buf = [0u8; RAW_FRAME_CAPACITY];
        let len = expected.min(RAW_FRAME_CAPACITY);
        let read = self
            .bus
            .read(self.address, &mut buf[..len])
            .map_err(TrillError::Bus)?;

        if read != len {
            warn!("Trill short read: {} of {} bytes", read, len);
            return Err(TrillError::BusReadShortfall {
                expected: len,
                read,
            });
        }
        RawFrame::from_bytes(&buf[..len]).ok_or(TrillError::BusReadShortfall {
            expected: len,
            read,
        })
    }

    /// Read one value per channel
    ///
    /// Meaningful in raw, baseline and differential modes. Values are
    /// normalized to the scan resolution.
    pub fn read_raw_data(&mut self) -> Result<&[f32], TrillError<B::Error>> {
        let frame = self.read_frame(RAW_LENGTH)?;
        Ok(self.state.commit_raw(frame))
    }

    /// Read touch centroids
    ///
    /// A failed read reports zero touches until the next successful one.
    pub fn read_locations(&mut self) -> Result<TouchSet, TrillError<B::Error>> {
        let length = self.state.centroid_length();
        match self.read_frame(length) {
            Ok(frame) => Ok(self.state.commit_centroid(frame)),
            Err(e) => {
                self.state.clear_touches();
                Err(e)
            }
        }
    }

    // ---- Accessors ----

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    pub fn device_type(&self) -> DeviceVariant {
        self.state.variant()
    }

    pub fn device_name(&self) -> &'static str {
        self.state.variant().name()
    }

    pub fn firmware_version(&self) -> u8 {
        self.state.firmware_version()
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn num_bits(&self) -> u8 {
        self.state.num_bits()
    }

    pub fn read_state(&self) -> ReadState {
        self.state.read_state()
    }

    pub fn num_channels(&self) -> usize {
        self.state.num_channels()
    }

    /// Channel values from the last [`Trill::read_raw_data`]
    pub fn raw_data(&self) -> &[f32] {
        self.state.raw_data()
    }

    pub fn is_1d(&self) -> bool {
        self.state.is_1d()
    }

    pub fn is_2d(&self) -> bool {
        self.state.is_2d()
    }

    pub fn number_of_touches(&self) -> u8 {
        self.state.number_of_touches()
    }

    pub fn number_of_horizontal_touches(&self) -> u8 {
        self.state.number_of_horizontal_touches()
    }

    pub fn touch_location(&self, touch: u8) -> Result<f32, DecodeError> {
        self.state.touch_location(touch)
    }

    pub fn touch_size(&self, touch: u8) -> Result<f32, DecodeError> {
        self.state.touch_size(touch)
    }

    pub fn touch_horizontal_location(&self, touch: u8) -> Result<f32, DecodeError> {
        self.state.touch_horizontal_location(touch)
    }

    pub fn touch_horizontal_size(&self, touch: u8) -> Result<f32, DecodeError> {
        self.state.touch_horizontal_size(touch)
    }

    /// Ring button reading, normalized to the scan resolution
    pub fn button_value(&self, button: u8) -> Result<f32, DecodeError> {
        self.state.button_value(button)
    }

    pub fn compound_touch_location(&self) -> f32 {
        self.state.compound_touch_location()
    }

    pub fn compound_touch_horizontal_location(&self) -> f32 {
        self.state.compound_touch_horizontal_location()
    }

    pub fn compound_touch_size(&self) -> f32 {
        self.state.compound_touch_size()
    }

    /// Identity summary for logs and consoles
    pub fn details(&self) -> DeviceDetails {
        DeviceDetails {
            variant: self.state.variant(),
            address: self.address,
            firmware_version: self.state.firmware_version(),
        }
    }
}

fn at<E>(stage: SetupStage) -> impl FnOnce(TrillError<E>) -> SetupError<E> {
    move |source| SetupError::Command { stage, source }
}

impl<B: I2cBus, D: DelayNs> TouchSensor for Trill<B, D> {
    type Error = TrillError<B::Error>;

    fn read_touches(&mut self) -> Result<TouchSet, Self::Error> {
        self.read_locations()
    }

    fn number_of_touches(&self) -> u8 {
        self.state.number_of_touches()
    }

    fn touch_location(&self, touch: u8) -> Result<f32, DecodeError> {
        self.state.touch_location(touch)
    }

    fn touch_size(&self, touch: u8) -> Result<f32, DecodeError> {
        self.state.touch_size(touch)
    }

    fn compound_touch_size(&self) -> f32 {
        self.state.compound_touch_size()
    }
}

/// What [`Trill::details`] reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceDetails {
    pub variant: DeviceVariant,
    pub address: u8,
    pub firmware_version: u8,
}

impl core::fmt::Display for DeviceDetails {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Device type: {}", self.variant)?;
        writeln!(f, "Address: {:#04x}", self.address)?;
        write!(f, "Firmware version: {}", self.firmware_version)
    }
}
