//! Driver errors

use trill_core::config::ConfigError;

/// Trill communication errors
///
/// `E` is the bus's own error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrillError<E> {
    /// The bus reported an error
    Bus(E),
    /// The bus accepted fewer bytes than the command frame holds
    BusWriteShortfall { expected: usize, written: usize },
    /// The bus returned fewer bytes than the response needs
    BusReadShortfall { expected: usize, read: usize },
    /// The device has not been identified
    UnidentifiedDevice,
    /// No operating mode applies (auto mode on an unknown device)
    InvalidModeForOperation,
}

impl<E: core::fmt::Debug> core::fmt::Display for TrillError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "bus error: {e:?}"),
            Self::BusWriteShortfall { expected, written } => {
                write!(f, "short write: {written} of {expected} bytes")
            }
            Self::BusReadShortfall { expected, read } => {
                write!(f, "short read: {read} of {expected} bytes")
            }
            Self::UnidentifiedDevice => f.write_str("device not identified"),
            Self::InvalidModeForOperation => f.write_str("no mode applies to this device"),
        }
    }
}

/// Step of [`super::Trill::setup`] that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupStage {
    Identify,
    Mode,
    ScanSettings,
    NoiseThreshold,
    Prescaler,
    Baseline,
    Prepare,
}

impl SetupStage {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Identify => "identify",
            Self::Mode => "mode",
            Self::ScanSettings => "scan settings",
            Self::NoiseThreshold => "noise threshold",
            Self::Prescaler => "prescaler",
            Self::Baseline => "baseline",
            Self::Prepare => "prepare",
        }
    }
}

/// Errors from bringing up a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupError<E> {
    /// The configuration failed validation; nothing was sent
    Config(ConfigError),
    /// A bring-up command failed
    Command {
        stage: SetupStage,
        source: TrillError<E>,
    },
}

impl<E: core::fmt::Debug> core::fmt::Display for SetupError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::Command { stage, source } => write!(f, "{} failed: {source}", stage.name()),
        }
    }
}
