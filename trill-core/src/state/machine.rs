//! Prepared-for-read state machine
//!
//! After any command the device's read pointer sits in the command window,
//! so data reads are only valid once the prepare frame has been written.

use super::events::ReadEvent;

/// Position of the device's read pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadState {
    /// Read pointer in the command window; reads need a prepare first
    #[default]
    Unprepared,
    /// Read pointer in the data window
    Prepared,
}

impl ReadState {
    /// Whether a data read may be issued without preparing
    pub fn is_prepared(&self) -> bool {
        matches!(self, ReadState::Prepared)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: ReadEvent) -> Self {
        use ReadEvent::*;
        use ReadState::*;

        match (self, event) {
            (_, CommandIssued) => Unprepared,
            (_, PrepareComplete) => Prepared,
            (_, PrepareFailed) => Unprepared,
        }
    }
}
