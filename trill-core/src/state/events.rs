//! Events that move the read pointer

/// Bus activity that affects whether the data window is selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadEvent {
    /// A command frame is about to be written (whether or not it succeeds)
    CommandIssued,
    /// The prepare-for-read frame was written in full
    PrepareComplete,
    /// The prepare-for-read frame failed or was short
    PrepareFailed,
}
