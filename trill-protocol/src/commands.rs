//! Command identifiers and protocol constants

/// First byte of every command frame: selects the command window
pub const OFFSET_COMMAND: u8 = 0;

/// Single byte that selects the data window for subsequent reads
pub const OFFSET_DATA: u8 = 4;

/// Command identifiers (second byte of a command frame)
pub mod cmd {
    /// No-op
    pub const NONE: u8 = 0;
    /// Set operating mode
    pub const MODE: u8 = 1;
    /// Set scan speed and resolution
    pub const SCAN_SETTINGS: u8 = 2;
    /// Set the sensing prescaler
    pub const PRESCALER: u8 = 3;
    /// Set the noise threshold
    pub const NOISE_THRESHOLD: u8 = 4;
    /// Set the IDAC value
    pub const IDAC: u8 = 5;
    /// Re-capture the baseline
    pub const BASELINE_UPDATE: u8 = 6;
    /// Set the minimum touch size
    pub const MINIMUM_SIZE: u8 = 7;
    /// Set the auto-scan interval
    pub const AUTO_SCAN_INTERVAL: u8 = 16;
    /// Request the identity frame
    pub const IDENTIFY: u8 = 255;
}

/// Device type codes reported in byte 1 of the identity frame
pub mod device_code {
    pub const UNKNOWN: u8 = 0;
    pub const BAR: u8 = 1;
    pub const SQUARE: u8 = 2;
    pub const CRAFT: u8 = 3;
    pub const RING: u8 = 4;
    pub const HEX: u8 = 5;
}

/// Operating mode codes sent with [`cmd::MODE`]
pub mod mode_code {
    pub const CENTROID: u8 = 0;
    pub const RAW: u8 = 1;
    pub const BASELINE: u8 = 2;
    pub const DIFF: u8 = 3;
}

/// Fastest scan speed setting
pub const SPEED_ULTRA_FAST: u8 = 0;

/// Slowest scan speed setting (clamp ceiling)
pub const SPEED_SLOW: u8 = 3;

/// Lowest accepted scan resolution in bits
pub const NUM_BITS_MIN: u8 = 9;

/// Highest accepted scan resolution in bits
pub const NUM_BITS_MAX: u8 = 16;

/// Resolution the sensor boots with
pub const NUM_BITS_DEFAULT: u8 = 12;

/// Time the sensor needs to process a command, in microseconds
pub const COMMAND_SETTLE_US: u32 = 15_000;
