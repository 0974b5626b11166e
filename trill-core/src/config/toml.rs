//! TOML configuration loading
//!
//! ```toml
//! [sensor]
//! address = 0x38
//! mode = "centroid"
//! scan_speed = "normal"
//! num_bits = 12
//! noise_threshold = 0.06
//! ```
//!
//! Missing keys take their [`SensorConfig::default`] values.

use serde::Deserialize;

use super::types::{ConfigError, SensorConfig};

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    sensor: SensorConfig,
}

impl SensorConfig {
    /// Parse and validate a configuration document
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = ::toml::from_str(input).map_err(|_| ConfigError::Parse)?;
        file.sensor.validate()?;
        Ok(file.sensor)
    }
}
