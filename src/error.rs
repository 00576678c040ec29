//! Error types for GaliMap

use crate::building::MapError;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// GaliMap error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be written
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Configuration value out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Motor, sensor or input hardware failure
    #[error("Hardware error: {0}")]
    Hardware(String),

    /// Reflectance array read before the calibration sweep
    #[error("Reflectance array not calibrated")]
    NotCalibrated,

    /// Sensor returned a reading with the wrong channel count
    #[error("Sensor count mismatch: expected {expected}, got {actual}")]
    SensorCountMismatch {
        /// Configured sensor count
        expected: usize,
        /// Channels in the reading
        actual: usize,
    },

    /// Building map bookkeeping error
    #[error("Map error: {0}")]
    Map(#[from] MapError),
}
