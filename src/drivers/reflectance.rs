//! Reflectance sensor array trait

use crate::error::Result;

/// Linear array of reflectance sensors, ordered left to right.
pub trait ReflectanceSensor {
    /// Number of channels in the array
    fn sensor_count(&self) -> usize;

    /// Read all channels mapped onto the calibrated `0..=1000` range.
    ///
    /// High values mean a reflective surface (wall) close to the sensor.
    fn read_calibrated(&mut self) -> Result<Vec<u16>>;

    /// Take one calibration sample at the current position.
    ///
    /// Called repeatedly by the calibration sweep while the robot spins.
    fn calibrate_step(&mut self) -> Result<()>;

    /// Whether a calibration sweep has produced usable min/max values
    fn is_calibrated(&self) -> bool;
}
