//! Motor driver trait

use crate::core::PivotDirection;
use crate::error::Result;

/// Differential-drive motor controller.
pub trait MotorDriver {
    /// Set individual wheel speeds
    ///
    /// # Arguments
    /// * `left` - Left wheel speed in driver units (positive = forward)
    /// * `right` - Right wheel speed in driver units
    fn set_speeds(&mut self, left: i16, right: i16) -> Result<()>;

    /// Pivot in place for the driver's fixed pivot duration.
    ///
    /// With `blocking` set the call returns only after the pivot has run to
    /// completion and the wheels are stopped.
    fn timed_pivot(&mut self, direction: PivotDirection, speed: i16, blocking: bool) -> Result<()>;

    /// Stop both wheels
    fn stop(&mut self) -> Result<()> {
        self.set_speeds(0, 0)
    }
}
