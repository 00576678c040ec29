//! Mock motor driver for testing

use crate::core::PivotDirection;
use crate::drivers::MotorDriver;
use crate::error::{Error, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Command received by the mock driver, in arrival order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotorCommand {
    /// `set_speeds(left, right)`
    SetSpeeds { left: i16, right: i16 },
    /// `timed_pivot(direction, speed, blocking)`
    Pivot {
        direction: PivotDirection,
        speed: i16,
        blocking: bool,
    },
}

/// Mock motor driver
///
/// Clones share state, so a test can keep a handle while the mission owns
/// the driver.
#[derive(Clone)]
pub struct MockMotorDriver {
    state: Arc<Mutex<MockMotorState>>,
}

#[derive(Debug, Clone, Default)]
struct MockMotorState {
    left: i16,
    right: i16,
    commands: Vec<MotorCommand>,
    pivot_duration_ms: u64,
    pivot_count: usize,
    /// Pivot time not yet collected by the simulator
    pending_pivot_ms: u64,
    failure: Option<String>,
}

impl MockMotorDriver {
    /// Create new mock motor driver with the given fixed pivot duration
    pub fn new(pivot_duration_ms: u64) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockMotorState {
                pivot_duration_ms,
                ..Default::default()
            })),
        }
    }

    /// Get current wheel speeds
    pub fn speeds(&self) -> (i16, i16) {
        let state = self.state.lock();
        (state.left, state.right)
    }

    /// Whether both wheels are commanded to zero
    pub fn is_stopped(&self) -> bool {
        self.speeds() == (0, 0)
    }

    /// Every command received so far
    pub fn commands(&self) -> Vec<MotorCommand> {
        self.state.lock().commands.clone()
    }

    /// Number of pivots executed
    pub fn pivot_count(&self) -> usize {
        self.state.lock().pivot_count
    }

    /// Collect pivot time accumulated since the last call (ms)
    pub fn take_pivot_time_ms(&self) -> u64 {
        std::mem::take(&mut self.state.lock().pending_pivot_ms)
    }

    /// Make every following command fail with a hardware error
    pub fn fail_with(&self, message: &str) {
        self.state.lock().failure = Some(message.to_string());
    }

    /// Clear an injected failure
    pub fn recover(&self) {
        self.state.lock().failure = None;
    }
}

impl Default for MockMotorDriver {
    fn default() -> Self {
        Self::new(150)
    }
}

impl MockMotorState {
    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(message) => Err(Error::Hardware(message.clone())),
            None => Ok(()),
        }
    }
}

impl MotorDriver for MockMotorDriver {
    fn set_speeds(&mut self, left: i16, right: i16) -> Result<()> {
        let mut state = self.state.lock();
        state.check()?;
        state.left = left;
        state.right = right;
        state.commands.push(MotorCommand::SetSpeeds { left, right });
        Ok(())
    }

    fn timed_pivot(&mut self, direction: PivotDirection, speed: i16, blocking: bool) -> Result<()> {
        let mut state = self.state.lock();
        state.check()?;
        state.commands.push(MotorCommand::Pivot {
            direction,
            speed,
            blocking,
        });
        state.pivot_count += 1;
        state.pending_pivot_ms += state.pivot_duration_ms;

        if blocking {
            state.left = 0;
            state.right = 0;
        } else {
            let (left, right) = direction.wheel_speeds(speed);
            state.left = left;
            state.right = right;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_commands() {
        let mut motors = MockMotorDriver::new(150);
        motors.set_speeds(100, 100).unwrap();
        motors.stop().unwrap();

        assert_eq!(
            motors.commands(),
            vec![
                MotorCommand::SetSpeeds {
                    left: 100,
                    right: 100
                },
                MotorCommand::SetSpeeds { left: 0, right: 0 },
            ]
        );
        assert!(motors.is_stopped());
    }

    #[test]
    fn test_blocking_pivot_ends_stopped() {
        let mut motors = MockMotorDriver::new(150);
        motors.set_speeds(100, 100).unwrap();
        motors
            .timed_pivot(PivotDirection::Clockwise, 30, true)
            .unwrap();

        assert!(motors.is_stopped());
        assert_eq!(motors.pivot_count(), 1);
        assert_eq!(motors.take_pivot_time_ms(), 150);
        assert_eq!(motors.take_pivot_time_ms(), 0);
    }

    #[test]
    fn test_clones_share_state() {
        let handle = MockMotorDriver::new(150);
        let mut driver = handle.clone();
        driver.set_speeds(-50, 50).unwrap();
        assert_eq!(handle.speeds(), (-50, 50));
    }

    #[test]
    fn test_injected_failure() {
        let mut motors = MockMotorDriver::new(150);
        motors.fail_with("bus timeout");
        assert!(matches!(
            motors.set_speeds(1, 1),
            Err(Error::Hardware(ref m)) if m == "bus timeout"
        ));
        motors.recover();
        assert!(motors.set_speeds(1, 1).is_ok());
    }
}
