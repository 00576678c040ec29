//! Per-tick view of the robot's collaborators.

use crate::building::BuildingMap;
use crate::drivers::{Clock, MotorDriver, OperatorInput, ReflectanceSensor};

/// Borrowed handles to everything a control tick may read or command.
///
/// Built by the owner of the hardware (normally
/// [`Mission`](crate::mission::Mission)) and handed to the state machine for
/// the duration of one call. The map has a single writer: whoever holds this.
pub struct TickContext<'a> {
    /// Reflectance array
    pub sensors: &'a mut dyn ReflectanceSensor,
    /// Wheel motors
    pub motors: &'a mut dyn MotorDriver,
    /// Monotonic clock
    pub clock: &'a mut dyn Clock,
    /// Operator keys
    pub input: &'a mut dyn OperatorInput,
    /// Exploration memory
    pub map: &'a mut BuildingMap,
}

impl<'a> TickContext<'a> {
    /// Bundle the collaborators for one tick
    pub fn new(
        sensors: &'a mut dyn ReflectanceSensor,
        motors: &'a mut dyn MotorDriver,
        clock: &'a mut dyn Clock,
        input: &'a mut dyn OperatorInput,
        map: &'a mut BuildingMap,
    ) -> Self {
        Self {
            sensors,
            motors,
            clock,
            input,
            map,
        }
    }
}
