//! Shared value types: directions, hit reports and top-level modes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Turn taken to enter a corridor from its parent, or to reach a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Not determined
    #[default]
    Invalid,
    /// Turned left
    Left,
    /// Turned right
    Right,
    /// Continued straight ahead
    Straight,
}

impl Direction {
    /// Short label for map dumps.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Invalid => "?",
            Direction::Left => "L",
            Direction::Right => "R",
            Direction::Straight => "S",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side of the array that saw the wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitDirection {
    /// Leftmost sensors
    Left,
    /// Straight ahead (most of the array)
    #[default]
    Ahead,
    /// Rightmost sensors
    Right,
}

impl HitDirection {
    /// Signed form: -1 left, 0 ahead, +1 right.
    pub fn sign(&self) -> i8 {
        match self {
            HitDirection::Left => -1,
            HitDirection::Ahead => 0,
            HitDirection::Right => 1,
        }
    }
}

/// Rotation sense for an in-place pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotDirection {
    /// Turn right (left wheel forward, right wheel back)
    Clockwise,
    /// Turn left
    CounterClockwise,
}

impl PivotDirection {
    /// Pivot that steers away from a clipped wall.
    ///
    /// Returns `None` for a head-on hit, which is handled by stopping.
    pub fn away_from(hit: HitDirection) -> Option<Self> {
        match hit {
            HitDirection::Left => Some(PivotDirection::Clockwise),
            HitDirection::Right => Some(PivotDirection::CounterClockwise),
            HitDirection::Ahead => None,
        }
    }

    /// Signed form: +1 clockwise, -1 counter-clockwise.
    pub fn sign(&self) -> i8 {
        match self {
            PivotDirection::Clockwise => 1,
            PivotDirection::CounterClockwise => -1,
        }
    }

    /// Wheel speeds producing this pivot at `speed`.
    pub fn wheel_speeds(&self, speed: i16) -> (i16, i16) {
        match self {
            PivotDirection::Clockwise => (speed, -speed),
            PivotDirection::CounterClockwise => (-speed, speed),
        }
    }
}

/// Output of the collision classifier for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WallHit {
    /// A wall was detected
    pub hit: bool,
    /// Where the wall was seen
    pub direction: HitDirection,
    /// Number of sensors that contributed (1 for a side clip)
    pub sensors_hit: usize,
}

impl WallHit {
    /// No wall in view.
    pub const fn none() -> Self {
        Self {
            hit: false,
            direction: HitDirection::Ahead,
            sensors_hit: 0,
        }
    }

    /// Head-on collision seen by `sensors_hit` sensors.
    pub const fn head_on(sensors_hit: usize) -> Self {
        Self {
            hit: true,
            direction: HitDirection::Ahead,
            sensors_hit,
        }
    }

    /// Single-side clip.
    pub const fn side(direction: HitDirection) -> Self {
        Self {
            hit: true,
            direction,
            sensors_hit: 1,
        }
    }

    /// Robot ran into a wall straight ahead.
    pub fn is_head_on(&self) -> bool {
        self.hit && self.sensors_hit > 1 && self.direction == HitDirection::Ahead
    }

    /// Robot grazed a wall with one edge of the array.
    pub fn is_side_clip(&self) -> bool {
        self.hit && self.sensors_hit == 1
    }
}

/// Top-level robot mode selected by the mission dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Running the reflectance calibration sweep
    #[default]
    Calibrating,
    /// Stopped, waiting for an operator command
    AwaitingOperator,
    /// Corridor exploration state machine active
    Corridor,
}

impl Mode {
    /// Mode name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Calibrating => "Calibrating",
            Mode::AwaitingOperator => "AwaitingOperator",
            Mode::Corridor => "Corridor",
        }
    }
}
