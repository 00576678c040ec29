//! Configuration for corridor exploration behavior.

use crate::reflectance::HitThresholds;

/// Configuration for the corridor state machine.
#[derive(Clone, Debug, PartialEq)]
pub struct ExplorerConfig {
    /// Wheel speed while driving down a corridor.
    /// Default: 100
    pub run_speed: i16,

    /// Wheel speed for the side-clip pivot.
    /// Default: 30
    pub pivot_speed: i16,

    /// Classifier thresholds.
    pub thresholds: HitThresholds,

    /// Keys that stop the robot and ask for a decision.
    /// Default: space, 's'
    pub pause_keys: Vec<char>,

    /// Key declaring the end of the current corridor.
    /// Default: 'C'
    pub new_corridor_key: char,

    /// Key declaring a room at the current position.
    /// Default: 'R'
    pub new_room_key: char,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            run_speed: 100,
            pivot_speed: 30,
            thresholds: HitThresholds::default(),
            pause_keys: vec![' ', 's'],
            new_corridor_key: 'C',
            new_room_key: 'R',
        }
    }
}

impl ExplorerConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for run speed.
    pub fn with_run_speed(mut self, speed: i16) -> Self {
        self.run_speed = speed;
        self
    }

    /// Builder-style setter for pivot speed.
    pub fn with_pivot_speed(mut self, speed: i16) -> Self {
        self.pivot_speed = speed;
        self
    }

    /// Builder-style setter for classifier thresholds.
    pub fn with_thresholds(mut self, thresholds: HitThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Builder-style setter for pause keys.
    pub fn with_pause_keys(mut self, keys: Vec<char>) -> Self {
        self.pause_keys = keys;
        self
    }

    /// Builder-style setter for the decision keys.
    pub fn with_decision_keys(mut self, new_corridor: char, new_room: char) -> Self {
        self.new_corridor_key = new_corridor;
        self.new_room_key = new_room;
        self
    }
}
