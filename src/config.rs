//! Configuration for GaliMap
//!
//! Loads the robot, operator key and simulation settings from a TOML file.
//! Every section falls back to its defaults, so a file only needs the values
//! it changes.

use crate::core::Direction;
use crate::error::{Error, Result};
use crate::exploration::ExplorerConfig;
use crate::reflectance::{CALIBRATED_MAX, HitThresholds, SweepConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub reflectance: ReflectanceConfig,
    pub motion: MotionConfig,
    pub calibration: SweepConfig,
    pub keys: KeyConfig,
    pub logging: LoggingConfig,
    pub simulation: SimulationConfig,
}

/// Reflectance array configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReflectanceConfig {
    /// Channels in the array, left to right
    pub sensor_count: usize,
    /// Classifier thresholds on the calibrated scale
    pub thresholds: HitThresholds,
}

impl Default for ReflectanceConfig {
    fn default() -> Self {
        Self {
            sensor_count: 6,
            thresholds: HitThresholds::default(),
        }
    }
}

/// Drive configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Wheel speed down a corridor (driver units)
    pub run_speed: i16,
    /// Wheel speed for the side-clip pivot
    pub pivot_speed: i16,
    /// Fixed duration of one pivot (ms)
    pub pivot_duration_ms: u64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            run_speed: 100,
            pivot_speed: 30,
            pivot_duration_ms: 150,
        }
    }
}

/// Operator key bindings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyConfig {
    /// Stop the robot and ask for a decision
    pub pause: Vec<char>,
    /// While paused: the corridor ends here
    pub new_corridor: char,
    /// While paused: a room branches off here
    pub new_room: char,
    /// Start a new corridor to the left
    pub branch_left: char,
    /// Start a new corridor to the right
    pub branch_right: char,
    /// Start a new corridor straight ahead
    pub branch_straight: char,
    /// Continue the current corridor
    pub resume: char,
    /// Make the parent corridor current
    pub back: char,
    /// Log the map
    pub print_map: char,
    /// Forget everything but the root corridor
    pub reset_map: char,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            pause: vec![' ', 's'],
            new_corridor: 'C',
            new_room: 'R',
            branch_left: 'l',
            branch_right: 'r',
            branch_straight: 'f',
            resume: 'g',
            back: 'b',
            print_map: 'm',
            reset_map: 'x',
        }
    }
}

impl KeyConfig {
    /// Branch direction bound to `key`, if any
    pub fn branch_for(&self, key: char) -> Option<Direction> {
        if key == self.branch_left {
            Some(Direction::Left)
        } else if key == self.branch_right {
            Some(Direction::Right)
        } else if key == self.branch_straight {
            Some(Direction::Straight)
        } else {
            None
        }
    }

    /// Keys acted on while waiting for the operator
    pub fn operator_keys(&self) -> [char; 7] {
        [
            self.resume,
            self.branch_left,
            self.branch_right,
            self.branch_straight,
            self.back,
            self.print_map,
            self.reset_map,
        ]
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter (trace, debug, info, warn, error); `RUST_LOG` wins
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// One scripted operator key press
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ScriptedKey {
    /// Simulated time of the press (ms)
    pub at_ms: u64,
    /// Key
    pub key: char,
    /// How long the key stays down (ms)
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,
}

fn default_hold_ms() -> u64 {
    60
}

impl ScriptedKey {
    /// Press `key` at `at_ms` for the default hold time
    pub fn new(at_ms: u64, key: char) -> Self {
        Self {
            at_ms,
            key,
            hold_ms: default_hold_ms(),
        }
    }

    /// Whether the key is down at `now_ms`
    pub fn is_down(&self, now_ms: u64) -> bool {
        now_ms >= self.at_ms && now_ms < self.at_ms + self.hold_ms
    }
}

/// Simulated world configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulated time per control tick (ms)
    pub tick_ms: u64,

    /// Stop after this many ticks
    pub max_ticks: u64,

    /// Noise seed; 0 = random each run
    pub seed: u64,

    /// Driving time from a corridor's start to its end wall (ms), by
    /// corridor index; the last entry repeats for later corridors
    pub corridor_lengths_ms: Vec<u64>,

    /// Per-tick lateral drift standard deviation (fraction of half width)
    pub drift_stddev: f32,

    /// Reflectance noise standard deviation (raw counts)
    pub sensor_noise: f32,

    /// Operator key presses
    pub script: Vec<ScriptedKey>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_ms: 20,
            max_ticks: 1000,
            seed: 42,
            corridor_lengths_ms: vec![3000, 2000, 2500],
            drift_stddev: 0.05,
            sensor_noise: 8.0,
            script: vec![
                // Down the root corridor, declare a room, carry on to the wall
                ScriptedKey::new(3000, 'g'),
                ScriptedKey::new(4500, 's'),
                ScriptedKey::new(4600, 'R'),
                ScriptedKey::new(4800, 'g'),
                // Branch left off the root, drive to its end wall
                ScriptedKey::new(7500, 'l'),
                // Back to the root and branch right, ending that one early
                ScriptedKey::new(10500, 'b'),
                ScriptedKey::new(10700, 'r'),
                ScriptedKey::new(11500, ' '),
                ScriptedKey::new(11600, 'C'),
                ScriptedKey::new(12000, 'm'),
            ],
        }
    }
}

impl SimulationConfig {
    /// End wall distance for corridor `index` (ms of driving)
    pub fn corridor_length_ms(&self, index: usize) -> u64 {
        self.corridor_lengths_ms
            .get(index)
            .or_else(|| self.corridor_lengths_ms.last())
            .copied()
            .unwrap_or(u64::MAX)
    }
}

impl AppConfig {
    /// Load configuration from TOML file
    ///
    /// # Arguments
    /// - `path`: Path to TOML configuration file
    ///
    /// # Returns
    /// Parsed and validated configuration or error
    ///
    /// # Example
    /// ```no_run
    /// use gali_map::config::AppConfig;
    ///
    /// let config = AppConfig::from_file("configs/gali-map.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Reject values the robot cannot run with
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(Error::InvalidConfig(msg));

        if self.reflectance.sensor_count <= 2 {
            return invalid(format!(
                "reflectance.sensor_count must be at least 3, got {}",
                self.reflectance.sensor_count
            ));
        }

        let HitThresholds { low, high } = self.reflectance.thresholds;
        if low >= high || high > CALIBRATED_MAX {
            return invalid(format!(
                "reflectance.thresholds need low < high <= {}, got {}/{}",
                CALIBRATED_MAX, low, high
            ));
        }

        if self.motion.run_speed <= 0 || self.motion.pivot_speed <= 0 {
            return invalid("motion speeds must be positive".to_string());
        }

        if self.calibration.steps == 0 {
            return invalid("calibration.steps must be positive".to_string());
        }

        if self.keys.pause.is_empty() {
            return invalid("keys.pause must name at least one key".to_string());
        }
        if self.keys.new_corridor == self.keys.new_room {
            return invalid(format!(
                "keys.new_corridor and keys.new_room are both '{}'",
                self.keys.new_corridor
            ));
        }

        let operator_keys = self.keys.operator_keys();
        for (i, key) in operator_keys.iter().enumerate() {
            if operator_keys[i + 1..].contains(key) {
                return invalid(format!("operator key '{}' is bound twice", key));
            }
        }

        // A held key would pause right after resuming, or answer its own pause
        let decision_keys = [self.keys.new_corridor, self.keys.new_room];
        if let Some(key) = self
            .keys
            .pause
            .iter()
            .find(|&&k| decision_keys.contains(&k) || operator_keys.contains(&k))
        {
            return invalid(format!(
                "pause key '{}' is also a decision or operator key",
                key
            ));
        }

        if self.simulation.tick_ms == 0 {
            return invalid("simulation.tick_ms must be positive".to_string());
        }
        if self.simulation.corridor_lengths_ms.is_empty() {
            return invalid("simulation.corridor_lengths_ms is empty".to_string());
        }

        Ok(())
    }

    /// Runtime configuration for the corridor state machine
    pub fn explorer_config(&self) -> ExplorerConfig {
        ExplorerConfig::new()
            .with_run_speed(self.motion.run_speed)
            .with_pivot_speed(self.motion.pivot_speed)
            .with_thresholds(self.reflectance.thresholds)
            .with_pause_keys(self.keys.pause.clone())
            .with_decision_keys(self.keys.new_corridor, self.keys.new_room)
    }
}
