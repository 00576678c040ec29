//! Corridor world: wall geometry, drift and operator script
//!
//! The world is one-dimensional per corridor. Each corridor has an end wall a
//! fixed driving time from its start; progress only accrues while both wheels
//! drive forward. Lateral position is a random walk in units of half the
//! corridor width, so `|lateral| > 1` means an edge sensor sees a side wall.

use crate::building::CorridorIndex;
use crate::config::SimulationConfig;
use crate::devices::mock::{
    MockClock, MockMotorDriver, MockReflectanceArray, NoiseGenerator, ScriptedInput,
};
use crate::drivers::Clock;

/// Calibrated level of open floor
const FLOOR_LEVEL: u16 = 20;
/// Calibrated level of a wall filling the middle of the array
const WALL_AHEAD_LEVEL: u16 = 600;
/// Calibrated level of a side wall under an edge sensor
const WALL_SIDE_LEVEL: u16 = 960;

/// Raw counts the array sees over dark floor and bright wall while spinning
pub const RAW_DARK: u16 = 200;
pub const RAW_BRIGHT: u16 = 2200;

/// What the array currently sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    /// Open corridor
    Clear,
    /// Drifted onto the left wall
    LeftWall,
    /// Drifted onto the right wall
    RightWall,
    /// End of corridor
    WallAhead,
}

/// Simulated corridors around the robot.
pub struct CorridorWorld {
    config: SimulationConfig,
    sensor_count: usize,
    noise: NoiseGenerator,
    /// Driving time accrued per corridor (ms)
    progress: Vec<u64>,
    lateral: f32,
    sensors: MockReflectanceArray,
    motors: MockMotorDriver,
    clock: MockClock,
    input: ScriptedInput,
}

impl CorridorWorld {
    /// Create a world acting on the given device handles
    pub fn new(
        config: &SimulationConfig,
        sensor_count: usize,
        sensors: MockReflectanceArray,
        motors: MockMotorDriver,
        clock: MockClock,
        input: ScriptedInput,
    ) -> Self {
        Self {
            config: config.clone(),
            sensor_count,
            // Offset so drift and sensor jitter do not share a stream
            noise: NoiseGenerator::new(config.seed.wrapping_mul(31)),
            progress: Vec::new(),
            lateral: 0.0,
            sensors,
            motors,
            clock,
            input,
        }
    }

    /// Publish readings and key state for the tick about to run.
    pub fn sense(&mut self, corridor: CorridorIndex) -> Scene {
        let scene = self.scene(corridor);
        self.sensors.set_readings(&self.raw_levels(scene));

        let now = self.clock.now_millis();
        self.input.release_all();
        for key in self.config.script.iter().filter(|k| k.is_down(now)) {
            self.input.press(key.key);
        }
        scene
    }

    /// Move time and the robot forward after a tick.
    pub fn advance(&mut self, corridor: CorridorIndex) {
        let pivot_ms = self.motors.take_pivot_time_ms();
        if pivot_ms > 0 {
            // Pivot turned the robot back towards the corridor centre
            self.lateral = 0.0;
        }

        let (left, right) = self.motors.speeds();
        if left > 0 && right > 0 {
            let index = corridor.0;
            if self.progress.len() <= index {
                self.progress.resize(index + 1, 0);
            }
            self.progress[index] += self.config.tick_ms;
            self.lateral += self.noise.gaussian(self.config.drift_stddev);
        }

        self.clock.advance(self.config.tick_ms + pivot_ms);
    }

    /// What the array sees in `corridor` right now
    pub fn scene(&self, corridor: CorridorIndex) -> Scene {
        let driven = self.progress.get(corridor.0).copied().unwrap_or(0);
        if driven >= self.config.corridor_length_ms(corridor.0) {
            Scene::WallAhead
        } else if self.lateral > 1.0 {
            Scene::LeftWall
        } else if self.lateral < -1.0 {
            Scene::RightWall
        } else {
            Scene::Clear
        }
    }

    /// Driving time accrued in `corridor` (ms)
    pub fn progress(&self, corridor: CorridorIndex) -> u64 {
        self.progress.get(corridor.0).copied().unwrap_or(0)
    }

    /// Forget all progress, as after a map reset
    pub fn reset(&mut self) {
        self.progress.clear();
        self.lateral = 0.0;
    }

    /// Calibrated levels for `scene`, converted to raw counts
    fn raw_levels(&self, scene: Scene) -> Vec<u16> {
        let n = self.sensor_count;
        let mut levels = vec![FLOOR_LEVEL; n];
        match scene {
            Scene::Clear => {}
            Scene::LeftWall => levels[0] = WALL_SIDE_LEVEL,
            Scene::RightWall => levels[n - 1] = WALL_SIDE_LEVEL,
            Scene::WallAhead => {
                for level in levels.iter_mut().take(n - 1).skip(1) {
                    *level = WALL_AHEAD_LEVEL;
                }
            }
        }
        levels.into_iter().map(to_raw).collect()
    }
}

fn to_raw(level: u16) -> u16 {
    let span = u32::from(RAW_BRIGHT - RAW_DARK);
    RAW_DARK + (u32::from(level) * span / 1000) as u16
}
