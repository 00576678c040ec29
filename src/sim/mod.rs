//! Hardware-free mission simulation
//!
//! Wires a [`Mission`] to the mock devices and a [`CorridorWorld`], then
//! steps both in lock-step:
//!
//! ```text
//! every tick:
//! 1. world.sense      readings for the current corridor, scripted keys
//! 2. mission.tick     one control cycle
//! 3. world.advance    clock += tick + pivot time, progress, drift
//! ```

mod world;

pub use world::{CorridorWorld, RAW_BRIGHT, RAW_DARK, Scene};

use crate::building::BuildingMap;
use crate::config::AppConfig;
use crate::devices::mock::{MockClock, MockMotorDriver, MockReflectanceArray, ScriptedInput};
use crate::error::Result;
use crate::mission::{Mission, MissionStep, OperatorAction};

/// Mission over mock devices
pub type SimMission = Mission<MockReflectanceArray, MockMotorDriver, MockClock, ScriptedInput>;

/// Totals for a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimSummary {
    /// Ticks executed
    pub ticks: u64,
    /// Simulated time at the end (ms)
    pub sim_time_ms: u64,
    /// Side-clip pivots
    pub pivots: usize,
    /// Corridors in the final map
    pub corridors: usize,
    /// Rooms in the final map
    pub rooms: usize,
    /// Sum of closed corridor lengths (ms)
    pub total_length_ms: f32,
}

/// Simulated robot in a corridor world.
pub struct Simulation {
    mission: SimMission,
    world: CorridorWorld,
    motors: MockMotorDriver,
    max_ticks: u64,
}

impl Simulation {
    /// Build the mock devices, mission and world from `config`
    pub fn new(config: &AppConfig) -> Result<Self> {
        let sim = &config.simulation;
        let count = config.reflectance.sensor_count;

        let sensors = MockReflectanceArray::uncalibrated(count, RAW_DARK, RAW_BRIGHT)
            .with_noise(sim.sensor_noise, sim.seed);
        let motors = MockMotorDriver::new(config.motion.pivot_duration_ms);
        let clock = MockClock::new(0);
        let input = ScriptedInput::new();

        let world = CorridorWorld::new(
            sim,
            count,
            sensors.clone(),
            motors.clone(),
            clock.clone(),
            input.clone(),
        );
        let mission = Mission::new(config, sensors, motors.clone(), clock, input)?;

        log::info!(
            "Simulation: {} ms ticks, seed {}, {} scripted key(s)",
            sim.tick_ms,
            sim.seed,
            sim.script.len()
        );

        Ok(Self {
            mission,
            world,
            motors,
            max_ticks: sim.max_ticks,
        })
    }

    /// Override the tick limit
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// Run one world/mission cycle
    pub fn step(&mut self) -> Result<MissionStep> {
        self.world.sense(self.mission.map().current_index());
        let step = self.mission.tick()?;

        if step.action == Some(OperatorAction::ResetMap) {
            self.world.reset();
        }

        self.world.advance(self.mission.map().current_index());
        Ok(step)
    }

    /// Run until the tick limit
    pub fn run(&mut self) -> Result<SimSummary> {
        while self.mission.ticks() < self.max_ticks {
            self.step()?;
        }
        Ok(self.summary())
    }

    /// Totals so far
    pub fn summary(&self) -> SimSummary {
        let map = self.mission.map();
        SimSummary {
            ticks: self.mission.ticks(),
            sim_time_ms: self.mission.now_millis(),
            pivots: self.motors.pivot_count(),
            corridors: map.corridor_count(),
            rooms: map.room_count(),
            total_length_ms: map.total_length(),
        }
    }

    /// The mission under simulation
    pub fn mission(&self) -> &SimMission {
        &self.mission
    }

    /// Final map
    pub fn map(&self) -> &BuildingMap {
        self.mission.map()
    }

    /// The simulated world
    pub fn world(&self) -> &CorridorWorld {
        &self.world
    }
}
