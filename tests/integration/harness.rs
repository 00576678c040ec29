//! Hand-stepped mission over mock devices

use gali_map::config::AppConfig;
use gali_map::devices::mock::{MockClock, MockMotorDriver, MockReflectanceArray, ScriptedInput};
use gali_map::mission::{Mission, MissionStep};

/// Six-channel readings on the calibrated scale
pub const CLEAR: [u16; 6] = [15, 20, 10, 10, 20, 15];
pub const WALL_AHEAD: [u16; 6] = [30, 450, 520, 510, 470, 40];
pub const LEFT_WALL: [u16; 6] = [940, 60, 10, 10, 10, 10];
pub const RIGHT_WALL: [u16; 6] = [10, 10, 10, 10, 60, 940];

/// Control tick used by the harness (ms)
pub const TICK_MS: u64 = 20;

/// Mission plus handles to every mock it owns.
pub struct MissionHarness {
    pub mission: Mission<MockReflectanceArray, MockMotorDriver, MockClock, ScriptedInput>,
    pub sensors: MockReflectanceArray,
    pub motors: MockMotorDriver,
    pub clock: MockClock,
    pub input: ScriptedInput,
}

impl MissionHarness {
    /// Pre-calibrated array, waiting for the operator
    pub fn new() -> Self {
        Self::with_config(&AppConfig::default())
    }

    /// Pre-calibrated array, waiting for the operator
    pub fn with_config(config: &AppConfig) -> Self {
        let sensors = MockReflectanceArray::new(config.reflectance.sensor_count);
        sensors.set_readings(&CLEAR);
        Self::build(config, sensors, true)
    }

    /// Raw array that needs the calibration sweep first
    pub fn uncalibrated(config: &AppConfig) -> Self {
        let sensors =
            MockReflectanceArray::uncalibrated(config.reflectance.sensor_count, 200, 2200);
        Self::build(config, sensors, false)
    }

    fn build(config: &AppConfig, sensors: MockReflectanceArray, skip_calibration: bool) -> Self {
        let motors = MockMotorDriver::new(config.motion.pivot_duration_ms);
        let clock = MockClock::new(0);
        let input = ScriptedInput::new();

        let mission = Mission::new(
            config,
            sensors.clone(),
            motors.clone(),
            clock.clone(),
            input.clone(),
        )
        .expect("mission");
        let mission = if skip_calibration {
            mission.skip_calibration()
        } else {
            mission
        };

        Self {
            mission,
            sensors,
            motors,
            clock,
            input,
        }
    }

    /// One tick, then the clock moves on by one tick period
    pub fn tick(&mut self) -> MissionStep {
        let step = self.mission.tick().expect("tick");
        self.clock.advance(TICK_MS);
        step
    }

    /// Tap `key` for one tick
    pub fn tap(&mut self, key: char) -> MissionStep {
        self.input.press(key);
        let step = self.tick();
        self.input.release(key);
        step
    }

    /// Keep ticking for `ms` of clear corridor
    pub fn drive(&mut self, ms: u64) {
        self.sensors.set_readings(&CLEAR);
        for _ in 0..ms / TICK_MS {
            self.tick();
        }
    }

    /// Show a wall ahead and run the tick that sees it
    pub fn hit_wall(&mut self) -> MissionStep {
        self.sensors.set_readings(&WALL_AHEAD);
        let step = self.tick();
        self.sensors.set_readings(&CLEAR);
        step
    }

    /// Pause, then answer with `decision`
    pub fn pause_and_decide(&mut self, decision: char) -> MissionStep {
        self.tap('s');
        self.tap(decision)
    }
}
