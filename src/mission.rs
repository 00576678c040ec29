//! Top-level mode dispatcher.
//!
//! [`Mission`] owns the hardware handles and the building map, and advances
//! the robot one control cycle per [`tick`](Mission::tick):
//!
//! ```text
//! Calibrating ──sweep──▶ AwaitingOperator ──resume/branch──▶ Corridor
//!                              ▲                                │
//!                              └────────── state finished ──────┘
//! ```
//!
//! While waiting for the operator, keys act on their press edge: a key held
//! across several ticks acts once.

use crate::building::{BuildingMap, CorridorIndex};
use crate::config::{AppConfig, KeyConfig};
use crate::context::TickContext;
use crate::core::{Direction, Mode};
use crate::drivers::{Clock, MotorDriver, OperatorInput, ReflectanceSensor};
use crate::error::{Error, Result};
use crate::exploration::{CorridorExplorer, ExplorationStep};
use crate::reflectance::{SweepConfig, run_sweep};

/// Operator command taken while waiting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatorAction {
    /// Continue the current corridor
    Resume,
    /// Start a new corridor off the current one
    Branch(Direction),
    /// Parent became current; `None` when already at the root
    Back(Option<CorridorIndex>),
    /// Map written to the log
    PrintMap,
    /// Map cleared back to the root corridor
    ResetMap,
}

/// Result of one mission tick.
#[derive(Clone, Debug, PartialEq)]
pub struct MissionStep {
    /// Mode the tick ran in
    pub mode: Mode,
    /// Mode after the tick
    pub next_mode: Mode,
    /// Operator command acted on this tick
    pub action: Option<OperatorAction>,
    /// State machine output, in corridor mode
    pub exploration: Option<ExplorationStep>,
}

impl MissionStep {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            next_mode: mode,
            action: None,
            exploration: None,
        }
    }
}

/// Robot mission: hardware, map and mode dispatch.
pub struct Mission<S, M, C, I> {
    sensors: S,
    motors: M,
    clock: C,
    input: I,
    map: BuildingMap,
    explorer: CorridorExplorer,
    keys: KeyConfig,
    sweep: SweepConfig,
    mode: Mode,
    /// Operator keys down on the previous tick
    latched: Vec<char>,
    ticks: u64,
}

impl<S, M, C, I> Mission<S, M, C, I>
where
    S: ReflectanceSensor,
    M: MotorDriver,
    C: Clock,
    I: OperatorInput,
{
    /// Create a mission starting in calibration.
    ///
    /// # Errors
    /// `InvalidConfig` for a config that fails validation, and
    /// `SensorCountMismatch` when the array does not have the configured
    /// number of channels.
    pub fn new(config: &AppConfig, sensors: S, motors: M, clock: C, input: I) -> Result<Self> {
        config.validate()?;

        let actual = sensors.sensor_count();
        let expected = config.reflectance.sensor_count;
        if actual != expected {
            return Err(Error::SensorCountMismatch { expected, actual });
        }

        log::info!(
            "Mission ready: {} sensors, run speed {}, thresholds {}/{}",
            actual,
            config.motion.run_speed,
            config.reflectance.thresholds.low,
            config.reflectance.thresholds.high
        );

        Ok(Self {
            sensors,
            motors,
            clock,
            input,
            map: BuildingMap::new(),
            explorer: CorridorExplorer::new(config.explorer_config()),
            keys: config.keys.clone(),
            sweep: config.calibration,
            mode: Mode::Calibrating,
            latched: Vec::new(),
            ticks: 0,
        })
    }

    /// Replace the building map
    pub fn with_map(mut self, map: BuildingMap) -> Self {
        self.map = map;
        self
    }

    /// Start waiting for the operator without sweeping.
    ///
    /// For arrays that are already calibrated.
    pub fn skip_calibration(mut self) -> Self {
        self.mode = Mode::AwaitingOperator;
        self
    }

    /// Run one control cycle.
    ///
    /// # Errors
    /// Hardware failures from any collaborator. The mission should not be
    /// ticked again after an error.
    pub fn tick(&mut self) -> Result<MissionStep> {
        self.ticks += 1;
        let pressed = self.poll_operator_keys();
        let mut step = MissionStep::new(self.mode);

        match self.mode {
            Mode::Calibrating => {
                run_sweep(
                    &mut self.sensors,
                    &mut self.motors,
                    &mut self.clock,
                    &self.sweep,
                )?;
                self.switch_mode(Mode::AwaitingOperator);
            }
            Mode::AwaitingOperator => {
                if let Some(&key) = pressed.first() {
                    step.action = self.apply_operator_key(key);
                }
            }
            Mode::Corridor => {
                let mut ctx = TickContext::new(
                    &mut self.sensors,
                    &mut self.motors,
                    &mut self.clock,
                    &mut self.input,
                    &mut self.map,
                );
                let exploration = self.explorer.update(&mut ctx)?;
                if exploration.state_finished {
                    let next = exploration.next_mode.unwrap_or(Mode::AwaitingOperator);
                    self.switch_mode(next);
                }
                step.exploration = Some(exploration);
            }
        }

        step.next_mode = self.mode;
        Ok(step)
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Building map
    pub fn map(&self) -> &BuildingMap {
        &self.map
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Current clock reading (ms)
    pub fn now_millis(&self) -> u64 {
        self.clock.now_millis()
    }

    /// Operator keys newly pressed since the last tick, in priority order.
    fn poll_operator_keys(&mut self) -> Vec<char> {
        let down: Vec<char> = self
            .keys
            .operator_keys()
            .into_iter()
            .filter(|&k| self.input.is_key_pressed(k))
            .collect();

        let edges = down
            .iter()
            .copied()
            .filter(|k| !self.latched.contains(k))
            .collect();
        self.latched = down;
        edges
    }

    fn apply_operator_key(&mut self, key: char) -> Option<OperatorAction> {
        let action = if key == self.keys.resume {
            OperatorAction::Resume
        } else if let Some(direction) = self.keys.branch_for(key) {
            OperatorAction::Branch(direction)
        } else if key == self.keys.back {
            OperatorAction::Back(self.map.retreat_to_parent())
        } else if key == self.keys.print_map {
            OperatorAction::PrintMap
        } else if key == self.keys.reset_map {
            OperatorAction::ResetMap
        } else {
            return None;
        };

        match action {
            OperatorAction::Resume => {
                log::info!("Resuming corridor {}", self.map.current_index());
                self.explorer.activate(None);
                self.switch_mode(Mode::Corridor);
            }
            OperatorAction::Branch(direction) => {
                self.explorer.activate(Some(direction));
                self.switch_mode(Mode::Corridor);
            }
            OperatorAction::Back(Some(parent)) => {
                log::info!("Back to parent corridor {}", parent);
            }
            OperatorAction::Back(None) => {
                log::info!("Already at the root corridor");
            }
            OperatorAction::PrintMap => {
                log::info!("{}", self.map);
            }
            OperatorAction::ResetMap => {
                log::warn!(
                    "Resetting map ({} corridors, {} rooms discarded)",
                    self.map.corridor_count(),
                    self.map.room_count()
                );
                self.map.reset();
            }
        }
        Some(action)
    }

    fn switch_mode(&mut self, next: Mode) {
        if next != self.mode {
            log::info!("Mode: {} -> {}", self.mode.name(), next.name());
            self.mode = next;
        }
    }
}
