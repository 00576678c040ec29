//! Corridor exploration state machine.
//!
//! Drives the robot down one corridor per activation, steering off clipped
//! walls, stopping at a head-on wall, and letting the operator pause to
//! close the corridor or declare a room. The building map is updated as a
//! side effect, on a best-effort basis: a full map never blocks navigation.

use crate::building::{BuildingMap, MapError};
use crate::context::TickContext;
use crate::core::{Direction, Mode, PivotDirection};
use crate::error::Result;
use crate::reflectance::classify;

use super::config::ExplorerConfig;
use super::state::{CorridorPhase, Decision, ExitReason, ExplorationStep};

/// Corridor exploration state machine.
///
/// `Entering → Driving ⇄ PausedAwaitingDecision → Exiting`
///
/// # Usage
///
/// ```rust,ignore
/// let mut explorer = CorridorExplorer::new(ExplorerConfig::default());
/// explorer.activate(Some(Direction::Left));
///
/// loop {
///     let mut ctx = TickContext::new(&mut sensors, &mut motors, &mut clock, &mut input, &mut map);
///     let step = explorer.update(&mut ctx)?;
///     if step.state_finished {
///         break;
///     }
/// }
/// ```
pub struct CorridorExplorer {
    /// Configuration.
    config: ExplorerConfig,

    /// Current phase.
    phase: CorridorPhase,

    /// Branch to create on the next Entering tick.
    pending_branch: Option<Direction>,

    /// Traversal finished, waiting for the dispatcher.
    state_finished: bool,

    /// Stopped by the operator.
    waiting_for_decision: bool,

    /// Clock reading when the current driving segment began (ms).
    start_time: u64,

    /// Clock reading when the current driving segment ended (ms).
    finish_time: u64,

    /// Mode to hand back to the dispatcher.
    next_mode: Option<Mode>,

    /// Why the last traversal ended.
    exit_reason: Option<ExitReason>,
}

impl CorridorExplorer {
    /// Create an inactive state machine.
    pub fn new(config: ExplorerConfig) -> Self {
        Self {
            config,
            phase: CorridorPhase::Exiting,
            pending_branch: None,
            state_finished: false,
            waiting_for_decision: false,
            start_time: 0,
            finish_time: 0,
            next_mode: None,
            exit_reason: None,
        }
    }

    /// Start a traversal on the next tick.
    ///
    /// With `branch` set a new corridor is created off the current one in
    /// that direction; otherwise the current corridor is resumed.
    pub fn activate(&mut self, branch: Option<Direction>) {
        self.phase = CorridorPhase::Entering;
        self.pending_branch = branch;
        self.state_finished = false;
        self.waiting_for_decision = false;
        self.next_mode = None;
        self.exit_reason = None;
    }

    /// Run one control tick.
    ///
    /// # Errors
    /// Only hardware failures. Map capacity problems are logged and skipped.
    pub fn update(&mut self, ctx: &mut TickContext<'_>) -> Result<ExplorationStep> {
        match self.phase {
            CorridorPhase::Entering => self.enter(ctx),
            CorridorPhase::Driving => self.drive(ctx),
            CorridorPhase::PausedAwaitingDecision => self.await_decision(ctx),
            CorridorPhase::Exiting => Ok(self.report()),
        }
    }

    /// Current phase
    pub fn phase(&self) -> CorridorPhase {
        self.phase
    }

    /// Whether the last traversal has finished
    pub fn is_finished(&self) -> bool {
        self.state_finished
    }

    /// Whether the operator has paused the robot
    pub fn is_waiting_for_decision(&self) -> bool {
        self.waiting_for_decision
    }

    /// Mode requested for after the traversal
    pub fn next_mode(&self) -> Option<Mode> {
        self.next_mode
    }

    /// Duration of the last closed driving segment (ms)
    pub fn segment_ms(&self) -> f32 {
        self.finish_time.saturating_sub(self.start_time) as f32
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    fn report(&self) -> ExplorationStep {
        ExplorationStep::report(
            self.phase,
            self.state_finished,
            self.next_mode,
            self.exit_reason,
        )
    }

    fn enter(&mut self, ctx: &mut TickContext<'_>) -> Result<ExplorationStep> {
        if let Some(direction) = self.pending_branch.take() {
            let parent = ctx.map.current_index();
            match ctx.map.create_corridor(parent, direction) {
                Ok(index) => {
                    log::info!("Entering new corridor {} ({} of {})", index, direction, parent)
                }
                Err(e) => log_map_error("create corridor", &e),
            }
        }

        self.state_finished = false;
        self.waiting_for_decision = false;

        ctx.motors.set_speeds(self.config.run_speed, self.config.run_speed)?;
        self.start_time = ctx.clock.now_millis();

        log::debug!(
            "Driving corridor {} at speed {} from t={} ms",
            ctx.map.current_index(),
            self.config.run_speed,
            self.start_time
        );

        self.phase = CorridorPhase::Driving;
        Ok(self.report())
    }

    fn drive(&mut self, ctx: &mut TickContext<'_>) -> Result<ExplorationStep> {
        let reading = ctx.sensors.read_calibrated()?;
        let hit = classify(&reading, &self.config.thresholds);
        let mut pivot = None;

        if hit.is_head_on() {
            ctx.motors.stop()?;
            self.finish_time = ctx.clock.now_millis();
            log::info!("Wall hit head-on ({} sensors)", hit.sensors_hit);
            self.close_corridor(ctx.map);
            self.finish(ExitReason::HeadOnHit);

            let mut step = self.report();
            step.hit = Some(hit);
            return Ok(step);
        }

        if hit.is_side_clip() {
            if let Some(direction) = PivotDirection::away_from(hit.direction) {
                log::debug!("Wall clipped on {:?}, pivoting {:?}", hit.direction, direction);
                ctx.motors
                    .timed_pivot(direction, self.config.pivot_speed, true)?;
                ctx.motors
                    .set_speeds(self.config.run_speed, self.config.run_speed)?;
                pivot = Some(direction);
            }
        }

        if ctx.input.any_pressed(&self.config.pause_keys) {
            ctx.motors.stop()?;
            self.finish_time = ctx.clock.now_millis();
            self.waiting_for_decision = true;
            self.phase = CorridorPhase::PausedAwaitingDecision;
            log::info!(
                "Corridor behaviour paused after {:.2}s: new [{}]orridor or new [{}]oom?",
                self.segment_ms() / 1000.0,
                self.config.new_corridor_key,
                self.config.new_room_key
            );
        }

        let mut step = self.report();
        step.hit = Some(hit);
        step.pivot = pivot;
        Ok(step)
    }

    fn await_decision(&mut self, ctx: &mut TickContext<'_>) -> Result<ExplorationStep> {
        if ctx.input.is_key_pressed(self.config.new_corridor_key) {
            self.close_corridor(ctx.map);
            self.finish(ExitReason::Decision(Decision::NewCorridor));
        } else if ctx.input.is_key_pressed(self.config.new_room_key) {
            let elapsed = self.segment_ms();
            let corridor = ctx.map.current_index();
            match ctx.map.add_room(corridor, elapsed, Direction::Invalid) {
                Ok(room) => log::info!(
                    "Room {} declared on {} after {:.2}s",
                    room.slot,
                    corridor,
                    elapsed / 1000.0
                ),
                Err(e) => log_map_error("add room", &e),
            }
            self.finish(ExitReason::Decision(Decision::NewRoom));
        }

        Ok(self.report())
    }

    /// Close the last segment; the map folds in earlier segments and rooms.
    fn close_corridor(&self, map: &mut BuildingMap) {
        let index = map.current_index();

        match map.close_corridor(index, self.segment_ms()) {
            Ok(length) => log::info!(
                "Approximate corridor time: {:.2}s for corridor {}",
                length / 1000.0,
                index
            ),
            Err(e) => log_map_error("close corridor", &e),
        }
    }

    fn finish(&mut self, reason: ExitReason) {
        self.state_finished = true;
        self.waiting_for_decision = false;
        self.next_mode = Some(Mode::AwaitingOperator);
        self.exit_reason = Some(reason);
        self.phase = CorridorPhase::Exiting;
    }
}

fn log_map_error(action: &str, error: &MapError) {
    log::warn!("Map: could not {} [{}]: {}", action, error.code(), error);
}
