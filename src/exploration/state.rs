//! Corridor state machine phases and per-tick output.

use crate::core::{Mode, PivotDirection, WallHit};

/// Phase of the corridor state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CorridorPhase {
    /// Starting a traversal: branch the map if asked, then drive off
    Entering,

    /// Driving straight, watching the array and the pause keys
    Driving,

    /// Stopped by the operator, waiting for corridor/room decision
    PausedAwaitingDecision,

    /// Finished; idle until the dispatcher re-activates.
    /// Also the phase before the first activation.
    Exiting,
}

impl CorridorPhase {
    /// Phase name for logging
    pub fn name(&self) -> &'static str {
        match self {
            CorridorPhase::Entering => "Entering",
            CorridorPhase::Driving => "Driving",
            CorridorPhase::PausedAwaitingDecision => "PausedAwaitingDecision",
            CorridorPhase::Exiting => "Exiting",
        }
    }
}

/// Operator decision taken while paused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// The corridor ends here
    NewCorridor,
    /// A room branches off here; the corridor continues
    NewRoom,
}

/// Why a traversal ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitReason {
    /// Wall straight ahead
    HeadOnHit,
    /// Operator decision while paused
    Decision(Decision),
}

/// Result of a single state machine tick.
#[derive(Clone, Debug, PartialEq)]
pub struct ExplorationStep {
    /// Phase after this tick
    pub phase: CorridorPhase,

    /// Traversal finished; the dispatcher should switch to `next_mode`
    pub state_finished: bool,

    /// Mode to switch to once finished
    pub next_mode: Option<Mode>,

    /// Why the traversal ended (set once finished)
    pub exit_reason: Option<ExitReason>,

    /// Classifier output, if the array was read this tick
    pub hit: Option<WallHit>,

    /// Pivot issued this tick
    pub pivot: Option<PivotDirection>,
}

impl ExplorationStep {
    /// Step with nothing but the phase and completion report.
    pub(super) fn report(
        phase: CorridorPhase,
        state_finished: bool,
        next_mode: Option<Mode>,
        exit_reason: Option<ExitReason>,
    ) -> Self {
        Self {
            phase,
            state_finished,
            next_mode,
            exit_reason,
            hit: None,
            pivot: None,
        }
    }
}
