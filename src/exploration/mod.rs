//! Corridor exploration.
//!
//! One activation of [`CorridorExplorer`] traverses one corridor segment:
//!
//! ```text
//!            activate(branch)
//!                  │
//!                  ▼
//!            ┌──────────┐
//!            │ Entering │  create branch corridor, drive forward
//!            └────┬─────┘
//!                 ▼
//!            ┌──────────┐  side clip: pivot away, keep driving
//!      ┌────▶│ Driving  │───────────────┐
//!      │     └────┬─────┘               │ head-on hit:
//!      │          │ pause key           │ stop, close corridor
//!      │          ▼                     │
//!      │  ┌────────────────────────┐    │
//!      └──│ PausedAwaitingDecision │    │
//!  (re-   └───────────┬────────────┘    │
//!  activate)          │ 'C': close      │
//!                     │ 'R': add room   │
//!                     ▼                 │
//!               ┌──────────┐            │
//!               │ Exiting  │◀───────────┘
//!               └──────────┘  report {state_finished, next_mode}
//! ```

mod config;
mod controller;
mod state;

pub use config::ExplorerConfig;
pub use controller::CorridorExplorer;
pub use state::{CorridorPhase, Decision, ExitReason, ExplorationStep};
