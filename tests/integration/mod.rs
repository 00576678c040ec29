//! Integration tests for gali-map using the mock devices
//!
//! Drives full missions through [`harness::MissionHarness`] (hand-stepped
//! ticks) and the simulated corridor world.
//!
//! ```bash
//! cargo test --test integration -- --nocapture
//! ```

mod harness;
mod mission;
mod simulation;

pub use harness::MissionHarness;
