//! Reflectance array processing.
//!
//! - [`classifier`]: reading → [`WallHit`](crate::core::WallHit)
//! - [`calibration`]: range tracking and the spin-in-place sweep

pub mod calibration;
pub mod classifier;

pub use calibration::{CALIBRATED_MAX, Calibration, SweepConfig, run_sweep};
pub use classifier::{HitThresholds, classify};
