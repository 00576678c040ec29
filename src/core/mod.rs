//! Core value types shared by every layer.

pub mod types;

pub use types::{Direction, HitDirection, Mode, PivotDirection, WallHit};
