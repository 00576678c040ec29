//! Wall collision classification from a reflectance reading.
//!
//! Turns one calibrated reading of the array into a single [`WallHit`].
//! The classifier is stateless: every tick is judged on its own reading, so
//! a robot hovering at a threshold may flip between hit and no-hit.

use serde::{Deserialize, Serialize};

use crate::core::{HitDirection, WallHit};

/// Number of sensors on each edge checked for a side clip.
const EDGE_SENSORS: usize = 2;

/// Intensity thresholds for the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitThresholds {
    /// A sensor above this counts towards a head-on hit.
    /// Default: 100
    pub low: u16,

    /// An edge sensor above this is a side clip.
    /// Default: 900
    pub high: u16,
}

impl Default for HitThresholds {
    fn default() -> Self {
        Self {
            low: 100,
            high: 900,
        }
    }
}

impl HitThresholds {
    /// Create thresholds
    pub fn new(low: u16, high: u16) -> Self {
        Self { low, high }
    }
}

/// Classify one calibrated reading (left to right).
///
/// Checks, first match wins:
/// 1. Head-on: exactly `N - 2` sensors above `low`. Two outer sensors may
///    miss the wall while single-sensor noise is still rejected.
/// 2. Left clip: sensor 0 or 1 above `high`.
/// 3. Right clip: sensor `N - 1` or `N - 2` above `high`.
///
/// Readings with fewer than two channels never report a hit, and a head-on
/// hit needs at least three channels so that it is backed by a sensor.
pub fn classify(readings: &[u16], thresholds: &HitThresholds) -> WallHit {
    let n = readings.len();
    if n < EDGE_SENSORS {
        return WallHit::none();
    }

    let active = readings.iter().filter(|&&r| r > thresholds.low).count();
    if n > EDGE_SENSORS && active == n - EDGE_SENSORS {
        return WallHit::head_on(active);
    }

    let above_high = |r: &u16| *r > thresholds.high;

    if readings[..EDGE_SENSORS].iter().any(above_high) {
        return WallHit::side(HitDirection::Left);
    }

    if readings[n - EDGE_SENSORS..].iter().any(above_high) {
        return WallHit::side(HitDirection::Right);
    }

    WallHit::none()
}
