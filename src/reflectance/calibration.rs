//! Reflectance calibration: per-channel range tracking and the spin sweep.

use serde::{Deserialize, Serialize};

use crate::drivers::{Clock, MotorDriver, ReflectanceSensor};
use crate::error::Result;

/// Upper end of the calibrated output range.
pub const CALIBRATED_MAX: u16 = 1000;

/// Per-channel min/max seen during the calibration sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calibration {
    min: Vec<u16>,
    max: Vec<u16>,
    samples: usize,
}

impl Calibration {
    /// Empty calibration for `channels` sensors.
    pub fn new(channels: usize) -> Self {
        Self {
            min: vec![u16::MAX; channels],
            max: vec![0; channels],
            samples: 0,
        }
    }

    /// Fold one raw reading into the tracked range.
    pub fn observe(&mut self, raw: &[u16]) {
        for ((lo, hi), &value) in self.min.iter_mut().zip(self.max.iter_mut()).zip(raw) {
            *lo = (*lo).min(value);
            *hi = (*hi).max(value);
        }
        self.samples += 1;
    }

    /// Number of readings observed
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// True once every channel has seen a non-empty range.
    pub fn is_complete(&self) -> bool {
        self.samples > 0 && self.min.iter().zip(&self.max).all(|(lo, hi)| hi > lo)
    }

    /// Map a raw reading onto `0..=CALIBRATED_MAX`.
    ///
    /// Channels with an empty range read as 0.
    pub fn apply(&self, raw: &[u16]) -> Vec<u16> {
        raw.iter()
            .zip(self.min.iter().zip(&self.max))
            .map(|(&value, (&lo, &hi))| {
                if hi <= lo {
                    return 0;
                }
                let clamped = value.clamp(lo, hi);
                let scaled =
                    u32::from(clamped - lo) * u32::from(CALIBRATED_MAX) / u32::from(hi - lo);
                scaled as u16
            })
            .collect()
    }
}

/// Calibration sweep timing and speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Wait before the sweep starts (ms).
    /// Default: 1000
    pub settle_ms: u64,

    /// Number of sweep samples.
    /// Default: 80
    pub steps: u32,

    /// Delay after each sample (ms).
    /// Default: 20
    pub step_delay_ms: u64,

    /// Wheel speed while spinning.
    /// Default: 200
    pub speed: i16,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            settle_ms: 1000,
            steps: 80,
            step_delay_ms: 20,
            speed: 200,
        }
    }
}

impl SweepConfig {
    /// Wheel speeds for sweep step `i`.
    ///
    /// Steps in `(10, 30]` and `(50, 70]` spin one way, the rest the other,
    /// so the array passes back and forth over the same surfaces.
    pub fn wheel_speeds(&self, i: u32) -> (i16, i16) {
        if (i > 10 && i <= 30) || (i > 50 && i <= 70) {
            (-self.speed, self.speed)
        } else {
            (self.speed, -self.speed)
        }
    }

    /// Total blocking time of a sweep (ms).
    pub fn duration_ms(&self) -> u64 {
        self.settle_ms + u64::from(self.steps) * self.step_delay_ms
    }
}

/// Spin in place while sampling the array. Blocks for the whole sweep.
pub fn run_sweep<S, M, C>(
    sensors: &mut S,
    motors: &mut M,
    clock: &mut C,
    config: &SweepConfig,
) -> Result<()>
where
    S: ReflectanceSensor + ?Sized,
    M: MotorDriver + ?Sized,
    C: Clock + ?Sized,
{
    clock.delay_ms(config.settle_ms);

    log::info!(
        "Calibrating reflectance array: {} steps over {} ms",
        config.steps,
        config.duration_ms()
    );

    for i in 0..config.steps {
        let (left, right) = config.wheel_speeds(i);
        motors.set_speeds(left, right)?;
        sensors.calibrate_step()?;
        clock.delay_ms(config.step_delay_ms);
    }

    motors.stop()?;

    if sensors.is_calibrated() {
        log::info!("Calibration complete");
    } else {
        log::warn!("Calibration sweep finished without a usable range on every channel");
    }
    Ok(())
}
