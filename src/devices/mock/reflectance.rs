//! Mock reflectance array

use super::noise::NoiseGenerator;
use crate::drivers::ReflectanceSensor;
use crate::error::{Error, Result};
use crate::reflectance::{CALIBRATED_MAX, Calibration};
use parking_lot::Mutex;
use std::sync::Arc;

/// Mock reflectance array.
///
/// Two flavours:
/// - [`new`](Self::new): readings are already on the calibrated scale and
///   pass straight through (clamped to 1000). Handy for unit tests.
/// - [`uncalibrated`](Self::uncalibrated): readings are raw counts; the
///   calibration sweep must run first, and each sweep step alternates between
///   the `dark` and `bright` profiles as the array would while spinning.
#[derive(Clone)]
pub struct MockReflectanceArray {
    state: Arc<Mutex<ArrayState>>,
}

struct ArrayState {
    raw: Vec<u16>,
    calibration: Calibration,
    /// `(dark, bright)` raw level seen while spinning; `None` = passthrough
    sweep_profile: Option<(u16, u16)>,
    noise: Option<(NoiseGenerator, f32)>,
    reads: usize,
}

impl MockReflectanceArray {
    /// Pre-calibrated array with `count` channels, all reading 0
    pub fn new(count: usize) -> Self {
        Self::build(count, None)
    }

    /// Raw array whose sweep sees `dark` and `bright` levels
    pub fn uncalibrated(count: usize, dark: u16, bright: u16) -> Self {
        Self::build(count, Some((dark, bright)))
    }

    fn build(count: usize, sweep_profile: Option<(u16, u16)>) -> Self {
        let idle = sweep_profile.map_or(0, |(dark, _)| dark);
        Self {
            state: Arc::new(Mutex::new(ArrayState {
                raw: vec![idle; count],
                calibration: Calibration::new(count),
                sweep_profile,
                noise: None,
                reads: 0,
            })),
        }
    }

    /// Add Gaussian jitter to every read
    pub fn with_noise(self, stddev: f32, seed: u64) -> Self {
        self.state.lock().noise = Some((NoiseGenerator::new(seed), stddev));
        self
    }

    /// Set the next readings (same units as the array flavour)
    pub fn set_readings(&self, readings: &[u16]) {
        let mut state = self.state.lock();
        for (slot, &value) in state.raw.iter_mut().zip(readings) {
            *slot = value;
        }
    }

    /// Current readings, before calibration and noise
    pub fn readings(&self) -> Vec<u16> {
        self.state.lock().raw.clone()
    }

    /// Number of calibrated reads served
    pub fn read_count(&self) -> usize {
        self.state.lock().reads
    }

    /// Number of calibration samples taken
    pub fn calibration_samples(&self) -> usize {
        self.state.lock().calibration.samples()
    }
}

impl ReflectanceSensor for MockReflectanceArray {
    fn sensor_count(&self) -> usize {
        self.state.lock().raw.len()
    }

    fn read_calibrated(&mut self) -> Result<Vec<u16>> {
        let mut state = self.state.lock();
        let state = &mut *state;

        let mut raw = state.raw.clone();
        if let Some((noise, stddev)) = state.noise.as_mut() {
            for value in raw.iter_mut() {
                *value = noise.jitter(*value, *stddev);
            }
        }

        let reading: Vec<u16> = match state.sweep_profile {
            None => raw.iter().map(|&v| v.min(CALIBRATED_MAX)).collect(),
            Some(_) if !state.calibration.is_complete() => return Err(Error::NotCalibrated),
            Some(_) => state.calibration.apply(&raw),
        };
        state.reads += 1;
        Ok(reading)
    }

    fn calibrate_step(&mut self) -> Result<()> {
        let mut state = self.state.lock();
        let sample = match state.sweep_profile {
            Some((dark, bright)) => {
                let level = if state.calibration.samples() % 2 == 0 {
                    dark
                } else {
                    bright
                };
                vec![level; state.raw.len()]
            }
            None => state.raw.clone(),
        };
        state.calibration.observe(&sample);
        Ok(())
    }

    fn is_calibrated(&self) -> bool {
        let state = self.state.lock();
        state.sweep_profile.is_none() || state.calibration.is_complete()
    }
}
