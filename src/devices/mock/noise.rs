//! Seeded noise source for simulation
//!
//! Reflectance jitter and corridor drift both draw from here, so a fixed seed
//! replays a run exactly.

use rand::prelude::*;
use rand::rngs::SmallRng;
use rand_distr::StandardNormal;

/// Noise generator with configurable seed for reproducibility
#[derive(Clone)]
pub struct NoiseGenerator {
    rng: SmallRng,
}

impl NoiseGenerator {
    /// Create a new noise generator
    ///
    /// A seed of 0 draws from entropy; anything else is deterministic.
    pub fn new(seed: u64) -> Self {
        let rng = if seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(seed)
        };
        Self { rng }
    }

    /// Zero-mean Gaussian sample
    #[inline]
    pub fn gaussian(&mut self, stddev: f32) -> f32 {
        if stddev == 0.0 {
            return 0.0;
        }
        let n: f32 = self.rng.sample(StandardNormal);
        n * stddev
    }

    /// Add Gaussian jitter to a sensor count, saturating at the u16 range
    pub fn jitter(&mut self, value: u16, stddev: f32) -> u16 {
        (f32::from(value) + self.gaussian(stddev)).clamp(0.0, f32::from(u16::MAX)) as u16
    }
}
