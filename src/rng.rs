// src/rng.rs
//! Random Number Generation for the Diagnostics
//!
//! # Design Philosophy
//!
//! Solver comparisons are only meaningful when every scheme sees the same
//! randomness, and a diagnostic run must be reproducible bit for bit:
//! 1. **Reproducibility**: Same seed produces the same results (critical for
//!    comparing MSE sequences across runs)
//! 2. **Independent streams**: The model parameter draw and the Brownian path
//!    must not share a generator, or changing one perturbs the other
//! 3. **Statistical quality**: Standard normal draws with good distributional
//!    properties
//!
//! # Stream Derivation
//!
//! A single base seed fans out into per-concern streams by offsetting the
//! seed with a stream id. Stream 0 is reserved for model parameters and
//! stream 1 for the Brownian path, so both are fixed by one seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// RNG factory handing out independent seeded streams
pub struct RngFactory {
    base_seed: u64,
}

impl RngFactory {
    pub fn new(base_seed: u64) -> Self {
        Self { base_seed }
    }

    /// Create a standard RNG for a specific stream
    pub fn create_std_rng(&self, stream_id: u64) -> StdRng {
        StdRng::seed_from_u64(self.base_seed.wrapping_add(stream_id))
    }
}

pub fn seed_rng_from_u64(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn get_normal_draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    StandardNormal.sample(rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_reproducibility() {
        let factory = RngFactory::new(42);

        let mut rng1 = factory.create_std_rng(0);
        let mut rng2 = factory.create_std_rng(0);

        for _ in 0..100 {
            assert_eq!(get_normal_draw(&mut rng1), get_normal_draw(&mut rng2));
        }
    }

    #[test]
    fn test_different_streams() {
        let factory = RngFactory::new(42);

        let mut rng1 = factory.create_std_rng(0);
        let mut rng2 = factory.create_std_rng(1);

        let vals1: Vec<f64> = (0..10).map(|_| get_normal_draw(&mut rng1)).collect();
        let vals2: Vec<f64> = (0..10).map(|_| get_normal_draw(&mut rng2)).collect();

        assert_ne!(vals1, vals2);
    }

    #[test]
    fn test_normal_distribution() {
        let factory = RngFactory::new(42);
        let mut rng = factory.create_std_rng(0);

        let samples: Vec<f64> = (0..10000).map(|_| get_normal_draw(&mut rng)).collect();

        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let variance =
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64;

        assert!(mean.abs() < 0.05, "Mean should be close to 0, got {}", mean);
        assert!(
            (variance - 1.0).abs() < 0.08,
            "Variance should be close to 1, got {}",
            variance
        );
    }
}
