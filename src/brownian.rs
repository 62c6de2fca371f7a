// src/brownian.rs
//! Shared Brownian Path
//!
//! # Design Philosophy
//!
//! Comparing solvers is only fair when every scheme is driven by the *same*
//! noise realization. A `BrownianPath` is constructed once per experiment and
//! handed to every integration call; each motion value `W(t)` is sampled
//! lazily on first query and memoized, so later queries at the same time
//! return the identical tensor.
//!
//! # Conditional Sampling
//!
//! - A query beyond the last sampled time extends the path with a fresh
//!   forward increment: `W(t) = W(s) + sqrt(t - s) * Z`.
//! - A query between two sampled times fills in with a Brownian bridge:
//!   ```text
//!   mean = W(s) + (W(u) - W(s)) * (t - s)/(u - s)
//!   var  = (t - s)(u - t)/(u - s)
//!   ```
//!
//! The bridge construction makes step-size refinement consistent: increments
//! taken at a coarse step and the finer increments that subdivide them
//! describe one underlying path, which is what a strong-order measurement
//! across several step sizes requires.
//!
//! Only plain increments are produced. None of the implemented schemes needs
//! Levy-area terms, so no approximation of them is carried here.

use crate::error::{validation::*, SdeError, SdeResult};
use crate::rng;
use ndarray::Array2;
use rand::rngs::StdRng;
use std::collections::BTreeMap;

/// Map a time to a totally ordered integer key (handles negative zero and
/// negative times; NaN is rejected before keys are formed).
fn time_key(t: f64) -> u64 {
    let bits = t.to_bits();
    if bits >> 63 == 0 {
        bits | (1 << 63)
    } else {
        !bits
    }
}

struct Sample {
    t: f64,
    w: Array2<f64>,
}

/// Lazily sampled, memoized Brownian motion of shape (batch, dimension)
pub struct BrownianPath {
    t0: f64,
    shape: (usize, usize),
    samples: BTreeMap<u64, Sample>,
    rng: StdRng,
}

impl BrownianPath {
    /// Path rooted at `t0` with `W(t0) = 0`, driven by the given seed
    pub fn new(t0: f64, shape: (usize, usize), seed: u64) -> SdeResult<Self> {
        Self::with_rng(t0, shape, rng::seed_rng_from_u64(seed))
    }

    /// Path rooted at `t0`, driven by an externally constructed generator
    /// (typically an `RngFactory` stream)
    pub fn with_rng(t0: f64, shape: (usize, usize), rng: StdRng) -> SdeResult<Self> {
        validate_finite("t0", t0)?;
        validate_batch(shape.0)?;
        validate_dimension(shape.1)?;

        let mut samples = BTreeMap::new();
        samples.insert(
            time_key(t0),
            Sample {
                t: t0,
                w: Array2::zeros(shape),
            },
        );

        Ok(Self {
            t0,
            shape,
            samples,
            rng,
        })
    }

    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    pub fn t0(&self) -> f64 {
        self.t0
    }

    /// Motion value `W(t)`, sampling and memoizing on first query
    pub fn value(&mut self, t: f64) -> SdeResult<Array2<f64>> {
        validate_finite("t", t)?;
        // Negative zero would form a distinct key; collapse it onto the origin.
        let t = if t == self.t0 { self.t0 } else { t };
        if t < self.t0 {
            return Err(SdeError::InvalidParameters {
                parameter: "t".to_string(),
                value: t,
                constraint: format!("query precedes the path origin t0 = {}", self.t0),
            });
        }

        let key = time_key(t);
        if let Some(sample) = self.samples.get(&key) {
            return Ok(sample.w.clone());
        }

        // t > t0 here, so a predecessor always exists (the origin at least).
        let (t_prev, w_prev) = self
            .samples
            .range(..key)
            .next_back()
            .map(|(_, s)| (s.t, s.w.clone()))
            .expect("path origin is always sampled");
        let successor = self
            .samples
            .range(key..)
            .next()
            .map(|(_, s)| (s.t, s.w.clone()));

        let z = self.standard_normal();
        let w = match successor {
            None => {
                // Extend past the frontier with an independent increment.
                &w_prev + &(z * (t - t_prev).sqrt())
            }
            Some((t_next, w_next)) => {
                let span = t_next - t_prev;
                let alpha = (t - t_prev) / span;
                let mean = &w_prev + &((&w_next - &w_prev) * alpha);
                let var = (t - t_prev) * (t_next - t) / span;
                mean + z * var.sqrt()
            }
        };

        self.samples.insert(
            key,
            Sample { t, w: w.clone() },
        );
        Ok(w)
    }

    /// Increment `W(tb) - W(ta)`; requires `tb >= ta`
    pub fn increment(&mut self, ta: f64, tb: f64) -> SdeResult<Array2<f64>> {
        if tb < ta {
            return Err(SdeError::InvalidParameters {
                parameter: "tb".to_string(),
                value: tb,
                constraint: format!("increment interval must be ordered, ta = {}", ta),
            });
        }
        let wa = self.value(ta)?;
        let wb = self.value(tb)?;
        Ok(wb - wa)
    }

    fn standard_normal(&mut self) -> Array2<f64> {
        let rng = &mut self.rng;
        Array2::from_shape_fn(self.shape, |_| rng::get_normal_draw(&mut *rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_is_zero() {
        let mut bm = BrownianPath::new(0.0, (2, 3), 7).unwrap();
        let w0 = bm.value(0.0).unwrap();
        assert!(w0.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_memoization() {
        let mut bm = BrownianPath::new(0.0, (4, 2), 11).unwrap();
        let first = bm.value(1.5).unwrap();
        let second = bm.value(1.5).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_bridge_between_known_points() {
        let mut bm = BrownianPath::new(0.0, (1, 1), 3).unwrap();
        let w2 = bm.value(2.0).unwrap();
        let w1 = bm.value(1.0).unwrap();
        // The interior point is a fresh sample but the endpoints are fixed.
        assert_eq!(bm.value(2.0).unwrap(), w2);
        assert_eq!(bm.value(1.0).unwrap(), w1);
    }

    #[test]
    fn test_rejects_query_before_origin() {
        let mut bm = BrownianPath::new(1.0, (1, 1), 3).unwrap();
        assert!(bm.value(0.5).is_err());
    }

    #[test]
    fn test_rejects_unordered_increment() {
        let mut bm = BrownianPath::new(0.0, (1, 1), 3).unwrap();
        assert!(bm.increment(1.0, 0.5).is_err());
    }

    #[test]
    fn test_rejects_empty_shape() {
        assert!(BrownianPath::new(0.0, (0, 1), 3).is_err());
        assert!(BrownianPath::new(0.0, (1, 0), 3).is_err());
    }
}
