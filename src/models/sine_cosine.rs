// src/models/sine_cosine.rs
//! Diagonal-noise benchmark problem with a closed-form solution
//!
//! Per component, with parameter `p` in (0, 1):
//! ```text
//! dY_t = -p^2 sin(Y_t) cos^3(Y_t) dt + p cos^2(Y_t) dW_t      (Ito)
//! ```
//! whose pathwise solution is
//! ```text
//! Y_t = atan(p W_t + tan(Y_0))
//! ```
//! In the Stratonovich sense the drift picks up the correction
//! `+ p^2 sin(Y) cos^3(Y)`, which cancels it exactly. Having both readings
//! of one SDE makes the problem a fair benchmark for explicit Ito schemes
//! and corrected Stratonovich schemes at the same time.

use super::model::{DiagonalSde, SdeSense};
use crate::brownian::BrownianPath;
use crate::error::{validation::*, SdeError, SdeResult};
use crate::rng;
use ndarray::{Array1, Array2};
use rand::Rng;

pub struct SineCosine {
    p: Array1<f64>,
    sense: SdeSense,
}

impl SineCosine {
    /// Fresh instance with `p_i = sigmoid(z_i)`, `z_i ~ N(0, 1)`
    pub fn new<R: Rng + ?Sized>(dimension: usize, sense: SdeSense, rng: &mut R) -> SdeResult<Self> {
        validate_dimension(dimension)?;
        let p = Array1::from_shape_fn(dimension, |_| {
            let z = rng::get_normal_draw(&mut *rng);
            1.0 / (1.0 + (-z).exp())
        });
        Ok(Self { p, sense })
    }

    /// Instance over an explicit parameter vector
    pub fn with_parameter(p: Array1<f64>, sense: SdeSense) -> SdeResult<Self> {
        validate_dimension(p.len())?;
        for &value in p.iter() {
            validate_finite("p", value)?;
            validate_positive("p", value)?;
        }
        Ok(Self { p, sense })
    }

    /// Same parameter vector read in the other calculus sense
    pub fn reinterpret(&self, sense: SdeSense) -> Self {
        Self {
            p: self.p.clone(),
            sense,
        }
    }

    pub fn parameter(&self) -> &Array1<f64> {
        &self.p
    }

    fn ito_drift(&self, y: &Array2<f64>) -> Array2<f64> {
        let sin_y = y.mapv(f64::sin);
        let cos_y = y.mapv(f64::cos);
        let cos3_y = &cos_y * &cos_y * &cos_y;
        let p2 = self.p.mapv(|p| p * p);
        (&sin_y * &cos3_y * &p2).mapv(|v| -v)
    }

    fn sense_correction(&self, y: &Array2<f64>) -> Array2<f64> {
        let sin_y = y.mapv(f64::sin);
        let cos_y = y.mapv(f64::cos);
        let cos3_y = &cos_y * &cos_y * &cos_y;
        let p2 = self.p.mapv(|p| p * p);
        &sin_y * &cos3_y * &p2
    }

    /// Closed-form solution evaluated on the shared path at each grid point
    pub fn analytical_sample(
        &self,
        y0: &Array2<f64>,
        ts: &[f64],
        bm: &mut BrownianPath,
    ) -> SdeResult<Vec<Array2<f64>>> {
        validate_time_grid_or_point(ts)?;
        if y0.dim() != bm.shape() {
            return Err(SdeError::InvalidConfiguration {
                field: "y0".to_string(),
                reason: format!(
                    "state shape {:?} does not match path shape {:?}",
                    y0.dim(),
                    bm.shape()
                ),
            });
        }

        let tan_y0 = y0.mapv(f64::tan);
        let mut out = Vec::with_capacity(ts.len());
        for &t in ts {
            let w = bm.value(t)?;
            out.push((&(&w * &self.p) + &tan_y0).mapv(f64::atan));
        }
        Ok(out)
    }
}

// The sample-path routine evaluates the solution on a dense grid, the
// strong-order routine only at single endpoints.
fn validate_time_grid_or_point(ts: &[f64]) -> SdeResult<()> {
    if ts.len() == 1 {
        validate_finite("ts", ts[0])
    } else {
        validate_time_grid(ts)
    }
}

impl DiagonalSde for SineCosine {
    fn dimension(&self) -> usize {
        self.p.len()
    }

    fn sense(&self) -> SdeSense {
        self.sense
    }

    fn drift(&self, _t: f64, y: &Array2<f64>) -> Array2<f64> {
        match self.sense {
            SdeSense::Ito => self.ito_drift(y),
            SdeSense::Stratonovich => self.ito_drift(y) + self.sense_correction(y),
        }
    }

    fn diffusion(&self, _t: f64, y: &Array2<f64>) -> Array2<f64> {
        let cos_y = y.mapv(f64::cos);
        &cos_y * &cos_y * &self.p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    fn model(sense: SdeSense) -> SineCosine {
        SineCosine::with_parameter(arr1(&[0.3, 0.7]), sense).unwrap()
    }

    #[test]
    fn test_parameter_range_from_seed() {
        let mut rng = rng::seed_rng_from_u64(0);
        let sde = SineCosine::new(16, SdeSense::Ito, &mut rng).unwrap();
        assert!(sde.parameter().iter().all(|&p| p > 0.0 && p < 1.0));
    }

    #[test]
    fn test_shared_parameter_across_senses() {
        let sde = model(SdeSense::Ito);
        let strat = sde.reinterpret(SdeSense::Stratonovich);
        assert_eq!(sde.parameter(), strat.parameter());
        assert_eq!(strat.sense(), SdeSense::Stratonovich);
    }

    #[test]
    fn test_stratonovich_drift_vanishes() {
        let strat = model(SdeSense::Stratonovich);
        let y = Array2::from_elem((4, 2), 0.8);
        let drift = strat.drift(0.0, &y);
        assert!(drift.iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn test_ito_drift_sign() {
        // For y in (0, pi/2) both sin and cos are positive, so the Ito
        // drift pushes downward.
        let sde = model(SdeSense::Ito);
        let y = Array2::from_elem((1, 2), 1.0);
        let drift = sde.drift(0.0, &y);
        assert!(drift.iter().all(|&v| v < 0.0));
    }

    #[test]
    fn test_analytical_sample_starts_at_y0() {
        let sde = model(SdeSense::Ito);
        let y0 = Array2::ones((3, 2));
        let mut bm = BrownianPath::new(0.0, (3, 2), 5).unwrap();
        let ys = sde.analytical_sample(&y0, &[0.0, 1.0], &mut bm).unwrap();
        for (a, b) in ys[0].iter().zip(y0.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rejects_mismatched_shapes() {
        let sde = model(SdeSense::Ito);
        let y0 = Array2::ones((3, 2));
        let mut bm = BrownianPath::new(0.0, (4, 2), 5).unwrap();
        assert!(sde.analytical_sample(&y0, &[0.0, 1.0], &mut bm).is_err());
    }

    #[test]
    fn test_rejects_invalid_parameter() {
        assert!(SineCosine::with_parameter(arr1(&[0.5, -0.1]), SdeSense::Ito).is_err());
        assert!(SineCosine::with_parameter(arr1(&[f64::NAN]), SdeSense::Ito).is_err());
    }
}
