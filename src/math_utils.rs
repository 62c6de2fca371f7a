// src/math_utils.rs
use crate::error::{SdeError, SdeResult};
use nalgebra::{Matrix2, Vector2};
use ndarray::Array2;
use statrs::statistics::Statistics;

/// Mean squared error between two state tensors of identical shape
pub fn mean_squared_error(a: &Array2<f64>, b: &Array2<f64>) -> f64 {
    assert_eq!(a.dim(), b.dim(), "MSE operands must have the same shape");
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).mean()
}

/// Least-squares straight-line fit, returning (slope, intercept)
///
/// Solves the 2x2 normal equations directly. Used on (log step-size,
/// log error) pairs to estimate empirical convergence order.
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> SdeResult<(f64, f64)> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return Err(SdeError::InvalidConfiguration {
            field: "regression data".to_string(),
            reason: format!(
                "need at least two paired observations, got {} xs and {} ys",
                xs.len(),
                ys.len()
            ),
        });
    }

    let n = xs.len() as f64;
    let sx: f64 = xs.iter().sum();
    let sy: f64 = ys.iter().sum();
    let sxx: f64 = xs.iter().map(|x| x * x).sum();
    let sxy: f64 = xs.iter().zip(ys.iter()).map(|(x, y)| x * y).sum();

    let normal = Matrix2::new(sxx, sx, sx, n);
    let rhs = Vector2::new(sxy, sy);

    let solution = normal
        .lu()
        .solve(&rhs)
        .ok_or_else(|| SdeError::NumericalInstability {
            method: "least-squares fit".to_string(),
            reason: "singular normal equations (degenerate abscissae)".to_string(),
        })?;

    Ok((solution[0], solution[1]))
}

/// Evenly spaced points from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    if points < 2 {
        return vec![start];
    }
    let step = (end - start) / (points - 1) as f64;
    let mut ts: Vec<f64> = (0..points).map(|i| start + i as f64 * step).collect();
    // Pin the endpoint so accumulated rounding never overshoots the horizon.
    ts[points - 1] = end;
    ts
}

pub struct Timer {
    start_time: std::time::Instant,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            start_time: std::time::Instant::now(),
        }
    }

    pub fn start(&mut self) {
        self.start_time = std::time::Instant::now();
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
