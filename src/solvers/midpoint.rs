// src/solvers/midpoint.rs
//! Stochastic Midpoint Scheme for Stratonovich SDEs
//!
//! # Mathematical Framework
//!
//! For a Stratonovich SDE `dX_t = a dt + b ∘ dW_t`, the midpoint rule
//! evaluates both coefficients at a half-step state:
//! ```text
//! X_m     = X_n + ½ a(X_n, t_n) Δt + ½ b(X_n, t_n) ΔW_n
//! X_{n+1} = X_n + a(X_m, t_n + Δt/2) Δt + b(X_m, t_n + Δt/2) ΔW_n
//! ```
//!
//! # Convergence Properties
//!
//! - **Strong convergence**: Order 1.0 for diagonal (commutative) noise
//! - **Weak convergence**: Order 1.0
//! - **Cost**: 2x coefficient evaluations per step, like Heun
//!
//! Midpoint and Heun are both Stratonovich-consistent; running the two side
//! by side separates scheme-specific error from calculus-sense error.

use crate::backend::Backend;
use crate::models::model::DiagonalSde;
use ndarray::Array2;
use std::f64;

/// Stochastic midpoint scheme for Stratonovich SDE integration
pub struct Midpoint;

impl Midpoint {
    pub fn new() -> Self {
        Midpoint {}
    }

    /// Single midpoint step sharing one Brownian increment
    pub fn step<M: DiagonalSde>(
        model: &M,
        y: &mut Array2<f64>,
        t: f64,
        dt: f64,
        dw: &Array2<f64>,
        backend: Backend,
    ) {
        let drift0 = model.drift(t, y);
        let diffusion0 = model.diffusion(t, y);

        // Half-step state with half the increment
        let dw_half = dw * 0.5;
        let mut y_mid = y.clone();
        super::apply_update(&mut y_mid, &drift0, &diffusion0, 0.5 * dt, &dw_half, backend);

        let t_mid = t + 0.5 * dt;
        let drift_mid = model.drift(t_mid, &y_mid);
        let diffusion_mid = model.diffusion(t_mid, &y_mid);

        super::apply_update(y, &drift_mid, &diffusion_mid, dt, dw, backend);
    }
}

impl Default for Midpoint {
    fn default() -> Self {
        Self::new()
    }
}
