// src/solvers/euler_maruyama.rs
//! Euler-Maruyama Scheme for SDE Integration
//!
//! # Mathematical Framework
//!
//! For a general Ito SDE:
//! ```text
//! dX_t = a(X_t, t) dt + b(X_t, t) dW_t
//! ```
//!
//! The Euler-Maruyama scheme provides the discretization:
//! ```text
//! X_{n+1} = X_n + a(X_n, t_n) Δt + b(X_n, t_n) ΔW_n
//! ```
//!
//! Where:
//! - `a(x,t)` is the drift coefficient
//! - `b(x,t)` is the diffusion coefficient
//! - `ΔW_n ~ N(0, Δt)` are Brownian increments
//!
//! # Convergence Properties
//!
//! - **Strong convergence**: Order 0.5 in step size
//! - **Weak convergence**: Order 1.0 in step size
//! - **Stability**: Conditionally stable (depends on drift/diffusion)
//!
//! # Use Cases
//!
//! - Baseline scheme for models written in the Ito sense
//! - The reference point the corrected schemes are measured against

use crate::backend::Backend;
use crate::models::model::DiagonalSde;
use ndarray::Array2;
use std::f64;

/// Euler-Maruyama numerical scheme for SDE integration
pub struct EulerMaruyama;

impl EulerMaruyama {
    pub fn new() -> Self {
        EulerMaruyama {}
    }

    /// Single Euler-Maruyama step over the whole (batch, dimension) state
    ///
    /// # Algorithm
    ///
    /// 1. Evaluate drift: a(X_n, t_n)
    /// 2. Evaluate diffusion: b(X_n, t_n)
    /// 3. Update: X_{n+1} = X_n + a Δt + b ΔW
    ///
    /// # Parameters
    /// - `model`: SDE model providing drift and diffusion functions
    /// - `y`: Current state (modified in-place)
    /// - `t`: Current time
    /// - `dt`: Time step size
    /// - `dw`: Brownian increment over the step, same shape as `y`
    /// - `backend`: Where the elementwise update executes
    pub fn step<M: DiagonalSde>(
        model: &M,
        y: &mut Array2<f64>,
        t: f64,
        dt: f64,
        dw: &Array2<f64>,
        backend: Backend,
    ) {
        let drift = model.drift(t, y);
        let diffusion = model.diffusion(t, y);
        super::apply_update(y, &drift, &diffusion, dt, dw, backend);
    }
}

impl Default for EulerMaruyama {
    fn default() -> Self {
        Self::new()
    }
}
