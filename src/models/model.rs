// src/models/model.rs
use ndarray::Array2;

/// Interpretation of the stochastic integral a model's drift is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdeSense {
    Ito,
    Stratonovich,
}

impl SdeSense {
    pub fn name(&self) -> &'static str {
        match self {
            SdeSense::Ito => "Ito",
            SdeSense::Stratonovich => "Stratonovich",
        }
    }
}

/// Drift-diffusion model with diagonal noise over a (batch, dimension) state
///
/// Component i of the state is driven by Brownian component i only, so the
/// diffusion is returned as a (batch, dimension) tensor of per-component
/// coefficients rather than a full matrix.
pub trait DiagonalSde {
    fn dimension(&self) -> usize;
    fn sense(&self) -> SdeSense;
    fn drift(&self, t: f64, y: &Array2<f64>) -> Array2<f64>;
    fn diffusion(&self, t: f64, y: &Array2<f64>) -> Array2<f64>;
}
