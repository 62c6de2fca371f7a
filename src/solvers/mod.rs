// src/solvers/mod.rs
pub mod euler_maruyama;
pub mod heun;
pub mod integrate;
pub mod midpoint;

pub use euler_maruyama::EulerMaruyama;
pub use heun::Heun;
pub use integrate::{integrate, Scheme};
pub use midpoint::Midpoint;

use crate::backend::Backend;
use ndarray::{Array2, Zip};

/// Apply `y += drift * dt + diffusion * dw` elementwise on the chosen backend
pub(crate) fn apply_update(
    y: &mut Array2<f64>,
    drift: &Array2<f64>,
    diffusion: &Array2<f64>,
    dt: f64,
    dw: &Array2<f64>,
    backend: Backend,
) {
    let zip = Zip::from(y).and(drift).and(diffusion).and(dw);
    match backend {
        Backend::Parallel => zip.par_for_each(|y, &a, &b, &dw| *y += a * dt + b * dw),
        Backend::Serial => zip.for_each(|y, &a, &b, &dw| *y += a * dt + b * dw),
    }
}
