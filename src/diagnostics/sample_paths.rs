// src/diagnostics/sample_paths.rs
//! Sample-path comparison
//!
//! Integrates one model instance under every scheme plus the closed-form
//! solution, all on a single Brownian path, and writes one overlay image per
//! batch element for visual inspection. Where the schemes are sound, the
//! corrected curves should hug the analytical one while Euler drifts.

use crate::backend::Backend;
use crate::brownian::BrownianPath;
use crate::error::{validation::*, SdeError, SdeResult};
use crate::math_utils::linspace;
use crate::models::{SdeSense, SineCosine};
use crate::plot::{self, PlotConfig};
use crate::rng::RngFactory;
use crate::solvers::{integrate, Scheme};
use ndarray::Array2;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for the sample-path comparison
#[derive(Clone)]
pub struct SampleConfig {
    pub batch: usize,
    pub dimension: usize,
    pub t0: f64,
    pub t1: f64,
    /// Number of output grid points between `t0` and `t1`
    pub grid_points: usize,
    pub dt: f64,
    pub seed: u64,
    pub out_dir: PathBuf,
    pub backend: Backend,
}

impl Default for SampleConfig {
    fn default() -> Self {
        SampleConfig {
            batch: 32,
            dimension: 1,
            t0: 0.0,
            t1: 5.0,
            grid_points: 100,
            dt: 1e-1,
            seed: 0,
            out_dir: PathBuf::from(super::DEFAULT_PLOT_DIR),
            backend: Backend::Serial,
        }
    }
}

impl SampleConfig {
    pub fn validate(&self) -> SdeResult<()> {
        validate_batch(self.batch)?;
        validate_dimension(self.dimension)?;
        validate_finite("t0", self.t0)?;
        validate_finite("t1", self.t1)?;
        if self.t1 <= self.t0 {
            return Err(SdeError::InvalidConfiguration {
                field: "t1".to_string(),
                reason: "horizon must end after it starts".to_string(),
            });
        }
        if self.grid_points < 2 {
            return Err(SdeError::InvalidConfiguration {
                field: "grid_points".to_string(),
                reason: "need at least two output grid points".to_string(),
            });
        }
        validate_positive("dt", self.dt)?;
        Ok(())
    }
}

/// Integrate all schemes and the analytical solution on one shared path and
/// write one overlay PNG per batch element
///
/// Returns the written file paths, one per batch element, named by index.
/// The output directory is created if absent; creating it twice is not an
/// error. Numerical failures and filesystem failures propagate.
pub fn inspect_sample(cfg: &SampleConfig) -> SdeResult<Vec<PathBuf>> {
    cfg.validate()?;

    let ts = linspace(cfg.t0, cfg.t1, cfg.grid_points);
    let y0 = Array2::ones((cfg.batch, cfg.dimension));

    let factory = RngFactory::new(cfg.seed);
    let mut param_rng = factory.create_std_rng(0);
    let sde = SineCosine::new(cfg.dimension, SdeSense::Ito, &mut param_rng)?;
    let sde_strat = sde.reinterpret(SdeSense::Stratonovich);

    let mut bm = BrownianPath::with_rng(cfg.t0, y0.dim(), factory.create_std_rng(1))?;

    let ys_euler = integrate(
        &sde,
        &y0,
        &ts,
        cfg.dt,
        &mut bm,
        Scheme::EulerMaruyama,
        cfg.backend,
    )?;
    let ys_heun = integrate(
        &sde_strat,
        &y0,
        &ts,
        cfg.dt,
        &mut bm,
        Scheme::Heun,
        cfg.backend,
    )?;
    let ys_midpoint = integrate(
        &sde_strat,
        &y0,
        &ts,
        cfg.dt,
        &mut bm,
        Scheme::Midpoint,
        cfg.backend,
    )?;
    let ys_analytical = sde.analytical_sample(&y0, &ts, &mut bm)?;

    fs::create_dir_all(&cfg.out_dir).map_err(|e| io_error(&cfg.out_dir, e))?;

    let mut written = Vec::with_capacity(cfg.batch);
    for i in 0..cfg.batch {
        let series = vec![
            ("euler".to_string(), component(&ys_euler, i)),
            ("heun".to_string(), component(&ys_heun, i)),
            ("midpoint".to_string(), component(&ys_midpoint, i)),
            ("analytical".to_string(), component(&ys_analytical, i)),
        ];

        let path = cfg.out_dir.join(format!("{}.png", i));
        let config = PlotConfig {
            title: format!("Sample path {}", i),
            ..PlotConfig::default()
        };
        plot::plot_trajectories(&ts, &series, &path, Some(&config))
            .map_err(|e| plot_error(&path, e))?;
        written.push(path);
    }

    Ok(written)
}

/// First state component of batch element `i` along the trajectory
fn component(ys: &[Array2<f64>], i: usize) -> Vec<f64> {
    ys.iter().map(|y| y[[i, 0]]).collect()
}

pub(crate) fn io_error(path: &Path, e: std::io::Error) -> SdeError {
    SdeError::IoError {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

pub(crate) fn plot_error(path: &Path, e: Box<dyn std::error::Error>) -> SdeError {
    SdeError::PlotError {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}
