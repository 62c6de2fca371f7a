// src/error.rs
use std::fmt;

/// Custom error types for the sde-diag library
#[derive(Debug, Clone)]
pub enum SdeError {
    /// Invalid parameter values
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Numerical instability or a degenerate computation
    NumericalInstability { method: String, reason: String },

    /// Invalid configuration
    InvalidConfiguration { field: String, reason: String },

    /// Scheme applied to a model in the wrong calculus sense
    IncompatibleScheme { scheme: String, sense: String },

    /// Filesystem error while writing diagnostic artifacts
    IoError { path: String, reason: String },

    /// Plot rendering error
    PlotError { path: String, reason: String },
}

impl fmt::Display for SdeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdeError::InvalidParameters {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = {}: {}",
                    parameter, value, constraint
                )
            }
            SdeError::NumericalInstability { method, reason } => {
                write!(f, "Numerical instability in {}: {}", method, reason)
            }
            SdeError::InvalidConfiguration { field, reason } => {
                write!(f, "Invalid configuration for '{}': {}", field, reason)
            }
            SdeError::IncompatibleScheme { scheme, sense } => {
                write!(
                    f,
                    "Scheme '{}' cannot integrate a model in the {} sense",
                    scheme, sense
                )
            }
            SdeError::IoError { path, reason } => {
                write!(f, "I/O error for '{}': {}", path, reason)
            }
            SdeError::PlotError { path, reason } => {
                write!(f, "Failed to render plot '{}': {}", path, reason)
            }
        }
    }
}

impl std::error::Error for SdeError {}

/// Result type alias for sde-diag operations
pub type SdeResult<T> = Result<T, SdeError>;

/// Validation utilities
pub mod validation {
    use super::{SdeError, SdeResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> SdeResult<()> {
        if value <= 0.0 {
            Err(SdeError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> SdeResult<()> {
        if !value.is_finite() {
            Err(SdeError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate batch size
    pub fn validate_batch(batch: usize) -> SdeResult<()> {
        if batch == 0 {
            Err(SdeError::InvalidConfiguration {
                field: "batch".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate state dimension
    pub fn validate_dimension(dimension: usize) -> SdeResult<()> {
        if dimension == 0 {
            Err(SdeError::InvalidConfiguration {
                field: "dimension".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a time grid is strictly increasing with finite entries
    pub fn validate_time_grid(ts: &[f64]) -> SdeResult<()> {
        if ts.len() < 2 {
            return Err(SdeError::InvalidConfiguration {
                field: "ts".to_string(),
                reason: "time grid needs at least two points".to_string(),
            });
        }
        for t in ts {
            validate_finite("ts", *t)?;
        }
        for pair in ts.windows(2) {
            if pair[1] <= pair[0] {
                return Err(SdeError::InvalidConfiguration {
                    field: "ts".to_string(),
                    reason: format!(
                        "time grid must be strictly increasing, got {} then {}",
                        pair[0], pair[1]
                    ),
                });
            }
        }
        Ok(())
    }
}
