// src/backend.rs
//! Compute-backend selection
//!
//! The backend is chosen once at startup and passed explicitly into every
//! solver call. Nothing in the crate consults a process-wide default, so two
//! experiments with different backends can coexist in one process and a run
//! is fully described by its configuration values.

/// Where elementwise state updates execute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Plain sequential loops
    Serial,
    /// Rayon-backed parallel loops over the state tensor
    Parallel,
}

impl Backend {
    /// Pick the backend from the command flag and core availability
    ///
    /// Parallel execution is only selected when more than one CPU is present
    /// and the caller did not force serial mode.
    pub fn detect(force_serial: bool) -> Backend {
        if force_serial || num_cpus::get() < 2 {
            Backend::Serial
        } else {
            Backend::Parallel
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Backend::Serial => "serial",
            Backend::Parallel => "parallel",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_serial_wins() {
        assert_eq!(Backend::detect(true), Backend::Serial);
    }

    #[test]
    fn test_names() {
        assert_eq!(Backend::Serial.name(), "serial");
        assert_eq!(Backend::Parallel.name(), "parallel");
    }
}
