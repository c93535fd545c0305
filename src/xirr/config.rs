//! Solver configuration

use super::XirrError;
use std::env;

/// Starting rate for Newton-Raphson (10% annualized)
pub const DEFAULT_GUESS: f64 = 0.10;

/// Step size below which the iteration is considered converged
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Newton steps allowed before giving up with NaN
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Actual/365 day count
pub const DAYS_PER_YEAR: f64 = 365.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Initial annualized rate
    pub guess: f64,
    /// Convergence threshold on |r_{n+1} - r_n|
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            guess: DEFAULT_GUESS,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Read overrides from `XIRR_GUESS`, `XIRR_TOLERANCE` and `XIRR_MAX_ITERATIONS`.
    /// Missing or unparseable values keep the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let guess: f64 = env::var("XIRR_GUESS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.guess);

        let tolerance: f64 = env::var("XIRR_TOLERANCE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.tolerance);

        let max_iterations: u32 = env::var("XIRR_MAX_ITERATIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_iterations);

        Self {
            guess,
            tolerance,
            max_iterations,
        }
    }

    #[must_use]
    pub fn with_guess(mut self, guess: f64) -> Self {
        self.guess = guess;
        self
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn validate(&self) -> Result<(), XirrError> {
        if !self.guess.is_finite() {
            return Err(XirrError::invalid_config(format!(
                "guess must be finite, got {}",
                self.guess
            )));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(XirrError::invalid_config(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(XirrError::invalid_config("max_iterations must be at least 1"));
        }
        Ok(())
    }
}
