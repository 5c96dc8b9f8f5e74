//! Root-finding algorithms.
//!
//! This module provides the bracketing solver used by the lattice
//! calibration:
//!
//! - [`bisection`]: Simple and reliable bracketing method
//!
//! Bisection converges linearly but is guaranteed to make progress on any
//! bracketed root, which matters here because the calibration objective
//! (reprice a par bond on a mutable lattice) is monotone but expensive and
//! has no cheap derivative.
//!
//! # Example: Par-recovery style search
//!
//! ```rust
//! use bdtree_math::solvers::{bisection, SolverConfig};
//!
//! // Price of a 1-period bond as a function of the discount rate,
//! // solved so it reprices to par.
//! let f = |r: f64| 103.5 / (1.0 + r) - 100.0;
//!
//! let result = bisection(f, 0.0, 1.0, &SolverConfig::default()).unwrap();
//! assert!((result.root - 0.035).abs() < 1e-8);
//! ```

mod bisection;

pub use bisection::bisection;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}
