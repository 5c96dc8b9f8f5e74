//! Error types for calibration and pricing.

use thiserror::Error;

/// A specialized Result type for calibration and pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;

/// Errors that can occur during calibration and pricing.
#[derive(Error, Debug, Clone)]
pub enum PricingError {
    /// Invalid instrument specification.
    #[error("Invalid instrument specification: {reason}")]
    InvalidInstrumentSpec {
        /// Description of what's invalid.
        reason: String,
    },

    /// The par-recovery search did not converge within its iteration cap.
    #[error(
        "Calibration failed to converge for year {year} after {iterations} iterations \
         (best rate: {best_rate:.6}, residual: {residual:.2e})"
    )]
    CalibrationNonConvergent {
        /// Maturity year being calibrated.
        year: usize,
        /// Number of iterations attempted.
        iterations: u32,
        /// Best root-step rate found before giving up.
        best_rate: f64,
        /// Repricing residual at the best rate.
        residual: f64,
    },

    /// Lattice error.
    #[error("Lattice error: {0}")]
    Lattice(#[from] bdtree_lattice::LatticeError),

    /// Math error.
    #[error("Math error: {0}")]
    Math(#[from] bdtree_math::MathError),
}

impl PricingError {
    /// Creates an invalid specification error.
    #[must_use]
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidInstrumentSpec {
            reason: reason.into(),
        }
    }
}
