//! Error types for lattice operations.

use thiserror::Error;

/// A specialized Result type for lattice operations.
pub type LatticeResult<T> = Result<T, LatticeError>;

/// Errors that can occur during lattice operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LatticeError {
    /// Index outside the triangular region of the lattice.
    #[error("Node ({state}, {step}) is outside the triangular lattice (steps = {steps})")]
    OutOfRange {
        /// State index (number of down-moves).
        state: usize,
        /// Time step index.
        step: usize,
        /// Number of steps the lattice was built with.
        steps: usize,
    },

    /// A node value was read before backward induction computed it.
    #[error("Node ({state}, {step}) has no computed value")]
    ValueNotComputed {
        /// State index.
        state: usize,
        /// Time step index.
        step: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LatticeError::OutOfRange {
            state: 3,
            step: 2,
            steps: 4,
        };
        assert!(err.to_string().contains("(3, 2)"));
        assert!(err.to_string().contains("steps = 4"));
    }
}
