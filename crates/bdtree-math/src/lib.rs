//! # bdtree Math
//!
//! Numerical utilities for the bdtree lattice pricing library.
//!
//! This crate provides:
//!
//! - **Solvers**: Bracketing root-finding (bisection) with typed
//!   convergence failures
//!
//! ## Design Philosophy
//!
//! - **Bounded iteration**: every search carries a hard iteration cap and
//!   reports its residual on failure instead of looping
//! - **Mutable objectives**: objective functions may carry mutable state
//!   (the lattice calibration objective reprices a tree on every call)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{bisection, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
