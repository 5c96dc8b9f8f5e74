//! # bdtree Pricing
//!
//! Par-recovery calibration and embedded-option bond pricing on a
//! Black-Derman-Toy-style binomial short-rate lattice.
//!
//! This crate provides:
//!
//! - **Instruments**: plain, callable, and puttable bond specifications
//! - **Calibration**: year-by-year bisection of the lognormal rate ladder
//!   so each maturity's par bond reprices to face
//! - **Pricing**: backward induction with optional call/put overlay
//!
//! ## Example
//!
//! ```rust
//! use bdtree_pricing::prelude::*;
//!
//! let curve = ParCurve::new(vec![0.035, 0.04, 0.045, 0.05, 0.055])?;
//! let config = CalibrationConfig::new(0.1, 0.035);
//!
//! let mut engine = BdtEngine::calibrate(&curve, &config, 4)?;
//! let price = engine.price(&BondSpec::simple(0.0525, 3))?;
//! assert!(price > 0.0);
//!
//! // Rendering is a separate, explicit read of the same lattice.
//! let diagram = bdtree_lattice::display::render(engine.lattice());
//! assert!(diagram.contains("R:"));
//! # Ok::<(), bdtree_pricing::PricingError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::float_cmp)]

pub mod calibration;
pub mod engine;
pub mod error;
pub mod induction;
pub mod instruments;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calibration::{calibrate, CalibrationConfig, ParCurve, DEFAULT_FACE};
    pub use crate::engine::{price, BdtEngine};
    pub use crate::error::{PricingError, PricingResult};
    pub use crate::induction::backward_induction;
    pub use crate::instruments::{BondSpec, EmbeddedOption, OptionKind};
}

pub use error::{PricingError, PricingResult};
