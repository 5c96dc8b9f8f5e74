//! # bdtree Lattice
//!
//! Triangular short-rate lattice for the bdtree pricing library.
//!
//! This crate provides:
//!
//! - **Nodes**: value / coupon / rate state per (state, time step) pair,
//!   with an explicit "value not yet computed" marker
//! - **Lattice**: a recombining binomial grid with bounds-checked access
//!   and per-instrument reset
//! - **Display**: a read-only ASCII rendering of the populated tree
//!
//! ## Structure
//!
//! At time step `j` there are `j + 1` possible states. State `i` at step
//! `j` represents `i` cumulative down-moves out of `j` elapsed steps, so
//! `i <= j` always holds and only the triangular region is stored.
//!
//! ```text
//!                    [0,0]
//!                   /     \
//!              [0,1]       [1,1]
//!             /    \      /    \
//!         [0,2]   [1,2]  [1,2]  [2,2]
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::uninlined_format_args)]

pub mod display;
pub mod error;
pub mod lattice;
pub mod node;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::display::render;
    pub use crate::error::{LatticeError, LatticeResult};
    pub use crate::lattice::RateLattice;
    pub use crate::node::Node;
}

pub use error::{LatticeError, LatticeResult};
pub use lattice::RateLattice;
pub use node::Node;
