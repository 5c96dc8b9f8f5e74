//! Lattice node state.

use serde::{Deserialize, Serialize};

/// One state of the world at one time step.
///
/// A node carries the three quantities backward induction works with:
///
/// - `value`: present value at this node, computed backward from maturity.
///   `None` means "not yet computed", which is deliberately distinct from a
///   legitimately computed value of `0.0`.
/// - `coupon`: coupon paid at this node's time step, set when the lattice
///   is reset for an instrument.
/// - `rate`: the one-period short rate effective from this node to the
///   next time step, written once by calibration.
///
/// `value` and `coupon` are safe to overwrite across repeated pricing
/// passes on the same rate lattice; `rate` is fixed once calibrated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Present value at this node, or `None` before induction reaches it.
    pub value: Option<f64>,
    /// Coupon paid at this node's time step.
    pub coupon: f64,
    /// One-period short rate from this node to the next step.
    pub rate: f64,
}

impl Node {
    /// Returns true if backward induction has computed this node's value.
    #[must_use]
    pub fn is_computed(&self) -> bool {
        self.value.is_some()
    }
}
