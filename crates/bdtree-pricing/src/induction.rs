//! Backward induction over the rate lattice.

use bdtree_lattice::{LatticeError, RateLattice};

use crate::error::PricingResult;
use crate::instruments::EmbeddedOption;

/// Computes the root value of an instrument by backward induction.
///
/// Walks columns from `periods - 2` down to 0 (the column at
/// `periods - 1` holds the terminal values seeded by
/// [`RateLattice::reset_for_instrument`]). A node with a value already
/// present is kept as-is, which makes the pass equivalent to the memoized
/// recursion it restates, with recursion depth traded for a plain loop.
///
/// Each node's value is the risk-neutral discounted expectation of its two
/// successors:
///
/// ```text
/// discounted = 0.5 * ((V_up + C) / (1 + R) + (V_down + C) / (1 + R))
/// ```
///
/// where `R` is the node's own short rate and `C` is the up-child's
/// coupon, used for both branches. This single-rate, single-coupon form is
/// the model's defining recurrence for a flat-coupon lattice with one rate
/// per node; it is deliberately not generalized to branch-specific
/// rates or coupons, which would shift calibrated par-recovery results.
///
/// If the instrument carries an embedded option whose first exercise step
/// is at or before the node's step, the discounted value is capped (call)
/// or floored (put) at the strike.
///
/// # Errors
///
/// Returns [`LatticeError::ValueNotComputed`] (wrapped) if a successor
/// value is missing, which means the lattice was not reset for this
/// instrument.
pub fn backward_induction(
    lattice: &mut RateLattice,
    periods: usize,
    option: Option<&EmbeddedOption>,
) -> PricingResult<f64> {
    for step in (0..periods.saturating_sub(1)).rev() {
        for state in 0..lattice.states_at(step) {
            if lattice.value_at(state, step)?.is_some() {
                continue;
            }

            let v_up = lattice
                .value_at(state, step + 1)?
                .ok_or(LatticeError::ValueNotComputed {
                    state,
                    step: step + 1,
                })?;
            let v_down = lattice
                .value_at(state + 1, step + 1)?
                .ok_or(LatticeError::ValueNotComputed {
                    state: state + 1,
                    step: step + 1,
                })?;
            let coupon = lattice.coupon_at(state, step + 1)?;
            let rate = lattice.rate_at(state, step)?;

            let discounted =
                0.5 * ((v_up + coupon) / (1.0 + rate) + (v_down + coupon) / (1.0 + rate));

            let value = match option {
                Some(option) if option.first_exercise <= step => option.apply(discounted),
                _ => discounted,
            };

            lattice.set_value(state, step, value)?;
        }
    }

    Ok(lattice
        .value_at(0, 0)?
        .ok_or(LatticeError::ValueNotComputed { state: 0, step: 0 })?)
}
