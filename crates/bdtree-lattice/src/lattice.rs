//! The recombining binomial rate lattice.

use crate::error::{LatticeError, LatticeResult};
use crate::node::Node;

/// A triangular lattice of [`Node`]s indexed by `(state, step)`.
///
/// Column `step` holds `step + 1` nodes for states `0..=step`, so the
/// invariant `state <= step` is enforced by construction; the square
/// grid's unused half is simply never allocated. All nodes are allocated
/// once at construction with default (uncomputed) state.
///
/// The lattice is a single mutable resource owned by one calibration /
/// pricing session. Rates are written once per node by calibration; value
/// and coupon are rewritten by every pricing pass via
/// [`reset_for_instrument`](Self::reset_for_instrument), which must run
/// before each independent pass.
///
/// # Example
///
/// ```rust
/// use bdtree_lattice::RateLattice;
///
/// let mut lattice = RateLattice::new(3);
/// lattice.set_rate(0, 0, 0.035).unwrap();
///
/// assert_eq!(lattice.steps(), 3);
/// assert_eq!(lattice.states_at(2), 3);
/// assert!(lattice.rate_at(2, 1).is_err()); // state > step
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RateLattice {
    /// Number of time steps (columns run `0..=steps`).
    steps: usize,
    /// Triangular node storage; `columns[j]` has `j + 1` entries.
    columns: Vec<Vec<Node>>,
}

impl RateLattice {
    /// Creates a lattice with the given number of annual steps.
    ///
    /// Allocates `steps + 1` columns; column `j` holds `j + 1` nodes, all
    /// with uncomputed values and zero coupon/rate.
    #[must_use]
    pub fn new(steps: usize) -> Self {
        let columns = (0..=steps).map(|j| vec![Node::default(); j + 1]).collect();
        Self { steps, columns }
    }

    /// Returns the number of time steps.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the number of states at the given time step.
    ///
    /// This is always `step + 1` for a recombining tree.
    #[must_use]
    pub fn states_at(&self, step: usize) -> usize {
        step + 1
    }

    fn check(&self, state: usize, step: usize) -> LatticeResult<()> {
        if step > self.steps || state > step {
            return Err(LatticeError::OutOfRange {
                state,
                step,
                steps: self.steps,
            });
        }
        Ok(())
    }

    /// Returns the node at `(state, step)`.
    pub fn node(&self, state: usize, step: usize) -> LatticeResult<&Node> {
        self.check(state, step)?;
        Ok(&self.columns[step][state])
    }

    fn node_mut(&mut self, state: usize, step: usize) -> LatticeResult<&mut Node> {
        self.check(state, step)?;
        Ok(&mut self.columns[step][state])
    }

    /// Returns the short rate at `(state, step)`.
    pub fn rate_at(&self, state: usize, step: usize) -> LatticeResult<f64> {
        Ok(self.node(state, step)?.rate)
    }

    /// Sets the short rate at `(state, step)`.
    pub fn set_rate(&mut self, state: usize, step: usize, rate: f64) -> LatticeResult<()> {
        self.node_mut(state, step)?.rate = rate;
        Ok(())
    }

    /// Returns the computed value at `(state, step)`, or `None` if
    /// backward induction has not reached the node.
    pub fn value_at(&self, state: usize, step: usize) -> LatticeResult<Option<f64>> {
        Ok(self.node(state, step)?.value)
    }

    /// Sets the computed value at `(state, step)`.
    pub fn set_value(&mut self, state: usize, step: usize, value: f64) -> LatticeResult<()> {
        self.node_mut(state, step)?.value = Some(value);
        Ok(())
    }

    /// Returns the coupon at `(state, step)`.
    pub fn coupon_at(&self, state: usize, step: usize) -> LatticeResult<f64> {
        Ok(self.node(state, step)?.coupon)
    }

    /// Iterates the populated columns, earliest step first.
    pub fn columns(&self) -> impl Iterator<Item = &[Node]> {
        self.columns.iter().map(Vec::as_slice)
    }

    /// Prepares the lattice for one pricing pass.
    ///
    /// For every column `j < periods` and every state `i <= j`, marks the
    /// value uncomputed and writes `coupon`. Column `periods - 1` is then
    /// seeded with `face` as the terminal condition: the backward step
    /// into that column adds the column's coupon before discounting, so
    /// the terminal cash flow reaching the root is face plus coupon.
    ///
    /// Must be called before every independent pricing pass; rates are
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::OutOfRange`] if `periods` is zero or the
    /// terminal column lies beyond the lattice.
    pub fn reset_for_instrument(
        &mut self,
        periods: usize,
        coupon: f64,
        face: f64,
    ) -> LatticeResult<()> {
        if periods == 0 || periods - 1 > self.steps {
            return Err(LatticeError::OutOfRange {
                state: 0,
                step: periods.saturating_sub(1),
                steps: self.steps,
            });
        }

        for column in &mut self.columns[..periods] {
            for node in column {
                node.value = None;
                node.coupon = coupon;
            }
        }
        for node in &mut self.columns[periods - 1] {
            node.value = Some(face);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_lattice_creation() {
        let lattice = RateLattice::new(4);

        assert_eq!(lattice.steps(), 4);
        assert_eq!(lattice.columns().count(), 5);
        for (j, column) in lattice.columns().enumerate() {
            assert_eq!(column.len(), j + 1);
        }
    }

    #[test]
    fn test_states_at() {
        let lattice = RateLattice::new(5);

        assert_eq!(lattice.states_at(0), 1);
        assert_eq!(lattice.states_at(1), 2);
        assert_eq!(lattice.states_at(5), 6);
    }

    #[test]
    fn test_rate_access() {
        let mut lattice = RateLattice::new(3);

        lattice.set_rate(0, 0, 0.05).unwrap();
        lattice.set_rate(0, 1, 0.04).unwrap();
        lattice.set_rate(1, 1, 0.06).unwrap();

        assert_relative_eq!(lattice.rate_at(0, 0).unwrap(), 0.05, epsilon = 1e-10);
        assert_relative_eq!(lattice.rate_at(0, 1).unwrap(), 0.04, epsilon = 1e-10);
        assert_relative_eq!(lattice.rate_at(1, 1).unwrap(), 0.06, epsilon = 1e-10);
    }

    #[test]
    fn test_out_of_range() {
        let mut lattice = RateLattice::new(3);

        // state > step
        assert_eq!(
            lattice.rate_at(2, 1),
            Err(LatticeError::OutOfRange {
                state: 2,
                step: 1,
                steps: 3
            })
        );
        // step beyond the lattice
        assert!(lattice.node(0, 4).is_err());
        assert!(lattice.set_rate(0, 4, 0.05).is_err());
        assert!(lattice.set_value(5, 5, 1.0).is_err());
    }

    #[test]
    fn test_zero_value_distinct_from_uncomputed() {
        let mut lattice = RateLattice::new(2);

        assert_eq!(lattice.value_at(0, 0).unwrap(), None);
        lattice.set_value(0, 0, 0.0).unwrap();
        assert_eq!(lattice.value_at(0, 0).unwrap(), Some(0.0));
    }

    #[test]
    fn test_reset_for_instrument() {
        let mut lattice = RateLattice::new(4);
        lattice.set_value(0, 0, 42.0).unwrap();

        lattice.reset_for_instrument(4, 3.5, 100.0).unwrap();

        // Columns before the terminal are cleared with the coupon set
        for j in 0..3 {
            for i in 0..=j {
                assert_eq!(lattice.value_at(i, j).unwrap(), None);
                assert!((lattice.coupon_at(i, j).unwrap() - 3.5).abs() < 1e-10);
            }
        }
        // Terminal column seeded with face
        for i in 0..4 {
            assert_eq!(lattice.value_at(i, 3).unwrap(), Some(100.0));
            assert!((lattice.coupon_at(i, 3).unwrap() - 3.5).abs() < 1e-10);
        }
        // Column beyond the instrument untouched
        assert_eq!(lattice.value_at(0, 4).unwrap(), None);
    }

    #[test]
    fn test_reset_rejects_bad_periods() {
        let mut lattice = RateLattice::new(3);

        assert!(lattice.reset_for_instrument(0, 1.0, 100.0).is_err());
        assert!(lattice.reset_for_instrument(6, 1.0, 100.0).is_err());
        // Largest valid instrument: terminal column == steps
        assert!(lattice.reset_for_instrument(4, 1.0, 100.0).is_ok());
    }

    #[test]
    fn test_reset_preserves_rates() {
        let mut lattice = RateLattice::new(2);
        lattice.set_rate(0, 1, 0.04).unwrap();
        lattice.set_rate(1, 1, 0.05).unwrap();

        lattice.reset_for_instrument(3, 2.0, 100.0).unwrap();

        assert!((lattice.rate_at(0, 1).unwrap() - 0.04).abs() < 1e-10);
        assert!((lattice.rate_at(1, 1).unwrap() - 0.05).abs() < 1e-10);
    }

    proptest! {
        #[test]
        fn prop_reset_seeds_exactly_the_terminal_column(
            steps in 1usize..10,
            periods_offset in 0usize..10,
        ) {
            let periods = 1 + periods_offset % (steps + 1);
            let mut lattice = RateLattice::new(steps);
            lattice.reset_for_instrument(periods, 1.25, 100.0).unwrap();

            for (j, column) in lattice.columns().enumerate().take(periods) {
                for node in column {
                    if j == periods - 1 {
                        prop_assert_eq!(node.value, Some(100.0));
                    } else {
                        prop_assert_eq!(node.value, None);
                    }
                    prop_assert!((node.coupon - 1.25).abs() < 1e-12);
                }
            }
        }
    }
}
