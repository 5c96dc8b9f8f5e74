//! Pricing entry points and the calibration/pricing session.

use bdtree_lattice::RateLattice;

use crate::calibration::{self, CalibrationConfig, ParCurve};
use crate::error::PricingResult;
use crate::induction::backward_induction;
use crate::instruments::BondSpec;

/// Decimal places prices are rounded to on the way out.
const PRICE_DECIMALS: i32 = 4;

fn round_price(value: f64) -> f64 {
    let scale = 10f64.powi(PRICE_DECIMALS);
    (value * scale).round() / scale
}

/// Prices one instrument on a calibrated rate lattice.
///
/// Validates the spec, resets the lattice for the instrument's maturity
/// and coupon (`coupon_rate * face` per period), runs backward induction
/// with the spec's option parameters, and rounds the root value to 4
/// decimal places. The reset makes repeated calls with identical
/// parameters idempotent.
pub fn price(lattice: &mut RateLattice, spec: &BondSpec, face: f64) -> PricingResult<f64> {
    spec.validate(lattice.steps())?;

    let coupon = spec.coupon_rate * face;
    lattice.reset_for_instrument(spec.expiry + 1, coupon, face)?;
    let value = backward_induction(lattice, spec.expiry + 1, spec.option.as_ref())?;

    Ok(round_price(value))
}

/// A calibrated lattice bound to one pricing session.
///
/// The lattice is a single mutable resource: the engine owns it
/// exclusively, every pricing call performs its own reset, and rendering
/// is an explicit read through [`lattice`](Self::lattice) rather than a
/// side effect of pricing.
///
/// # Example
///
/// ```rust
/// use bdtree_pricing::prelude::*;
///
/// let curve = ParCurve::new(vec![0.035, 0.04, 0.045, 0.05, 0.055])?;
/// let config = CalibrationConfig::new(0.1, 0.035);
/// let mut engine = BdtEngine::calibrate(&curve, &config, 4)?;
///
/// let plain = engine.price(&BondSpec::simple(0.0525, 3))?;
/// let called = engine.price(&BondSpec::callable(0.0525, 3, 100.0, 1))?;
/// assert!(called <= plain);
/// # Ok::<(), bdtree_pricing::PricingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BdtEngine {
    lattice: RateLattice,
    face: f64,
}

impl BdtEngine {
    /// Calibrates a lattice from a par curve and wraps it in a session.
    pub fn calibrate(
        curve: &ParCurve,
        config: &CalibrationConfig,
        years: usize,
    ) -> PricingResult<Self> {
        let lattice = calibration::calibrate(curve, config, years)?;
        Ok(Self {
            lattice,
            face: config.face,
        })
    }

    /// Wraps an externally built rate lattice.
    #[must_use]
    pub fn from_lattice(lattice: RateLattice, face: f64) -> Self {
        Self { lattice, face }
    }

    /// Prices one instrument, rounded to 4 decimal places.
    pub fn price(&mut self, spec: &BondSpec) -> PricingResult<f64> {
        price(&mut self.lattice, spec, self.face)
    }

    /// Read access to the lattice, e.g. for rendering.
    #[must_use]
    pub fn lattice(&self) -> &RateLattice {
        &self.lattice
    }

    /// The face value pricing passes redeem at.
    #[must_use]
    pub fn face(&self) -> f64 {
        self.face
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fixed_engine() -> BdtEngine {
        // 2-step lattice with hand-set rates; no calibration involved
        let mut lattice = RateLattice::new(2);
        lattice.set_rate(0, 0, 0.05).unwrap();
        lattice.set_rate(0, 1, 0.04).unwrap();
        lattice.set_rate(1, 1, 0.06).unwrap();
        BdtEngine::from_lattice(lattice, 100.0)
    }

    #[test]
    fn test_price_rounding() {
        let mut engine = fixed_engine();

        let price = engine.price(&BondSpec::simple(0.05, 2)).unwrap();

        let v_up = 105.0_f64 / 1.04;
        let v_down = 105.0_f64 / 1.06;
        let expected = 0.5 * ((v_up + 5.0) / 1.05 + (v_down + 5.0) / 1.05);
        let expected_rounded = (expected * 1e4).round() / 1e4;
        assert_relative_eq!(price, expected_rounded, epsilon = 1e-12);
    }

    #[test]
    fn test_pricing_is_idempotent() {
        let mut engine = fixed_engine();
        let spec = BondSpec::callable(0.05, 2, 100.0, 1);

        let first = engine.price(&spec).unwrap();
        let second = engine.price(&spec).unwrap();

        assert_relative_eq!(first, second, epsilon = 1e-12);
    }

    #[test]
    fn test_option_bounds_at_root() {
        let mut engine = fixed_engine();

        let plain = engine.price(&BondSpec::simple(0.05, 2)).unwrap();
        let callable = engine.price(&BondSpec::callable(0.05, 2, 100.0, 1)).unwrap();
        let puttable = engine.price(&BondSpec::puttable(0.05, 2, 100.0, 1)).unwrap();

        assert!(callable <= plain);
        assert!(plain <= puttable);
    }

    #[test]
    fn test_invalid_specs_fail_fast() {
        let mut engine = fixed_engine();

        assert!(engine.price(&BondSpec::simple(0.05, 0)).is_err());
        assert!(engine.price(&BondSpec::simple(0.05, 3)).is_err());
        assert!(engine
            .price(&BondSpec::callable(0.05, 2, 100.0, 3))
            .is_err());
    }
}
