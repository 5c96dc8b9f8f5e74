//! Integration test: calibrate a 4-year lattice from par rates and price
//! plain and optioned bonds against it.
//!
//! Market data (annual par rates):
//!
//! | Maturity | Par rate |
//! |----------|----------|
//! | 1Y       | 3.500%   |
//! | 2Y       | 4.000%   |
//! | 3Y       | 4.500%   |
//! | 4Y       | 5.000%   |
//! | 5Y       | 5.500%   |
//!
//! Volatility 10%, initial one-period forward rate 3.5%, face 100.

use bdtree_lattice::{display, RateLattice};
use bdtree_pricing::prelude::*;

const SIGMA: f64 = 0.1;
const R0: f64 = 0.035;
const FACE: f64 = 100.0;
const TREE_YEARS: usize = 4;

fn market_curve() -> ParCurve {
    ParCurve::new(vec![0.035, 0.04, 0.045, 0.05, 0.055]).unwrap()
}

fn calibrated_engine(sigma: f64) -> BdtEngine {
    let config = CalibrationConfig::new(sigma, R0);
    BdtEngine::calibrate(&market_curve(), &config, TREE_YEARS).unwrap()
}

/// Independent backward induction over the calibrated rates, written
/// directly against the recurrence rather than through the lattice's
/// memoized pass.
fn reference_price(lattice: &RateLattice, coupon_rate: f64, expiry: usize) -> f64 {
    let coupon = coupon_rate * FACE;
    let mut values = vec![FACE; expiry + 1];

    for step in (0..expiry).rev() {
        let mut next = vec![0.0; step + 1];
        for (state, slot) in next.iter_mut().enumerate() {
            let rate = lattice.rate_at(state, step).unwrap();
            *slot = 0.5
                * ((values[state] + coupon) / (1.0 + rate)
                    + (values[state + 1] + coupon) / (1.0 + rate));
        }
        values = next;
    }

    values[0]
}

#[test]
fn test_par_recovery_across_the_curve() {
    let mut engine = calibrated_engine(SIGMA);
    let curve = market_curve();

    for year in 1..=TREE_YEARS {
        let coupon_rate = curve.rate_for_year(year).unwrap();
        let price = engine.price(&BondSpec::simple(coupon_rate, year)).unwrap();
        assert!(
            (price - FACE).abs() < 1e-3,
            "year {} par bond repriced to {}",
            year,
            price
        );
    }
}

#[test]
fn test_simple_bond_matches_reference_induction() {
    let mut engine = calibrated_engine(SIGMA);

    let price = engine.price(&BondSpec::simple(0.0525, 3)).unwrap();
    let reference = reference_price(engine.lattice(), 0.0525, 3);

    assert!(
        (price - reference).abs() < 1e-3,
        "engine {} vs reference {}",
        price,
        reference
    );
}

#[test]
fn test_callable_prices_at_or_below_simple() {
    let mut engine = calibrated_engine(SIGMA);

    let simple = engine.price(&BondSpec::simple(0.0525, 3)).unwrap();
    let callable = engine
        .price(&BondSpec::callable(0.0525, 3, 100.0, 1))
        .unwrap();
    let puttable = engine
        .price(&BondSpec::puttable(0.0525, 3, 100.0, 1))
        .unwrap();

    assert!(callable <= simple);
    assert!(simple <= puttable);
}

#[test]
fn test_coupon_monotonicity() {
    let mut engine = calibrated_engine(SIGMA);

    let low = engine.price(&BondSpec::simple(0.04, 3)).unwrap();
    let mid = engine.price(&BondSpec::simple(0.05, 3)).unwrap();
    let high = engine.price(&BondSpec::simple(0.06, 3)).unwrap();

    assert!(low < mid);
    assert!(mid < high);
}

#[test]
fn test_volatility_monotonicity_for_options() {
    let mut low_vol = calibrated_engine(0.1);
    let mut high_vol = calibrated_engine(0.2);

    let callable = BondSpec::callable(0.0525, 3, 100.0, 1);
    let puttable = BondSpec::puttable(0.0525, 3, 100.0, 1);

    // More volatility makes the issuer's call worth more (price down) and
    // the holder's put worth more (price up).
    assert!(high_vol.price(&callable).unwrap() < low_vol.price(&callable).unwrap());
    assert!(high_vol.price(&puttable).unwrap() > low_vol.price(&puttable).unwrap());
}

#[test]
fn test_repricing_is_idempotent() {
    let mut engine = calibrated_engine(SIGMA);
    let spec = BondSpec::callable(0.0525, 3, 100.0, 1);

    let first = engine.price(&spec).unwrap();
    let second = engine.price(&spec).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_lognormal_ladder_on_calibrated_lattice() {
    let engine = calibrated_engine(SIGMA);
    let lattice = engine.lattice();
    let factor = (2.0 * SIGMA).exp();

    for step in 0..TREE_YEARS {
        for state in 0..step {
            let lower = lattice.rate_at(state, step).unwrap();
            let upper = lattice.rate_at(state + 1, step).unwrap();
            assert!(
                (upper - lower * factor).abs() < 1e-10,
                "ladder broken at ({}, {})",
                state,
                step
            );
        }
        // Every calibrated rate is positive and sane
        for state in 0..=step {
            let rate = lattice.rate_at(state, step).unwrap();
            assert!(rate > 0.0 && rate < 1.0);
        }
    }
}

#[test]
fn test_render_after_pricing() {
    let mut engine = calibrated_engine(SIGMA);
    engine.price(&BondSpec::simple(0.0525, 3)).unwrap();

    let diagram = display::render(engine.lattice());

    assert!(diagram.contains("V:"));
    assert!(diagram.contains("C: 5.250"));
    assert!(diagram.contains("R: 3.50000%"));
}
