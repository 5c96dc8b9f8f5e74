//! Par-recovery calibration of the rate lattice.
//!
//! Builds the short-rate field one maturity year at a time, shortest
//! first, so that at each year the lattice reprices the market-quoted par
//! bond of that maturity back to face value. This is the standard
//! par-recovery calibration for lognormal short-rate lattices: each new
//! column is a geometric ladder of sibling rates pinned down by a single
//! base rate, and the base rate is found by bisection.

use bdtree_lattice::RateLattice;
use bdtree_math::solvers::{bisection, SolverConfig};
use bdtree_math::MathError;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};
use crate::induction::backward_induction;

/// Default bond face value / exercise par level.
pub const DEFAULT_FACE: f64 = 100.0;

/// An ordered sequence of annual par rates, index 0 = 1-year.
///
/// Immutable calibration input; not part of the lattice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParCurve(Vec<f64>);

impl ParCurve {
    /// Creates a par-rate curve from decimal annual rates.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidInstrumentSpec`] for an empty curve.
    pub fn new(rates: Vec<f64>) -> PricingResult<Self> {
        if rates.is_empty() {
            return Err(PricingError::invalid_spec(
                "par-rate curve must not be empty",
            ));
        }
        Ok(Self(rates))
    }

    /// Number of maturity years quoted.
    #[must_use]
    pub fn years(&self) -> usize {
        self.0.len()
    }

    /// Par rate for the given maturity year (1-indexed).
    pub fn rate_for_year(&self, year: usize) -> PricingResult<f64> {
        if year == 0 || year > self.0.len() {
            return Err(PricingError::invalid_spec(format!(
                "no par rate quoted for year {} (curve spans {} years)",
                year,
                self.0.len()
            )));
        }
        Ok(self.0[year - 1])
    }
}

/// Calibration parameters.
///
/// # Example
///
/// ```rust
/// use bdtree_pricing::calibration::CalibrationConfig;
///
/// let config = CalibrationConfig::new(0.1, 0.035).with_face(100.0);
/// assert!((config.sigma - 0.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Volatility of the lognormal rate ladder.
    pub sigma: f64,
    /// Initial one-period forward rate (the year-1 root rate).
    pub r0: f64,
    /// Bond face value / par level the calibration reprices to.
    pub face: f64,
    /// Bisection settings for the per-year rate search.
    #[serde(skip)]
    pub solver: SolverConfig,
}

impl CalibrationConfig {
    /// Creates a configuration with the given volatility and initial rate.
    ///
    /// Face defaults to [`DEFAULT_FACE`]; the solver to its defaults.
    #[must_use]
    pub fn new(sigma: f64, r0: f64) -> Self {
        Self {
            sigma,
            r0,
            face: DEFAULT_FACE,
            solver: SolverConfig::default(),
        }
    }

    /// Sets the face value.
    #[must_use]
    pub fn with_face(mut self, face: f64) -> Self {
        self.face = face;
        self
    }

    /// Sets the solver configuration.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }
}

/// Calibrates a rate lattice spanning `years` annual steps.
///
/// Year 1 writes the root rate directly from `config.r0`. Every later
/// year `n` bisects over the base rate of the column at step `n - 1` in
/// `[0, 1]`: each trial seeds the column's lognormal ladder
/// (`rate(i+1) = rate(i) * exp(2 sigma)`), resets the lattice for the
/// n-year par bond, and reprices it by backward induction, holding all
/// earlier-year rates fixed. The bond price is monotone decreasing in the
/// base rate, so the bracket always contains the par-recovery root.
///
/// The returned lattice has every column `0..years` populated with rates
/// and is ready for any number of pricing passes.
///
/// # Errors
///
/// - [`PricingError::InvalidInstrumentSpec`] for zero years, a curve
///   shorter than `years`, or non-finite parameters
/// - [`PricingError::CalibrationNonConvergent`] if a year's search hits
///   the solver's iteration cap
pub fn calibrate(
    curve: &ParCurve,
    config: &CalibrationConfig,
    years: usize,
) -> PricingResult<RateLattice> {
    if years == 0 {
        return Err(PricingError::invalid_spec(
            "calibration needs at least one year",
        ));
    }
    if years > curve.years() {
        return Err(PricingError::invalid_spec(format!(
            "cannot calibrate {} years from a {}-year par curve",
            years,
            curve.years()
        )));
    }
    if !config.sigma.is_finite() || !config.r0.is_finite() || !(config.face > 0.0) {
        return Err(PricingError::invalid_spec(
            "sigma, r0 and face must be finite, with face positive",
        ));
    }

    let vol_factor = (2.0 * config.sigma).exp();
    let mut lattice = RateLattice::new(years);

    for year in 1..=years {
        if year == 1 {
            lattice.set_rate(0, 0, config.r0)?;
            continue;
        }

        let coupon = curve.rate_for_year(year)? * config.face;

        // The closure cannot propagate errors through the solver, so any
        // lattice failure is parked and rechecked after the search.
        let mut trial_failure: Option<PricingError> = None;
        let objective = |base_rate: f64| {
            match reprice_trial(&mut lattice, year, base_rate, coupon, config.face, vol_factor) {
                Ok(price) => price - config.face,
                Err(err) => {
                    trial_failure = Some(err);
                    f64::NAN
                }
            }
        };

        let solved = bisection(objective, 0.0, 1.0, &config.solver);

        if let Some(err) = trial_failure {
            return Err(err);
        }

        let solution = solved.map_err(|err| match err {
            MathError::ConvergenceFailed {
                iterations,
                best_root,
                residual,
            } => PricingError::CalibrationNonConvergent {
                year,
                iterations,
                best_rate: best_root,
                residual,
            },
            other => PricingError::Math(other),
        })?;

        seed_ladder(&mut lattice, year - 1, solution.root, vol_factor)?;

        log::debug!(
            "calibrated year {}: base rate {:.6} in {} iterations (residual {:.2e})",
            year,
            solution.root,
            solution.iterations,
            solution.residual
        );
    }

    Ok(lattice)
}

/// Writes the lognormal rate ladder across the column at `step`.
///
/// State 0 gets `base_rate`; each further down-move multiplies by
/// `exp(2 sigma)`.
fn seed_ladder(
    lattice: &mut RateLattice,
    step: usize,
    base_rate: f64,
    vol_factor: f64,
) -> PricingResult<()> {
    let mut rate = base_rate;
    for state in 0..lattice.states_at(step) {
        lattice.set_rate(state, step, rate)?;
        rate *= vol_factor;
    }
    Ok(())
}

/// One bisection trial: seed the ladder, reset, reprice the par bond.
fn reprice_trial(
    lattice: &mut RateLattice,
    year: usize,
    base_rate: f64,
    coupon: f64,
    face: f64,
    vol_factor: f64,
) -> PricingResult<f64> {
    seed_ladder(lattice, year - 1, base_rate, vol_factor)?;
    lattice.reset_for_instrument(year + 1, coupon, face)?;
    backward_induction(lattice, year + 1, None)
}
