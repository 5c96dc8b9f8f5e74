//! Instrument specifications for one pricing pass.
//!
//! These types parametrize a single run of backward induction; they do not
//! persist in the lattice beyond that run.

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};

/// The side of an embedded option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionKind {
    /// Issuer's right to redeem: caps the node value at the strike.
    Call,
    /// Holder's right to put back: floors the node value at the strike.
    Put,
}

/// An embedded call or put, effective from a given time step onward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedOption {
    /// Call or put.
    pub kind: OptionKind,
    /// Exercise price.
    pub strike: f64,
    /// First time step at which the option can be exercised.
    pub first_exercise: usize,
}

impl EmbeddedOption {
    /// Creates a call option.
    #[must_use]
    pub fn call(strike: f64, first_exercise: usize) -> Self {
        Self {
            kind: OptionKind::Call,
            strike,
            first_exercise,
        }
    }

    /// Creates a put option.
    #[must_use]
    pub fn put(strike: f64, first_exercise: usize) -> Self {
        Self {
            kind: OptionKind::Put,
            strike,
            first_exercise,
        }
    }

    /// Applies the exercise decision to a discounted node value.
    #[must_use]
    pub fn apply(&self, discounted: f64) -> f64 {
        match self.kind {
            OptionKind::Call => discounted.min(self.strike),
            OptionKind::Put => discounted.max(self.strike),
        }
    }
}

/// Parameters for one bond pricing pass.
///
/// # Example
///
/// ```rust
/// use bdtree_pricing::instruments::BondSpec;
///
/// let plain = BondSpec::simple(0.0525, 3);
/// let callable = BondSpec::callable(0.0525, 3, 100.0, 1);
///
/// assert!(plain.option.is_none());
/// assert!(callable.validate(4).is_ok());
/// assert!(callable.validate(2).is_err()); // expiry beyond the lattice
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondSpec {
    /// Annual coupon rate as a decimal (e.g. 0.0525).
    pub coupon_rate: f64,
    /// Maturity in annual steps.
    pub expiry: usize,
    /// Embedded option, if any.
    pub option: Option<EmbeddedOption>,
}

impl BondSpec {
    /// A plain bond with no embedded option.
    #[must_use]
    pub fn simple(coupon_rate: f64, expiry: usize) -> Self {
        Self {
            coupon_rate,
            expiry,
            option: None,
        }
    }

    /// A callable bond with the given strike and first call step.
    #[must_use]
    pub fn callable(coupon_rate: f64, expiry: usize, strike: f64, first_exercise: usize) -> Self {
        Self {
            coupon_rate,
            expiry,
            option: Some(EmbeddedOption::call(strike, first_exercise)),
        }
    }

    /// A puttable bond with the given strike and first put step.
    #[must_use]
    pub fn puttable(coupon_rate: f64, expiry: usize, strike: f64, first_exercise: usize) -> Self {
        Self {
            coupon_rate,
            expiry,
            option: Some(EmbeddedOption::put(strike, first_exercise)),
        }
    }

    /// Checks the spec against a lattice with the given step count.
    ///
    /// Fails fast with [`PricingError::InvalidInstrumentSpec`] instead of
    /// letting a bad maturity or exercise step produce silent wrong
    /// lattice indices.
    pub fn validate(&self, steps: usize) -> PricingResult<()> {
        if self.expiry == 0 {
            return Err(PricingError::invalid_spec(
                "expiry must be at least one period",
            ));
        }
        if self.expiry > steps {
            return Err(PricingError::invalid_spec(format!(
                "expiry {} exceeds the {}-step lattice",
                self.expiry, steps
            )));
        }
        if let Some(option) = &self.option {
            if option.first_exercise > self.expiry {
                return Err(PricingError::invalid_spec(format!(
                    "option exercise step {} is outside [0, {}]",
                    option.first_exercise, self.expiry
                )));
            }
        }
        Ok(())
    }
}
