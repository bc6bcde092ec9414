//! Classifier output types.
//!
//! These types guarantee a valid probability pair by construction.

use std::fmt;

use thiserror::Error;

/// Allowed drift between `p_no_churn + p_churn` and 1.0.
pub const SUM_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ProbabilityError {
    #[error("probability {0} is outside [0, 1]")]
    OutOfRange(f64),
    #[error("probability is not a finite number")]
    NonFinite,
    #[error("class probabilities sum to {sum}, expected 1")]
    BadSum { sum: f64 },
}

/// Probability that the customer churns, in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ChurnProbability(f64);

impl ChurnProbability {
    pub fn new(value: f64) -> Result<Self, ProbabilityError> {
        check_unit(value)?;
        Ok(Self(value))
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// `p * 100` with two decimals, e.g. `"37.25%"`.
    #[must_use]
    pub fn percent(self) -> String {
        format!("{:.2}%", self.0 * 100.0)
    }
}

impl fmt::Display for ChurnProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.percent())
    }
}

/// `(p_no_churn, p_churn)` as returned by `predict_proba`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassProbabilities {
    no_churn: f64,
    churn: f64,
}

impl ClassProbabilities {
    pub fn new(no_churn: f64, churn: f64) -> Result<Self, ProbabilityError> {
        check_unit(no_churn)?;
        check_unit(churn)?;
        let sum = no_churn + churn;
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(ProbabilityError::BadSum { sum });
        }
        Ok(Self { no_churn, churn })
    }

    /// Binary complement of the positive-class probability.
    pub fn from_churn(churn: f64) -> Result<Self, ProbabilityError> {
        check_unit(churn)?;
        Ok(Self {
            no_churn: 1.0 - churn,
            churn,
        })
    }

    #[must_use]
    pub const fn no_churn(self) -> f64 {
        self.no_churn
    }

    #[must_use]
    pub const fn churn(self) -> ChurnProbability {
        ChurnProbability(self.churn)
    }

    #[must_use]
    pub const fn as_pair(self) -> (f64, f64) {
        (self.no_churn, self.churn)
    }
}

fn check_unit(value: f64) -> Result<(), ProbabilityError> {
    if !value.is_finite() {
        return Err(ProbabilityError::NonFinite);
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(ProbabilityError::OutOfRange(value));
    }
    Ok(())
}
