//! Factor weights used to combine normalised scores.
//!
//! Weights are validated on construction: every weight must be finite and
//! positive, and together they must sum to `1.0`. Invalid sets are a
//! configuration error and are never rescaled.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Factor, FactorScores};

/// Accepted deviation of the weight sum from `1.0`.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Errors returned by [`FactorWeights::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightsError {
    /// A weight was NaN or infinite.
    #[error("weight for {factor} must be finite, got {weight}")]
    NonFinite {
        /// Factor carrying the invalid weight.
        factor: Factor,
        /// Offending value.
        weight: f64,
    },
    /// A weight was zero or negative.
    #[error("weight for {factor} must be positive, got {weight}")]
    NonPositive {
        /// Factor carrying the invalid weight.
        factor: Factor,
        /// Offending value.
        weight: f64,
    },
    /// The weights did not add up to one.
    #[error("weights must sum to 1.0, got {sum}")]
    InvalidSum {
        /// Sum of all supplied weights.
        sum: f64,
    },
}

/// Validated weights for the five factors.
///
/// # Examples
/// ```
/// use firecut_core::{Factor, FactorWeights};
///
/// # fn main() -> Result<(), firecut_core::WeightsError> {
/// let weights = FactorWeights::new(0.25, 0.20, 0.20, 0.20, 0.15)?;
/// assert_eq!(weights.weight(Factor::Mortality), 0.25);
/// assert!(FactorWeights::new(0.25, 0.20, 0.20, 0.20, 0.10).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "FactorScores", into = "FactorScores")
)]
pub struct FactorWeights {
    weights: FactorScores,
}

impl FactorWeights {
    /// Validate and construct a weight set.
    ///
    /// # Errors
    /// Returns [`WeightsError`] when a weight is non-finite or non-positive,
    /// or when the weights do not sum to `1.0` within
    /// [`WEIGHT_SUM_TOLERANCE`].
    pub fn new(
        mortality: f64,
        community: f64,
        egress: f64,
        population: f64,
        utility: f64,
    ) -> Result<Self, WeightsError> {
        Self::try_from(FactorScores {
            mortality,
            community,
            egress,
            population,
            utility,
        })
    }

    /// Return the weight applied to `factor`.
    #[must_use]
    pub const fn weight(&self, factor: Factor) -> f64 {
        self.weights.get(factor)
    }

    /// Weighted sum of per-factor values.
    #[expect(
        clippy::float_arithmetic,
        reason = "combining factors is a weighted sum"
    )]
    #[must_use]
    pub fn combine(&self, values: &FactorScores) -> f64 {
        Factor::ALL
            .into_iter()
            .map(|factor| values.get(factor) * self.weight(factor))
            .sum()
    }

    /// Iterate over `(factor, weight)` pairs in scoring order.
    pub fn iter(&self) -> impl Iterator<Item = (Factor, f64)> + '_ {
        self.weights.iter()
    }
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            weights: FactorScores {
                mortality: 0.25,
                community: 0.20,
                egress: 0.20,
                population: 0.20,
                utility: 0.15,
            },
        }
    }
}

impl TryFrom<FactorScores> for FactorWeights {
    type Error = WeightsError;

    #[expect(
        clippy::float_arithmetic,
        reason = "validation compares the weight sum with one"
    )]
    fn try_from(weights: FactorScores) -> Result<Self, Self::Error> {
        for (factor, weight) in weights.iter() {
            if !weight.is_finite() {
                return Err(WeightsError::NonFinite { factor, weight });
            }
            if weight <= 0.0 {
                return Err(WeightsError::NonPositive { factor, weight });
            }
        }
        let sum: f64 = weights.iter().map(|(_, weight)| weight).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(WeightsError::InvalidSum { sum });
        }
        Ok(Self { weights })
    }
}

impl From<FactorWeights> for FactorScores {
    fn from(weights: FactorWeights) -> Self {
        weights.weights
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point scores within a tolerance"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_weights_are_valid() {
        let defaults = FactorWeights::default();
        let rebuilt = FactorWeights::try_from(FactorScores::from(defaults))
            .expect("default weights validate");
        assert_eq!(rebuilt, defaults);
    }

    #[rstest]
    #[case(0.25, 0.20, 0.20, 0.20, 0.10)]
    #[case(0.25, 0.20, 0.20, 0.20, 0.20)]
    #[case(0.30, 0.25, 0.20, 0.20, 0.10)]
    fn rejects_sums_away_from_one(
        #[case] mortality: f64,
        #[case] community: f64,
        #[case] egress: f64,
        #[case] population: f64,
        #[case] utility: f64,
    ) {
        let err = FactorWeights::new(mortality, community, egress, population, utility)
            .expect_err("sum must be rejected");
        assert!(matches!(err, WeightsError::InvalidSum { .. }));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-0.15)]
    fn rejects_non_positive_weights(#[case] utility: f64) {
        let err = FactorWeights::new(0.25, 0.20, 0.20, 0.35, utility)
            .expect_err("non-positive weight must be rejected");
        assert!(matches!(
            err,
            WeightsError::NonPositive {
                factor: Factor::Utility,
                ..
            }
        ));
    }

    #[rstest]
    fn rejects_nan_weight() {
        let err = FactorWeights::new(f64::NAN, 0.20, 0.20, 0.20, 0.15)
            .expect_err("NaN weight must be rejected");
        assert!(matches!(
            err,
            WeightsError::NonFinite {
                factor: Factor::Mortality,
                ..
            }
        ));
    }

    #[rstest]
    fn combine_applies_each_weight() {
        let weights = FactorWeights::default();
        let values = FactorScores {
            mortality: 10.0,
            community: 0.0,
            egress: 10.0,
            population: 0.0,
            utility: 10.0,
        };
        let combined = weights.combine(&values);
        assert!((combined - 6.0).abs() < 1e-9, "got {combined}");
    }
}
