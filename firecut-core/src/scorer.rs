//! Score grid cells against one risk factor.
//!
//! The `FactorScorer` trait computes a raw, unnormalised score for a cell's
//! [`Footprint`](crate::Footprint). Normalisation happens later, across the
//! whole grid, so implementations only see one cell at a time.

use crate::{Factor, Footprint};

/// Calculate a raw score for one factor.
///
/// Implementations must be thread-safe (`Send` + `Sync`) so cells can be
/// scored across threads. The method is infallible; implementers must return
/// `0.0` when nothing in their reference layers affects the cell.
///
/// Implementations must produce finite (`f64::is_finite`) scores; use
/// [`FactorScorer::sanitise`] to apply that guard. Negative magnitudes in the
/// reference data yield negative raw scores and are left for normalisation
/// to place.
///
/// # Examples
///
/// ```rust
/// use firecut_core::{Factor, FactorScorer, Footprint};
/// use firecut_core::test_support::square;
///
/// struct AreaScorer;
///
/// impl FactorScorer for AreaScorer {
///     fn factor(&self) -> Factor {
///         Factor::Mortality
///     }
///
///     fn score(&self, cell: &Footprint) -> f64 {
///         Self::sanitise(cell.area())
///     }
/// }
///
/// let cell = Footprint::new(&square(0.0, 0.0, 2.0));
/// assert_eq!(AreaScorer.score(&cell), 4.0);
/// ```
pub trait FactorScorer: Send + Sync {
    /// Factor whose raw score this scorer produces.
    fn factor(&self) -> Factor;

    /// Return the raw score for `cell`.
    fn score(&self, cell: &Footprint) -> f64;

    /// Validate a raw score.
    ///
    /// Returns `0.0` for non-finite values and `score` otherwise.
    fn sanitise(score: f64) -> f64
    where
        Self: Sized,
    {
        if score.is_finite() { score } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::square;
    use rstest::rstest;

    struct Fixed(f64);

    impl FactorScorer for Fixed {
        fn factor(&self) -> Factor {
            Factor::Egress
        }

        fn score(&self, _cell: &Footprint) -> f64 {
            Self::sanitise(self.0)
        }
    }

    #[rstest]
    #[case(3.5, 3.5)]
    #[case(-1.0, -1.0)]
    #[case(f64::NAN, 0.0)]
    #[case(f64::INFINITY, 0.0)]
    fn sanitise_guards_raw_scores(#[case] raw: f64, #[case] expected: f64) {
        let cell = Footprint::new(&square(0.0, 0.0, 1.0));
        assert_eq!(Fixed(raw).score(&cell), expected);
    }

    #[rstest]
    fn scorers_are_object_safe() {
        let scorers: Vec<Box<dyn FactorScorer>> = vec![Box::new(Fixed(1.0))];
        let factors: Vec<Factor> = scorers.iter().map(|scorer| scorer.factor()).collect();
        assert_eq!(factors, vec![Factor::Egress]);
    }
}
