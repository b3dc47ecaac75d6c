//! Min-max rescaling of score sequences onto the shared `0..=10` scale.

/// Upper end of the normalised scale.
pub const SCALE_MAX: f64 = 10.0;

/// Score assigned to every entry of a flat sequence.
pub const FLAT_SCORE: f64 = 5.0;

/// Orientation of the rescaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// The smallest input maps to `0` and the largest to `10`.
    #[default]
    Ascending,
    /// The smallest input maps to `10` and the largest to `0`.
    Inverse,
}

/// Rescale `values` onto `0..=10`.
///
/// Non-finite entries are ignored when locating the range and map to `0.0`.
/// A sequence with no finite entries maps to all zeros, and a sequence whose
/// finite entries are all equal maps to [`FLAT_SCORE`] throughout. The input
/// is never modified.
///
/// # Examples
/// ```
/// use firecut_core::{Direction, normalise};
///
/// assert_eq!(normalise(&[2.0, 4.0, 6.0], Direction::Ascending), vec![0.0, 5.0, 10.0]);
/// assert_eq!(normalise(&[2.0, 4.0, 6.0], Direction::Inverse), vec![10.0, 5.0, 0.0]);
/// assert_eq!(normalise(&[3.0, 3.0], Direction::Ascending), vec![5.0, 5.0]);
/// assert!(normalise(&[], Direction::Ascending).is_empty());
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "min-max scaling is floating-point arithmetic"
)]
#[must_use]
pub fn normalise(values: &[f64], direction: Direction) -> Vec<f64> {
    let Some((lo, hi)) = finite_range(values) else {
        return vec![0.0; values.len()];
    };
    if lo == hi {
        return values
            .iter()
            .map(|value| if value.is_finite() { FLAT_SCORE } else { 0.0 })
            .collect();
    }
    let span = hi - lo;
    values
        .iter()
        .map(|&value| {
            if !value.is_finite() {
                return 0.0;
            }
            let scaled = (value - lo) / span * SCALE_MAX;
            match direction {
                Direction::Ascending => scaled,
                Direction::Inverse => SCALE_MAX - scaled,
            }
        })
        .collect()
}

fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|value| value.is_finite())
        .fold(None, |range, value| match range {
            None => Some((value, value)),
            Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn all_nan_maps_to_zero() {
        assert_eq!(
            normalise(&[f64::NAN, f64::NAN], Direction::Ascending),
            vec![0.0, 0.0]
        );
    }

    #[rstest]
    fn nan_entries_are_ignored_for_range() {
        let result = normalise(&[1.0, f64::NAN, 3.0], Direction::Ascending);
        assert_eq!(result, vec![0.0, 0.0, 10.0]);
    }

    #[rstest]
    fn flat_input_with_gaps_is_average() {
        let result = normalise(&[7.0, f64::INFINITY, 7.0], Direction::Inverse);
        assert_eq!(result, vec![5.0, 0.0, 5.0]);
    }

    #[rstest]
    fn input_is_left_untouched() {
        let input = vec![4.0, 1.0, 9.0];
        let snapshot = input.clone();
        let normalised = normalise(&input, Direction::Inverse);
        assert_eq!(input, snapshot);
        assert_eq!(normalised, vec![6.25, 10.0, 0.0]);
    }

    #[rstest]
    #[case(Direction::Ascending, vec![0.0, 2.5, 10.0])]
    #[case(Direction::Inverse, vec![10.0, 7.5, 0.0])]
    fn scales_linearly(#[case] direction: Direction, #[case] expected: Vec<f64>) {
        assert_eq!(normalise(&[-2.0, 0.0, 6.0], direction), expected);
    }
}
