//! Property-based tests for normalisation and dense ranking.
//!
//! # Invariants tested
//!
//! - **Bounds:** normalised values lie within `0..=10`.
//! - **Monotonicity:** ascending normalisation preserves order and inverse
//!   normalisation reverses it.
//! - **Extremes:** the minimum maps to `0` and the maximum to `10`, swapped
//!   for the inverse direction.
//! - **Flat input:** constant sequences map to exactly `5.0`.
//! - **Dense ranks:** equal scores share a rank, higher scores rank lower,
//!   and ranks run contiguously from `1`.

use std::collections::BTreeSet;

use firecut_core::{Direction, FLAT_SCORE, SCALE_MAX, dense_ranks, normalise};
use proptest::prelude::*;

fn finite_values() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(-1.0e6_f64..1.0e6_f64, 1..40)
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Ascending), Just(Direction::Inverse)]
}

fn extremes(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &value| {
            (lo.min(value), hi.max(value))
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: every output lies on the shared scale and lengths match.
    #[test]
    fn normalised_values_stay_in_range(values in finite_values(), direction in direction()) {
        let normalised = normalise(&values, direction);
        prop_assert_eq!(normalised.len(), values.len());
        for value in normalised {
            prop_assert!((0.0..=SCALE_MAX).contains(&value), "out of range: {}", value);
        }
    }

    /// Property: ordering is preserved, or reversed for the inverse direction.
    #[test]
    fn normalisation_is_monotonic(values in finite_values(), direction in direction()) {
        let normalised = normalise(&values, direction);
        for (left, right) in values.iter().zip(&normalised) {
            for (other, other_normalised) in values.iter().zip(&normalised) {
                if left < other {
                    match direction {
                        Direction::Ascending => prop_assert!(right <= other_normalised),
                        Direction::Inverse => prop_assert!(right >= other_normalised),
                    }
                }
            }
        }
    }

    /// Property: the extremes of a non-flat sequence hit the ends of the scale.
    #[test]
    fn extremes_map_to_scale_ends(values in finite_values(), direction in direction()) {
        let (lo, hi) = extremes(&values);
        prop_assume!(lo < hi);
        let normalised = normalise(&values, direction);
        let (low_end, high_end) = match direction {
            Direction::Ascending => (0.0, SCALE_MAX),
            Direction::Inverse => (SCALE_MAX, 0.0),
        };
        for (value, scaled) in values.iter().zip(&normalised) {
            if *value == lo {
                prop_assert_eq!(*scaled, low_end);
            }
            if *value == hi {
                prop_assert_eq!(*scaled, high_end);
            }
        }
    }

    /// Property: constant input maps to the flat score everywhere.
    #[test]
    fn constant_input_is_flat(value in -1.0e6_f64..1.0e6_f64, len in 1_usize..30, direction in direction()) {
        let normalised = normalise(&vec![value; len], direction);
        prop_assert!(normalised.iter().all(|scaled| *scaled == FLAT_SCORE));
    }

    /// Property: dense ranks agree with score order and leave no gaps.
    #[test]
    fn dense_ranks_are_consistent(scores in proptest::collection::vec(0_u8..12, 0..40)) {
        let values: Vec<f64> = scores.iter().map(|score| f64::from(*score)).collect();
        let ranks = dense_ranks(&values);
        prop_assert_eq!(ranks.len(), values.len());

        for (score, rank) in values.iter().zip(&ranks) {
            for (other_score, other_rank) in values.iter().zip(&ranks) {
                if score == other_score {
                    prop_assert_eq!(rank, other_rank);
                } else if score > other_score {
                    prop_assert!(rank < other_rank);
                }
            }
        }

        let distinct: BTreeSet<u32> = ranks.iter().copied().collect();
        let expected: BTreeSet<u32> = (1..=u32::try_from(distinct.len()).unwrap_or(u32::MAX)).collect();
        prop_assert_eq!(distinct, expected);
    }
}

#[test]
fn empty_and_all_nan_inputs() {
    assert!(normalise(&[], Direction::Inverse).is_empty());
    assert_eq!(
        normalise(&[f64::NAN; 3], Direction::Ascending),
        vec![0.0, 0.0, 0.0]
    );
}
