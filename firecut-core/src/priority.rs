//! Ordinal priority bands and dense ranking of final scores.

use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordinal band derived from a cell's final `0..=10` priority.
///
/// Bands are half-open, `[0, 2)`, `[2, 4)`, `[4, 6)`, `[6, 8)`, with the top
/// band `[8, 10]` closed at both ends.
///
/// # Examples
/// ```
/// use firecut_core::PriorityClass;
///
/// assert_eq!(PriorityClass::from_score(0.0), PriorityClass::VeryLow);
/// assert_eq!(PriorityClass::from_score(2.0), PriorityClass::Low);
/// assert_eq!(PriorityClass::from_score(10.0), PriorityClass::VeryHigh);
/// assert!(PriorityClass::High > PriorityClass::Medium);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PriorityClass {
    /// Final score below 2.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "Very Low"))]
    VeryLow,
    /// Final score in `[2, 4)`.
    Low,
    /// Final score in `[4, 6)`.
    Medium,
    /// Final score in `[6, 8)`.
    High,
    /// Final score of 8 or more.
    #[cfg_attr(feature = "serde", serde(rename = "Very High"))]
    VeryHigh,
}

impl PriorityClass {
    /// Every class from lowest to highest.
    pub const ALL: [Self; 5] = [
        Self::VeryLow,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::VeryHigh,
    ];

    /// Classify a final priority score.
    ///
    /// NaN is treated as the lowest band.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score.is_nan() || score < 2.0 {
            Self::VeryLow
        } else if score < 4.0 {
            Self::Low
        } else if score < 6.0 {
            Self::Medium
        } else if score < 8.0 {
            Self::High
        } else {
            Self::VeryHigh
        }
    }

    /// Label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }

    /// Report whether the class belongs to the high-priority subset.
    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High | Self::VeryHigh)
    }
}

impl std::fmt::Display for PriorityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Dense ranks for `scores`, highest score first.
///
/// Equal scores share a rank and the next lower score takes the following
/// integer, so ranks run contiguously from `1`. NaN sorts below every number.
///
/// # Examples
/// ```
/// use firecut_core::dense_ranks;
///
/// assert_eq!(dense_ranks(&[3.0, 9.0, 3.0, 1.0]), vec![2, 1, 2, 3]);
/// ```
#[must_use]
pub fn dense_ranks(scores: &[f64]) -> Vec<u32> {
    let mut order: Vec<(usize, f64)> = scores.iter().copied().enumerate().collect();
    order.sort_by(|(left_pos, left), (right_pos, right)| {
        descending(*left, *right).then(left_pos.cmp(right_pos))
    });

    let mut ranks = vec![0_u32; scores.len()];
    let mut rank = 0_u32;
    let mut previous: Option<f64> = None;
    for (position, score) in order {
        if previous.is_none_or(|last| !same_score(last, score)) {
            rank = rank.saturating_add(1);
            previous = Some(score);
        }
        if let Some(slot) = ranks.get_mut(position) {
            *slot = rank;
        }
    }
    ranks
}

fn descending(left: f64, right: f64) -> Ordering {
    match (left.is_nan(), right.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => right.partial_cmp(&left).unwrap_or(Ordering::Equal),
    }
}

#[expect(
    clippy::float_cmp,
    reason = "dense ranking ties only exactly equal scores"
)]
fn same_score(left: f64, right: f64) -> bool {
    left == right || (left.is_nan() && right.is_nan())
}
