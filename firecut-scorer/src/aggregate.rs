//! Turn raw factor scores into final priorities, classes and ranks.

use firecut_core::{
    Direction, Factor, FactorWeights, GridCell, PriorityClass, dense_ranks, normalise,
};

/// Normalises, weights, re-normalises, classifies and ranks a grid.
///
/// Every step depends on the whole grid, so aggregation runs once all raw
/// scores are in place.
///
/// # Examples
/// ```
/// use firecut_core::test_support::cell_row;
/// use firecut_core::{FactorWeights, PriorityClass};
/// use firecut_scorer::PriorityAggregator;
///
/// let mut cells = cell_row(3, 100.0);
/// for (cell, mortality) in cells.iter_mut().zip([0.0, 2.0, 8.0]) {
///     cell.scores.raw.mortality = mortality;
/// }
/// PriorityAggregator::new(FactorWeights::default()).aggregate(&mut cells);
/// let ranks: Vec<u32> = cells.iter().map(|cell| cell.scores.rank).collect();
/// assert_eq!(ranks, vec![3, 2, 1]);
/// assert_eq!(cells[2].scores.class, PriorityClass::VeryHigh);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriorityAggregator {
    weights: FactorWeights,
}

impl PriorityAggregator {
    /// Aggregator applying `weights`.
    #[must_use]
    pub const fn new(weights: FactorWeights) -> Self {
        Self { weights }
    }

    /// Weights in use.
    #[must_use]
    pub const fn weights(&self) -> FactorWeights {
        self.weights
    }

    /// Fill in normalised scores, overall score, priority, class and rank
    /// for every cell from its raw scores.
    pub fn aggregate(&self, cells: &mut [GridCell]) {
        for factor in Factor::ALL {
            let raw: Vec<f64> = cells.iter().map(|cell| cell.scores.raw.get(factor)).collect();
            let scaled = normalise(&raw, Direction::Ascending);
            for (cell, value) in cells.iter_mut().zip(scaled) {
                cell.scores.normalised.set(factor, value);
            }
        }

        let overall: Vec<f64> = cells
            .iter()
            .map(|cell| self.weights.combine(&cell.scores.normalised))
            .collect();
        let priorities = normalise(&overall, Direction::Ascending);
        let ranks = dense_ranks(&priorities);

        for (((cell, overall_score), priority), rank) in
            cells.iter_mut().zip(overall).zip(priorities).zip(ranks)
        {
            cell.scores.overall = overall_score;
            cell.scores.priority = priority;
            cell.scores.class = PriorityClass::from_score(priority);
            cell.scores.rank = rank;
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point scores within a tolerance"
)]
mod tests {
    use super::*;
    use firecut_core::test_support::cell_row;
    use rstest::rstest;

    #[rstest]
    fn uniform_grid_is_flat_and_shares_rank_one() {
        let mut cells = cell_row(4, 10.0);
        PriorityAggregator::default().aggregate(&mut cells);
        for cell in &cells {
            assert_eq!(cell.scores.normalised.mortality, 5.0);
            assert_eq!(cell.scores.priority, 5.0);
            assert_eq!(cell.scores.class, PriorityClass::Medium);
            assert_eq!(cell.scores.rank, 1);
        }
    }

    #[rstest]
    fn weights_shape_the_overall_score() {
        let mut cells = cell_row(2, 10.0);
        if let [first, second] = cells.as_mut_slice() {
            first.scores.raw.mortality = 1.0;
            second.scores.raw.utility = 1.0;
        }
        PriorityAggregator::default().aggregate(&mut cells);
        let overall: Vec<f64> = cells.iter().map(|cell| cell.scores.overall).collect();
        // Each cell is 10 on one factor and 0 on the other; the remaining
        // three factors are flat at 5.
        let shared = 5.0 * (0.20 + 0.20 + 0.20);
        let expected = [shared + 2.5, shared + 1.5];
        for (got, want) in overall.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
        }
        let ranks: Vec<u32> = cells.iter().map(|cell| cell.scores.rank).collect();
        assert_eq!(ranks, vec![1, 2]);
        let priorities: Vec<f64> = cells.iter().map(|cell| cell.scores.priority).collect();
        assert_eq!(priorities, vec![10.0, 0.0]);
    }

    #[rstest]
    fn empty_grid_is_a_no_op() {
        let mut cells: Vec<GridCell> = Vec::new();
        PriorityAggregator::default().aggregate(&mut cells);
        assert!(cells.is_empty());
    }
}
