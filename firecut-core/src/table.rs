//! The scored grid and read-only views over it.
//!
//! A [`ScoreTable`] is the engine's only output. It keeps cells in input
//! order; the views below never recompute scores.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Factor, GridCell, PriorityClass};

/// Scored cells in input order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct ScoreTable {
    cells: Vec<GridCell>,
}

/// Number and share of cells in one priority class.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassShare {
    /// Priority class counted.
    pub class: PriorityClass,
    /// Cells in the class.
    pub count: usize,
    /// Share of all cells, in percent.
    pub percentage: f64,
}

/// Cell counts per priority class, lowest class first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PriorityDistribution {
    /// One entry per class, every class present.
    pub shares: Vec<ClassShare>,
    /// Total number of cells.
    pub total: usize,
}

impl PriorityDistribution {
    /// Count recorded for `class`.
    #[must_use]
    pub fn count(&self, class: PriorityClass) -> usize {
        self.shares
            .iter()
            .find(|share| share.class == class)
            .map_or(0, |share| share.count)
    }
}

/// Range and mean of one factor's raw scores.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FactorSummary {
    /// Factor summarised.
    pub factor: Factor,
    /// Smallest raw score.
    pub min: f64,
    /// Largest raw score.
    pub max: f64,
    /// Mean raw score.
    pub mean: f64,
    /// Cells with a raw score above zero.
    pub positive: usize,
}

impl ScoreTable {
    /// Wrap scored cells.
    #[must_use]
    pub const fn new(cells: Vec<GridCell>) -> Self {
        Self { cells }
    }

    /// Cells in input order.
    #[must_use]
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Consume the table, returning its cells.
    #[must_use]
    pub fn into_cells(self) -> Vec<GridCell> {
        self.cells
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Report whether the table holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over cells in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, GridCell> {
        self.cells.iter()
    }

    /// Look up a cell by identifier.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&GridCell> {
        self.cells.iter().find(|cell| cell.id == id)
    }

    /// Cells classed High or Very High, in input order.
    ///
    /// # Examples
    /// ```
    /// use firecut_core::{GridCell, PriorityClass, ScoreTable};
    /// use firecut_core::test_support::square;
    ///
    /// let mut hot = GridCell::new(1, square(0.0, 0.0, 10.0));
    /// hot.scores.class = PriorityClass::VeryHigh;
    /// let cold = GridCell::new(2, square(10.0, 0.0, 10.0));
    /// let table = ScoreTable::new(vec![hot, cold]);
    /// let ids: Vec<u64> = table.high_priority().map(|cell| cell.id).collect();
    /// assert_eq!(ids, vec![1]);
    /// ```
    pub fn high_priority(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter().filter(|cell| cell.scores.class.is_high())
    }

    /// Up to `n` cells by rank, best first; ties keep input order.
    ///
    /// Unranked cells (rank `0`) sort after every ranked cell.
    #[must_use]
    pub fn top(&self, n: usize) -> Vec<&GridCell> {
        let mut ordered: Vec<&GridCell> = self.cells.iter().collect();
        ordered.sort_by_key(|cell| match cell.scores.rank {
            0 => u32::MAX,
            rank => rank,
        });
        ordered.truncate(n);
        ordered
    }

    /// Count and share of cells per priority class.
    #[expect(
        clippy::float_arithmetic,
        reason = "percentages are floating-point ratios"
    )]
    #[expect(
        clippy::cast_precision_loss,
        reason = "cell counts are far below 2^52"
    )]
    #[must_use]
    pub fn distribution(&self) -> PriorityDistribution {
        let total = self.cells.len();
        let shares = PriorityClass::ALL
            .into_iter()
            .map(|class| {
                let count = self
                    .cells
                    .iter()
                    .filter(|cell| cell.scores.class == class)
                    .count();
                let percentage = if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64 * 100.0
                };
                ClassShare {
                    class,
                    count,
                    percentage,
                }
            })
            .collect();
        PriorityDistribution { shares, total }
    }

    /// Range, mean and positive count of `factor`'s raw scores.
    ///
    /// Returns `None` for an empty table.
    #[expect(
        clippy::float_arithmetic,
        reason = "the mean is a floating-point average"
    )]
    #[expect(
        clippy::cast_precision_loss,
        reason = "cell counts are far below 2^52"
    )]
    #[must_use]
    pub fn factor_summary(&self, factor: Factor) -> Option<FactorSummary> {
        if self.cells.is_empty() {
            return None;
        }
        let values = self.cells.iter().map(|cell| cell.scores.raw.get(factor));
        let min = values.clone().fold(f64::INFINITY, f64::min);
        let max = values.clone().fold(f64::NEG_INFINITY, f64::max);
        let sum: f64 = values.clone().sum();
        let positive = values.filter(|value| *value > 0.0).count();
        Some(FactorSummary {
            factor,
            min,
            max,
            mean: sum / self.cells.len() as f64,
            positive,
        })
    }
}

impl IntoIterator for ScoreTable {
    type Item = GridCell;
    type IntoIter = std::vec::IntoIter<GridCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl<'a> IntoIterator for &'a ScoreTable {
    type Item = &'a GridCell;
    type IntoIter = std::slice::Iter<'a, GridCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point scores within a tolerance"
)]
mod tests {
    use super::*;
    use crate::test_support::square;
    use rstest::{fixture, rstest};

    fn scored(id: u64, mortality: f64, rank: u32, class: PriorityClass) -> GridCell {
        let mut cell = GridCell::new(id, square(0.0, 0.0, 10.0));
        cell.scores.raw.mortality = mortality;
        cell.scores.rank = rank;
        cell.scores.class = class;
        cell
    }

    #[fixture]
    fn table() -> ScoreTable {
        ScoreTable::new(vec![
            scored(10, 0.0, 3, PriorityClass::VeryLow),
            scored(11, 6.0, 1, PriorityClass::VeryHigh),
            scored(12, 2.0, 2, PriorityClass::High),
            scored(13, 4.0, 1, PriorityClass::VeryHigh),
        ])
    }

    #[rstest]
    fn top_orders_by_rank_with_stable_ties(table: ScoreTable) {
        let ids: Vec<u64> = table.top(3).into_iter().map(|cell| cell.id).collect();
        assert_eq!(ids, vec![11, 13, 12]);
    }

    #[rstest]
    fn top_larger_than_table_returns_everything(table: ScoreTable) {
        assert_eq!(table.top(50).len(), 4);
    }

    #[rstest]
    fn high_priority_keeps_input_order(table: ScoreTable) {
        let ids: Vec<u64> = table.high_priority().map(|cell| cell.id).collect();
        assert_eq!(ids, vec![11, 12, 13]);
    }

    #[rstest]
    fn distribution_counts_every_class(table: ScoreTable) {
        let distribution = table.distribution();
        assert_eq!(distribution.total, 4);
        assert_eq!(distribution.shares.len(), 5);
        assert_eq!(distribution.count(PriorityClass::VeryHigh), 2);
        assert_eq!(distribution.count(PriorityClass::Medium), 0);
        let very_low = distribution
            .shares
            .first()
            .map(|share| share.percentage)
            .unwrap_or_default();
        assert!((very_low - 25.0).abs() < 1e-9);
    }

    #[rstest]
    fn factor_summary_reports_range_mean_and_positive(table: ScoreTable) {
        let summary = table
            .factor_summary(Factor::Mortality)
            .expect("non-empty table");
        assert_eq!(summary.min, 0.0);
        assert_eq!(summary.max, 6.0);
        assert!((summary.mean - 3.0).abs() < 1e-9);
        assert_eq!(summary.positive, 3);
    }

    #[rstest]
    fn empty_table_has_no_summary() {
        let table = ScoreTable::default();
        assert!(table.factor_summary(Factor::Egress).is_none());
        assert_eq!(table.distribution().total, 0);
        assert!(table.top(10).is_empty());
    }

    #[rstest]
    fn get_finds_cells_by_id(table: ScoreTable) {
        assert_eq!(table.get(12).map(|cell| cell.scores.rank), Some(2));
        assert!(table.get(99).is_none());
    }
}
