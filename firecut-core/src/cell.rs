//! Grid cells and the scores recorded against them.

use geo::Polygon;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{FactorScores, PriorityClass};

/// Scores accumulated for one cell during a run.
///
/// Every field starts at zero. `rank` stays `0` and `class` stays
/// [`PriorityClass::VeryLow`] until aggregation assigns them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellScores {
    /// Raw per-factor scores on their native scales.
    pub raw: FactorScores,
    /// Per-factor scores rescaled onto `0..=10`.
    pub normalised: FactorScores,
    /// Weighted sum of the normalised scores.
    pub overall: f64,
    /// Overall score rescaled onto `0..=10` across the grid.
    pub priority: f64,
    /// Band derived from `priority`.
    pub class: PriorityClass,
    /// Dense rank of `priority`, `1` being the highest.
    pub rank: u32,
}

/// One polygon of the analysis grid.
///
/// # Examples
/// ```
/// use firecut_core::GridCell;
/// use firecut_core::test_support::square;
///
/// let cell = GridCell::new(7, square(0.0, 0.0, 100.0));
/// assert_eq!(cell.id, 7);
/// assert_eq!(cell.scores.rank, 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridCell {
    /// Caller-assigned identifier, unique within a grid.
    pub id: u64,
    /// Cell polygon in the shared planar reference system.
    pub geometry: Polygon<f64>,
    /// Scores recorded by the engine.
    pub scores: CellScores,
}

impl GridCell {
    /// Construct an unscored cell.
    #[must_use]
    pub fn new(id: u64, geometry: Polygon<f64>) -> Self {
        Self {
            id,
            geometry,
            scores: CellScores::default(),
        }
    }
}
