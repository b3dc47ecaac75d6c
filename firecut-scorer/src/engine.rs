//! End-to-end scoring pipeline.
//!
//! The engine builds one scorer per factor over the reference layers, scores
//! every cell, then hands the grid to the [`PriorityAggregator`]. Each factor
//! is scored for the whole grid before the next starts, and aggregation only
//! begins once all five raw scores exist.

use firecut_core::{Factor, FactorScorer, Footprint, GridCell, ReferenceLayers, ScoreTable};
use log::{debug, info};

use crate::{
    ConfigError, MortalityScorer, PopulationScorer, PriorityAggregator, ProximityScorer,
    ScoringConfig,
};

/// Scores grid cells against reference layers.
///
/// # Examples
/// ```
/// use firecut_core::test_support::{cell_row, feature_with, square};
/// use firecut_core::{PriorityClass, ReferenceLayers};
/// use firecut_scorer::PriorityEngine;
/// use serde_json::json;
///
/// let mut layers = ReferenceLayers::default();
/// layers
///     .mortality
///     .push(feature_with(square(0.0, 0.0, 100.0), "MORT", json!(9)));
///
/// let engine = PriorityEngine::default();
/// let table = engine.run(cell_row(3, 100.0), &layers);
/// let top = table.top(1);
/// assert_eq!(top.first().map(|cell| cell.id), Some(1));
/// assert_eq!(top.first().map(|cell| cell.scores.class), Some(PriorityClass::VeryHigh));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PriorityEngine {
    config: ScoringConfig,
}

impl PriorityEngine {
    /// Engine using `config`.
    #[must_use]
    pub const fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Engine configured from a JSON document.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the document is invalid.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        ScoringConfig::from_json_str(json).map(Self::new)
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score `cells` against `layers` and return the ranked table.
    ///
    /// Cells keep their input order. Any scores already present on the cells
    /// are overwritten.
    #[must_use]
    pub fn run(&self, mut cells: Vec<GridCell>, layers: &ReferenceLayers) -> ScoreTable {
        self.score_factors(&mut cells, layers);

        let aggregator = PriorityAggregator::new(self.config.weights);
        for (factor, weight) in aggregator.weights().iter() {
            debug!("weighting {factor} at {weight}");
        }
        aggregator.aggregate(&mut cells);

        let table = ScoreTable::new(cells);
        log_summary(&table);
        table
    }

    /// Compute the five raw factor scores for every cell without
    /// aggregating them.
    pub fn score_factors(&self, cells: &mut [GridCell], layers: &ReferenceLayers) {
        let footprints: Vec<Footprint> = cells
            .iter()
            .map(|cell| Footprint::new(&cell.geometry))
            .collect();
        let selectors = &self.config.selectors;
        let scorers: [Box<dyn FactorScorer + '_>; 5] = [
            Box::new(MortalityScorer::new(
                &layers.mortality,
                selectors.mortality.clone(),
            )),
            Box::new(ProximityScorer::community(
                &layers.community,
                selectors.community.clone(),
            )),
            Box::new(ProximityScorer::egress(
                &layers.egress,
                selectors.egress.clone(),
            )),
            Box::new(PopulationScorer::new(
                &layers.populated,
                selectors.population.clone(),
            )),
            Box::new(ProximityScorer::utilities(&layers.utilities)),
        ];

        for scorer in &scorers {
            let factor = scorer.factor();
            debug!("scoring {factor} for {} cells", cells.len());
            let raw = score_all(scorer.as_ref(), &footprints);
            for (cell, value) in cells.iter_mut().zip(raw) {
                cell.scores.raw.set(factor, value);
            }
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn score_all(scorer: &dyn FactorScorer, footprints: &[Footprint]) -> Vec<f64> {
    footprints
        .iter()
        .map(|footprint| scorer.score(footprint))
        .collect()
}

#[cfg(feature = "parallel")]
fn score_all(scorer: &dyn FactorScorer, footprints: &[Footprint]) -> Vec<f64> {
    use rayon::prelude::*;

    footprints
        .par_iter()
        .map(|footprint| scorer.score(footprint))
        .collect()
}

fn log_summary(table: &ScoreTable) {
    for factor in Factor::ALL {
        if let Some(summary) = table.factor_summary(factor) {
            info!(
                "{}: range {:.2} - {:.2}, mean {:.2}, {} cells above zero",
                factor.label(),
                summary.min,
                summary.max,
                summary.mean,
                summary.positive
            );
        }
    }
    let distribution = table.distribution();
    for share in &distribution.shares {
        info!(
            "{:>9}: {:4} cells ({:5.1}%)",
            share.class.label(),
            share.count,
            share.percentage
        );
    }
    info!("priority calculated for {} cells", distribution.total);
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point scores within a tolerance"
)]
mod tests {
    use super::*;
    use firecut_core::test_support::{cell_row, feature_with, line_feature, rectangle, square};
    use firecut_core::{PriorityClass, UtilityKind};
    use geo::{Coord, Point};
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn layers() -> ReferenceLayers {
        let mut layers = ReferenceLayers::default();
        layers
            .mortality
            .push(feature_with(square(5.0, 5.0, 90.0), "MORT_VALUE", json!(6)));
        layers
            .community
            .push(feature_with(Point::new(250.0, 50.0), "IMPORTANCE", json!(8)));
        layers.egress.push(line_feature(
            (0.0, -30.0),
            (400.0, -30.0),
            "ROUTE_CLASS",
            json!(4),
        ));
        layers
            .populated
            .push(feature_with(
                rectangle(Coord { x: 210.0, y: 0.0 }, Coord { x: 400.0, y: 100.0 }),
                "POP_DENS",
                json!(3),
            ));
        layers
            .utilities
            .layer_mut(UtilityKind::Substation)
            .push(feature_with(Point::new(350.0, 50.0), "NAME", json!("north")));
        layers
    }

    fn assert_close(got: &[f64], want: &[f64]) {
        assert_eq!(got.len(), want.len());
        for (value, expected) in got.iter().zip(want) {
            assert!((value - expected).abs() < 1e-9, "got {got:?}, want {want:?}");
        }
    }

    fn raw(cells: &[GridCell], factor: Factor) -> Vec<f64> {
        cells.iter().map(|cell| cell.scores.raw.get(factor)).collect()
    }

    #[rstest]
    fn raw_scores_follow_each_factor(layers: ReferenceLayers) {
        let mut cells = cell_row(4, 100.0);
        PriorityEngine::default().score_factors(&mut cells, &layers);
        assert_close(&raw(&cells, Factor::Mortality), &[6.0, 0.0, 0.0, 0.0]);
        // 8 * 0.5 * (1 - 50 / 200) at 150 m, 8 * (1 - 50 / 100) at 50 m
        assert_close(&raw(&cells, Factor::Community), &[3.0, 4.0, 8.0, 4.0]);
        // 4 * (1 - 30 / 50) for every cell
        assert_close(&raw(&cells, Factor::Egress), &[1.6, 1.6, 1.6, 1.6]);
        assert_close(&raw(&cells, Factor::Population), &[0.0, 0.0, 2.7, 3.0]);
        // 10 * 0.5 * (1 - 20 / 70) at 50 m
        assert_close(
            &raw(&cells, Factor::Utility),
            &[0.0, 0.0, 5.0 * (50.0 / 70.0), 10.0],
        );
    }

    #[rstest]
    fn run_assigns_ranks_and_classes(layers: ReferenceLayers) {
        let table = PriorityEngine::default().run(cell_row(4, 100.0), &layers);
        assert_eq!(table.len(), 4);
        let ids: Vec<u64> = table.iter().map(|cell| cell.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(table.iter().all(|cell| cell.scores.rank >= 1));
        let best = table.top(1);
        assert_eq!(best.first().map(|cell| cell.scores.priority), Some(10.0));
        assert_eq!(
            best.first().map(|cell| cell.scores.class),
            Some(PriorityClass::VeryHigh)
        );
    }

    #[rstest]
    fn empty_grid_yields_empty_table(layers: ReferenceLayers) {
        let table = PriorityEngine::default().run(Vec::new(), &layers);
        assert!(table.is_empty());
    }

    #[rstest]
    fn configuration_is_applied() {
        let engine = PriorityEngine::from_json_str(
            r#"{"selectors": {"mortality": {"tokens": ["severity"], "default": 2.0}}}"#,
        )
        .expect("valid configuration");
        let mut layers = ReferenceLayers::default();
        layers
            .mortality
            .push(feature_with(square(0.0, 0.0, 100.0), "MORT_VALUE", json!(6)));
        let mut cells = cell_row(1, 100.0);
        engine.score_factors(&mut cells, &layers);
        assert_eq!(cells.first().map(|cell| cell.scores.raw.mortality), Some(2.0));
    }
}
