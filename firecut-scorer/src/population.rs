//! Exposure of populated areas, accumulated by covered fraction.

use firecut_core::{AttributeSelector, Factor, FactorScorer, Footprint, LayerIndex, ReferenceLayer};

/// Scores a cell by the population density covering it.
///
/// Each intersecting area adds `shared_area / cell_area * density`, so
/// overlapping populated polygons accumulate. Cells with no area score
/// `0.0`.
#[derive(Debug)]
pub struct PopulationScorer<'a> {
    index: LayerIndex<'a>,
    selector: AttributeSelector,
}

impl<'a> PopulationScorer<'a> {
    /// Index `layer` and read densities with `selector`.
    #[must_use]
    pub fn new(layer: &'a ReferenceLayer, selector: AttributeSelector) -> Self {
        Self {
            index: LayerIndex::build(layer),
            selector,
        }
    }
}

impl FactorScorer for PopulationScorer<'_> {
    fn factor(&self) -> Factor {
        Factor::Population
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "exposure is a sum of density-weighted area ratios"
    )]
    fn score(&self, cell: &Footprint) -> f64 {
        let area = cell.area();
        let Some(bounds) = cell.bounds().filter(|_| area > 0.0) else {
            return 0.0;
        };
        let mut exposure = 0.0;
        for feature in self.index.candidates(bounds, 0.0) {
            if !cell.intersects(&feature.geometry) {
                continue;
            }
            let shared = cell.intersection_area(&feature.geometry);
            exposure += shared / area * self.selector.resolve(&feature.attributes);
        }
        Self::sanitise(exposure)
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point scores within a tolerance"
)]
mod tests {
    use super::*;
    use firecut_core::test_support::{feature_with, rectangle, square};
    use geo::{Coord, LineString, Polygon};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn overlapping_areas_accumulate() {
        let layer = ReferenceLayer::new(
            "populated_areas",
            vec![
                feature_with(square(-10.0, -10.0, 40.0), "POP_DENSITY", json!(6)),
                feature_with(
                    rectangle(Coord { x: 0.0, y: 0.0 }, Coord { x: 5.0, y: 10.0 }),
                    "POP_DENSITY",
                    json!(4),
                ),
            ],
        );
        let scorer = PopulationScorer::new(&layer, AttributeSelector::population());
        let score = scorer.score(&Footprint::new(&square(0.0, 0.0, 10.0)));
        assert!((score - 8.0).abs() < 1e-9, "got {score}");
    }

    #[rstest]
    fn negative_densities_pass_through() {
        let layer = ReferenceLayer::new(
            "populated_areas",
            vec![feature_with(square(0.0, 0.0, 10.0), "POP", json!(-4))],
        );
        let scorer = PopulationScorer::new(&layer, AttributeSelector::population());
        let score = scorer.score(&Footprint::new(&square(0.0, 0.0, 10.0)));
        assert!((score + 4.0).abs() < 1e-9, "got {score}");
    }

    #[rstest]
    fn degenerate_cell_scores_zero() {
        let layer = ReferenceLayer::new(
            "populated_areas",
            vec![feature_with(square(0.0, 0.0, 10.0), "PEOPLE", json!(50))],
        );
        let scorer = PopulationScorer::new(&layer, AttributeSelector::population());
        let empty = Footprint::new(&Polygon::new(LineString::new(vec![]), vec![]));
        assert_eq!(scorer.factor(), Factor::Population);
        assert_eq!(scorer.score(&empty), 0.0);
    }

    #[rstest]
    fn disjoint_areas_score_zero() {
        let layer = ReferenceLayer::new(
            "populated_areas",
            vec![feature_with(square(50.0, 50.0, 10.0), "DENS", json!(9))],
        );
        let scorer = PopulationScorer::new(&layer, AttributeSelector::population());
        assert_eq!(scorer.score(&Footprint::new(&square(0.0, 0.0, 10.0))), 0.0);
    }
}
