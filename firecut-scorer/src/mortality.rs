//! Area-weighted overlay of tree mortality polygons.

use firecut_core::{AttributeSelector, Factor, FactorScorer, Footprint, LayerIndex, ReferenceLayer};

/// Scores a cell by the mortality magnitude of the polygons covering it,
/// weighted by how much of each polygon falls inside the cell.
///
/// The raw score is `Σ(mᵢ·aᵢ) / Σaᵢ` over intersecting features, where `aᵢ`
/// is the shared area. Cells with no shared area score `0.0`.
///
/// # Examples
/// ```
/// use firecut_core::test_support::{feature_with, square};
/// use firecut_core::{AttributeSelector, FactorScorer, Footprint, ReferenceLayer};
/// use firecut_scorer::MortalityScorer;
/// use serde_json::json;
///
/// let layer = ReferenceLayer::new(
///     "tree_mortality",
///     vec![feature_with(square(-50.0, -50.0, 200.0), "TPA_MORT", json!(7.5))],
/// );
/// let scorer = MortalityScorer::new(&layer, AttributeSelector::mortality());
/// let cell = Footprint::new(&square(0.0, 0.0, 100.0));
/// assert!((scorer.score(&cell) - 7.5).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct MortalityScorer<'a> {
    index: LayerIndex<'a>,
    selector: AttributeSelector,
}

impl<'a> MortalityScorer<'a> {
    /// Index `layer` and read magnitudes with `selector`.
    #[must_use]
    pub fn new(layer: &'a ReferenceLayer, selector: AttributeSelector) -> Self {
        Self {
            index: LayerIndex::build(layer),
            selector,
        }
    }
}

impl FactorScorer for MortalityScorer<'_> {
    fn factor(&self) -> Factor {
        Factor::Mortality
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "the overlay is an area-weighted mean"
    )]
    fn score(&self, cell: &Footprint) -> f64 {
        let Some(bounds) = cell.bounds() else {
            return 0.0;
        };
        let mut weighted = 0.0;
        let mut covered = 0.0;
        for feature in self.index.candidates(bounds, 0.0) {
            if !cell.intersects(&feature.geometry) {
                continue;
            }
            let shared = cell.intersection_area(&feature.geometry);
            if shared <= 0.0 {
                continue;
            }
            weighted += self.selector.resolve(&feature.attributes) * shared;
            covered += shared;
        }
        if covered > 0.0 {
            Self::sanitise(weighted / covered)
        } else {
            0.0
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
    use firecut_core::test_support::{feature_with, point_feature, rectangle, square};
    use geo::Coord;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn cell() -> Footprint {
        Footprint::new(&square(0.0, 0.0, 10.0))
    }

    #[rstest]
    fn weights_magnitudes_by_shared_area(cell: Footprint) {
        let layer = ReferenceLayer::new(
            "tree_mortality",
            vec![
                feature_with(
                    rectangle(Coord { x: 0.0, y: 0.0 }, Coord { x: 6.0, y: 10.0 }),
                    "MORT_RATE",
                    json!(4),
                ),
                feature_with(
                    rectangle(Coord { x: 6.0, y: 0.0 }, Coord { x: 10.0, y: 10.0 }),
                    "MORT_RATE",
                    json!(8),
                ),
            ],
        );
        let scorer = MortalityScorer::new(&layer, AttributeSelector::mortality());
        let score = scorer.score(&cell);
        assert!((score - 5.6).abs() < 1e-9, "got {score}");
    }

    #[rstest]
    fn missing_magnitude_counts_as_no_mortality(cell: Footprint) {
        let layer = ReferenceLayer::new(
            "tree_mortality",
            vec![feature_with(square(0.0, 0.0, 10.0), "NAME", json!("stand 12"))],
        );
        let scorer = MortalityScorer::new(&layer, AttributeSelector::mortality());
        assert_eq!(scorer.score(&cell), 0.0);
    }

    #[rstest]
    fn edge_contact_and_points_contribute_nothing(cell: Footprint) {
        let layer = ReferenceLayer::new(
            "tree_mortality",
            vec![
                feature_with(square(10.0, 0.0, 10.0), "MORT", json!(9)),
                point_feature(5.0, 5.0),
            ],
        );
        let scorer = MortalityScorer::new(&layer, AttributeSelector::mortality());
        assert_eq!(scorer.score(&cell), 0.0);
    }

    #[rstest]
    fn negative_magnitudes_pass_through(cell: Footprint) {
        let layer = ReferenceLayer::new(
            "tree_mortality",
            vec![feature_with(square(0.0, 0.0, 10.0), "MORT", json!(-2))],
        );
        let scorer = MortalityScorer::new(&layer, AttributeSelector::mortality());
        let score = scorer.score(&cell);
        assert!((score + 2.0).abs() < 1e-9, "got {score}");
    }

    #[rstest]
    fn empty_layer_scores_zero(cell: Footprint) {
        let layer = ReferenceLayer::empty("tree_mortality");
        let scorer = MortalityScorer::new(&layer, AttributeSelector::mortality());
        assert_eq!(scorer.factor(), Factor::Mortality);
        assert_eq!(scorer.score(&cell), 0.0);
    }
}
