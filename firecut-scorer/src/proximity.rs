//! Distance-decay scoring for community features, egress routes and
//! electric utilities.
//!
//! The three factors differ only in their decay radii and in where each
//! feature's magnitude comes from, so one scorer serves all of them. The raw
//! score is the largest single contribution; nearby hazards do not add up.

use firecut_core::{
    AttributeSelector, Factor, FactorScorer, Footprint, LayerIndex, ReferenceFeature,
    ReferenceLayer, UtilityLayers,
};

use crate::DecayProfile;

/// Where a feature's hazard magnitude comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum MagnitudeSource {
    /// Read from the feature's attributes.
    Attribute(AttributeSelector),
    /// Shared by every feature of the layer.
    Fixed(f64),
}

impl MagnitudeSource {
    fn magnitude(&self, feature: &ReferenceFeature) -> f64 {
        match self {
            Self::Attribute(selector) => selector.resolve(&feature.attributes),
            Self::Fixed(value) => *value,
        }
    }
}

#[derive(Debug)]
struct Source<'a> {
    index: LayerIndex<'a>,
    magnitude: MagnitudeSource,
}

/// Maximum distance-decayed contribution over one or more layers.
///
/// # Examples
/// ```
/// use firecut_core::test_support::{line_feature, square};
/// use firecut_core::{AttributeSelector, FactorScorer, Footprint, ReferenceLayer};
/// use firecut_scorer::ProximityScorer;
/// use serde_json::json;
///
/// let routes = ReferenceLayer::new(
///     "egress_routes",
///     vec![line_feature((125.0, -50.0), (125.0, 150.0), "PRIORITY", json!(10))],
/// );
/// let scorer = ProximityScorer::egress(&routes, AttributeSelector::egress());
/// let cell = Footprint::new(&square(0.0, 0.0, 100.0));
/// assert!((scorer.score(&cell) - 5.0).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct ProximityScorer<'a> {
    factor: Factor,
    profile: DecayProfile,
    sources: Vec<Source<'a>>,
}

impl<'a> ProximityScorer<'a> {
    /// Scorer over explicit `(layer, magnitude)` pairs.
    #[must_use]
    pub fn new<I>(factor: Factor, profile: DecayProfile, layers: I) -> Self
    where
        I: IntoIterator<Item = (&'a ReferenceLayer, MagnitudeSource)>,
    {
        let sources = layers
            .into_iter()
            .map(|(layer, magnitude)| Source {
                index: LayerIndex::build(layer),
                magnitude,
            })
            .collect();
        Self {
            factor,
            profile,
            sources,
        }
    }

    /// Community features decaying over 100 m and 300 m.
    #[must_use]
    pub fn community(layer: &'a ReferenceLayer, selector: AttributeSelector) -> Self {
        Self::new(
            Factor::Community,
            DecayProfile::COMMUNITY,
            [(layer, MagnitudeSource::Attribute(selector))],
        )
    }

    /// Egress routes decaying over 50 m and 150 m.
    #[must_use]
    pub fn egress(layer: &'a ReferenceLayer, selector: AttributeSelector) -> Self {
        Self::new(
            Factor::Egress,
            DecayProfile::EGRESS,
            [(layer, MagnitudeSource::Attribute(selector))],
        )
    }

    /// All five utility sub-layers decaying over 30 m and 100 m, each
    /// weighted by its base priority.
    #[must_use]
    pub fn utilities(layers: &'a UtilityLayers) -> Self {
        Self::new(
            Factor::Utility,
            DecayProfile::UTILITY,
            layers
                .iter()
                .map(|(kind, layer)| (layer, MagnitudeSource::Fixed(kind.base_priority()))),
        )
    }

    /// Decay radii in use.
    #[must_use]
    pub const fn profile(&self) -> DecayProfile {
        self.profile
    }
}

impl FactorScorer for ProximityScorer<'_> {
    fn factor(&self) -> Factor {
        self.factor
    }

    fn score(&self, cell: &Footprint) -> f64 {
        let Some(bounds) = cell.bounds() else {
            return 0.0;
        };
        let reach = self.profile.far();
        let mut best = 0.0_f64;
        for source in &self.sources {
            for feature in source.index.candidates(bounds, reach) {
                let distance = cell.distance(&feature.geometry);
                if distance >= reach {
                    continue;
                }
                let touching = cell.intersects(&feature.geometry);
                let contribution = self.profile.contribution(
                    source.magnitude.magnitude(feature),
                    distance,
                    touching,
                );
                best = best.max(contribution);
            }
        }
        Self::sanitise(best)
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point scores within a tolerance"
)]
mod tests {
    use super::*;
    use firecut_core::UtilityKind;
    use firecut_core::test_support::{feature_with, line_feature, point_feature, square};
    use geo::Point;
    use rstest::{fixture, rstest};
    use serde_json::json;

    const TOLERANCE: f64 = 1e-9;

    #[fixture]
    fn cell() -> Footprint {
        Footprint::new(&square(0.0, 0.0, 100.0))
    }

    #[rstest]
    fn egress_route_at_twenty_five_metres(cell: Footprint) {
        let routes = ReferenceLayer::new(
            "egress_routes",
            vec![line_feature((125.0, -50.0), (125.0, 150.0), "PRIORITY", json!(10))],
        );
        let scorer = ProximityScorer::egress(&routes, AttributeSelector::egress());
        assert!((scorer.score(&cell) - 5.0).abs() < TOLERANCE);
    }

    #[rstest]
    fn strongest_feature_wins(cell: Footprint) {
        let community = ReferenceLayer::new(
            "community_features",
            vec![
                feature_with(Point::new(150.0, 50.0), "IMPORTANCE", json!(4)),
                feature_with(Point::new(50.0, 50.0), "IMPORTANCE", json!(3)),
                feature_with(Point::new(-150.0, 50.0), "IMPORTANCE", json!(10)),
            ],
        );
        let scorer = ProximityScorer::community(&community, AttributeSelector::community());
        // 4 * (1 - 50/100) = 2, touching 3, 10 * 0.5 * (1 - 50/200) = 3.75
        assert!((scorer.score(&cell) - 3.75).abs() < TOLERANCE);
    }

    #[rstest]
    fn unattributed_features_use_high_impact_default(cell: Footprint) {
        let community = ReferenceLayer::new("community_features", vec![point_feature(50.0, 50.0)]);
        let scorer = ProximityScorer::community(&community, AttributeSelector::community());
        assert!((scorer.score(&cell) - 10.0).abs() < TOLERANCE);
    }

    #[rstest]
    fn features_beyond_far_radius_are_ignored(cell: Footprint) {
        let routes = ReferenceLayer::new(
            "egress_routes",
            vec![line_feature((250.0, 0.0), (250.0, 100.0), "CLASS", json!(10))],
        );
        let scorer = ProximityScorer::egress(&routes, AttributeSelector::egress());
        assert_eq!(scorer.score(&cell), 0.0);
    }

    #[rstest]
    fn utilities_take_maximum_across_sub_layers(cell: Footprint) {
        let mut layers = UtilityLayers::default();
        layers
            .layer_mut(UtilityKind::Distribution)
            .push(point_feature(50.0, 50.0));
        layers
            .layer_mut(UtilityKind::Transmission)
            .push(point_feature(115.0, 50.0));
        layers
            .layer_mut(UtilityKind::PoleTop)
            .push(point_feature(50.0, 160.0));
        let scorer = ProximityScorer::utilities(&layers);
        // distribution touching: 6; transmission 10 * (1 - 15/30) = 5;
        // pole-top 7 * 0.5 * (1 - 30/70) = 2
        assert_eq!(scorer.factor(), Factor::Utility);
        assert!((scorer.score(&cell) - 6.0).abs() < TOLERANCE);
    }

    #[rstest]
    fn negative_magnitudes_never_beat_an_empty_neighbourhood(cell: Footprint) {
        let routes = ReferenceLayer::new(
            "egress_routes",
            vec![feature_with(Point::new(50.0, 50.0), "PRIORITY", json!(-3))],
        );
        let scorer = ProximityScorer::egress(&routes, AttributeSelector::egress());
        assert_eq!(scorer.score(&cell), 0.0);
    }
}
