//! Integration tests for the per-layer R\*-tree index.

use firecut_core::test_support::{line_feature, point_feature, square};
use firecut_core::{Footprint, LayerIndex, ReferenceFeature, ReferenceLayer};
use geo::BoundingRect;
use serde_json::json;

fn mixed_layer() -> ReferenceLayer {
    ReferenceLayer::new(
        "mixed",
        vec![
            point_feature(40.0, 40.0),
            line_feature((-500.0, 0.0), (-400.0, 0.0), "CLASS", json!(2)),
            ReferenceFeature::bare(square(95.0, 95.0, 20.0)),
            point_feature(130.0, 50.0),
            line_feature((0.0, 160.0), (100.0, 160.0), "CLASS", json!(5)),
        ],
    )
}

#[test]
fn index_size_matches_non_empty_features() {
    let layer = mixed_layer();
    let index = LayerIndex::build(&layer);
    assert_eq!(index.size(), layer.len());
    assert_eq!(index.layer().name(), "mixed");
}

#[test]
fn candidates_include_every_feature_within_reach() {
    let layer = mixed_layer();
    let index = LayerIndex::build(&layer);
    let cell = square(0.0, 0.0, 100.0);
    let footprint = Footprint::new(&cell);
    let bounds = cell.bounding_rect().expect("cell has bounds");
    let reach = 75.0;

    let candidates = index.candidates(bounds, reach);
    for feature in layer.features() {
        if footprint.distance(&feature.geometry) < reach {
            assert!(
                candidates.contains(&feature),
                "feature within reach was pruned: {feature:?}"
            );
        }
    }
    assert!(candidates.len() < layer.len(), "distant line should be pruned");
}

#[test]
fn candidates_follow_layer_order() {
    let layer = mixed_layer();
    let index = LayerIndex::build(&layer);
    let bounds = square(0.0, 0.0, 100.0)
        .bounding_rect()
        .expect("cell has bounds");

    let positions: Vec<usize> = index
        .candidates(bounds, 75.0)
        .into_iter()
        .filter_map(|candidate| {
            layer
                .features()
                .iter()
                .position(|feature| std::ptr::eq(feature, candidate))
        })
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
    assert_eq!(positions, vec![0, 2, 3, 4]);
}
