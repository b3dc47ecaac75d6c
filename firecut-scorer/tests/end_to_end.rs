//! End-to-end runs of the engine over a small survey strip.

use firecut_core::test_support::{cell_row, feature_with, line_feature, square};
use firecut_core::{Factor, PriorityClass, ReferenceLayers, UtilityKind};
use firecut_scorer::{PriorityEngine, ScoringConfig};
use geo::Point;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn layers() -> ReferenceLayers {
    let mut layers = ReferenceLayers::default();
    layers
        .mortality
        .push(feature_with(square(10.0, 10.0, 80.0), "MORT_RATE", json!(8)));
    layers
        .egress
        .push(line_feature((450.0, -100.0), (450.0, 200.0), "PRIORITY", json!(9)));
    layers
        .utilities
        .layer_mut(UtilityKind::Substation)
        .push(feature_with(Point::new(250.0, 50.0), "NAME", json!("Creek")));
    layers
}

#[rstest]
fn default_engine_ranks_every_cell(layers: ReferenceLayers) {
    let table = PriorityEngine::default().run(cell_row(5, 100.0), &layers);
    assert_eq!(table.len(), 5);
    let top = table.top(5);
    assert_eq!(top.first().map(|cell| cell.scores.rank), Some(1));
    assert!(
        top.windows(2)
            .all(|pair| matches!(pair, [a, b] if a.scores.rank <= b.scores.rank))
    );
    let summary = table
        .factor_summary(Factor::Utility)
        .expect("table is not empty");
    assert_eq!(summary.max, 10.0);
    assert_eq!(summary.positive, 3);
}

#[rstest]
fn configured_weights_change_the_winner(layers: ReferenceLayers) {
    let mortality_heavy = ScoringConfig::from_json_str(
        r#"{"weights": {"mortality": 0.8, "community": 0.05, "egress": 0.05, "population": 0.05, "utility": 0.05}}"#,
    )
    .expect("valid configuration");
    let utility_heavy = ScoringConfig::from_json_str(
        r#"{"weights": {"mortality": 0.05, "community": 0.05, "egress": 0.05, "population": 0.05, "utility": 0.8}}"#,
    )
    .expect("valid configuration");

    let leader = |config: ScoringConfig| {
        let table = PriorityEngine::new(config).run(cell_row(5, 100.0), &layers);
        let best = table.top(1);
        best.first().map(|cell| (cell.id, cell.scores.class))
    };

    assert_eq!(leader(mortality_heavy), Some((1, PriorityClass::VeryHigh)));
    assert_eq!(leader(utility_heavy), Some((3, PriorityClass::VeryHigh)));
}
