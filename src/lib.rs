//! Facade crate for the fire-break priority engine.
//!
//! This crate re-exports the core domain types and the scoring pipeline so
//! callers depend on a single crate. Multi-threaded scoring is available
//! behind the `parallel` feature; the `test-support` feature re-exports the
//! geometry builders used in tests.
//!
//! # Examples
//!
//! ```
//! use firecut_core::test_support::{cell_row, feature_with, square};
//! use firecut_engine::{PriorityEngine, ReferenceLayers};
//! use serde_json::json;
//!
//! let mut layers = ReferenceLayers::default();
//! layers
//!     .populated
//!     .push(feature_with(square(100.0, 0.0, 100.0), "POP_DENSITY", json!(12)));
//!
//! let table = PriorityEngine::default().run(cell_row(3, 100.0), &layers);
//! let high: Vec<u64> = table.high_priority().map(|cell| cell.id).collect();
//! assert_eq!(high, vec![2]);
//! ```

#![forbid(unsafe_code)]

pub use firecut_core::{
    AttributeSelector, Attributes, CellScores, ClassShare, Direction, Factor, FactorScorer,
    FactorScores, FactorSummary, FactorWeights, Footprint, GridCell, LayerIndex, PriorityClass,
    PriorityDistribution, ReferenceFeature, ReferenceLayer, ReferenceLayers, ScoreTable,
    SelectorError, UtilityKind, UtilityLayers, WeightsError, dense_ranks, normalise,
};
pub use firecut_scorer::{
    AttributeSelectors, ConfigError, DecayError, DecayProfile, MagnitudeSource, MortalityScorer,
    PopulationScorer, PriorityAggregator, PriorityEngine, ProximityScorer, ScoringConfig,
};

/// Geometry and feature builders for tests.
#[cfg(feature = "test-support")]
pub use firecut_core::test_support;
