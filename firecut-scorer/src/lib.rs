//! Factor scorers and the priority pipeline for fire-break planning.
//!
//! The crate provides two complementary capabilities:
//! - **Per-factor scoring** of grid cells against reference layers. Tree
//!   mortality uses an area-weighted overlay ([`MortalityScorer`]), populated
//!   areas accumulate exposure by covered fraction ([`PopulationScorer`]), and
//!   community features, egress routes and electric utilities share one
//!   distance-decay scorer ([`ProximityScorer`]) parameterised by a
//!   [`DecayProfile`].
//! - **Aggregation** of the five raw scores into a final `0..=10` priority,
//!   class and dense rank ([`PriorityAggregator`]), driven end to end by the
//!   [`PriorityEngine`].
//!
//! Enable the `parallel` feature to score cells across threads with `rayon`.
//! Output order never depends on the feature.
//!
//! # Examples
//!
//! ```
//! use firecut_core::test_support::{cell_row, line_feature};
//! use firecut_core::ReferenceLayers;
//! use firecut_scorer::PriorityEngine;
//! use serde_json::json;
//!
//! let mut layers = ReferenceLayers::default();
//! layers
//!     .egress
//!     .push(line_feature((0.0, -25.0), (50.0, -25.0), "PRIORITY", json!(10)));
//!
//! let table = PriorityEngine::default().run(cell_row(2, 100.0), &layers);
//! let egress: Vec<f64> = table.iter().map(|cell| cell.scores.raw.egress).collect();
//! assert!((egress[0] - 5.0).abs() < 1e-9);
//! assert!(egress[1] < egress[0]);
//! ```

#![forbid(unsafe_code)]

mod aggregate;
mod config;
mod decay;
mod engine;
mod error;
mod mortality;
mod population;
mod proximity;

pub use aggregate::PriorityAggregator;
pub use config::{AttributeSelectors, ScoringConfig};
pub use decay::{DecayError, DecayProfile};
pub use engine::PriorityEngine;
pub use error::ConfigError;
pub use mortality::MortalityScorer;
pub use population::PopulationScorer;
pub use proximity::{MagnitudeSource, ProximityScorer};
