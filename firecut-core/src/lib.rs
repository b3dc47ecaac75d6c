//! Core domain types for the fire-break priority engine.
//!
//! The crate models a grid of cells, the reference layers scored against
//! them, and the pure building blocks shared by every factor scorer:
//! - **Geometry predicates** on a cell [`Footprint`] (intersection, distance,
//!   shared area) backed by the `geo` crate.
//! - **Spatial pruning** with an R\*-tree [`LayerIndex`] per reference layer.
//! - **Attribute selection** through [`AttributeSelector`], reading a
//!   numeric magnitude from loosely named feature attributes.
//! - **Normalisation, weighting and ranking** via [`normalise`],
//!   [`FactorWeights`], [`PriorityClass`] and [`dense_ranks`].
//!
//! Constructors that accept caller input return `Result` so invalid
//! configuration surfaces before any cell is scored.
//!
//! # Examples
//!
//! ```
//! use firecut_core::{Factor, FactorScores, FactorWeights, PriorityClass};
//!
//! let weights = FactorWeights::default();
//! let mut normalised = FactorScores::default();
//! for factor in Factor::ALL {
//!     normalised.set(factor, 10.0);
//! }
//! let overall = weights.combine(&normalised);
//! assert!((overall - 10.0).abs() < 1e-9);
//! assert_eq!(PriorityClass::from_score(overall), PriorityClass::VeryHigh);
//! ```

#![forbid(unsafe_code)]

mod attributes;
mod cell;
mod factor;
mod geometry;
mod index;
mod layer;
mod normalise;
mod priority;
mod scorer;
mod table;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
mod weights;

pub use attributes::{
    AttributeSelector, Attributes, HIGH_IMPACT_DEFAULT, NO_RISK_DEFAULT, SelectorError,
};
pub use cell::{CellScores, GridCell};
pub use factor::{Factor, FactorScores};
pub use geometry::Footprint;
pub use index::LayerIndex;
pub use layer::{ReferenceFeature, ReferenceLayer, ReferenceLayers, UtilityKind, UtilityLayers};
pub use normalise::{Direction, FLAT_SCORE, SCALE_MAX, normalise};
pub use priority::{PriorityClass, dense_ranks};
pub use scorer::FactorScorer;
pub use table::{ClassShare, FactorSummary, PriorityDistribution, ScoreTable};
pub use weights::{FactorWeights, WEIGHT_SUM_TOLERANCE, WeightsError};
