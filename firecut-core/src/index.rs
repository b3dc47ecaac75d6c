//! R\*-tree index over a reference layer's bounding boxes.
//!
//! The index only prunes: it returns every feature whose bounding box lies
//! within a margin of the query bounds, in source order, so callers
//! accumulate contributions exactly as a linear scan would. Exact predicates
//! still decide what each candidate contributes.

use geo::{BoundingRect, Rect};
use log::warn;
use rstar::{AABB, RTree, RTreeObject};

use crate::{ReferenceFeature, ReferenceLayer};

/// Bounding box of one layer feature, keyed by its position in the layer.
#[derive(Debug, Clone, PartialEq)]
struct IndexedFeature {
    position: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedFeature {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Spatial index borrowing a [`ReferenceLayer`].
///
/// Features with empty geometries have no bounding box; they are left out of
/// the index and never returned as candidates.
///
/// # Examples
/// ```
/// use geo::Point;
/// use firecut_core::{LayerIndex, ReferenceFeature, ReferenceLayer};
/// use firecut_core::test_support::square;
/// use geo::BoundingRect;
///
/// let layer = ReferenceLayer::new(
///     "substations",
///     vec![
///         ReferenceFeature::bare(Point::new(5.0, 5.0)),
///         ReferenceFeature::bare(Point::new(500.0, 500.0)),
///     ],
/// );
/// let index = LayerIndex::build(&layer);
/// let bounds = square(0.0, 0.0, 10.0).bounding_rect().expect("non-empty cell");
/// assert_eq!(index.candidates(bounds, 100.0).len(), 1);
/// ```
#[derive(Debug)]
pub struct LayerIndex<'a> {
    layer: &'a ReferenceLayer,
    tree: RTree<IndexedFeature>,
}

impl<'a> LayerIndex<'a> {
    /// Bulk-load an index over every feature of `layer`.
    #[must_use]
    pub fn build(layer: &'a ReferenceLayer) -> Self {
        let mut entries = Vec::with_capacity(layer.len());
        for (position, feature) in layer.features().iter().enumerate() {
            if let Some(bounds) = feature.geometry.bounding_rect() {
                entries.push(IndexedFeature {
                    position,
                    envelope: envelope(bounds),
                });
            } else {
                warn!(
                    "skipping feature {position} of layer '{}': geometry is empty",
                    layer.name()
                );
            }
        }
        Self {
            layer,
            tree: RTree::bulk_load(entries),
        }
    }

    /// The indexed layer.
    #[must_use]
    pub const fn layer(&self) -> &'a ReferenceLayer {
        self.layer
    }

    /// Number of indexed features.
    #[must_use]
    pub fn size(&self) -> usize {
        self.tree.size()
    }

    /// Features whose bounding box lies within `margin` of `bounds`.
    ///
    /// Candidates are returned in layer order.
    #[expect(
        clippy::float_arithmetic,
        reason = "query bounds are widened by the search margin"
    )]
    #[must_use]
    pub fn candidates(&self, bounds: Rect<f64>, margin: f64) -> Vec<&'a ReferenceFeature> {
        let pad = margin.max(0.0);
        let min = bounds.min();
        let max = bounds.max();
        let query = AABB::from_corners([min.x - pad, min.y - pad], [max.x + pad, max.y + pad]);
        let mut positions: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&query)
            .map(|entry| entry.position)
            .collect();
        positions.sort_unstable();
        let features = self.layer.features();
        positions
            .into_iter()
            .filter_map(|position| features.get(position))
            .collect()
    }
}

fn envelope(bounds: Rect<f64>) -> AABB<[f64; 2]> {
    let min = bounds.min();
    let max = bounds.max();
    AABB::from_corners([min.x, min.y], [max.x, max.y])
}
