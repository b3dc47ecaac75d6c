//! Geometry builders shared by unit, behaviour and documentation tests.
//!
//! Cells in the scenarios are axis-aligned squares in a metre-based planar
//! reference system, so a handful of constructors covers most fixtures.
//! The module is gated behind the `test-support` feature (and `cfg(test)`).

use geo::{Coord, LineString, Point, Polygon, Rect};
use serde_json::Value;

use crate::{Attributes, GridCell, ReferenceFeature};

/// Axis-aligned rectangle with the given opposite corners.
#[must_use]
pub fn rectangle(min: Coord<f64>, max: Coord<f64>) -> Polygon<f64> {
    Rect::new(min, max).to_polygon()
}

/// Axis-aligned square with its lower-left corner at `(min_x, min_y)`.
#[expect(
    clippy::float_arithmetic,
    reason = "the far corner is offset by the side length"
)]
#[must_use]
pub fn square(min_x: f64, min_y: f64, size: f64) -> Polygon<f64> {
    rectangle(
        Coord { x: min_x, y: min_y },
        Coord {
            x: min_x + size,
            y: min_y + size,
        },
    )
}

/// Unscored square grid cell.
#[must_use]
pub fn square_cell(id: u64, min_x: f64, min_y: f64, size: f64) -> GridCell {
    GridCell::new(id, square(min_x, min_y, size))
}

/// Row of `count` adjacent square cells starting at the origin, ids from 1.
#[expect(
    clippy::float_arithmetic,
    reason = "cells are laid out at multiples of the side length"
)]
#[must_use]
pub fn cell_row(count: u32, size: f64) -> Vec<GridCell> {
    (0..count)
        .map(|offset| square_cell(u64::from(offset) + 1, f64::from(offset) * size, 0.0, size))
        .collect()
}

/// Feature carrying one named attribute.
#[must_use]
pub fn feature_with(
    geometry: impl Into<geo::Geometry<f64>>,
    key: &str,
    value: Value,
) -> ReferenceFeature {
    ReferenceFeature::new(geometry, Attributes::from_iter([(key, value)]))
}

/// Point feature without attributes.
#[must_use]
pub fn point_feature(x: f64, y: f64) -> ReferenceFeature {
    ReferenceFeature::bare(Point::new(x, y))
}

/// Two-vertex line feature carrying one named attribute.
#[must_use]
pub fn line_feature(start: (f64, f64), end: (f64, f64), key: &str, value: Value) -> ReferenceFeature {
    let line = LineString::from(vec![start, end]);
    feature_with(line, key, value)
}
