//! Geometry predicates used by the factor scorers.
//!
//! A [`Footprint`] wraps one grid cell polygon and answers the four
//! questions the scorers ask of a reference feature: does it touch the cell,
//! how far away is it, how much area does it share with the cell, and how
//! large is the cell. All geometries are assumed to share one planar
//! coordinate reference system with metre units.

use geo::{
    Area, BooleanOps, BoundingRect, Distance, Euclidean, Geometry, Intersects, MultiPolygon,
    Polygon, Rect,
};

/// Cached view of a grid cell's geometry.
///
/// Building a footprint once per cell avoids repeating conversions for every
/// reference feature.
///
/// # Examples
/// ```
/// use firecut_core::Footprint;
/// use firecut_core::test_support::square;
///
/// let footprint = Footprint::new(&square(0.0, 0.0, 10.0));
/// assert_eq!(footprint.area(), 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct Footprint {
    shape: Geometry<f64>,
    areal: MultiPolygon<f64>,
    area: f64,
    bounds: Option<Rect<f64>>,
}

impl Footprint {
    /// Build a footprint for a cell polygon.
    #[must_use]
    pub fn new(polygon: &Polygon<f64>) -> Self {
        Self {
            shape: Geometry::Polygon(polygon.clone()),
            areal: MultiPolygon::new(vec![polygon.clone()]),
            area: polygon.unsigned_area(),
            bounds: polygon.bounding_rect(),
        }
    }

    /// Unsigned area of the cell.
    #[must_use]
    pub const fn area(&self) -> f64 {
        self.area
    }

    /// Axis-aligned bounds of the cell, or `None` for an empty polygon.
    #[must_use]
    pub const fn bounds(&self) -> Option<Rect<f64>> {
        self.bounds
    }

    /// Report whether `feature` intersects or touches the cell.
    #[must_use]
    pub fn intersects(&self, feature: &Geometry<f64>) -> bool {
        self.shape.intersects(feature)
    }

    /// Shortest Euclidean distance between the cell and `feature`.
    ///
    /// Returns `0.0` when the geometries intersect.
    #[must_use]
    pub fn distance(&self, feature: &Geometry<f64>) -> f64 {
        Euclidean.distance(&self.shape, feature)
    }

    /// Area shared by the cell and an areal `feature`.
    ///
    /// Points and lines have no area and yield `0.0`. Members of a geometry
    /// collection are measured independently and summed.
    #[expect(
        clippy::float_arithmetic,
        reason = "collection members contribute additive areas"
    )]
    #[must_use]
    pub fn intersection_area(&self, feature: &Geometry<f64>) -> f64 {
        match feature {
            Geometry::Polygon(polygon) => self.shared_area(&MultiPolygon::new(vec![polygon.clone()])),
            Geometry::MultiPolygon(polygons) => self.shared_area(polygons),
            Geometry::Rect(rect) => self.shared_area(&MultiPolygon::new(vec![rect.to_polygon()])),
            Geometry::Triangle(triangle) => {
                self.shared_area(&MultiPolygon::new(vec![triangle.to_polygon()]))
            }
            Geometry::GeometryCollection(collection) => collection
                .iter()
                .map(|member| self.intersection_area(member))
                .sum(),
            // Points and lines.
            _ => 0.0,
        }
    }

    fn shared_area(&self, other: &MultiPolygon<f64>) -> f64 {
        if self.area <= 0.0 {
            return 0.0;
        }
        self.areal.intersection(other).unsigned_area()
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point scores within a tolerance"
)]
mod tests {
    use super::*;
    use crate::test_support::{rectangle, square};
    use geo::{Coord, LineString, Point, line_string};
    use rstest::{fixture, rstest};

    const TOLERANCE: f64 = 1e-9;

    #[fixture]
    fn unit_cell() -> Footprint {
        Footprint::new(&square(0.0, 0.0, 10.0))
    }

    #[rstest]
    fn contained_point_intersects_at_zero_distance(unit_cell: Footprint) {
        let point = Geometry::Point(Point::new(5.0, 5.0));
        assert!(unit_cell.intersects(&point));
        assert!(unit_cell.distance(&point).abs() < TOLERANCE);
    }

    #[rstest]
    fn distance_to_parallel_line(unit_cell: Footprint) {
        let line: LineString<f64> = line_string![(x: 35.0, y: -5.0), (x: 35.0, y: 15.0)];
        let geometry = Geometry::LineString(line);
        assert!(!unit_cell.intersects(&geometry));
        assert!((unit_cell.distance(&geometry) - 25.0).abs() < TOLERANCE);
    }

    #[rstest]
    fn shared_edge_counts_as_touching(unit_cell: Footprint) {
        let neighbour = Geometry::Polygon(square(10.0, 0.0, 10.0));
        assert!(unit_cell.intersects(&neighbour));
        assert!(unit_cell.intersection_area(&neighbour).abs() < TOLERANCE);
    }

    #[rstest]
    #[case::half(rectangle(Coord { x: 0.0, y: 0.0 }, Coord { x: 5.0, y: 10.0 }), 50.0)]
    #[case::overhang(rectangle(Coord { x: 6.0, y: -4.0 }, Coord { x: 16.0, y: 6.0 }), 24.0)]
    #[case::covering(square(-5.0, -5.0, 30.0), 100.0)]
    fn polygon_overlap_area(unit_cell: Footprint, #[case] other: Polygon<f64>, #[case] expected: f64) {
        let area = unit_cell.intersection_area(&Geometry::Polygon(other));
        assert!((area - expected).abs() < 1e-6, "got {area}");
    }

    #[rstest]
    fn lines_have_no_shared_area(unit_cell: Footprint) {
        let line: LineString<f64> = line_string![(x: 0.0, y: 5.0), (x: 10.0, y: 5.0)];
        assert!(unit_cell.intersection_area(&Geometry::LineString(line)).abs() < TOLERANCE);
    }

    #[rstest]
    fn degenerate_cell_has_no_area() {
        let footprint = Footprint::new(&Polygon::new(LineString::new(vec![]), vec![]));
        assert!(footprint.area().abs() < TOLERANCE);
        assert!(footprint.bounds().is_none());
        let overlap = footprint.intersection_area(&Geometry::Polygon(square(0.0, 0.0, 1.0)));
        assert!(overlap.abs() < TOLERANCE);
    }
}
