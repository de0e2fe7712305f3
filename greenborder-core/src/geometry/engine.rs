//! Measurement capability consumed by the degeneracy and overlap detectors.

use geo::{BooleanOps, BoundingRect, ChamberlainDuquetteArea, LineString, Polygon, Rect};

use super::bbox::BoundingBox;
use super::error::GeometryError;
use super::parse::ParcelGeometry;

/// Smallest combined extent, in degrees, handed to boolean operations.
const MIN_INTERSECTION_EXTENT: f64 = 1e-9;

/// Largest absolute coordinate handed to boolean operations.
const MAX_INTERSECTION_COORDINATE: f64 = 1e9;

/// Area, extent and intersection of parcel geometries.
///
/// Detectors only talk to this trait, so the approximation strategy can be
/// swapped without touching detection logic. Engines must be `Send + Sync`
/// so one validator can serve concurrent calls.
///
/// # Examples
///
/// ```
/// use greenborder_core::geometry::{GeometryEngine, ParcelGeometry, SphericalEngine};
/// use serde_json::json;
///
/// # fn main() -> Result<(), greenborder_core::geometry::GeometryError> {
/// let square = ParcelGeometry::from_geojson(&json!({
///     "type": "Polygon",
///     "coordinates": [[[0, 0], [0.001, 0], [0.001, 0.001], [0, 0.001], [0, 0]]]
/// }))?;
/// let area = SphericalEngine.area(&square)?;
/// assert!(area > 12_000.0 && area < 12_500.0);
/// # Ok(())
/// # }
/// ```
pub trait GeometryEngine: Send + Sync {
    /// Unsigned surface area in square metres.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonFinite`] when the area cannot be computed.
    fn area(&self, geometry: &ParcelGeometry) -> Result<f64, GeometryError>;

    /// Planar bounding box in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Empty`] when the geometry has no coordinates.
    fn bbox(&self, geometry: &ParcelGeometry) -> Result<BoundingBox, GeometryError>;

    /// Shared region of two geometries, or `None` when they do not meet.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] when the intersection cannot be computed,
    /// such as [`GeometryError::UnrepresentableExtent`] for coordinates the
    /// boolean operations cannot place on their integer grid.
    fn intersection(
        &self,
        first: &ParcelGeometry,
        second: &ParcelGeometry,
    ) -> Result<Option<ParcelGeometry>, GeometryError>;
}

/// Default engine: spherical areas, planar boxes and boolean intersection.
///
/// Areas use the Chamberlain–Duquette spherical-excess approximation, which
/// is adequate for parcel-sized polygons but not geodesically exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SphericalEngine;

impl GeometryEngine for SphericalEngine {
    #[expect(clippy::float_arithmetic, reason = "areas are summed across polygons")]
    fn area(&self, geometry: &ParcelGeometry) -> Result<f64, GeometryError> {
        let area: f64 = geometry.shape().iter().map(polygon_area).sum();
        if area.is_finite() {
            Ok(area)
        } else {
            Err(GeometryError::NonFinite { measure: "area" })
        }
    }

    fn bbox(&self, geometry: &ParcelGeometry) -> Result<BoundingBox, GeometryError> {
        geometry
            .shape()
            .bounding_rect()
            .map(BoundingBox::from)
            .ok_or(GeometryError::Empty)
    }

    fn intersection(
        &self,
        first: &ParcelGeometry,
        second: &ParcelGeometry,
    ) -> Result<Option<ParcelGeometry>, GeometryError> {
        let extents = (first.shape().bounding_rect(), second.shape().bounding_rect());
        if let (Some(first_rect), Some(second_rect)) = extents {
            ensure_representable(&first_rect, &second_rect)?;
        }
        let shared = first.shape().intersection(second.shape());
        if shared.0.is_empty() {
            return Ok(None);
        }
        Ok(Some(ParcelGeometry::new(shared)))
    }
}

/// Reject pairs whose combined extent would overflow the fixed-point grid
/// used by [`BooleanOps`].
#[expect(clippy::float_arithmetic, reason = "extent is the span of both boxes")]
fn ensure_representable(first: &Rect<f64>, second: &Rect<f64>) -> Result<(), GeometryError> {
    let west = first.min().x.min(second.min().x);
    let south = first.min().y.min(second.min().y);
    let east = first.max().x.max(second.max().x);
    let north = first.max().y.max(second.max().y);
    let extent = (east - west).max(north - south);
    let magnitude = west.abs().max(south.abs()).max(east.abs()).max(north.abs());
    if extent >= MIN_INTERSECTION_EXTENT && magnitude <= MAX_INTERSECTION_COORDINATE {
        Ok(())
    } else {
        Err(GeometryError::UnrepresentableExtent)
    }
}

/// Exterior area minus hole areas, independent of ring orientation.
#[expect(clippy::float_arithmetic, reason = "holes are subtracted from the exterior")]
fn polygon_area(polygon: &Polygon<f64>) -> f64 {
    polygon
        .interiors()
        .iter()
        .fold(ring_area(polygon.exterior()), |total, hole| {
            total - ring_area(hole)
        })
}

fn ring_area(ring: &LineString<f64>) -> f64 {
    Polygon::new(ring.clone(), Vec::new()).chamberlain_duquette_unsigned_area()
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare measured areas"
)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    fn square(min: f64, side: f64) -> ParcelGeometry {
        let max = min + side;
        parse(&json!({
            "type": "Polygon",
            "coordinates": [[[min, min], [max, min], [max, max], [min, max], [min, min]]]
        }))
    }

    fn parse(geometry: &Value) -> ParcelGeometry {
        ParcelGeometry::from_geojson(geometry).expect("fixture geometry parses")
    }

    #[fixture]
    fn engine() -> SphericalEngine {
        SphericalEngine
    }

    #[rstest]
    fn area_of_small_square_is_close_to_planar_estimate(engine: SphericalEngine) {
        // 0.0001° at the equator is roughly 11.1 m.
        let area = engine.area(&square(0.0, 0.0001)).expect("area");
        assert!((area - 123.9).abs() < 1.5, "area was {area}");
    }

    #[rstest]
    fn holes_reduce_area(engine: SphericalEngine) {
        let outer = engine.area(&square(0.0, 0.001)).expect("outer area");
        let holed = parse(&json!({
            "type": "Polygon",
            "coordinates": [
                [[0, 0], [0.001, 0], [0.001, 0.001], [0, 0.001], [0, 0]],
                [[0.0002, 0.0002], [0.0004, 0.0002], [0.0004, 0.0004], [0.0002, 0.0004], [0.0002, 0.0002]]
            ]
        }));
        let with_hole = engine.area(&holed).expect("holed area");
        assert!(with_hole < outer);
        assert!((outer - with_hole - outer * 0.04).abs() < 1.0);
    }

    #[rstest]
    fn hole_orientation_does_not_matter(engine: SphericalEngine) {
        let clockwise_hole = parse(&json!({
            "type": "Polygon",
            "coordinates": [
                [[0, 0], [0.001, 0], [0.001, 0.001], [0, 0.001], [0, 0]],
                [[0.0002, 0.0002], [0.0002, 0.0004], [0.0004, 0.0004], [0.0004, 0.0002], [0.0002, 0.0002]]
            ]
        }));
        let counter_clockwise_hole = parse(&json!({
            "type": "Polygon",
            "coordinates": [
                [[0, 0], [0.001, 0], [0.001, 0.001], [0, 0.001], [0, 0]],
                [[0.0002, 0.0002], [0.0004, 0.0002], [0.0004, 0.0004], [0.0002, 0.0004], [0.0002, 0.0002]]
            ]
        }));
        let first = engine.area(&clockwise_hole).expect("area");
        let second = engine.area(&counter_clockwise_hole).expect("area");
        assert!((first - second).abs() < 1e-6);
    }

    #[rstest]
    fn bbox_spans_every_member(engine: SphericalEngine) {
        let geometry = parse(&json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[0, 0], [1, 0], [1, 1], [0, 0]]],
                [[[-3, 5], [-2, 5], [-2, 6], [-3, 5]]]
            ]
        }));
        let bbox = engine.bbox(&geometry).expect("bbox");
        assert_eq!(
            bbox,
            BoundingBox {
                min_lon: -3.0,
                min_lat: 0.0,
                max_lon: 1.0,
                max_lat: 6.0,
            }
        );
    }

    #[rstest]
    fn empty_multipolygon_has_no_bbox(engine: SphericalEngine) {
        let geometry = parse(&json!({ "type": "MultiPolygon", "coordinates": [] }));
        assert_eq!(engine.bbox(&geometry), Err(GeometryError::Empty));
    }

    #[rstest]
    fn overlapping_squares_intersect(engine: SphericalEngine) {
        let shared = engine
            .intersection(&square(0.0, 2.0), &square(1.0, 2.0))
            .expect("intersection computes")
            .expect("squares overlap");
        let bbox = engine.bbox(&shared).expect("bbox");
        assert!((bbox.min_lon - 1.0).abs() < 1e-6);
        assert!((bbox.max_lat - 2.0).abs() < 1e-6);
    }

    #[rstest]
    #[case(1e-300, 1e-300)]
    #[case(0.0, 0.0)]
    #[case(1e12, 1.0)]
    fn unrepresentable_pairs_are_rejected(
        engine: SphericalEngine,
        #[case] min: f64,
        #[case] side: f64,
    ) {
        let shape = square(min, side);
        assert_eq!(
            engine.intersection(&shape, &shape),
            Err(GeometryError::UnrepresentableExtent)
        );
    }

    #[rstest]
    fn multipolygon_area_sums_members(engine: SphericalEngine) {
        let single = engine.area(&square(0.0, 0.001)).expect("area");
        let pair = parse(&json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[0, 0], [0.001, 0], [0.001, 0.001], [0, 0.001], [0, 0]]],
                [[[0, 0.002], [0.001, 0.002], [0.001, 0.003], [0, 0.003], [0, 0.002]]]
            ]
        }));
        let total = engine.area(&pair).expect("area");
        assert!((total - 2.0 * single).abs() < 1.0, "area was {total}");
    }

    #[rstest]
    fn polygon_meets_only_the_overlapping_member(engine: SphericalEngine) {
        let members = parse(&json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[0, 0], [2, 0], [2, 2], [0, 2], [0, 0]]],
                [[[10, 10], [11, 10], [11, 11], [10, 11], [10, 10]]]
            ]
        }));
        let shared = engine
            .intersection(&square(1.0, 2.0), &members)
            .expect("intersection computes")
            .expect("first member overlaps");
        let bbox = engine.bbox(&shared).expect("bbox");
        assert!((bbox.min_lon - 1.0).abs() < 1e-6);
        assert!((bbox.max_lon - 2.0).abs() < 1e-6);
    }

    #[rstest]
    fn disjoint_squares_do_not_intersect(engine: SphericalEngine) {
        let shared = engine
            .intersection(&square(0.0, 1.0), &square(5.0, 1.0))
            .expect("intersection computes");
        assert_eq!(shared, None);
    }
}
