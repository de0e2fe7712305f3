//! Conversion of GeoJSON polygon geometries into `geo` shapes.

use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::Value;

use super::error::GeometryError;

/// Polygon-family geometry kinds recognised by the detectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonKind {
    /// A single polygon, possibly with holes.
    Polygon,
    /// An ordered sequence of polygons.
    MultiPolygon,
}

impl PolygonKind {
    /// Classify a GeoJSON geometry by its declared `type`.
    #[must_use]
    pub fn of(geometry: &Value) -> Option<Self> {
        match geometry.get("type").and_then(Value::as_str)? {
            "Polygon" => Some(Self::Polygon),
            "MultiPolygon" => Some(Self::MultiPolygon),
            _ => None,
        }
    }
}

/// A polygon-family geometry ready for measurement.
///
/// Both kinds are held as a [`MultiPolygon`] so engines only deal with one
/// shape type. Rings are closed on construction, so a ring given with fewer
/// than four positions is kept and measured as the shape it collapses to.
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelGeometry {
    shape: MultiPolygon<f64>,
}

impl ParcelGeometry {
    /// Wrap an already-built shape.
    #[must_use]
    pub const fn new(shape: MultiPolygon<f64>) -> Self {
        Self { shape }
    }

    /// Convert a GeoJSON geometry object.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::UnsupportedKind`] for anything other than
    /// `Polygon` and `MultiPolygon`, and the other variants when the
    /// coordinates are not well-formed rings of numeric positions.
    pub fn from_geojson(geometry: &Value) -> Result<Self, GeometryError> {
        let kind = PolygonKind::of(geometry).ok_or_else(|| GeometryError::UnsupportedKind {
            kind: geometry
                .get("type")
                .and_then(Value::as_str)
                .map(str::to_owned),
        })?;
        let coordinates = geometry
            .get("coordinates")
            .ok_or(GeometryError::MalformedCoordinates {
                reason: "missing coordinates member",
            })?;
        let shape = match kind {
            PolygonKind::Polygon => MultiPolygon::new(vec![polygon(coordinates)?]),
            PolygonKind::MultiPolygon => MultiPolygon::new(
                array(coordinates, "multipolygon must be an array of polygons")?
                    .iter()
                    .map(polygon)
                    .collect::<Result<_, _>>()?,
            ),
        };
        Ok(Self { shape })
    }

    /// Shape in longitude/latitude degrees.
    #[must_use]
    pub const fn shape(&self) -> &MultiPolygon<f64> {
        &self.shape
    }
}

fn array<'a>(value: &'a Value, reason: &'static str) -> Result<&'a [Value], GeometryError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or(GeometryError::MalformedCoordinates { reason })
}

fn polygon(value: &Value) -> Result<Polygon<f64>, GeometryError> {
    let mut rings = array(value, "polygon must be an array of rings")?
        .iter()
        .map(ring);
    let exterior = rings.next().ok_or(GeometryError::MalformedCoordinates {
        reason: "polygon has no exterior ring",
    })??;
    let interiors = rings.collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn ring(value: &Value) -> Result<LineString<f64>, GeometryError> {
    let positions = array(value, "ring must be an array of positions")?;
    if positions.is_empty() {
        return Err(GeometryError::EmptyRing);
    }
    positions
        .iter()
        .map(position)
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::new)
}

fn position(value: &Value) -> Result<Coord<f64>, GeometryError> {
    let malformed = GeometryError::MalformedCoordinates {
        reason: "position must hold at least two finite numbers",
    };
    let components = array(value, "position must be an array")?;
    let mut numbers = components.iter().map(Value::as_f64);
    match (numbers.next().flatten(), numbers.next().flatten()) {
        (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Ok(Coord { x, y }),
        _ => Err(malformed),
    }
}
