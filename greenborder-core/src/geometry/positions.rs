//! Flattening of polygon rings into their raw JSON positions.
//!
//! Precision checks need the textual form of each number, so positions are
//! read straight from the document rather than from parsed `geo` shapes.

use serde_json::{Number, Value};

use super::parse::PolygonKind;

/// A position as written in the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPosition<'a> {
    /// Longitude component.
    pub longitude: &'a Number,
    /// Latitude component.
    pub latitude: &'a Number,
}

/// Collect every ring position of a `Polygon` or `MultiPolygon`.
///
/// Outer and inner rings are included, across all member polygons, in
/// document order. Other geometry kinds yield nothing. Entries that are not
/// shaped like positions are skipped rather than reported.
///
/// # Examples
///
/// ```
/// use greenborder_core::geometry::raw_positions;
/// use serde_json::json;
///
/// let geometry = json!({
///     "type": "Polygon",
///     "coordinates": [[[0.5, 1.25], [1, 1], [1, 2], [0.5, 1.25]]]
/// });
/// let positions = raw_positions(&geometry);
/// assert_eq!(positions.len(), 4);
/// assert_eq!(positions[0].latitude.to_string(), "1.25");
/// ```
#[must_use]
pub fn raw_positions(geometry: &Value) -> Vec<RawPosition<'_>> {
    let coordinates = geometry.get("coordinates");
    let polygons: Vec<&Value> = match (PolygonKind::of(geometry), coordinates) {
        (Some(PolygonKind::Polygon), Some(polygon)) => vec![polygon],
        (Some(PolygonKind::MultiPolygon), Some(Value::Array(members))) => members.iter().collect(),
        _ => Vec::new(),
    };
    polygons
        .into_iter()
        .filter_map(Value::as_array)
        .flatten()
        .filter_map(Value::as_array)
        .flatten()
        .filter_map(position)
        .collect()
}

fn position(value: &Value) -> Option<RawPosition<'_>> {
    match value.as_array()?.as_slice() {
        [Value::Number(longitude), Value::Number(latitude), ..] => Some(RawPosition {
            longitude,
            latitude,
        }),
        _ => None,
    }
}
