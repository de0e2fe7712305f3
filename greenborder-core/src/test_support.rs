//! GeoJSON builders shared by unit and behaviour tests.
//!
//! Metre-based shapes are placed near the given corner using the same
//! 111 km per degree approximation as the degeneracy detector. Every
//! coordinate is rounded to six decimals so fixtures never trip the
//! precision check by accident.
#![expect(
    clippy::float_arithmetic,
    reason = "fixture coordinates are derived from metre sizes"
)]

use serde_json::{Value, json};

use crate::thresholds::DEFAULT_METRES_PER_DEGREE;

/// Wrap features in a `FeatureCollection`.
#[must_use]
pub fn collection(features: Vec<Value>) -> Value {
    json!({ "type": "FeatureCollection", "features": features })
}

/// A collection holding `count` copies of `feature`.
#[must_use]
pub fn repeated(count: usize, feature: &Value) -> Value {
    collection(vec![feature.clone(); count])
}

/// A `Feature` with empty properties and no identifier.
#[must_use]
pub fn feature(geometry: Value) -> Value {
    json!({ "type": "Feature", "properties": {}, "geometry": geometry })
}

/// A `Feature` carrying `id` as its own identifier.
#[must_use]
pub fn feature_with_id(id: &str, geometry: Value) -> Value {
    json!({ "type": "Feature", "id": id, "properties": {}, "geometry": geometry })
}

/// A `MultiPolygon` whose members are the given `Polygon` geometries.
#[must_use]
pub fn multi_polygon(parts: &[Value]) -> Value {
    let coordinates: Vec<Value> = parts
        .iter()
        .filter_map(|part| part.get("coordinates").cloned())
        .collect();
    json!({ "type": "MultiPolygon", "coordinates": coordinates })
}

/// An axis-aligned polygon spanning the given degrees.
#[must_use]
pub fn degree_rectangle(min_lon: f64, min_lat: f64, width_deg: f64, height_deg: f64) -> Value {
    let (west, south) = (round6(min_lon), round6(min_lat));
    let (east, north) = (round6(min_lon + width_deg), round6(min_lat + height_deg));
    json!({
        "type": "Polygon",
        "coordinates": [[[west, south], [east, south], [east, north], [west, north], [west, south]]]
    })
}

/// A square polygon `side_deg` degrees wide.
#[must_use]
pub fn degree_square(min_lon: f64, min_lat: f64, side_deg: f64) -> Value {
    degree_rectangle(min_lon, min_lat, side_deg, side_deg)
}

/// A rectangle measuring roughly `width_m` by `height_m` metres.
#[must_use]
pub fn rectangle(min_lon: f64, min_lat: f64, width_m: f64, height_m: f64) -> Value {
    let lon_metres = DEFAULT_METRES_PER_DEGREE * min_lat.to_radians().cos();
    degree_rectangle(
        min_lon,
        min_lat,
        width_m / lon_metres,
        height_m / DEFAULT_METRES_PER_DEGREE,
    )
}

/// A square roughly `side_m` metres wide.
#[must_use]
pub fn square(min_lon: f64, min_lat: f64, side_m: f64) -> Value {
    rectangle(min_lon, min_lat, side_m, side_m)
}

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}
