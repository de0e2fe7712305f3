//! Geometry primitives used by the warning detectors.
//!
//! Only `Polygon` and `MultiPolygon` geometries are understood here. The
//! [`GeometryEngine`] trait isolates how areas, extents and intersections are
//! approximated; [`SphericalEngine`] is the default implementation.

mod bbox;
mod engine;
mod error;
mod parse;
mod positions;

pub use bbox::BoundingBox;
pub use engine::{GeometryEngine, SphericalEngine};
pub use error::GeometryError;
pub use parse::{ParcelGeometry, PolygonKind};
pub use positions::{RawPosition, raw_positions};
