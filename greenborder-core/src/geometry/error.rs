use thiserror::Error;

/// Reasons a geometry cannot be measured by a [`GeometryEngine`].
///
/// Detectors treat these as per-feature failures: the feature (or pair) is
/// skipped and validation carries on.
///
/// [`GeometryEngine`]: crate::geometry::GeometryEngine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The geometry kind is not `Polygon` or `MultiPolygon`.
    #[error("unsupported geometry kind {kind:?}")]
    UnsupportedKind {
        /// Declared `type`, or `None` when absent.
        kind: Option<String>,
    },
    /// `coordinates` does not have the nesting its kind requires.
    #[error("malformed coordinates: {reason}")]
    MalformedCoordinates {
        /// What was expected at the failing level.
        reason: &'static str,
    },
    /// A linear ring has no positions.
    #[error("linear ring has no positions")]
    EmptyRing,
    /// The geometry has no coordinates to measure.
    #[error("geometry is empty")]
    Empty,
    /// The coordinates span too small or too large a range for the boolean
    /// operations backing intersections.
    #[error("coordinate extent cannot be represented for intersection")]
    UnrepresentableExtent,
    /// A computation produced NaN or infinity.
    #[error("{measure} is not finite")]
    NonFinite {
        /// Name of the computed quantity.
        measure: &'static str,
    },
}
