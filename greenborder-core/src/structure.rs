//! Blocking checks establishing that a document can be processed at all.
//!
//! Checks run in a fixed order and stop at the first violation. Only the
//! document's shape is inspected: geometries must be present but their
//! content is left to the warning detectors.

use serde_json::Value;
use thiserror::Error;

use crate::document::{Collection, FEATURE, FEATURE_COLLECTION, Feature, resolve_feature_id};

/// A structural violation that blocks acceptance of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// The input is not a JSON object, or could not be parsed at all.
    #[error("invalid format: GeoJSON (RFC 7946) required")]
    InvalidJson,
    /// The top-level `type` is not `FeatureCollection`.
    #[error("GeoJSON must be of type FeatureCollection")]
    InvalidGeoJsonType,
    /// The `features` member is missing or not an array.
    #[error("the features field must be an array")]
    InvalidFeatures,
    /// The `features` array is empty.
    #[error("empty file: no parcel detected")]
    EmptyCollection,
    /// A feature entry is not an object with `type` equal to `Feature`.
    #[error("every element must be a Feature")]
    InvalidFeatureType {
        /// Position of the offending entry.
        index: usize,
    },
    /// A feature has no (or a null) `geometry` member.
    #[error("every Feature must contain a geometry")]
    MissingGeometry {
        /// Position of the offending entry.
        index: usize,
    },
}

impl StructuralError {
    /// Stable machine-readable code reported to clients.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidJson => "INVALID_JSON",
            Self::InvalidGeoJsonType => "INVALID_GEOJSON_TYPE",
            Self::InvalidFeatures => "INVALID_FEATURES",
            Self::EmptyCollection => "EMPTY_COLLECTION",
            Self::InvalidFeatureType { .. } => "INVALID_FEATURE_TYPE",
            Self::MissingGeometry { .. } => "MISSING_GEOMETRY",
        }
    }

    /// Index of the offending feature for per-feature violations.
    #[must_use]
    pub const fn feature_index(&self) -> Option<usize> {
        match self {
            Self::InvalidFeatureType { index } | Self::MissingGeometry { index } => Some(*index),
            Self::InvalidJson
            | Self::InvalidGeoJsonType
            | Self::InvalidFeatures
            | Self::EmptyCollection => None,
        }
    }
}

/// Run the blocking checks and return a view over the accepted collection.
///
/// # Errors
///
/// Returns the first [`StructuralError`] encountered, in this order: not an
/// object, wrong `type`, `features` not an array, empty `features`, then per
/// feature (in index order) a wrong `type` or a missing geometry.
///
/// # Examples
///
/// ```
/// use greenborder_core::{StructuralError, check_structure};
/// use serde_json::json;
///
/// let document = json!({ "type": "FeatureCollection", "features": [] });
/// assert_eq!(check_structure(&document), Err(StructuralError::EmptyCollection));
/// ```
pub fn check_structure(document: &Value) -> Result<Collection<'_>, StructuralError> {
    let Value::Object(root) = document else {
        return Err(StructuralError::InvalidJson);
    };
    if root.get("type").and_then(Value::as_str) != Some(FEATURE_COLLECTION) {
        return Err(StructuralError::InvalidGeoJsonType);
    }
    let Some(Value::Array(entries)) = root.get("features") else {
        return Err(StructuralError::InvalidFeatures);
    };
    if entries.is_empty() {
        return Err(StructuralError::EmptyCollection);
    }
    let features = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| check_feature(index, entry))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Collection::new(document, features))
}

fn check_feature(index: usize, entry: &Value) -> Result<Feature<'_>, StructuralError> {
    let Value::Object(feature) = entry else {
        return Err(StructuralError::InvalidFeatureType { index });
    };
    if feature.get("type").and_then(Value::as_str) != Some(FEATURE) {
        return Err(StructuralError::InvalidFeatureType { index });
    }
    match feature.get("geometry") {
        None | Some(Value::Null) => Err(StructuralError::MissingGeometry { index }),
        Some(geometry) => Ok(Feature::new(resolve_feature_id(feature, index), geometry)),
    }
}
