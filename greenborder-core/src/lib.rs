//! Validation engine for uploaded parcel collections.
//!
//! A document is first checked structurally: it must be a GeoJSON
//! `FeatureCollection` holding at least one `Feature`, each with a geometry.
//! Structural failures reject the document outright. Accepted documents are
//! then scanned by four detectors (size, coordinate precision, degenerate
//! shapes, internal overlaps) that only ever produce warnings.
//!
//! # Examples
//!
//! ```
//! use greenborder_core::{ValidationReport, validate};
//! use serde_json::json;
//!
//! let document = json!({
//!     "type": "FeatureCollection",
//!     "features": [{
//!         "type": "Feature",
//!         "properties": { "id": "parcel-1" },
//!         "geometry": {
//!             "type": "Polygon",
//!             "coordinates": [[
//!                 [2.3522, 48.8566], [2.3622, 48.8566], [2.3622, 48.8666],
//!                 [2.3522, 48.8666], [2.3522, 48.8566]
//!             ]]
//!         }
//!     }]
//! });
//! let verdict = validate(&document);
//! assert!(verdict.is_valid());
//! let body = serde_json::to_value(ValidationReport::from(verdict)).expect("serialize");
//! assert_eq!(body, json!({ "status": "valid", "warnings": [] }));
//! ```

#![forbid(unsafe_code)]

pub mod detectors;
mod document;
pub mod geometry;
mod structure;
mod thresholds;
mod validator;
mod verdict;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use document::{
    Collection, FEATURE, FEATURE_COLLECTION, Feature, FeatureId, resolve_feature_id,
};
pub use structure::{StructuralError, check_structure};
pub use thresholds::{
    DEFAULT_MAX_DECIMALS, DEFAULT_MAX_DOCUMENT_BYTES, DEFAULT_MAX_OVERLAP_FEATURES,
    DEFAULT_METRES_PER_DEGREE, DEFAULT_MICRO_SURFACE_AREA, DEFAULT_MICRO_SURFACE_MAX_RATIO,
    DEFAULT_OVERLAP_MIN_AREA, DEFAULT_SLIVER_MIN_RATIO, Thresholds,
};
pub use validator::Validator;
pub use verdict::{Severity, ValidationReport, ValidationVerdict, Warning, WarningCode};

use serde_json::Value;

/// Validate a parsed document with default thresholds.
///
/// See [`Validator::validate`].
#[must_use]
pub fn validate(document: &Value) -> ValidationVerdict {
    Validator::new().validate(document)
}

/// Parse and validate raw bytes with default thresholds.
///
/// See [`Validator::validate_bytes`].
#[must_use]
pub fn validate_bytes(bytes: &[u8]) -> ValidationVerdict {
    Validator::new().validate_bytes(bytes)
}
