//! Facade crate for the greenborder parcel validation engine.
//!
//! This crate re-exports the public API of `greenborder-core`.

#![forbid(unsafe_code)]

pub use greenborder_core::{
    Collection, Feature, FeatureId, Severity, StructuralError, Thresholds, ValidationReport,
    ValidationVerdict, Validator, Warning, WarningCode, check_structure, resolve_feature_id,
    validate, validate_bytes,
};

/// Geometry capability used by the warning detectors.
pub use greenborder_core::geometry;
