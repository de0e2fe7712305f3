//! Orchestration of the structural check and the warning detectors.

use log::debug;
use serde_json::Value;

use crate::detectors::{check_degenerate, check_file_size, check_overlaps, check_precision};
use crate::geometry::{GeometryEngine, SphericalEngine};
use crate::structure::{StructuralError, check_structure};
use crate::thresholds::Thresholds;
use crate::verdict::ValidationVerdict;

/// Validates parcel collections with a fixed engine and thresholds.
///
/// A validator holds no mutable state; one instance can serve any number of
/// documents, concurrently if the engine allows it.
///
/// # Examples
///
/// ```
/// use greenborder_core::{Thresholds, Validator};
/// use serde_json::json;
///
/// let validator = Validator::new().with_thresholds(Thresholds {
///     max_overlap_features: 10,
///     ..Thresholds::default()
/// });
/// let verdict = validator.validate(&json!({ "type": "FeatureCollection", "features": [] }));
/// assert!(!verdict.is_valid());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator<E = SphericalEngine> {
    engine: E,
    thresholds: Thresholds,
}

impl Validator {
    /// A validator using [`SphericalEngine`] and default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: GeometryEngine> Validator<E> {
    /// A validator using `engine` and default thresholds.
    #[must_use]
    pub fn with_engine(engine: E) -> Self {
        Self {
            engine,
            thresholds: Thresholds::default(),
        }
    }

    /// Replace the thresholds used by the detectors.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Validate a parsed document.
    ///
    /// Structural checks run first and stop at the first failure; warnings
    /// are only computed for accepted documents, in the order size,
    /// precision, degeneracy, overlap.
    #[must_use]
    pub fn validate(&self, document: &Value) -> ValidationVerdict {
        let collection = match check_structure(document) {
            Ok(collection) => collection,
            Err(error) => {
                debug!("Rejected document: {} ({error})", error.code());
                return ValidationVerdict::Invalid(error);
            }
        };

        let mut warnings = Vec::new();
        warnings.extend(check_file_size(&collection, &self.thresholds));
        warnings.extend(check_precision(&collection, &self.thresholds));
        warnings.extend(check_degenerate(&collection, &self.engine, &self.thresholds));
        warnings.extend(check_overlaps(&collection, &self.engine, &self.thresholds));
        debug!(
            "Accepted document with {} features and {} warnings",
            collection.len(),
            warnings.len()
        );
        ValidationVerdict::Valid { warnings }
    }

    /// Parse `bytes` as JSON and validate the result.
    ///
    /// Unparseable input is rejected with [`StructuralError::InvalidJson`].
    #[must_use]
    pub fn validate_bytes(&self, bytes: &[u8]) -> ValidationVerdict {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(document) => self.validate(&document),
            Err(error) => {
                debug!("Rejected unparseable document: {error}");
                ValidationVerdict::Invalid(StructuralError::InvalidJson)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{collection, degree_square, feature, rectangle, repeated, square};
    use crate::verdict::WarningCode;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn validator() -> Validator {
        Validator::new()
    }

    fn codes(verdict: &ValidationVerdict) -> Vec<WarningCode> {
        verdict.warnings().iter().map(|warning| warning.code).collect()
    }

    #[rstest]
    fn normal_parcel_is_clean(validator: Validator) {
        let document = collection(vec![feature(degree_square(2.3522, 48.8566, 0.01))]);
        assert_eq!(
            validator.validate(&document),
            ValidationVerdict::Valid {
                warnings: Vec::new()
            }
        );
    }

    #[rstest]
    fn structural_failure_suppresses_warnings(validator: Validator) {
        let document = collection(vec![
            feature(square(0.0, 0.0, 0.1)),
            feature(square(0.0, 0.0, 0.1)),
            json!({ "type": "Feature", "properties": {} }),
        ]);
        assert_eq!(
            validator.validate(&document),
            ValidationVerdict::Invalid(StructuralError::MissingGeometry { index: 2 })
        );
    }

    #[rstest]
    fn detectors_run_in_fixed_order(validator: Validator) {
        let precise = json!({
            "type": "Polygon",
            "coordinates": [[[5.1234567, 5.0], [5.2, 5.0], [5.2, 5.1], [5.1234567, 5.0]]]
        });
        let document = collection(vec![
            feature(degree_square(0.0, 0.0, 2.0)),
            feature(degree_square(1.0, 1.0, 2.0)),
            feature(rectangle(10.0, 10.0, 0.1, 100.0)),
            feature(precise),
        ]);
        assert_eq!(
            codes(&validator.validate(&document)),
            vec![
                WarningCode::PrecisionExcess,
                WarningCode::DegenerateSliver,
                WarningCode::InternalOverlap,
            ]
        );
    }

    #[rstest]
    fn validation_is_idempotent(validator: Validator) {
        let document = repeated(3, &feature(degree_square(0.0, 0.0, 1.0)));
        let first = validator.validate(&document);
        assert_eq!(first, validator.validate(&document));
        assert_eq!(codes(&first), vec![WarningCode::InternalOverlap; 3]);
    }

    #[rstest]
    fn overridden_ceiling_skips_overlaps(validator: Validator) {
        let limited = validator.with_thresholds(Thresholds {
            max_overlap_features: 1,
            ..Thresholds::default()
        });
        let document = repeated(2, &feature(degree_square(0.0, 0.0, 1.0)));
        assert_eq!(
            codes(&limited.validate(&document)),
            vec![WarningCode::OverlapCheckSkipped]
        );
    }

    #[rstest]
    fn vanishingly_small_duplicates_are_still_accepted(validator: Validator) {
        let tiny = json!({
            "type": "Polygon",
            "coordinates": [[[1e-300, 1e-300], [2e-300, 1e-300], [2e-300, 2e-300], [1e-300, 1e-300]]]
        });
        let verdict = validator.validate(&repeated(2, &feature(tiny)));
        assert!(verdict.is_valid());
        assert!(!codes(&verdict).contains(&WarningCode::InternalOverlap));
    }

    #[rstest]
    #[case(b"".as_slice())]
    #[case(b"{\"type\": ".as_slice())]
    #[case(b"not json".as_slice())]
    fn unparseable_bytes_are_invalid_json(validator: Validator, #[case] bytes: &[u8]) {
        assert_eq!(
            validator.validate_bytes(bytes),
            ValidationVerdict::Invalid(StructuralError::InvalidJson)
        );
    }

    #[rstest]
    fn bytes_and_values_agree(validator: Validator) {
        let document = collection(vec![feature(square(0.0, 0.0, 0.1))]);
        let bytes = serde_json::to_vec(&document).expect("serialize fixture");
        assert_eq!(validator.validate_bytes(&bytes), validator.validate(&document));
    }
}
