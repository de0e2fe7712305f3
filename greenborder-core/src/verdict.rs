//! Validation outcomes and their client-facing representation.

use serde::Serialize;

use crate::document::FeatureId;
use crate::structure::StructuralError;

/// How much attention a warning deserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Cosmetic or informational.
    Low,
    /// Likely a data-quality problem.
    Medium,
    /// Likely to cause downstream rejection.
    High,
}

/// Kind of non-blocking finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    /// The serialized document exceeds the size threshold.
    FileSizeLarge,
    /// A feature has coordinates with too many decimals.
    PrecisionExcess,
    /// A feature has a near-zero area.
    DegenerateMicroSurface,
    /// A feature is extremely elongated.
    DegenerateSliver,
    /// Two features overlap.
    InternalOverlap,
    /// Overlap detection was skipped because of the feature count.
    OverlapCheckSkipped,
}

impl WarningCode {
    /// Wire form of the code, e.g. `"INTERNAL_OVERLAP"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FileSizeLarge => "FILE_SIZE_LARGE",
            Self::PrecisionExcess => "PRECISION_EXCESS",
            Self::DegenerateMicroSurface => "DEGENERATE_MICRO_SURFACE",
            Self::DegenerateSliver => "DEGENERATE_SLIVER",
            Self::InternalOverlap => "INTERNAL_OVERLAP",
            Self::OverlapCheckSkipped => "OVERLAP_CHECK_SKIPPED",
        }
    }
}

/// A non-blocking quality finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warning {
    /// Kind of finding.
    pub code: WarningCode,
    /// Human-readable description.
    pub message: String,
    /// Feature the finding is about, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_id: Option<FeatureId>,
    /// Second feature involved, for pairwise findings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_feature_id: Option<FeatureId>,
    /// Attention level.
    pub severity: Severity,
}

impl Warning {
    /// A warning that concerns the document as a whole.
    #[must_use]
    pub const fn document(code: WarningCode, severity: Severity, message: String) -> Self {
        Self {
            code,
            message,
            feature_id: None,
            related_feature_id: None,
            severity,
        }
    }

    /// A warning about a single feature.
    #[must_use]
    pub const fn feature(
        code: WarningCode,
        severity: Severity,
        feature_id: FeatureId,
        message: String,
    ) -> Self {
        Self {
            code,
            message,
            feature_id: Some(feature_id),
            related_feature_id: None,
            severity,
        }
    }
}

/// Outcome of validating one document.
///
/// A verdict is never both invalid and carrying warnings: warnings are only
/// computed once the document is structurally acceptable.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationVerdict {
    /// The document was rejected.
    Invalid(StructuralError),
    /// The document was accepted, possibly with warnings.
    Valid {
        /// Findings in detector order, then feature order.
        warnings: Vec<Warning>,
    },
}

impl ValidationVerdict {
    /// Whether the document was accepted.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Warnings of an accepted document; empty for a rejected one.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        match self {
            Self::Valid { warnings } => warnings,
            Self::Invalid(_) => &[],
        }
    }

    /// Blocking error of a rejected document.
    #[must_use]
    pub const fn error(&self) -> Option<StructuralError> {
        match self {
            Self::Invalid(error) => Some(*error),
            Self::Valid { .. } => None,
        }
    }
}

/// Client-facing body describing a verdict.
///
/// Serializes as `{"status":"valid","warnings":[...]}` or
/// `{"status":"invalid","error_code":..,"message":..,"feature_id":..}`.
///
/// # Examples
///
/// ```
/// use greenborder_core::{StructuralError, ValidationReport, ValidationVerdict};
/// use serde_json::json;
///
/// let verdict = ValidationVerdict::Invalid(StructuralError::MissingGeometry { index: 2 });
/// let body = serde_json::to_value(ValidationReport::from(&verdict)).expect("serialize");
/// assert_eq!(body["error_code"], json!("MISSING_GEOMETRY"));
/// assert_eq!(body["feature_id"], json!(2));
/// assert!(body.get("warnings").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ValidationReport {
    /// Accepted document.
    Valid {
        /// Findings, possibly empty.
        warnings: Vec<Warning>,
    },
    /// Rejected document.
    Invalid {
        /// Blocking error code.
        error_code: &'static str,
        /// Human-readable reason.
        message: String,
        /// Index of the offending feature, `null` when not feature-specific.
        feature_id: Option<usize>,
    },
}

impl From<&ValidationVerdict> for ValidationReport {
    fn from(verdict: &ValidationVerdict) -> Self {
        match verdict {
            ValidationVerdict::Valid { warnings } => Self::Valid {
                warnings: warnings.clone(),
            },
            ValidationVerdict::Invalid(error) => Self::Invalid {
                error_code: error.code(),
                message: error.to_string(),
                feature_id: error.feature_index(),
            },
        }
    }
}

impl From<ValidationVerdict> for ValidationReport {
    fn from(verdict: ValidationVerdict) -> Self {
        match verdict {
            ValidationVerdict::Valid { warnings } => Self::Valid { warnings },
            invalid @ ValidationVerdict::Invalid(_) => Self::from(&invalid),
        }
    }
}
