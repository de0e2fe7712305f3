//! Borrowed view over a structurally valid `FeatureCollection`.
//!
//! A [`Collection`] can only be obtained from
//! [`check_structure`](crate::check_structure), so holding one proves the
//! document passed the blocking checks. The view never copies or mutates the
//! underlying JSON.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};

/// Declared `type` of an acceptable document.
pub const FEATURE_COLLECTION: &str = "FeatureCollection";
/// Declared `type` of every acceptable feature.
pub const FEATURE: &str = "Feature";

/// Identifier used to name a feature in warnings.
///
/// Serializes as the original JSON string or number; synthetic identifiers
/// serialize as `"feature_<index>"`.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureId {
    /// A non-empty string identifier.
    Text(String),
    /// A numeric identifier, kept in its JSON form.
    Number(Number),
    /// Fallback derived from the feature's position in the collection.
    Synthetic(usize),
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
            Self::Synthetic(index) => write!(f, "feature_{index}"),
        }
    }
}

impl Serialize for FeatureId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Number(number) => number.serialize(serializer),
            Self::Synthetic(_) => serializer.collect_str(self),
        }
    }
}

/// Resolve the identifier of the feature at `index`.
///
/// Precedence: the feature's own `id`, then `properties.id`, then
/// `feature_<index>`. Only non-empty strings and numbers count as usable
/// identifiers. Every number is usable, so a numeric `id` of `0` is kept
/// rather than falling through to `properties.id` the way a truthiness
/// check would.
///
/// # Examples
///
/// ```
/// use greenborder_core::{FeatureId, resolve_feature_id};
/// use serde_json::json;
///
/// let feature = json!({ "type": "Feature", "properties": { "id": "parcel-7" } });
/// let map = feature.as_object().expect("object literal");
/// assert_eq!(resolve_feature_id(map, 3), FeatureId::Text("parcel-7".into()));
/// assert_eq!(resolve_feature_id(&Default::default(), 3).to_string(), "feature_3");
/// ```
#[must_use]
pub fn resolve_feature_id(feature: &Map<String, Value>, index: usize) -> FeatureId {
    usable_id(feature.get("id"))
        .or_else(|| {
            usable_id(
                feature
                    .get("properties")
                    .and_then(|properties| properties.get("id")),
            )
        })
        .unwrap_or(FeatureId::Synthetic(index))
}

fn usable_id(value: Option<&Value>) -> Option<FeatureId> {
    match value? {
        Value::String(text) if !text.is_empty() => Some(FeatureId::Text(text.clone())),
        Value::Number(number) => Some(FeatureId::Number(number.clone())),
        _ => None,
    }
}

/// One feature of a structurally valid collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature<'a> {
    id: FeatureId,
    geometry: &'a Value,
}

impl<'a> Feature<'a> {
    pub(crate) const fn new(id: FeatureId, geometry: &'a Value) -> Self {
        Self { id, geometry }
    }

    /// Resolved identifier, see [`resolve_feature_id`].
    #[must_use]
    pub const fn id(&self) -> &FeatureId {
        &self.id
    }

    /// Raw GeoJSON geometry object. Its content has not been checked.
    #[must_use]
    pub const fn geometry(&self) -> &'a Value {
        self.geometry
    }
}

/// A document that passed every blocking check.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<'a> {
    document: &'a Value,
    features: Vec<Feature<'a>>,
}

impl<'a> Collection<'a> {
    pub(crate) const fn new(document: &'a Value, features: Vec<Feature<'a>>) -> Self {
        Self { document, features }
    }

    /// The whole document as received.
    #[must_use]
    pub const fn document(&self) -> &'a Value {
        self.document
    }

    /// Features in document order.
    #[must_use]
    pub fn features(&self) -> &[Feature<'a>] {
        &self.features
    }

    /// Number of features.
    pub(crate) const fn len(&self) -> usize {
        self.features.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn resolve(feature: &Value) -> FeatureId {
        let map = feature.as_object().expect("feature literal is an object");
        resolve_feature_id(map, 4)
    }

    #[rstest]
    #[case(json!({ "id": "own", "properties": { "id": "prop" } }), "own")]
    #[case(json!({ "properties": { "id": "prop" } }), "prop")]
    #[case(json!({ "id": "", "properties": { "id": "prop" } }), "prop")]
    #[case(json!({ "id": null, "properties": { "id": 12 } }), "12")]
    #[case(json!({ "id": 0, "properties": { "id": "prop" } }), "0")]
    #[case(json!({ "properties": { "id": 0 } }), "0")]
    #[case(json!({ "id": true, "properties": {} }), "feature_4")]
    #[case(json!({ "properties": null }), "feature_4")]
    #[case(json!({}), "feature_4")]
    fn identifier_precedence(#[case] feature: Value, #[case] expected: &str) {
        assert_eq!(resolve(&feature).to_string(), expected);
    }

    #[rstest]
    fn numeric_identifier_serializes_as_number() {
        let id = resolve(&json!({ "id": 0 }));
        assert_eq!(serde_json::to_value(&id).expect("serialize id"), json!(0));
    }

    #[rstest]
    fn synthetic_identifier_serializes_as_string() {
        let id = FeatureId::Synthetic(9);
        assert_eq!(
            serde_json::to_value(&id).expect("serialize id"),
            json!("feature_9")
        );
    }
}
