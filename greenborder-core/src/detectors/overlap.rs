//! Pairwise overlap detection between features of one collection.
//!
//! Every unordered pair is intersected, which is quadratic in the feature
//! count. Collections above [`Thresholds::max_overlap_features`] skip the
//! pairwise pass entirely and report that they did.

use log::{debug, info};

use crate::document::{Collection, Feature, FeatureId};
use crate::geometry::{BoundingBox, GeometryEngine, GeometryError, ParcelGeometry, PolygonKind};
use crate::thresholds::Thresholds;
use crate::verdict::{Severity, Warning, WarningCode};

/// A feature converted once and reused across all of its pairs.
#[derive(Debug)]
struct Prepared<'c> {
    id: &'c FeatureId,
    geometry: ParcelGeometry,
    bbox: BoundingBox,
}

/// Raise `INTERNAL_OVERLAP` for every pair of features sharing more than
/// [`Thresholds::overlap_min_area`] m², or a single `OVERLAP_CHECK_SKIPPED`
/// when the collection is too large to compare pairwise.
///
/// Pairs are visited in document order (`i < j`). Features or pairs the
/// engine cannot process are skipped without a warning.
#[must_use]
pub fn check_overlaps<E: GeometryEngine + ?Sized>(
    collection: &Collection<'_>,
    engine: &E,
    thresholds: &Thresholds,
) -> Vec<Warning> {
    let count = collection.len();
    if count > thresholds.max_overlap_features {
        info!(
            "Skipped overlap detection for {count} features (limit {})",
            thresholds.max_overlap_features
        );
        return vec![Warning::document(
            WarningCode::OverlapCheckSkipped,
            Severity::Low,
            format!("overlap check skipped (too many parcels: {count})"),
        )];
    }

    let prepared: Vec<Option<Prepared<'_>>> = collection
        .features()
        .iter()
        .map(|feature| prepare(feature, engine))
        .collect();

    let mut warnings = Vec::new();
    for (position, slot) in prepared.iter().enumerate() {
        let Some(first) = slot else {
            continue;
        };
        let later = prepared.iter().skip(position + 1).flatten();
        warnings.extend(later.filter_map(|second| {
            pair_warning(first, second, engine, thresholds)
        }));
    }
    warnings
}

fn prepare<'c, E: GeometryEngine + ?Sized>(
    feature: &'c Feature<'_>,
    engine: &E,
) -> Option<Prepared<'c>> {
    PolygonKind::of(feature.geometry())?;
    let converted = ParcelGeometry::from_geojson(feature.geometry())
        .and_then(|geometry| engine.bbox(&geometry).map(|bbox| (geometry, bbox)));
    match converted {
        Ok((geometry, bbox)) => Some(Prepared {
            id: feature.id(),
            geometry,
            bbox,
        }),
        Err(error) => {
            debug!(
                "Excluded feature {} from overlap detection: {error}",
                feature.id()
            );
            None
        }
    }
}

fn pair_warning<E: GeometryEngine + ?Sized>(
    first: &Prepared<'_>,
    second: &Prepared<'_>,
    engine: &E,
    thresholds: &Thresholds,
) -> Option<Warning> {
    match overlap_area(first, second, engine) {
        Ok(Some(area)) if area > thresholds.overlap_min_area => Some(Warning {
            code: WarningCode::InternalOverlap,
            message: format!(
                "overlap detected between parcels {} and {} ({area:.2} m²)",
                first.id, second.id
            ),
            feature_id: Some(first.id.clone()),
            related_feature_id: Some(second.id.clone()),
            severity: Severity::High,
        }),
        Ok(_) => None,
        Err(error) => {
            debug!(
                "Skipped overlap check between {} and {}: {error}",
                first.id, second.id
            );
            None
        }
    }
}

fn overlap_area<E: GeometryEngine + ?Sized>(
    first: &Prepared<'_>,
    second: &Prepared<'_>,
    engine: &E,
) -> Result<Option<f64>, GeometryError> {
    if !first.bbox.intersects(&second.bbox) {
        return Ok(None);
    }
    engine
        .intersection(&first.geometry, &second.geometry)?
        .map(|shared| engine.area(&shared))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check_structure;
    use crate::geometry::SphericalEngine;
    use crate::test_support::{
        collection, degree_square, feature, feature_with_id, multi_polygon, repeated,
    };
    use rstest::rstest;
    use serde_json::json;

    fn overlaps(document: &serde_json::Value) -> Vec<Warning> {
        let checked = check_structure(document).expect("valid structure");
        check_overlaps(&checked, &SphericalEngine, &Thresholds::default())
    }

    #[rstest]
    fn offset_squares_overlap_once() {
        let document = collection(vec![
            feature_with_id("north", degree_square(0.0, 0.0, 2.0)),
            feature_with_id("south", degree_square(1.0, 1.0, 2.0)),
        ]);
        let warnings = overlaps(&document);
        assert_eq!(warnings.len(), 1);
        let warning = warnings.first().expect("one warning");
        assert_eq!(warning.code, WarningCode::InternalOverlap);
        assert_eq!(warning.severity, Severity::High);
        assert_eq!(
            warning.feature_id.as_ref().map(ToString::to_string).as_deref(),
            Some("north")
        );
        assert_eq!(
            warning
                .related_feature_id
                .as_ref()
                .map(ToString::to_string)
                .as_deref(),
            Some("south")
        );
        assert!(warning.message.starts_with("overlap detected between parcels north and south"));
    }

    #[rstest]
    fn neighbours_sharing_an_edge_do_not_overlap() {
        let document = collection(vec![
            feature(degree_square(0.0, 0.0, 1.0)),
            feature(degree_square(1.0, 0.0, 1.0)),
        ]);
        assert!(overlaps(&document).is_empty());
    }

    #[rstest]
    fn distant_features_do_not_overlap() {
        let document = collection(vec![
            feature(degree_square(0.0, 0.0, 1.0)),
            feature(degree_square(10.0, 10.0, 1.0)),
        ]);
        assert!(overlaps(&document).is_empty());
    }

    #[rstest]
    fn pairs_are_reported_in_document_order() {
        let document = collection(vec![
            feature(degree_square(0.0, 0.0, 2.0)),
            feature(degree_square(1.0, 1.0, 2.0)),
            feature(degree_square(0.5, 0.5, 2.0)),
        ]);
        let pairs: Vec<(String, String)> = overlaps(&document)
            .iter()
            .filter_map(|warning| {
                Some((
                    warning.feature_id.as_ref()?.to_string(),
                    warning.related_feature_id.as_ref()?.to_string(),
                ))
            })
            .collect();
        let expected = [("0", "1"), ("0", "2"), ("1", "2")]
            .map(|(a, b)| (format!("feature_{a}"), format!("feature_{b}")));
        assert_eq!(pairs, expected.to_vec());
    }

    #[rstest]
    fn tiny_overlaps_are_ignored() {
        // Overlap strip 0.000001° wide and 0.000001° tall: about 0.012 m².
        let document = collection(vec![
            feature(degree_square(0.0, 0.0, 0.001)),
            feature(degree_square(0.000_999, 0.000_999, 0.001)),
        ]);
        assert!(overlaps(&document).is_empty());
    }

    #[rstest]
    fn unusable_features_are_excluded() {
        let document = collection(vec![
            feature(json!({ "type": "Polygon", "coordinates": "garbage" })),
            feature(json!({ "type": "Point", "coordinates": [1, 1] })),
            feature(degree_square(0.0, 0.0, 2.0)),
            feature(degree_square(1.0, 1.0, 2.0)),
        ]);
        let warnings = overlaps(&document);
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings
                .first()
                .and_then(|warning| warning.feature_id.as_ref())
                .map(ToString::to_string)
                .as_deref(),
            Some("feature_2")
        );
    }

    #[rstest]
    fn polygon_overlapping_a_multipolygon_member_is_reported() {
        let document = collection(vec![
            feature_with_id(
                "estate",
                multi_polygon(&[degree_square(0.0, 0.0, 2.0), degree_square(10.0, 10.0, 1.0)]),
            ),
            feature_with_id("field", degree_square(1.0, 1.0, 2.0)),
            feature_with_id("orchard", degree_square(5.0, 5.0, 1.0)),
        ]);
        let pairs: Vec<(String, String)> = overlaps(&document)
            .iter()
            .filter_map(|warning| {
                Some((
                    warning.feature_id.as_ref()?.to_string(),
                    warning.related_feature_id.as_ref()?.to_string(),
                ))
            })
            .collect();
        assert_eq!(pairs, vec![("estate".to_owned(), "field".to_owned())]);
    }

    #[rstest]
    fn identical_features_at_unrepresentable_scale_are_skipped() {
        let tiny = json!({
            "type": "Polygon",
            "coordinates": [[[1e-300, 1e-300], [2e-300, 1e-300], [2e-300, 2e-300], [1e-300, 1e-300]]]
        });
        let document = collection(vec![feature(tiny.clone()), feature(tiny)]);
        assert!(overlaps(&document).is_empty());
    }

    #[rstest]
    fn large_collections_skip_pairwise_work() {
        let document = repeated(1001, &feature(degree_square(0.0, 0.0, 1.0)));
        let warnings = overlaps(&document);
        assert_eq!(warnings.len(), 1);
        let warning = warnings.first().expect("one warning");
        assert_eq!(warning.code, WarningCode::OverlapCheckSkipped);
        assert_eq!(warning.severity, Severity::Low);
        assert!(warning.message.contains("1001"));
    }

    #[rstest]
    fn ceiling_is_inclusive() {
        let thresholds = Thresholds {
            max_overlap_features: 2,
            ..Thresholds::default()
        };
        let document = collection(vec![
            feature(degree_square(0.0, 0.0, 2.0)),
            feature(degree_square(1.0, 1.0, 2.0)),
        ]);
        let checked = check_structure(&document).expect("valid structure");
        let warnings = check_overlaps(&checked, &SphericalEngine, &thresholds);
        assert_eq!(
            warnings.first().map(|warning| warning.code),
            Some(WarningCode::InternalOverlap)
        );
    }
}
