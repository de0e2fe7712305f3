//! Micro-surface and sliver detection.

use log::debug;

use crate::document::{Collection, Feature};
use crate::geometry::{GeometryEngine, GeometryError, ParcelGeometry, PolygonKind};
use crate::thresholds::Thresholds;
use crate::verdict::{Severity, Warning, WarningCode};

/// Area and elongation of one feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    /// Surface area in m².
    pub area: f64,
    /// Longer bounding-box side over shorter side; infinite when the shorter
    /// side is not positive.
    pub ratio: f64,
}

/// Classification of a measured [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Degeneracy {
    /// Tiny and compact.
    MicroSurface,
    /// Normal-sized and very elongated.
    Sliver,
}

impl Shape {
    /// Classify the shape; micro-surfaces take priority over slivers.
    #[must_use]
    pub fn classify(&self, thresholds: &Thresholds) -> Option<Degeneracy> {
        if self.area < thresholds.micro_surface_area
            && self.ratio < thresholds.micro_surface_max_ratio
        {
            Some(Degeneracy::MicroSurface)
        } else if self.area >= thresholds.micro_surface_area
            && self.ratio > thresholds.sliver_min_ratio
        {
            Some(Degeneracy::Sliver)
        } else {
            None
        }
    }
}

/// Raise `DEGENERATE_MICRO_SURFACE` or `DEGENERATE_SLIVER` for polygon
/// features whose measured shape falls in either band.
///
/// Features the engine cannot measure are skipped without a warning.
#[must_use]
pub fn check_degenerate<E: GeometryEngine + ?Sized>(
    collection: &Collection<'_>,
    engine: &E,
    thresholds: &Thresholds,
) -> Vec<Warning> {
    collection
        .features()
        .iter()
        .filter(|feature| PolygonKind::of(feature.geometry()).is_some())
        .filter_map(|feature| match measure(feature, engine, thresholds) {
            Ok(shape) => degeneracy_warning(feature, shape, thresholds),
            Err(error) => {
                debug!(
                    "Skipped degeneracy check for feature {}: {error}",
                    feature.id()
                );
                None
            }
        })
        .collect()
}

/// Measure the area and bounding-box elongation of a feature.
///
/// # Errors
///
/// Propagates conversion and engine failures for this feature.
#[expect(
    clippy::float_arithmetic,
    reason = "aspect ratio divides the bounding box sides"
)]
pub fn measure<E: GeometryEngine + ?Sized>(
    feature: &Feature<'_>,
    engine: &E,
    thresholds: &Thresholds,
) -> Result<Shape, GeometryError> {
    let geometry = ParcelGeometry::from_geojson(feature.geometry())?;
    let area = engine.area(&geometry)?;
    let (width, height) = engine
        .bbox(&geometry)?
        .metric_size(thresholds.metres_per_degree);
    let longer = width.max(height);
    let shorter = width.min(height);
    let ratio = if shorter > 0.0 {
        longer / shorter
    } else {
        f64::INFINITY
    };
    Ok(Shape { area, ratio })
}

fn degeneracy_warning(
    feature: &Feature<'_>,
    shape: Shape,
    thresholds: &Thresholds,
) -> Option<Warning> {
    let id = feature.id();
    match shape.classify(thresholds)? {
        Degeneracy::MicroSurface => Some(Warning::feature(
            WarningCode::DegenerateMicroSurface,
            Severity::Medium,
            id.clone(),
            format!(
                "suspicious geometry: micro-surface ({:.4} m²). Parcel ID: {id}",
                shape.area
            ),
        )),
        Degeneracy::Sliver => Some(Warning::feature(
            WarningCode::DegenerateSliver,
            Severity::Medium,
            id.clone(),
            format!(
                "suspicious geometry: ultra-thin polygon (ratio {:.0}:1). Parcel ID: {id}",
                shape.ratio
            ),
        )),
    }
}
