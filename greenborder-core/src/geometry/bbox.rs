//! Planar bounding boxes and their approximate metric size.

use geo::Rect;

/// Axis-aligned bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Western edge.
    pub min_lon: f64,
    /// Southern edge.
    pub min_lat: f64,
    /// Eastern edge.
    pub max_lon: f64,
    /// Northern edge.
    pub max_lat: f64,
}

impl From<Rect<f64>> for BoundingBox {
    fn from(rect: Rect<f64>) -> Self {
        Self {
            min_lon: rect.min().x,
            min_lat: rect.min().y,
            max_lon: rect.max().x,
            max_lat: rect.max().y,
        }
    }
}

impl BoundingBox {
    /// Approximate `(width, height)` in metres.
    ///
    /// Uses a locally flat projection: a degree of latitude spans
    /// `metres_per_degree`, a degree of longitude spans the same scaled by the
    /// cosine of the box's mean latitude. Adequate at parcel scale only.
    ///
    /// # Examples
    ///
    /// ```
    /// use greenborder_core::geometry::BoundingBox;
    ///
    /// let bbox = BoundingBox { min_lon: 0.0, min_lat: 0.0, max_lon: 0.001, max_lat: 0.002 };
    /// let (width, height) = bbox.metric_size(111_000.0);
    /// assert!((width - 111.0).abs() < 1e-6);
    /// assert!((height - 222.0).abs() < 1e-6);
    /// ```
    #[expect(
        clippy::float_arithmetic,
        reason = "metric conversion scales degree spans"
    )]
    #[must_use]
    pub fn metric_size(&self, metres_per_degree: f64) -> (f64, f64) {
        let mean_latitude = (self.min_lat + self.max_lat) / 2.0;
        let width = (self.max_lon - self.min_lon)
            * metres_per_degree
            * mean_latitude.to_radians().cos();
        let height = (self.max_lat - self.min_lat) * metres_per_degree;
        (width, height)
    }

    /// Whether the two boxes share at least one point.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_lon <= other.max_lon
            && other.min_lon <= self.max_lon
            && self.min_lat <= other.max_lat
            && other.min_lat <= self.max_lat
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "tests build boxes and compare spans with float maths"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn unit_box(min_lon: f64, min_lat: f64) -> BoundingBox {
        BoundingBox {
            min_lon,
            min_lat,
            max_lon: min_lon + 1.0,
            max_lat: min_lat + 1.0,
        }
    }

    #[rstest]
    #[case(unit_box(0.5, 0.5), true)]
    #[case(unit_box(1.0, 0.0), true)]
    #[case(unit_box(1.5, 0.0), false)]
    #[case(unit_box(0.0, -2.0), false)]
    fn intersection_includes_touching_edges(#[case] other: BoundingBox, #[case] expected: bool) {
        assert_eq!(unit_box(0.0, 0.0).intersects(&other), expected);
        assert_eq!(other.intersects(&unit_box(0.0, 0.0)), expected);
    }

    #[rstest]
    fn longitude_span_shrinks_with_latitude() {
        let bbox = BoundingBox {
            min_lon: 0.0,
            min_lat: 59.0,
            max_lon: 1.0,
            max_lat: 61.0,
        };
        let (width, height) = bbox.metric_size(111_000.0);
        assert!((width - 55_500.0).abs() < 1.0, "width was {width}");
        assert!((height - 222_000.0).abs() < 1e-6, "height was {height}");
    }
}
