//! Empirical limits applied by the warning detectors.
//!
//! The defaults are pinned values; tests and downstream expectations rely on
//! them exactly, so change them only through [`Thresholds`] overrides.

/// Size above which a document is reported as large (25 MiB).
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 25 * 1024 * 1024;
/// Maximum number of decimals tolerated in a coordinate component.
pub const DEFAULT_MAX_DECIMALS: usize = 6;
/// Area below which a polygon may be reported as a micro-surface, in m².
pub const DEFAULT_MICRO_SURFACE_AREA: f64 = 1.0;
/// Micro-surfaces must be less elongated than this ratio.
pub const DEFAULT_MICRO_SURFACE_MAX_RATIO: f64 = 50.0;
/// Polygons more elongated than this ratio are slivers.
pub const DEFAULT_SLIVER_MIN_RATIO: f64 = 100.0;
/// Overlaps must exceed this area, in m², to be reported.
pub const DEFAULT_OVERLAP_MIN_AREA: f64 = 0.1;
/// Feature count above which pairwise overlap detection is skipped.
pub const DEFAULT_MAX_OVERLAP_FEATURES: usize = 1000;
/// Metres per degree used by the locally-flat bounding box conversion.
pub const DEFAULT_METRES_PER_DEGREE: f64 = 111_000.0;

/// Tunable limits consumed by the warning detectors.
///
/// # Examples
///
/// ```
/// use greenborder_core::Thresholds;
///
/// let thresholds = Thresholds {
///     max_overlap_features: 50,
///     ..Thresholds::default()
/// };
/// assert_eq!(thresholds.max_decimals, 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Serialized size, in bytes, above which `FILE_SIZE_LARGE` is raised.
    pub max_document_bytes: u64,
    /// Decimals allowed per longitude or latitude before `PRECISION_EXCESS`.
    pub max_decimals: usize,
    /// Upper bound (exclusive) on the area of a micro-surface, in m².
    pub micro_surface_area: f64,
    /// Upper bound (exclusive) on the aspect ratio of a micro-surface.
    pub micro_surface_max_ratio: f64,
    /// Lower bound (exclusive) on the aspect ratio of a sliver.
    pub sliver_min_ratio: f64,
    /// Lower bound (exclusive) on a reported overlap area, in m².
    pub overlap_min_area: f64,
    /// Largest collection for which pairwise overlaps are computed.
    pub max_overlap_features: usize,
    /// Metres per degree of latitude (and of longitude at the equator).
    pub metres_per_degree: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            max_decimals: DEFAULT_MAX_DECIMALS,
            micro_surface_area: DEFAULT_MICRO_SURFACE_AREA,
            micro_surface_max_ratio: DEFAULT_MICRO_SURFACE_MAX_RATIO,
            sliver_min_ratio: DEFAULT_SLIVER_MIN_RATIO,
            overlap_min_area: DEFAULT_OVERLAP_MIN_AREA,
            max_overlap_features: DEFAULT_MAX_OVERLAP_FEATURES,
            metres_per_degree: DEFAULT_METRES_PER_DEGREE,
        }
    }
}
