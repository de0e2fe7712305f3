//! Non-blocking quality detectors.
//!
//! Each detector inspects a structurally valid [`Collection`](crate::Collection)
//! and returns zero or more [`Warning`](crate::Warning)s. Detectors never
//! reject a document, and geometry failures inside a detector only suppress
//! that detector's finding for the affected feature or pair.

mod degeneracy;
mod overlap;
mod precision;
mod size;

pub use degeneracy::{Degeneracy, Shape, check_degenerate, measure};
pub use overlap::check_overlaps;
pub use precision::{check_precision, decimal_places};
pub use size::{check_file_size, serialized_len};
