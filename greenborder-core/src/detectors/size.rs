//! Document size check.

use std::io::{self, Write};

use serde_json::Value;

use crate::document::Collection;
use crate::thresholds::Thresholds;
use crate::verdict::{Severity, Warning, WarningCode};

const BYTES_PER_MEGABYTE: u64 = 1024 * 1024;

/// Raise `FILE_SIZE_LARGE` when the compact serialization of the document
/// exceeds [`Thresholds::max_document_bytes`].
///
/// Returns at most one warning.
#[must_use]
pub fn check_file_size(collection: &Collection<'_>, thresholds: &Thresholds) -> Option<Warning> {
    let size = serialized_len(collection.document());
    if size <= thresholds.max_document_bytes {
        return None;
    }
    Some(Warning::document(
        WarningCode::FileSizeLarge,
        Severity::Medium,
        format!(
            "large file ({:.2} MB): export may be rejected (limit {:.0} MB)",
            megabytes(size),
            megabytes(thresholds.max_document_bytes),
        ),
    ))
}

/// Number of UTF-8 bytes in the compact JSON serialization of `document`.
#[must_use]
pub fn serialized_len(document: &Value) -> u64 {
    let mut counter = ByteCounter::default();
    // Writing into the counter cannot fail and a `Value` always serializes.
    if serde_json::to_writer(&mut counter, document).is_err() {
        log::debug!("document serialization failed while measuring its size");
    }
    counter.bytes
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "sizes are only rendered for display"
)]
fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MEGABYTE as f64
}

/// Sink that only counts what is written to it.
#[derive(Debug, Default)]
struct ByteCounter {
    bytes: u64,
}

impl Write for ByteCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let len = u64::try_from(buf.len()).unwrap_or(u64::MAX);
        self.bytes = self.bytes.saturating_add(len);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
