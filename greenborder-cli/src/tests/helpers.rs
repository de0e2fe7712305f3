//! Scratch upload trees for CLI tests.

use camino::{Utf8Path, Utf8PathBuf};
use greenborder_core::test_support::{collection, degree_square, feature};
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Temporary uploads root that is removed when dropped.
pub(super) struct UploadTree {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl UploadTree {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Store `bytes` as the source document of upload `file_id`.
    pub(super) fn upload(&self, file_id: &str, bytes: &[u8]) -> Utf8PathBuf {
        let path = greenborder_fs::source_path(&self.root, file_id);
        write_utf8(&path, bytes);
        path
    }

    pub(super) fn upload_json(&self, file_id: &str, document: &Value) -> Utf8PathBuf {
        let payload = serde_json::to_vec(document).expect("serialize document");
        self.upload(file_id, &payload)
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    fs::write(path, contents).expect("write file");
}

/// A single well-formed parcel in central Paris.
pub(super) fn clean_collection() -> Value {
    collection(vec![feature(degree_square(2.3522, 48.8566, 0.01))])
}
