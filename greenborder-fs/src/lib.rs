//! Filesystem helpers for locating and reading uploaded parcel documents,
//! built on `cap-std` and `camino`.
//!
//! Uploads live under `<root>/uploads/<file_id>/source.geojson`. Lookups by
//! identifier go through an [`UploadsDir`] capability, so an identifier can
//! never name a file outside the uploads directory.
#![forbid(unsafe_code)]

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io::{self, Read};

/// Directory, relative to the uploads root, holding one folder per upload.
pub const UPLOADS_DIR: &str = "uploads";
/// File name of the original document inside an upload folder.
pub const SOURCE_FILE: &str = "source.geojson";

/// Read a whole file given by an ambient path.
pub fn read_file(path: &Utf8Path) -> io::Result<Vec<u8>> {
    let mut file = fs_utf8::File::open_ambient(path, ambient_authority())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Path of the source document for `file_id` below `root`.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use greenborder_fs::source_path;
///
/// let path = source_path(Utf8Path::new("/srv"), "abc123");
/// assert_eq!(path.as_str(), "/srv/uploads/abc123/source.geojson");
/// ```
#[must_use]
pub fn source_path(root: &Utf8Path, file_id: &str) -> Utf8PathBuf {
    root.join(UPLOADS_DIR).join(file_id).join(SOURCE_FILE)
}

/// Capability over an uploads root.
#[derive(Debug)]
pub struct UploadsDir {
    dir: fs_utf8::Dir,
}

impl UploadsDir {
    /// Open the uploads root at `root`.
    pub fn open(root: &Utf8Path) -> io::Result<Self> {
        let dir = fs_utf8::Dir::open_ambient_dir(root, ambient_authority())?;
        Ok(Self { dir })
    }

    /// Read the source document for `file_id`.
    ///
    /// A missing upload surfaces as an `io::ErrorKind::NotFound` error and a
    /// malformed identifier as `InvalidInput`.
    pub fn read_source(&self, file_id: &str) -> io::Result<Vec<u8>> {
        let relative = relative_source(file_id)?;
        self.dir.read(&relative)
    }
}

/// Identifiers must be a single plain path component.
fn relative_source(file_id: &str) -> io::Result<Utf8PathBuf> {
    let mut components = Utf8Path::new(file_id).components();
    match (components.next(), components.next()) {
        (Some(Utf8Component::Normal(name)), None) if name == file_id => {
            Ok(source_path(Utf8Path::new(""), name))
        }
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid upload identifier: {file_id:?}"),
        )),
    }
}
