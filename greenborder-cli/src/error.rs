//! Error types emitted by the greenborder CLI.
//!
//! A rejected document is not an error here: it is a normal outcome with its
//! own exit status. These variants cover failures of the tool itself.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors emitted by the greenborder CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (pass it on the command line or set {env})")]
    MissingArgument {
        /// Name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// Both an upload identifier and an explicit document path were given.
    #[error("pass either an upload identifier or --{document}, not both")]
    ConflictingSources {
        /// Name of the explicit document option.
        document: &'static str,
    },
    /// The upload identifier is not a single path component.
    #[error("invalid upload identifier {file_id:?}")]
    InvalidFileId {
        /// Identifier as given.
        file_id: String,
    },
    /// The uploads root could not be opened.
    #[error("failed to open uploads root {path:?}: {source}")]
    OpenUploads {
        /// Uploads root as configured.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The referenced source document does not exist.
    #[error("{field} source {path:?} does not exist")]
    MissingSourceFile {
        /// Option that referenced the document.
        field: &'static str,
        /// Path that was looked up.
        path: Utf8PathBuf,
    },
    /// Reading the source document failed.
    #[error("failed to read {path:?}: {source}")]
    ReadDocument {
        /// Path that was read.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Serializing the validation report failed.
    #[error("failed to serialize validation report: {0}")]
    SerializeReport(#[source] serde_json::Error),
    /// Writing the validation report failed.
    #[error("failed to write validation report: {0}")]
    WriteOutput(#[source] std::io::Error),
}
