//! Validate command implementation for the greenborder CLI.

use std::fmt;
use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use greenborder_core::{
    DEFAULT_MAX_OVERLAP_FEATURES, Thresholds, ValidationReport, ValidationVerdict, Validator,
};
use greenborder_fs::{UploadsDir, read_file, source_path};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DOCUMENT, ARG_FILE_ID, ARG_MAX_OVERLAP_FEATURES, ARG_UPLOADS_ROOT, CliError, ENV_FILE_ID,
    Outcome,
};

/// CLI arguments for the `validate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Validate an uploaded GeoJSON parcel collection. The document \
                 is located by its upload identifier under the uploads root \
                 (uploads/<file_id>/source.geojson) or given directly with \
                 --document. The JSON report is printed on stdout; the exit \
                 status is 0 when the document is accepted and 2 when it is \
                 rejected.",
    about = "Validate a parcel collection"
)]
#[ortho_config(prefix = "GREENBORDER")]
pub(crate) struct ValidateArgs {
    /// Identifier of the upload to validate.
    #[arg(value_name = "file_id")]
    #[serde(default)]
    pub(crate) file_id: Option<String>,
    /// Validate this file instead of an upload.
    #[arg(long = ARG_DOCUMENT, value_name = "path")]
    #[serde(default)]
    pub(crate) document: Option<Utf8PathBuf>,
    /// Directory containing the `uploads` folder (defaults to the current
    /// directory).
    #[arg(long = ARG_UPLOADS_ROOT, value_name = "dir")]
    #[serde(default)]
    pub(crate) uploads_root: Option<Utf8PathBuf>,
    /// Feature count above which overlap detection is skipped.
    #[arg(long = ARG_MAX_OVERLAP_FEATURES, value_name = "count")]
    #[serde(default)]
    pub(crate) max_overlap_features: Option<usize>,
    /// Pretty-print the JSON report.
    #[arg(long)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) pretty: bool,
}

impl ValidateArgs {
    pub(crate) fn into_config(self) -> Result<ValidateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ValidateConfig::try_from(merged)
    }
}

/// Where the document to validate comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DocumentSource {
    /// An upload looked up by identifier below `uploads_root`.
    Upload {
        uploads_root: Utf8PathBuf,
        file_id: String,
    },
    /// An explicit file.
    Path(Utf8PathBuf),
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upload {
                uploads_root,
                file_id,
            } => write!(f, "{}", source_path(uploads_root, file_id)),
            Self::Path(path) => write!(f, "{path}"),
        }
    }
}

/// Resolved `validate` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidateConfig {
    pub(crate) source: DocumentSource,
    pub(crate) thresholds: Thresholds,
    pub(crate) pretty: bool,
}

impl TryFrom<ValidateArgs> for ValidateConfig {
    type Error = CliError;

    fn try_from(args: ValidateArgs) -> Result<Self, Self::Error> {
        let source = match (args.file_id, args.document) {
            (Some(_), Some(_)) => {
                return Err(CliError::ConflictingSources {
                    document: ARG_DOCUMENT,
                });
            }
            (None, Some(path)) => DocumentSource::Path(path),
            (Some(file_id), None) => DocumentSource::Upload {
                uploads_root: args
                    .uploads_root
                    .unwrap_or_else(|| Utf8PathBuf::from(".")),
                file_id,
            },
            (None, None) => {
                return Err(CliError::MissingArgument {
                    field: ARG_FILE_ID,
                    env: ENV_FILE_ID,
                });
            }
        };
        let thresholds = Thresholds {
            max_overlap_features: args
                .max_overlap_features
                .unwrap_or(DEFAULT_MAX_OVERLAP_FEATURES),
            ..Thresholds::default()
        };
        Ok(Self {
            source,
            thresholds,
            pretty: args.pretty,
        })
    }
}

pub(super) fn run_validate(args: ValidateArgs) -> Result<Outcome, CliError> {
    let mut stdout = io::stdout().lock();
    run_validate_with(args, &mut stdout)
}

pub(super) fn run_validate_with(
    args: ValidateArgs,
    writer: &mut dyn Write,
) -> Result<Outcome, CliError> {
    let config = args.into_config()?;
    let verdict = execute_validate(&config)?;
    let outcome = if verdict.is_valid() {
        Outcome::Valid
    } else {
        Outcome::Invalid
    };
    write_report(writer, &ValidationReport::from(verdict), config.pretty)?;
    Ok(outcome)
}

fn execute_validate(config: &ValidateConfig) -> Result<ValidationVerdict, CliError> {
    let bytes = load_document(&config.source)?;
    let verdict = Validator::new()
        .with_thresholds(config.thresholds)
        .validate_bytes(&bytes);
    match verdict.error() {
        Some(error) => info!("Rejected {}: {}", config.source, error.code()),
        None => info!(
            "Accepted {} with {} warnings",
            config.source,
            verdict.warnings().len()
        ),
    }
    Ok(verdict)
}

/// Reads the raw bytes of the configured document.
pub(super) fn load_document(source: &DocumentSource) -> Result<Vec<u8>, CliError> {
    match source {
        DocumentSource::Upload {
            uploads_root,
            file_id,
        } => load_upload(uploads_root, file_id),
        DocumentSource::Path(path) => read_file(path).map_err(|source| {
            read_error(source, ARG_DOCUMENT, path.clone())
        }),
    }
}

fn load_upload(uploads_root: &Utf8Path, file_id: &str) -> Result<Vec<u8>, CliError> {
    let uploads = UploadsDir::open(uploads_root).map_err(|source| CliError::OpenUploads {
        path: uploads_root.to_path_buf(),
        source,
    })?;
    uploads.read_source(file_id).map_err(|source| {
        if source.kind() == io::ErrorKind::InvalidInput {
            CliError::InvalidFileId {
                file_id: file_id.to_owned(),
            }
        } else {
            read_error(source, ARG_FILE_ID, source_path(uploads_root, file_id))
        }
    })
}

fn read_error(source: io::Error, field: &'static str, path: Utf8PathBuf) -> CliError {
    if source.kind() == io::ErrorKind::NotFound {
        CliError::MissingSourceFile { field, path }
    } else {
        CliError::ReadDocument { path, source }
    }
}

fn write_report(
    writer: &mut dyn Write,
    report: &ValidationReport,
    pretty: bool,
) -> Result<(), CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
    .map_err(CliError::SerializeReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ValidateConfig, CliError> {
    let merged = ValidateArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ValidateConfig::try_from(merged)
}
