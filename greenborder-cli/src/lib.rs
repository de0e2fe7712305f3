//! Command-line interface for validating uploaded parcel collections.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod validate;

pub use error::CliError;
use validate::{ValidateArgs, run_validate};

const ARG_FILE_ID: &str = "file-id";
const ARG_DOCUMENT: &str = "document";
const ARG_UPLOADS_ROOT: &str = "uploads-root";
const ARG_MAX_OVERLAP_FEATURES: &str = "max-overlap-features";
const ENV_FILE_ID: &str = "GREENBORDER_FILE_ID";

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The document was accepted, possibly with warnings.
    Valid,
    /// The document was rejected by a blocking check.
    Invalid,
}

impl Outcome {
    /// Process exit status for this outcome.
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Valid => 0,
            Self::Invalid => 2,
        }
    }
}

/// Run the greenborder CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments or configuration are unusable, the
/// document cannot be read, or the report cannot be written.
pub fn run() -> Result<Outcome, CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Validate(args) => run_validate(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "greenborder",
    about = "Quality checks for uploaded GeoJSON parcel collections",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate one uploaded document and print the JSON report.
    Validate(ValidateArgs),
}

#[cfg(test)]
mod tests;
