//! Error types emitted by the Cinephile CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use cinephile_core::CatalogError;
use thiserror::Error;

/// Errors emitted by the Cinephile CLI.
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
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Reading the catalogue file failed.
    #[error("failed to read catalogue at {path:?}: {source}")]
    ReadCatalog {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The catalogue file was not a JSON array of movies.
    #[error("failed to parse catalogue JSON at {path:?}: {source}")]
    ParseCatalog {
        path: Utf8PathBuf,
        #[source]
        source: CatalogError,
    },
    /// Feedback named a movie the catalogue does not hold.
    #[error("movie {id:?} is not in catalogue {path:?}")]
    UnknownMovie { id: String, path: Utf8PathBuf },
    /// Serialising command output failed.
    #[error("failed to serialise command output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write command output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
