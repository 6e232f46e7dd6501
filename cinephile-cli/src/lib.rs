//! Command-line interface for the Cinephile recommendation engine.
//!
//! Each subcommand loads the preference profile from a state directory,
//! runs one engine operation and prints JSON to stdout.
#![forbid(unsafe_code)]

use std::io::Write;

use camino::Utf8Path;
use cinephile_core::{Catalog, DirectoryStore};
use cinephile_recommender::RecommendationEngine;
use clap::{Parser, Subcommand};
use serde::Serialize;

mod error;
mod feedback;
mod profile;
mod recommend;

pub use error::CliError;

use feedback::{FeedbackArgs, run_feedback_with};
use profile::{ResetArgs, StatsArgs, run_reset_with, run_stats_with};
use recommend::{RecommendArgs, run_recommend_with};

pub(crate) const ARG_CATALOG: &str = "catalog";
pub(crate) const ARG_STRATEGY: &str = "strategy";
pub(crate) const ARG_MOOD: &str = "mood";
pub(crate) const ARG_GENRE: &str = "genre";
pub(crate) const ARG_DECADE: &str = "decade";
pub(crate) const ARG_MIN_RATING: &str = "min-rating";
pub(crate) const ARG_MAX_RATING: &str = "max-rating";
pub(crate) const ARG_AVOID_RECENT: &str = "avoid-recent";
pub(crate) const ARG_SEED: &str = "seed";
pub(crate) const ARG_MOVIE_ID: &str = "movie-id";
pub(crate) const ARG_DISLIKE: &str = "dislike";
pub(crate) const ARG_STATE_DIR: &str = "state-dir";
pub(crate) const ENV_RECOMMEND_CATALOG: &str = "CINEPHILE_CMDS_RECOMMEND_CATALOG";
pub(crate) const ENV_FEEDBACK_CATALOG: &str = "CINEPHILE_CMDS_FEEDBACK_CATALOG";
pub(crate) const ENV_FEEDBACK_MOVIE_ID: &str = "CINEPHILE_CMDS_FEEDBACK_MOVIE_ID";

/// Directory holding the preference profile when `--state-dir` is unset.
pub(crate) const DEFAULT_STATE_DIR: &str = ".cinephile";

/// Run the Cinephile CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Recommend(args) => run_recommend_with(args, writer),
        Command::Feedback(args) => run_feedback_with(args, writer),
        Command::Stats(args) => run_stats_with(args, writer),
        Command::Reset(args) => run_reset_with(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "cinephile",
    about = "Pick movies from a catalogue and learn from your feedback",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recommend one movie from a JSON catalogue.
    Recommend(RecommendArgs),
    /// Record a like or dislike for a catalogue movie.
    Feedback(FeedbackArgs),
    /// Summarise the stored preference profile.
    Stats(StatsArgs),
    /// Forget every stored preference.
    Reset(ResetArgs),
}

pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match cinephile_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Loads a JSON movie catalogue from disk.
pub(crate) fn load_catalog(path: &Utf8Path) -> Result<Catalog, CliError> {
    require_existing(path, ARG_CATALOG)?;
    let payload = cinephile_fs::read_to_string(path).map_err(|source| CliError::ReadCatalog {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = Catalog::from_json(&payload).map_err(|source| CliError::ParseCatalog {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded {} movies from {path}", catalog.len());
    Ok(catalog)
}

/// Builds an engine over the profile stored in `state_dir`.
pub(crate) fn open_engine(
    state_dir: &Utf8Path,
    seed: Option<u64>,
) -> RecommendationEngine<DirectoryStore> {
    let store = DirectoryStore::new(state_dir.to_path_buf());
    match seed {
        Some(seed) => RecommendationEngine::seeded(store, seed),
        None => RecommendationEngine::from_entropy(store),
    }
}

pub(crate) fn write_json<T: Serialize + ?Sized>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
