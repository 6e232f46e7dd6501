//! Feedback command implementation for the Cinephile CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_CATALOG, ARG_DISLIKE, ARG_MOVIE_ID, ARG_STATE_DIR, CliError, DEFAULT_STATE_DIR,
    ENV_FEEDBACK_CATALOG, ENV_FEEDBACK_MOVIE_ID, load_catalog, open_engine, write_json,
};

/// CLI arguments for the `feedback` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "feedback",
    long_about = "Record whether you liked a movie from the catalogue. \
                 Likes strengthen the movie's genres, director and decade; \
                 dislikes weaken them. The updated profile summary is \
                 printed as JSON.",
    about = "Like or dislike a catalogue movie"
)]
#[ortho_config(prefix = "CINEPHILE")]
pub(crate) struct FeedbackArgs {
    /// Path to the JSON movie catalogue holding the movie.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Id of the movie being rated.
    #[arg(long = ARG_MOVIE_ID, value_name = "id")]
    #[serde(default)]
    pub(crate) movie_id: Option<String>,
    /// Record a dislike instead of a like.
    #[arg(
        long = ARG_DISLIKE,
        num_args = 0..=1,
        default_missing_value = "true",
        value_name = "bool"
    )]
    #[serde(default)]
    pub(crate) dislike: Option<bool>,
    /// Directory holding the preference profile (default `.cinephile`).
    #[arg(long = ARG_STATE_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) state_dir: Option<Utf8PathBuf>,
}

impl FeedbackArgs {
    pub(crate) fn into_config(self) -> Result<FeedbackConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        FeedbackConfig::try_from(merged)
    }
}

/// Resolved `feedback` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FeedbackConfig {
    pub(crate) catalog: Utf8PathBuf,
    pub(crate) movie_id: String,
    pub(crate) liked: bool,
    pub(crate) state_dir: Utf8PathBuf,
}

impl TryFrom<FeedbackArgs> for FeedbackConfig {
    type Error = CliError;

    fn try_from(args: FeedbackArgs) -> Result<Self, Self::Error> {
        let catalog = args.catalog.ok_or(CliError::MissingArgument {
            field: ARG_CATALOG,
            env: ENV_FEEDBACK_CATALOG,
        })?;
        let movie_id = args.movie_id.ok_or(CliError::MissingArgument {
            field: ARG_MOVIE_ID,
            env: ENV_FEEDBACK_MOVIE_ID,
        })?;
        Ok(Self {
            catalog,
            movie_id,
            liked: !args.dislike.unwrap_or(false),
            state_dir: args
                .state_dir
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_STATE_DIR)),
        })
    }
}

pub(super) fn run_feedback_with(args: FeedbackArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let catalog = load_catalog(&config.catalog)?;
    let movie = catalog
        .find(&config.movie_id)
        .ok_or_else(|| CliError::UnknownMovie {
            id: config.movie_id.clone(),
            path: config.catalog.clone(),
        })?;
    let mut engine = open_engine(&config.state_dir, None);
    engine.update_preferences(movie, config.liked);
    write_json(writer, &engine.stats())
}
