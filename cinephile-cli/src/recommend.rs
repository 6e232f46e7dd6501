//! Recommend command implementation for the Cinephile CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use cinephile_recommender::{RecommendationOptions, Strategy};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_AVOID_RECENT, ARG_CATALOG, ARG_DECADE, ARG_GENRE, ARG_MAX_RATING, ARG_MIN_RATING,
    ARG_MOOD, ARG_SEED, ARG_STATE_DIR, ARG_STRATEGY, CliError, DEFAULT_STATE_DIR,
    ENV_RECOMMEND_CATALOG, load_catalog, open_engine, write_json,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "recommend",
    long_about = "Recommend one movie from a JSON catalogue. The catalogue \
                 is an array of movie records or raw watch-history rows. \
                 The pick is remembered so later calls can avoid repeats.",
    about = "Recommend a movie from a catalogue"
)]
#[ortho_config(prefix = "CINEPHILE")]
pub(crate) struct RecommendArgs {
    /// Path to a JSON movie catalogue.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Strategy name, such as `hidden_gems` (default `smart_random`).
    #[arg(long = ARG_STRATEGY, value_name = "name")]
    #[serde(default)]
    pub(crate) strategy: Option<Strategy>,
    /// Mood for the `mood_based` strategy.
    #[arg(long = ARG_MOOD, value_name = "mood")]
    #[serde(default)]
    pub(crate) mood: Option<String>,
    /// Genre text to match.
    #[arg(long = ARG_GENRE, value_name = "genre")]
    #[serde(default)]
    pub(crate) genre: Option<String>,
    /// Decade label such as `1990s`.
    #[arg(long = ARG_DECADE, value_name = "decade")]
    #[serde(default)]
    pub(crate) decade: Option<String>,
    /// Inclusive lower rating bound.
    #[arg(long = ARG_MIN_RATING, value_name = "stars")]
    #[serde(default)]
    pub(crate) min_rating: Option<f32>,
    /// Inclusive upper rating bound.
    #[arg(long = ARG_MAX_RATING, value_name = "stars")]
    #[serde(default)]
    pub(crate) max_rating: Option<f32>,
    /// Skip recently suggested movies.
    #[arg(
        long = ARG_AVOID_RECENT,
        num_args = 0..=1,
        default_missing_value = "true",
        value_name = "bool"
    )]
    #[serde(default)]
    pub(crate) avoid_recent: Option<bool>,
    /// Seed for reproducible picks.
    #[arg(long = ARG_SEED, value_name = "n")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Directory holding the preference profile (default `.cinephile`).
    #[arg(long = ARG_STATE_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) state_dir: Option<Utf8PathBuf>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecommendConfig {
    pub(crate) catalog: Utf8PathBuf,
    pub(crate) options: RecommendationOptions,
    pub(crate) seed: Option<u64>,
    pub(crate) state_dir: Utf8PathBuf,
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let catalog = args.catalog.ok_or(CliError::MissingArgument {
            field: ARG_CATALOG,
            env: ENV_RECOMMEND_CATALOG,
        })?;
        let options = RecommendationOptions {
            strategy: args.strategy,
            mood: args.mood,
            genre_filter: args.genre,
            min_rating: args.min_rating,
            max_rating: args.max_rating,
            decade: args.decade,
            avoid_recent: args.avoid_recent.unwrap_or(false),
            ..RecommendationOptions::default()
        };
        Ok(Self {
            catalog,
            options,
            seed: args.seed,
            state_dir: args
                .state_dir
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_STATE_DIR)),
        })
    }
}

pub(super) fn run_recommend_with(
    args: RecommendArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let catalog = load_catalog(&config.catalog)?;
    let mut engine = open_engine(&config.state_dir, config.seed);
    let recommendation = engine.recommend_with_reason(catalog.movies(), &config.options);
    write_json(writer, &recommendation)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
