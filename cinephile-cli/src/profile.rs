//! Stats and reset commands, which touch only the stored profile.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{ARG_STATE_DIR, CliError, DEFAULT_STATE_DIR, open_engine, write_json};

/// CLI arguments for the `stats` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "stats", about = "Summarise the stored preference profile")]
#[ortho_config(prefix = "CINEPHILE")]
pub(crate) struct StatsArgs {
    /// Directory holding the preference profile (default `.cinephile`).
    #[arg(long = ARG_STATE_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) state_dir: Option<Utf8PathBuf>,
}

/// CLI arguments for the `reset` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "reset", about = "Forget every stored preference")]
#[ortho_config(prefix = "CINEPHILE")]
pub(crate) struct ResetArgs {
    /// Directory holding the preference profile (default `.cinephile`).
    #[arg(long = ARG_STATE_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) state_dir: Option<Utf8PathBuf>,
}

fn state_dir_or_default(state_dir: Option<Utf8PathBuf>) -> Utf8PathBuf {
    state_dir.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_STATE_DIR))
}

pub(super) fn run_stats_with(args: StatsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let state_dir = state_dir_or_default(merged.state_dir);
    let engine = open_engine(&state_dir, None);
    write_json(writer, &engine.stats())
}

pub(super) fn run_reset_with(args: ResetArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let state_dir = state_dir_or_default(merged.state_dir);
    let mut engine = open_engine(&state_dir, None);
    engine.reset_preferences();
    log::info!("cleared preferences stored in {state_dir}");
    write_json(writer, &engine.stats())
}
