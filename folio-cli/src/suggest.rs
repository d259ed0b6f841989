//! `suggest` command: content-based suggestions for a reader.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use folio_scorer::{DEFAULT_SUGGESTION_LIMIT, Recommender, SimilaritySuggester};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::catalog::{open_catalog, resolve_catalog_path};
use crate::output::write_json;
use crate::{ARG_CATALOG_DB, ARG_DATA_DIR, ARG_LIMIT, ARG_OUTPUT, ARG_USER_ID, CliError};

pub(crate) const ENV_SUGGEST_USER_ID: &str = "FOLIO_CMDS_SUGGEST_USER_ID";
pub(crate) const ENV_SUGGEST_CATALOG_DB: &str = "FOLIO_CMDS_SUGGEST_CATALOG_DB";

/// CLI arguments for the `suggest` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "suggest",
    long_about = "Suggest unread books whose title and authors resemble a \
                 reader's favourites, scored by mean TF-IDF similarity.",
    about = "Suggest books similar to a reader's favourites"
)]
#[ortho_config(prefix = "FOLIO")]
pub(crate) struct SuggestArgs {
    /// Identifier of the reader.
    #[arg(value_name = "user-id")]
    #[serde(default)]
    pub(crate) user_id: Option<u64>,
    /// Maximum number of suggestions.
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Path to the SQLite catalogue.
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
    /// Directory holding `catalog.db`.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Write JSON to this file instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl SuggestArgs {
    pub(crate) fn into_config(self) -> Result<SuggestConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SuggestConfig::try_from(merged)
    }
}

/// Resolved `suggest` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SuggestConfig {
    pub(crate) user_id: u64,
    pub(crate) limit: usize,
    pub(crate) catalog_db: Utf8PathBuf,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<SuggestArgs> for SuggestConfig {
    type Error = CliError;

    fn try_from(args: SuggestArgs) -> Result<Self, Self::Error> {
        let user_id = args.user_id.ok_or(CliError::MissingArgument {
            field: ARG_USER_ID,
            env: ENV_SUGGEST_USER_ID,
        })?;
        Ok(Self {
            user_id,
            limit: args.limit.unwrap_or(DEFAULT_SUGGESTION_LIMIT),
            catalog_db: resolve_catalog_path(
                args.catalog_db,
                args.data_dir,
                ENV_SUGGEST_CATALOG_DB,
            )?,
            output: args.output,
        })
    }
}

pub(crate) fn run_suggest(args: SuggestArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let recommender = Recommender::new(open_catalog(&config.catalog_db)?)
        .with_suggester(SimilaritySuggester::new(config.limit));
    let suggestions = recommender.suggest_for_user(config.user_id)?;
    write_json(writer, config.output.as_deref(), &suggestions)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SuggestConfig, CliError> {
    let merged = SuggestArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SuggestConfig::try_from(merged)
}
