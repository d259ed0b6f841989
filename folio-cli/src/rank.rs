//! `rank` command: the global popularity chart.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use folio_scorer::{DEFAULT_VOTE_PERCENTILE, PopularityRanker, Recommender};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::catalog::{open_catalog, resolve_catalog_path};
use crate::output::write_json;
use crate::{ARG_CATALOG_DB, ARG_DATA_DIR, ARG_OUTPUT, ARG_VOTE_PERCENTILE, CliError};

pub(crate) const ENV_RANK_CATALOG_DB: &str = "FOLIO_CMDS_RANK_CATALOG_DB";

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "rank",
    long_about = "Rank every book in the catalogue by IMDb-style weighted \
                 rating. Only books whose vote count reaches the chosen \
                 percentile of all vote counts are listed.",
    about = "Rank the catalogue by weighted rating"
)]
#[ortho_config(prefix = "FOLIO")]
pub(crate) struct RankArgs {
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
    /// Vote-count percentile a book must reach to be ranked.
    #[arg(long = ARG_VOTE_PERCENTILE, value_name = "percent")]
    #[serde(default)]
    pub(crate) vote_percentile: Option<f64>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RankConfig {
    pub(crate) catalog_db: Utf8PathBuf,
    pub(crate) output: Option<Utf8PathBuf>,
    pub(crate) vote_percentile: f64,
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            catalog_db: resolve_catalog_path(args.catalog_db, args.data_dir, ENV_RANK_CATALOG_DB)?,
            output: args.output,
            vote_percentile: args.vote_percentile.unwrap_or(DEFAULT_VOTE_PERCENTILE),
        })
    }
}

pub(crate) fn run_rank(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let ranker = PopularityRanker::with_percentile(config.vote_percentile)?;
    let recommender = Recommender::new(open_catalog(&config.catalog_db)?).with_ranker(ranker);
    let ranked = recommender.rank_popular()?;
    write_json(writer, config.output.as_deref(), &ranked)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged)
}
