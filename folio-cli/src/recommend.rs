//! `recommend` command: recommendations shown alongside a book.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use folio_scorer::Recommender;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::catalog::{open_catalog, resolve_catalog_path};
use crate::output::write_json;
use crate::{ARG_BOOK_ID, ARG_CATALOG_DB, ARG_DATA_DIR, ARG_OUTPUT, CliError};

pub(crate) const ENV_RECOMMEND_BOOK_ID: &str = "FOLIO_CMDS_RECOMMEND_BOOK_ID";
pub(crate) const ENV_RECOMMEND_CATALOG_DB: &str = "FOLIO_CMDS_RECOMMEND_CATALOG_DB";

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "recommend",
    long_about = "Resolve a book by id and list the recommendations shown on \
                 its detail page. The list is the global popularity chart.",
    about = "Recommend books for a book's detail page"
)]
#[ortho_config(prefix = "FOLIO")]
pub(crate) struct RecommendArgs {
    /// Identifier of the book being viewed.
    #[arg(value_name = "book-id")]
    #[serde(default)]
    pub(crate) book_id: Option<u64>,
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

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecommendConfig {
    pub(crate) book_id: u64,
    pub(crate) catalog_db: Utf8PathBuf,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let book_id = args.book_id.ok_or(CliError::MissingArgument {
            field: ARG_BOOK_ID,
            env: ENV_RECOMMEND_BOOK_ID,
        })?;
        Ok(Self {
            book_id,
            catalog_db: resolve_catalog_path(
                args.catalog_db,
                args.data_dir,
                ENV_RECOMMEND_CATALOG_DB,
            )?,
            output: args.output,
        })
    }
}

pub(crate) fn run_recommend(args: RecommendArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let recommender = Recommender::new(open_catalog(&config.catalog_db)?);
    let recommended = recommender.recommend_for_book(config.book_id)?;
    write_json(writer, config.output.as_deref(), &recommended)
}
