//! `favourite add` and `favourite remove` commands.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use folio_scorer::Recommender;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::catalog::{open_catalog, resolve_catalog_path};
use crate::output::write_json;
use crate::{ARG_BOOK_ID, ARG_CATALOG_DB, ARG_DATA_DIR, ARG_OUTPUT, ARG_USER_ID, CliError};

pub(crate) const ENV_FAVOURITE_USER_ID: &str = "FOLIO_CMDS_FAVOURITE_USER_ID";
pub(crate) const ENV_FAVOURITE_BOOK_ID: &str = "FOLIO_CMDS_FAVOURITE_BOOK_ID";
pub(crate) const ENV_FAVOURITE_CATALOG_DB: &str = "FOLIO_CMDS_FAVOURITE_CATALOG_DB";

#[derive(Debug, Subcommand)]
pub(crate) enum FavouriteCommand {
    /// Mark a book as a favourite and print the popularity chart.
    Add(FavouriteArgs),
    /// Remove a book from a reader's favourites.
    Remove(FavouriteArgs),
}

/// CLI arguments shared by the `favourite` subcommands.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "favourite", about = "Change a reader's favourite books")]
#[ortho_config(prefix = "FOLIO")]
pub(crate) struct FavouriteArgs {
    /// Identifier of the reader.
    #[arg(value_name = "user-id")]
    #[serde(default)]
    pub(crate) user_id: Option<u64>,
    /// Identifier of the book.
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

impl FavouriteArgs {
    pub(crate) fn into_config(self) -> Result<FavouriteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        FavouriteConfig::try_from(merged)
    }
}

/// Resolved `favourite` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FavouriteConfig {
    pub(crate) user_id: u64,
    pub(crate) book_id: u64,
    pub(crate) catalog_db: Utf8PathBuf,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<FavouriteArgs> for FavouriteConfig {
    type Error = CliError;

    fn try_from(args: FavouriteArgs) -> Result<Self, Self::Error> {
        let user_id = args.user_id.ok_or(CliError::MissingArgument {
            field: ARG_USER_ID,
            env: ENV_FAVOURITE_USER_ID,
        })?;
        let book_id = args.book_id.ok_or(CliError::MissingArgument {
            field: ARG_BOOK_ID,
            env: ENV_FAVOURITE_BOOK_ID,
        })?;
        Ok(Self {
            user_id,
            book_id,
            catalog_db: resolve_catalog_path(
                args.catalog_db,
                args.data_dir,
                ENV_FAVOURITE_CATALOG_DB,
            )?,
            output: args.output,
        })
    }
}

/// Acknowledgement printed after a favourite is removed.
#[derive(Debug, Serialize)]
struct FavouriteRemoved {
    user_id: u64,
    book_id: u64,
    removed: bool,
}

pub(crate) fn run_favourite(
    command: FavouriteCommand,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        FavouriteCommand::Add(args) => {
            let config = args.into_config()?;
            let mut recommender = Recommender::new(open_catalog(&config.catalog_db)?);
            let ranked = recommender.add_favourite_and_recommend(config.user_id, config.book_id)?;
            write_json(writer, config.output.as_deref(), &ranked)
        }
        FavouriteCommand::Remove(args) => {
            let config = args.into_config()?;
            let mut recommender = Recommender::new(open_catalog(&config.catalog_db)?);
            recommender.remove_favourite(config.user_id, config.book_id)?;
            let ack = FavouriteRemoved {
                user_id: config.user_id,
                book_id: config.book_id,
                removed: true,
            };
            write_json(writer, config.output.as_deref(), &ack)
        }
    }
}
