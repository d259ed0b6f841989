//! `init` command: create an empty catalogue.

use camino::Utf8PathBuf;
use clap::Parser;
use folio_core::SqliteCatalog;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::catalog::resolve_catalog_path;
use crate::{ARG_CATALOG_DB, ARG_DATA_DIR, CliError};

pub(crate) const ENV_INIT_CATALOG_DB: &str = "FOLIO_CMDS_INIT_CATALOG_DB";

/// CLI arguments for the `init` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "init",
    about = "Create an empty SQLite catalogue with the Folio schema"
)]
#[ortho_config(prefix = "FOLIO")]
pub(crate) struct InitArgs {
    /// Path of the catalogue to create.
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
    /// Directory in which to create `catalog.db`.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
}

pub(crate) fn run_init(args: InitArgs) -> Result<Utf8PathBuf, CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let path = resolve_catalog_path(merged.catalog_db, merged.data_dir, ENV_INIT_CATALOG_DB)?;
    match folio_fs::file_is_file(&path) {
        Ok(_) => return Err(CliError::CatalogExists { path }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(CliError::InspectSourcePath {
                field: ARG_CATALOG_DB,
                path,
                source,
            });
        }
    }
    folio_fs::ensure_parent_dir(&path).map_err(|source| CliError::CreateOutput {
        path: path.clone(),
        source,
    })?;
    SqliteCatalog::create(path.as_std_path()).map_err(|source| CliError::OpenCatalog {
        path: path.clone(),
        source: Box::new(source),
    })?;
    info!("created catalogue at {path}");
    Ok(path)
}
