//! Catalogue location and validation shared by the subcommands.

use camino::{Utf8Path, Utf8PathBuf};
use folio_core::SqliteCatalog;

use crate::{ARG_CATALOG_DB, CliError};

/// File name used inside `--data-dir` when `--catalog-db` is not given.
pub(crate) const DEFAULT_CATALOG_FILE: &str = "catalog.db";

/// Pick the catalogue path from an explicit override or the data directory.
pub(crate) fn resolve_catalog_path(
    catalog_db: Option<Utf8PathBuf>,
    data_dir: Option<Utf8PathBuf>,
    env: &'static str,
) -> Result<Utf8PathBuf, CliError> {
    catalog_db
        .or_else(|| data_dir.map(|dir| dir.join(DEFAULT_CATALOG_FILE)))
        .ok_or(CliError::MissingArgument {
            field: ARG_CATALOG_DB,
            env,
        })
}

pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match folio_fs::file_is_file(path) {
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

/// Open an existing catalogue after checking it is a regular file.
pub(crate) fn open_catalog(path: &Utf8Path) -> Result<SqliteCatalog, CliError> {
    require_existing(path, ARG_CATALOG_DB)?;
    SqliteCatalog::open(path.as_std_path()).map_err(|source| CliError::OpenCatalog {
        path: path.to_path_buf(),
        source: Box::new(source),
    })
}
