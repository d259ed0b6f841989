//! Test helpers for seeding catalogues and capturing CLI output.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use folio_core::Book;
use folio_core::test_support::write_sqlite_catalog;
use tempfile::TempDir;

/// Reader profile seeded into every fixture catalogue.
pub(super) const READER: u64 = 7;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    folio_fs::ensure_parent_dir(path).expect("create parent directory");
    std::fs::write(path.as_std_path(), contents).expect("write file");
}

fn book(id: u64, title: &str, author: &str, votes: u32, average: f64) -> Book {
    Book::new(id, title)
        .expect("valid book")
        .with_authors([author])
        .with_votes(votes, average)
}

/// Temporary workspace holding a seeded `catalog.db`.
#[derive(Debug)]
pub(super) struct CatalogFixture {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl CatalogFixture {
    /// Seed the A/B/C ranking catalogue plus the Dune shelf.
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let books = [
            book(1, "Dune", "Frank Herbert", 100, 8.0),
            book(2, "Dune Messiah", "Frank Herbert", 10, 9.5),
            book(3, "Cooking 101", "Chef A", 50, 6.0),
        ];
        write_sqlite_catalog(root.join("catalog.db").as_std_path(), &books, &[(READER, vec![1])]);
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn catalog_db(&self) -> Utf8PathBuf {
        self.root.join("catalog.db")
    }
}

/// Parse `argv` and run the command, capturing stdout.
pub(super) fn run_argv(argv: &[&str]) -> (Result<(), CliError>, String) {
    let mut stdout = Vec::new();
    let result = Cli::try_parse_from(argv)
        .map_err(CliError::ArgumentParsing)
        .and_then(|cli| run_command(cli.command, &mut stdout));
    (result, String::from_utf8(stdout).expect("utf-8 output"))
}

/// Identifiers of the books in a JSON array printed by the CLI.
pub(super) fn printed_ids(stdout: &str) -> Vec<u64> {
    let value: serde_json::Value = serde_json::from_str(stdout).expect("json output");
    value
        .as_array()
        .expect("json array")
        .iter()
        .map(|entry| entry["id"].as_u64().expect("numeric id"))
        .collect()
}
