//! SQLite-backed catalogue of books, authors, and user favourites.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use log::warn;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Params, Row, params};
use thiserror::Error;

use crate::{Book, BookError, CatalogError, CatalogReader, FavouriteStore};

/// Schema created by [`SqliteCatalog::create`].
///
/// `book_authors.position` preserves credit order. A user owns favourites
/// only once a row exists in `profiles`.
pub const CATALOG_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS authors (
    id INTEGER PRIMARY KEY,
    full_name TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    slug TEXT,
    isbn TEXT UNIQUE,
    vote_count INTEGER,
    vote_average REAL
);
CREATE TABLE IF NOT EXISTS book_authors (
    book_id INTEGER NOT NULL REFERENCES books (id) ON DELETE CASCADE,
    author_id INTEGER NOT NULL REFERENCES authors (id) ON DELETE CASCADE,
    position INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (book_id, author_id)
);
CREATE TABLE IF NOT EXISTS profiles (
    user_id INTEGER PRIMARY KEY
);
CREATE TABLE IF NOT EXISTS profile_favourites (
    user_id INTEGER NOT NULL REFERENCES profiles (user_id) ON DELETE CASCADE,
    book_id INTEGER NOT NULL REFERENCES books (id) ON DELETE CASCADE,
    PRIMARY KEY (user_id, book_id)
);
";

const BOOK_COLUMNS: &str = "id, title, slug, isbn, vote_count, vote_average";
const AUTHORS_FOR_BOOK_SQL: &str = "SELECT authors.full_name
     FROM book_authors
     JOIN authors ON authors.id = book_authors.author_id
     WHERE book_authors.book_id = ?1
     ORDER BY book_authors.position, authors.id";

/// Errors raised while opening or reading a SQLite catalogue.
#[derive(Debug, Error)]
pub enum SqliteCatalogError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite catalogue at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Creating the catalogue tables failed.
    #[error("failed to initialise catalogue schema: {source}")]
    InitialiseSchema {
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A stored identifier could not be represented as `u64`.
    #[error("{table} id {id} is outside the supported range")]
    IdOutOfRange {
        /// Table holding the identifier.
        table: &'static str,
        /// Raw identifier read from SQLite.
        id: i64,
    },
    /// A stored vote count was negative or too large.
    #[error("vote count {raw} for book {book_id} is invalid")]
    InvalidVoteCount {
        /// Identifier of the affected book.
        book_id: u64,
        /// Raw value found in the database.
        raw: i64,
    },
    /// A stored book failed validation.
    #[error(transparent)]
    InvalidBook(#[from] BookError),
    /// Generic SQLite error when reading or writing rows.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

impl From<SqliteCatalogError> for CatalogError {
    fn from(error: SqliteCatalogError) -> Self {
        Self::Backend(Box::new(error))
    }
}

/// Catalogue backed by a single SQLite connection.
pub struct SqliteCatalog {
    connection: Connection,
}

impl fmt::Debug for SqliteCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteCatalog")
            .field("path", &self.connection.path())
            .finish_non_exhaustive()
    }
}

struct BookRow {
    id: i64,
    title: String,
    slug: Option<String>,
    isbn: Option<String>,
    vote_count: Option<i64>,
    vote_average: Option<f64>,
}

impl SqliteCatalog {
    /// Open an existing catalogue for reading and favourite updates.
    ///
    /// # Errors
    /// Returns [`SqliteCatalogError::OpenDatabase`] when the file is missing
    /// or cannot be opened.
    pub fn open<P: AsRef<Path>>(database_path: P) -> Result<Self, SqliteCatalogError> {
        let path = database_path.as_ref();
        let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_WRITE)
            .map_err(|source| SqliteCatalogError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { connection })
    }

    /// Open or create a catalogue file and ensure the schema exists.
    ///
    /// # Errors
    /// Returns [`SqliteCatalogError::OpenDatabase`] or
    /// [`SqliteCatalogError::InitialiseSchema`].
    pub fn create<P: AsRef<Path>>(database_path: P) -> Result<Self, SqliteCatalogError> {
        let path = database_path.as_ref();
        let connection =
            Connection::open(path).map_err(|source| SqliteCatalogError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        Self::with_schema(connection)
    }

    /// Create a catalogue in memory with an empty schema.
    ///
    /// # Errors
    /// Returns [`SqliteCatalogError`] when SQLite cannot allocate the
    /// database or create the schema.
    pub fn in_memory() -> Result<Self, SqliteCatalogError> {
        let connection = Connection::open_in_memory()?;
        Self::with_schema(connection)
    }

    /// Borrow the underlying connection, e.g. to seed fixtures.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.connection
    }

    fn with_schema(connection: Connection) -> Result<Self, SqliteCatalogError> {
        connection
            .execute_batch(CATALOG_SCHEMA)
            .map_err(|source| SqliteCatalogError::InitialiseSchema { source })?;
        Ok(Self { connection })
    }

    fn query_books<P: Params>(
        &self,
        predicate: &str,
        params: P,
    ) -> Result<Vec<Book>, SqliteCatalogError> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books {predicate} ORDER BY id");
        let mut statement = self.connection.prepare(&sql)?;
        let rows = statement
            .query_map(params, read_book_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(|row| self.assemble(row)).collect()
    }

    fn query_first_book<P: Params>(
        &self,
        predicate: &str,
        params: P,
    ) -> Result<Option<Book>, SqliteCatalogError> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books {predicate} ORDER BY id LIMIT 1");
        let row = self
            .connection
            .query_row(&sql, params, read_book_row)
            .optional()?;
        row.map(|found| self.assemble(found)).transpose()
    }

    fn assemble(&self, row: BookRow) -> Result<Book, SqliteCatalogError> {
        let id = u64::try_from(row.id).map_err(|_| SqliteCatalogError::IdOutOfRange {
            table: "books",
            id: row.id,
        })?;
        let vote_count = row
            .vote_count
            .map(|raw| {
                u32::try_from(raw).map_err(|_| SqliteCatalogError::InvalidVoteCount {
                    book_id: id,
                    raw,
                })
            })
            .transpose()?;
        let authors = self.authors_for(row.id)?;

        let mut book = Book::new(id, row.title)?
            .with_authors(authors)
            .with_vote_count(vote_count)
            .with_vote_average(row.vote_average);
        if let Some(slug) = row.slug.filter(|slug| !slug.trim().is_empty()) {
            book = book.with_slug(slug);
        }
        if let Some(isbn) = row.isbn {
            book = book.with_isbn(isbn);
        }
        Ok(book)
    }

    fn authors_for(&self, book_id: i64) -> Result<Vec<String>, SqliteCatalogError> {
        let mut statement = self.connection.prepare_cached(AUTHORS_FOR_BOOK_SQL)?;
        let names = statement
            .query_map([book_id], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    fn exists(&self, sql: &str, id: i64) -> Result<bool, SqliteCatalogError> {
        let found = self
            .connection
            .query_row(sql, [id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    fn require_profile(&self, user_id: u64) -> Result<i64, CatalogError> {
        let missing = CatalogError::ProfileNotFound { user_id };
        let Ok(raw) = i64::try_from(user_id) else {
            return Err(missing);
        };
        if self.exists("SELECT 1 FROM profiles WHERE user_id = ?1", raw)? {
            Ok(raw)
        } else {
            Err(missing)
        }
    }

    fn require_book(&self, book_id: u64) -> Result<i64, CatalogError> {
        let missing = CatalogError::BookNotFound { id: book_id };
        let Ok(raw) = i64::try_from(book_id) else {
            return Err(missing);
        };
        if self.exists("SELECT 1 FROM books WHERE id = ?1", raw)? {
            Ok(raw)
        } else {
            Err(missing)
        }
    }
}

fn read_book_row(row: &Row<'_>) -> rusqlite::Result<BookRow> {
    Ok(BookRow {
        id: row.get(0)?,
        title: row.get(1)?,
        slug: row.get(2)?,
        isbn: row.get(3)?,
        vote_count: row.get(4)?,
        vote_average: row.get(5)?,
    })
}

impl CatalogReader for SqliteCatalog {
    fn list_all_books(&self) -> Result<Vec<Book>, CatalogError> {
        Ok(self.query_books("", [])?)
    }

    fn get_book(&self, id: u64) -> Result<Book, CatalogError> {
        let Ok(raw) = i64::try_from(id) else {
            return Err(CatalogError::BookNotFound { id });
        };
        self.query_first_book("WHERE id = ?1", [raw])?
            .ok_or(CatalogError::BookNotFound { id })
    }

    fn find_book_by_title(&self, title: &str) -> Result<Book, CatalogError> {
        self.query_first_book("WHERE title = ?1 COLLATE NOCASE", [title])?
            .ok_or_else(|| CatalogError::TitleNotFound {
                title: title.to_owned(),
            })
    }

    fn list_favourites(&self, user_id: u64) -> Result<Vec<Book>, CatalogError> {
        let user = self.require_profile(user_id)?;
        let books = self.query_books(
            "WHERE id IN (SELECT book_id FROM profile_favourites WHERE user_id = ?1)",
            [user],
        )?;
        Ok(books)
    }
}

impl FavouriteStore for SqliteCatalog {
    fn add_favourite(&mut self, user_id: u64, book_id: u64) -> Result<(), CatalogError> {
        let user = self.require_profile(user_id)?;
        let book = self.require_book(book_id)?;
        let inserted = self
            .connection
            .execute(
                "INSERT OR IGNORE INTO profile_favourites (user_id, book_id) VALUES (?1, ?2)",
                params![user, book],
            )
            .map_err(SqliteCatalogError::from)?;
        if inserted == 0 {
            return Err(CatalogError::AlreadyFavourite { user_id, book_id });
        }
        Ok(())
    }

    fn remove_favourite(&mut self, user_id: u64, book_id: u64) -> Result<(), CatalogError> {
        let user = self.require_profile(user_id)?;
        let book = self.require_book(book_id)?;
        let removed = self
            .connection
            .execute(
                "DELETE FROM profile_favourites WHERE user_id = ?1 AND book_id = ?2",
                params![user, book],
            )
            .map_err(SqliteCatalogError::from)?;
        if removed == 0 {
            warn!("user {user_id} asked to remove book {book_id}, which is not a favourite");
            return Err(CatalogError::NotFavourite { user_id, book_id });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_sqlite_catalog;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        path: PathBuf,
    }

    #[fixture]
    fn seeded() -> Fixture {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("catalog.db");
        let books = vec![
            Book::new(1, "Dune")
                .expect("valid book")
                .with_authors(["Frank Herbert"])
                .with_votes(100, 8.0)
                .with_isbn("9780441013593"),
            Book::new(2, "Good Omens")
                .expect("valid book")
                .with_authors(["Terry Pratchett", "Neil Gaiman"]),
            Book::new(3, "DUNE").expect("valid book"),
        ];
        write_sqlite_catalog(&path, &books, &[(10, vec![2])]);
        Fixture { _dir: dir, path }
    }

    #[rstest]
    fn lists_books_with_ordered_authors(seeded: Fixture) {
        let catalog = SqliteCatalog::open(&seeded.path).expect("open catalogue");
        let books = catalog.list_all_books().expect("list books");

        assert_eq!(books.len(), 3);
        let omens = books.get(1).expect("second book");
        assert_eq!(omens.authors, vec!["Terry Pratchett", "Neil Gaiman"]);
        let dune = books.first().expect("first book");
        assert_eq!(dune.vote_count, Some(100));
        assert_eq!(dune.isbn.as_deref(), Some("9780441013593"));
    }

    #[rstest]
    fn finds_title_ignoring_case(seeded: Fixture) {
        let catalog = SqliteCatalog::open(&seeded.path).expect("open catalogue");
        let book = catalog.find_book_by_title("dUnE").expect("title lookup");
        assert_eq!(book.id, 1);
    }

    #[rstest]
    fn missing_book_is_reported(seeded: Fixture) {
        let catalog = SqliteCatalog::open(&seeded.path).expect("open catalogue");
        let err = catalog.get_book(42).expect_err("missing book");
        assert!(matches!(err, CatalogError::BookNotFound { id: 42 }));
    }

    #[rstest]
    fn favourites_round_trip(seeded: Fixture) {
        let mut catalog = SqliteCatalog::open(&seeded.path).expect("open catalogue");

        catalog.add_favourite(10, 1).expect("add favourite");
        let ids: Vec<_> = catalog
            .list_favourites(10)
            .expect("list favourites")
            .iter()
            .map(|book| book.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);

        let err = catalog.add_favourite(10, 1).expect_err("duplicate favourite");
        assert!(matches!(err, CatalogError::AlreadyFavourite { .. }));

        catalog.remove_favourite(10, 2).expect("remove favourite");
        let err = catalog.remove_favourite(10, 2).expect_err("already removed");
        assert!(matches!(err, CatalogError::NotFavourite { .. }));
    }

    #[rstest]
    fn unknown_profile_is_reported(seeded: Fixture) {
        let catalog = SqliteCatalog::open(&seeded.path).expect("open catalogue");
        let err = catalog.list_favourites(99).expect_err("no profile");
        assert!(matches!(err, CatalogError::ProfileNotFound { user_id: 99 }));
    }

    #[rstest]
    fn negative_vote_counts_surface_as_backend_errors() {
        let catalog = SqliteCatalog::in_memory().expect("in-memory catalogue");
        catalog
            .connection()
            .execute(
                "INSERT INTO books (id, title, vote_count, vote_average) VALUES (1, 'Dune', -4, 7.0)",
                [],
            )
            .expect("insert book");

        let err = catalog.list_all_books().expect_err("invalid vote count");
        assert!(matches!(err, CatalogError::Backend(_)));
    }

    #[rstest]
    fn open_fails_for_missing_file() {
        let dir = TempDir::new().expect("tempdir");
        let err = SqliteCatalog::open(dir.path().join("absent.db")).expect_err("missing file");
        assert!(matches!(err, SqliteCatalogError::OpenDatabase { .. }));
    }
}
