//! In-memory catalogue used by unit and behaviour tests.

use std::collections::BTreeMap;

use crate::{Book, CatalogError, CatalogReader, FavouriteSet, FavouriteStore};

/// In-memory [`CatalogReader`] and [`FavouriteStore`].
///
/// Lookups are linear scans; the catalogue is intended for small datasets.
/// Books are listed in insertion order.
#[derive(Debug, Default, Clone)]
pub struct MemoryCatalog {
    books: Vec<Book>,
    profiles: BTreeMap<u64, FavouriteSet>,
}

impl MemoryCatalog {
    /// Create a catalogue from a collection of books.
    pub fn with_books<I>(books: I) -> Self
    where
        I: IntoIterator<Item = Book>,
    {
        Self {
            books: books.into_iter().collect(),
            profiles: BTreeMap::new(),
        }
    }

    /// Register a user profile with the given favourites.
    ///
    /// Identifiers that do not name a catalogue book are kept; they simply
    /// never resolve when favourites are listed.
    #[must_use]
    pub fn with_profile<I>(mut self, user_id: u64, favourites: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        self.profiles
            .insert(user_id, favourites.into_iter().collect());
        self
    }

    /// Return the favourites recorded for `user_id`, if it has a profile.
    #[must_use]
    pub fn favourites(&self, user_id: u64) -> Option<&FavouriteSet> {
        self.profiles.get(&user_id)
    }

    fn require_book(&self, id: u64) -> Result<&Book, CatalogError> {
        self.books
            .iter()
            .find(|book| book.id == id)
            .ok_or(CatalogError::BookNotFound { id })
    }

    fn require_profile(&self, user_id: u64) -> Result<&FavouriteSet, CatalogError> {
        self.profiles
            .get(&user_id)
            .ok_or(CatalogError::ProfileNotFound { user_id })
    }
}

impl CatalogReader for MemoryCatalog {
    fn list_all_books(&self) -> Result<Vec<Book>, CatalogError> {
        Ok(self.books.clone())
    }

    fn get_book(&self, id: u64) -> Result<Book, CatalogError> {
        self.require_book(id).cloned()
    }

    fn find_book_by_title(&self, title: &str) -> Result<Book, CatalogError> {
        self.books
            .iter()
            .filter(|book| book.title.eq_ignore_ascii_case(title))
            .min_by_key(|book| book.id)
            .cloned()
            .ok_or_else(|| CatalogError::TitleNotFound {
                title: title.to_owned(),
            })
    }

    fn list_favourites(&self, user_id: u64) -> Result<Vec<Book>, CatalogError> {
        let favourites = self.require_profile(user_id)?;
        let mut books: Vec<Book> = self
            .books
            .iter()
            .filter(|book| favourites.contains(book.id))
            .cloned()
            .collect();
        books.sort_by_key(|book| book.id);
        Ok(books)
    }
}

impl FavouriteStore for MemoryCatalog {
    fn add_favourite(&mut self, user_id: u64, book_id: u64) -> Result<(), CatalogError> {
        self.require_profile(user_id)?;
        self.require_book(book_id)?;
        let favourites = self
            .profiles
            .get_mut(&user_id)
            .ok_or(CatalogError::ProfileNotFound { user_id })?;
        favourites
            .insert(book_id)
            .map_err(|err| CatalogError::from_favourite(user_id, err))
    }

    fn remove_favourite(&mut self, user_id: u64, book_id: u64) -> Result<(), CatalogError> {
        self.require_profile(user_id)?;
        self.require_book(book_id)?;
        let favourites = self
            .profiles
            .get_mut(&user_id)
            .ok_or(CatalogError::ProfileNotFound { user_id })?;
        favourites
            .remove(book_id)
            .map_err(|err| CatalogError::from_favourite(user_id, err))
    }
}

/// Write a SQLite catalogue containing `books` and the given profiles.
///
/// Authors are deduplicated by name.
///
/// # Panics
/// Panics when the database cannot be created or written; intended for test
/// fixtures only.
#[cfg(all(feature = "store-sqlite", any(test, feature = "test-support")))]
pub fn write_sqlite_catalog<P: AsRef<std::path::Path>>(
    path: P,
    books: &[Book],
    profiles: &[(u64, Vec<u64>)],
) {
    use rusqlite::params;

    let catalog = crate::SqliteCatalog::create(path.as_ref()).expect("create catalogue schema");
    let connection = catalog.connection();
    let mut author_ids: BTreeMap<&str, i64> = BTreeMap::new();
    for book in books {
        connection
            .execute(
                "INSERT INTO books (id, title, slug, isbn, vote_count, vote_average)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    i64::try_from(book.id).expect("book id fits in i64"),
                    book.title,
                    book.slug,
                    book.isbn,
                    book.vote_count,
                    book.vote_average
                ],
            )
            .expect("insert book");
        for (position, name) in book.authors.iter().enumerate() {
            let next_id = i64::try_from(author_ids.len() + 1).expect("author id fits in i64");
            let author_id = *author_ids.entry(name.as_str()).or_insert_with(|| {
                connection
                    .execute(
                        "INSERT INTO authors (id, full_name) VALUES (?1, ?2)",
                        params![next_id, name],
                    )
                    .expect("insert author");
                next_id
            });
            connection
                .execute(
                    "INSERT INTO book_authors (book_id, author_id, position) VALUES (?1, ?2, ?3)",
                    params![
                        i64::try_from(book.id).expect("book id fits in i64"),
                        author_id,
                        i64::try_from(position).expect("position fits in i64")
                    ],
                )
                .expect("link author");
        }
    }
    for (user_id, favourites) in profiles {
        let user = i64::try_from(*user_id).expect("user id fits in i64");
        connection
            .execute("INSERT INTO profiles (user_id) VALUES (?1)", [user])
            .expect("insert profile");
        for book_id in favourites {
            connection
                .execute(
                    "INSERT INTO profile_favourites (user_id, book_id) VALUES (?1, ?2)",
                    params![user, i64::try_from(*book_id).expect("book id fits in i64")],
                )
                .expect("insert favourite");
        }
    }
}
