//! Read and write contracts over the book catalogue.
//!
//! The recommendation core never talks to storage directly. It reads a
//! snapshot through [`CatalogReader`] at the start of an operation and, for
//! favourite mutations, writes through [`FavouriteStore`].

use thiserror::Error;

use crate::{Book, FavouriteError};

/// Errors surfaced by catalogue implementations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No book has the requested identifier.
    #[error("book {id} was not found")]
    BookNotFound {
        /// Requested identifier.
        id: u64,
    },
    /// No book matched the requested title.
    #[error("no book titled {title:?} was found")]
    TitleNotFound {
        /// Requested title.
        title: String,
    },
    /// The user has no profile, so has no favourites to read or change.
    #[error("user {user_id} has no profile")]
    ProfileNotFound {
        /// Identifier of the user.
        user_id: u64,
    },
    /// The book is already one of the user's favourites.
    #[error("book {book_id} is already in the favourites of user {user_id}")]
    AlreadyFavourite {
        /// Identifier of the user.
        user_id: u64,
        /// Identifier of the book.
        book_id: u64,
    },
    /// The book is not one of the user's favourites.
    #[error("book {book_id} is not in the favourites of user {user_id}")]
    NotFavourite {
        /// Identifier of the user.
        user_id: u64,
        /// Identifier of the book.
        book_id: u64,
    },
    /// The storage backend failed.
    #[error("catalogue backend failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl CatalogError {
    /// Attach a user identifier to a [`FavouriteError`].
    #[must_use]
    pub const fn from_favourite(user_id: u64, error: FavouriteError) -> Self {
        match error {
            FavouriteError::AlreadyFavourite { book_id } => {
                Self::AlreadyFavourite { user_id, book_id }
            }
            FavouriteError::NotFavourite { book_id } => Self::NotFavourite { user_id, book_id },
        }
    }

    /// Whether the error reports a missing book, title, or profile.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::BookNotFound { .. } | Self::TitleNotFound { .. } | Self::ProfileNotFound { .. }
        )
    }
}

/// Read-only access to catalogue books and user favourites.
///
/// # Examples
///
/// ```rust
/// use folio_core::{Book, CatalogReader, MemoryCatalog};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let catalog = MemoryCatalog::with_books([Book::new(1, "Dune")?])
///     .with_profile(10, [1]);
///
/// assert_eq!(catalog.get_book(1)?.title, "Dune");
/// assert_eq!(catalog.find_book_by_title("DUNE")?.id, 1);
/// assert_eq!(catalog.list_favourites(10)?.len(), 1);
/// assert!(catalog.list_favourites(11).is_err());
/// # Ok(())
/// # }
/// ```
pub trait CatalogReader {
    /// Return every book in the catalogue's iteration order.
    ///
    /// # Errors
    /// Returns [`CatalogError::Backend`] when storage cannot be read.
    fn list_all_books(&self) -> Result<Vec<Book>, CatalogError>;

    /// Return the book with identifier `id`.
    ///
    /// # Errors
    /// Returns [`CatalogError::BookNotFound`] when no such book exists.
    fn get_book(&self, id: u64) -> Result<Book, CatalogError>;

    /// Return the book whose title matches `title`, ignoring ASCII case.
    ///
    /// When several books share the title, the lowest identifier wins.
    ///
    /// # Errors
    /// Returns [`CatalogError::TitleNotFound`] when nothing matches.
    fn find_book_by_title(&self, title: &str) -> Result<Book, CatalogError>;

    /// Return the user's favourite books, ordered by identifier.
    ///
    /// # Errors
    /// Returns [`CatalogError::ProfileNotFound`] when the user has no
    /// profile. A profile without favourites yields an empty vector.
    fn list_favourites(&self, user_id: u64) -> Result<Vec<Book>, CatalogError>;
}

/// Mutation of a user's favourites.
pub trait FavouriteStore: CatalogReader {
    /// Mark `book_id` as a favourite of `user_id`.
    ///
    /// # Errors
    /// Returns [`CatalogError::ProfileNotFound`], [`CatalogError::BookNotFound`]
    /// or [`CatalogError::AlreadyFavourite`].
    fn add_favourite(&mut self, user_id: u64, book_id: u64) -> Result<(), CatalogError>;

    /// Remove `book_id` from the favourites of `user_id`.
    ///
    /// # Errors
    /// Returns [`CatalogError::ProfileNotFound`], [`CatalogError::BookNotFound`]
    /// or [`CatalogError::NotFavourite`].
    fn remove_favourite(&mut self, user_id: u64, book_id: u64) -> Result<(), CatalogError>;
}
