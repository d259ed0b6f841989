//! A user's favourite books.
//!
//! Favourites are a plain set of book identifiers. Mutation happens only
//! through [`FavouriteSet::insert`] and [`FavouriteSet::remove`], both of
//! which report redundant requests instead of ignoring them.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::Book;

/// Set of favourite book identifiers for one user.
///
/// # Examples
/// ```
/// use folio_core::FavouriteSet;
///
/// let mut favourites = FavouriteSet::new();
/// favourites.insert(4).expect("first insert succeeds");
/// assert!(favourites.insert(4).is_err());
/// assert!(favourites.contains(4));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FavouriteSet {
    book_ids: BTreeSet<u64>,
}

/// Errors raised when mutating a [`FavouriteSet`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FavouriteError {
    /// The book is already a favourite.
    #[error("book {book_id} is already a favourite")]
    AlreadyFavourite {
        /// Identifier of the book.
        book_id: u64,
    },
    /// The book is not a favourite.
    #[error("book {book_id} is not a favourite")]
    NotFavourite {
        /// Identifier of the book.
        book_id: u64,
    },
}

impl FavouriteSet {
    /// Construct an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a book.
    ///
    /// # Errors
    /// Returns [`FavouriteError::AlreadyFavourite`] when `book_id` is present.
    pub fn insert(&mut self, book_id: u64) -> Result<(), FavouriteError> {
        if self.book_ids.insert(book_id) {
            Ok(())
        } else {
            Err(FavouriteError::AlreadyFavourite { book_id })
        }
    }

    /// Remove a book.
    ///
    /// # Errors
    /// Returns [`FavouriteError::NotFavourite`] when `book_id` is absent.
    pub fn remove(&mut self, book_id: u64) -> Result<(), FavouriteError> {
        if self.book_ids.remove(&book_id) {
            Ok(())
        } else {
            Err(FavouriteError::NotFavourite { book_id })
        }
    }

    /// Whether `book_id` is a favourite.
    #[must_use]
    pub fn contains(&self, book_id: u64) -> bool {
        self.book_ids.contains(&book_id)
    }

    /// Number of favourites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.book_ids.len()
    }

    /// Whether the set has no favourites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.book_ids.is_empty()
    }

    /// Iterate over favourite identifiers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.book_ids.iter().copied()
    }

    /// Split a catalogue snapshot into `(favourites, candidates)`.
    ///
    /// Both halves keep the snapshot's order.
    #[must_use]
    pub fn partition(&self, books: Vec<Book>) -> (Vec<Book>, Vec<Book>) {
        books.into_iter().partition(|book| self.contains(book.id))
    }
}

impl FromIterator<u64> for FavouriteSet {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self {
            book_ids: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a Book> for FavouriteSet {
    fn from_iter<I: IntoIterator<Item = &'a Book>>(iter: I) -> Self {
        iter.into_iter().map(|book| book.id).collect()
    }
}
