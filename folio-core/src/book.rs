//! Catalogue book snapshots used by the recommendation core.

use thiserror::Error;

use crate::slugify;

/// A read-only snapshot of one catalogue book.
///
/// Vote statistics are optional: a book without ratings has neither a
/// `vote_count` nor a `vote_average`. The two fields are stored
/// independently, and ranking only considers books where both are present.
///
/// # Examples
/// ```
/// use folio_core::Book;
///
/// # fn main() -> Result<(), folio_core::BookError> {
/// let book = Book::new(7, "Dune Messiah")?
///     .with_authors(["Frank Herbert"])
///     .with_votes(120, 7.9);
/// assert_eq!(book.slug, "dune-messiah");
/// assert!(book.is_rated());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Book {
    /// Unique identifier.
    pub id: u64,
    /// Display title; never blank.
    pub title: String,
    /// URL slug derived from the title unless supplied explicitly.
    pub slug: String,
    /// Optional ISBN, carried for presentation only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub isbn: Option<String>,
    /// Author display names in credit order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub authors: Vec<String>,
    /// Number of votes, absent when the book has no ratings yet.
    #[cfg_attr(feature = "serde", serde(default))]
    pub vote_count: Option<u32>,
    /// Mean rating across votes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub vote_average: Option<f64>,
}

/// Errors returned by [`Book::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookError {
    /// The title was empty or whitespace.
    #[error("book {id} must have a non-empty title")]
    EmptyTitle {
        /// Identifier of the rejected book.
        id: u64,
    },
}

impl Book {
    /// Validate and construct a [`Book`] without authors or ratings.
    ///
    /// # Errors
    /// Returns [`BookError::EmptyTitle`] when `title` is blank.
    pub fn new(id: u64, title: impl Into<String>) -> Result<Self, BookError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(BookError::EmptyTitle { id });
        }
        let slug = slugify(&title);
        Ok(Self {
            id,
            title,
            slug,
            isbn: None,
            authors: Vec::new(),
            vote_count: None,
            vote_average: None,
        })
    }

    /// Replace the author list while returning `self` for chaining.
    #[must_use]
    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Record both vote statistics.
    #[must_use]
    pub fn with_votes(mut self, count: u32, average: f64) -> Self {
        self.vote_count = Some(count);
        self.vote_average = Some(average);
        self
    }

    /// Set the vote count alone, leaving the average untouched.
    #[must_use]
    pub fn with_vote_count(mut self, count: Option<u32>) -> Self {
        self.vote_count = count;
        self
    }

    /// Set the vote average alone, leaving the count untouched.
    #[must_use]
    pub fn with_vote_average(mut self, average: Option<f64>) -> Self {
        self.vote_average = average;
        self
    }

    /// Attach an ISBN.
    #[must_use]
    pub fn with_isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    /// Override the derived slug.
    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Whether both `vote_count` and `vote_average` are present.
    #[must_use]
    pub const fn is_rated(&self) -> bool {
        self.vote_count.is_some() && self.vote_average.is_some()
    }

    /// Author names joined with `", "`, as used in listings and features.
    #[must_use]
    pub fn author_names(&self) -> String {
        self.authors.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn rejects_blank_titles(#[case] title: &str) {
        assert_eq!(Book::new(3, title), Err(BookError::EmptyTitle { id: 3 }));
    }

    #[rstest]
    fn derives_slug_from_title() {
        let book = Book::new(1, "The Left Hand of Darkness").expect("valid book");
        assert_eq!(book.slug, "the-left-hand-of-darkness");
        assert!(book.authors.is_empty());
        assert!(!book.is_rated());
    }

    #[rstest]
    fn rating_requires_both_fields() {
        let count_only = Book::new(1, "A")
            .expect("valid book")
            .with_vote_count(Some(4));
        let average_only = Book::new(2, "B")
            .expect("valid book")
            .with_vote_average(Some(4.5));
        let both = Book::new(3, "C").expect("valid book").with_votes(4, 4.5);

        assert!(!count_only.is_rated());
        assert!(!average_only.is_rated());
        assert!(both.is_rated());
    }

    #[rstest]
    fn joins_author_names_with_commas() {
        let book = Book::new(1, "Good Omens")
            .expect("valid book")
            .with_authors(["Terry Pratchett", "Neil Gaiman"]);
        assert_eq!(book.author_names(), "Terry Pratchett, Neil Gaiman");
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialises_with_missing_optional_fields() {
        let book: Book = serde_json::from_str(r#"{"id":9,"title":"Dune","slug":"dune"}"#)
            .expect("decode book");
        assert_eq!(book.id, 9);
        assert!(book.authors.is_empty());
        assert_eq!(book.vote_count, None);
    }
}
