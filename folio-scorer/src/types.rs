//! Public parameter and output types for ranking.
#![forbid(unsafe_code)]

use folio_core::Book;
use serde::{Deserialize, Serialize};

/// Global parameters of the weighted rating formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringParameters {
    /// Mean vote average across rated books (`C`).
    pub global_mean: f64,
    /// Minimum votes a book needs to qualify (`m`).
    pub vote_threshold: f64,
}

impl ScoringParameters {
    /// Construct parameters from explicit values.
    #[must_use]
    pub const fn new(global_mean: f64, vote_threshold: f64) -> Self {
        Self {
            global_mean,
            vote_threshold,
        }
    }
}

/// A book paired with the score that ranked it.
///
/// Serialises as the book's fields plus a `score` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredBook {
    /// The ranked book.
    #[serde(flatten)]
    pub book: Book,
    /// Score used for ordering; higher is better.
    pub score: f64,
}

impl ScoredBook {
    /// Pair a book with its score.
    #[expect(
        clippy::missing_const_for_fn,
        reason = "scored books are produced at runtime from catalogue reads"
    )]
    #[must_use]
    pub fn new(book: Book, score: f64) -> Self {
        Self { book, score }
    }

    /// Discard the score.
    #[must_use]
    pub fn into_book(self) -> Book {
        self.book
    }
}
