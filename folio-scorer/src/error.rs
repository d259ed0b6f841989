//! Error types raised while scoring and ranking books.
#![forbid(unsafe_code)]

use folio_core::CatalogError;
use thiserror::Error;

/// Errors raised by [`weighted_rating`](crate::weighted_rating).
#[derive(Debug, Error, PartialEq)]
pub enum ScoreError {
    /// The book lacks a vote count or a vote average.
    #[error("book {book_id} has no complete vote statistics")]
    MissingVotes {
        /// Identifier of the affected book.
        book_id: u64,
    },
    /// The rating or one of the scoring parameters was NaN or infinite.
    #[error("book {book_id} cannot be scored with non-finite inputs")]
    NonFinite {
        /// Identifier of the affected book.
        book_id: u64,
    },
    /// The vote threshold was negative.
    #[error("vote threshold {threshold} must not be negative")]
    NegativeThreshold {
        /// Threshold supplied by the caller.
        threshold: f64,
    },
}

/// Errors raised while ranking books by weighted rating.
#[derive(Debug, Error, PartialEq)]
pub enum RankingError {
    /// No book carries a vote average, so the global mean is undefined.
    #[error("insufficient data: no book has a vote average")]
    UndefinedGlobalMean,
    /// The vote-threshold percentile was outside `0.0..=100.0`.
    #[error("percentile {percentile} must lie within 0..=100")]
    InvalidPercentile {
        /// Percentile supplied by the caller.
        percentile: f64,
    },
    /// Scoring an individual book failed.
    #[error(transparent)]
    Score(#[from] ScoreError),
}

/// Errors raised by the [`Recommender`](crate::Recommender) service.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// Reading or updating the catalogue failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// Ranking the catalogue failed.
    #[error(transparent)]
    Ranking(#[from] RankingError),
}

impl RecommendError {
    /// Whether the failure reports a missing book, title, or profile.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        match self {
            Self::Catalog(inner) => inner.is_not_found(),
            Self::Ranking(_) => false,
        }
    }
}
