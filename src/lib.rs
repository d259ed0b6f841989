//! Facade crate for the Folio recommendation engine.
//!
//! This crate re-exports the core domain types and exposes the ranking and
//! suggestion engine and the SQLite catalogue behind feature flags.

#![forbid(unsafe_code)]

pub use folio_core::{
    Book, BookError, CatalogError, CatalogReader, FavouriteError, FavouriteSet, FavouriteStore,
    MemoryCatalog, slugify,
};

#[cfg(feature = "store-sqlite")]
pub use folio_core::{SqliteCatalog, SqliteCatalogError};

#[cfg(feature = "scorer")]
pub use folio_scorer::{
    PopularityRanker, RankingError, RecommendError, Recommender, ScoreError, ScoredBook,
    ScoringParameters, SimilaritySuggester, TfidfVectorizer, rank_popular, weighted_rating,
};
