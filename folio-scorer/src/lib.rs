//! Ranking and suggestion engines for the Folio book catalogue.
//!
//! The crate provides two complementary capabilities:
//! - **Popularity ranking** scores every sufficiently voted book with the
//!   IMDb weighted rating `v / (v + m) * R + m / (v + m) * C`, where `m` is
//!   the 90th percentile of vote counts and `C` the mean vote average, and
//!   sorts the catalogue best first.
//! - **Content suggestions** vectorise each book's title and authors with
//!   TF-IDF and pick the unread books most similar, on average, to a
//!   reader's favourites.
//!
//! [`Recommender`] ties both to any [`CatalogReader`](folio_core::CatalogReader)
//! implementation.
//!
//! # Examples
//!
//! ```
//! use folio_core::Book;
//! use folio_scorer::SimilaritySuggester;
//!
//! let dune = Book::new(1, "Dune").expect("valid").with_authors(["Frank Herbert"]);
//! let catalogue = vec![
//!     dune.clone(),
//!     Book::new(2, "Dune Messiah").expect("valid").with_authors(["Frank Herbert"]),
//!     Book::new(3, "Cooking 101").expect("valid"),
//! ];
//! let suggestions = SimilaritySuggester::new(1).suggest(&[dune], &catalogue);
//! assert_eq!(suggestions.first().map(|book| book.id), Some(2));
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod popularity;
mod service;
mod similarity;
mod types;
mod vectorizer;
mod weighted;

pub use error::{RankingError, RecommendError, ScoreError};
pub use popularity::{
    DEFAULT_VOTE_PERCENTILE, PopularityRanker, global_mean, qualifies, rank_popular,
    vote_threshold,
};
pub use service::Recommender;
pub use similarity::{DEFAULT_SUGGESTION_LIMIT, SimilaritySuggester};
pub use types::{ScoredBook, ScoringParameters};
pub use vectorizer::{TfidfMatrix, TfidfOptions, TfidfVectorizer, dot, featurize};
pub use weighted::weighted_rating;
