//! Content-based suggestions from a reader's favourites.

use folio_core::{Book, FavouriteSet};
use log::debug;

use crate::{ScoredBook, TfidfVectorizer, featurize};

/// Suggestions returned when no limit is configured.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Suggests unread books whose text resembles a reader's favourites.
///
/// The favourites and candidates are vectorised together, each candidate is
/// scored by its mean linear-kernel similarity to the favourites, and the best
/// `limit` candidates are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimilaritySuggester {
    limit: usize,
    vectorizer: TfidfVectorizer,
}

impl Default for SimilaritySuggester {
    fn default() -> Self {
        Self::new(DEFAULT_SUGGESTION_LIMIT)
    }
}

impl SimilaritySuggester {
    /// Build a suggester returning at most `limit` books.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            vectorizer: TfidfVectorizer::default(),
        }
    }

    /// Replace the text vectoriser.
    #[must_use]
    pub const fn with_vectorizer(mut self, vectorizer: TfidfVectorizer) -> Self {
        self.vectorizer = vectorizer;
        self
    }

    /// Maximum number of suggestions.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Suggest books from `candidates`, best match first.
    ///
    /// See [`SimilaritySuggester::suggest_scored`].
    #[must_use]
    pub fn suggest(&self, favourites: &[Book], candidates: &[Book]) -> Vec<Book> {
        self.suggest_scored(favourites, candidates)
            .into_iter()
            .map(ScoredBook::into_book)
            .collect()
    }

    /// Suggest books from `candidates` together with their mean similarity.
    ///
    /// Candidates that are also favourites are skipped. The result is empty
    /// when there are no favourites, no remaining candidates, or the limit is
    /// zero. Equal scores keep candidate order.
    #[must_use]
    pub fn suggest_scored(&self, favourites: &[Book], candidates: &[Book]) -> Vec<ScoredBook> {
        if favourites.is_empty() || self.limit == 0 {
            debug!(
                "skipping suggestions: {} favourites, limit {}",
                favourites.len(),
                self.limit
            );
            return Vec::new();
        }
        let excluded: FavouriteSet = favourites.iter().collect();
        let pool: Vec<&Book> = candidates
            .iter()
            .filter(|book| !excluded.contains(book.id))
            .collect();
        if pool.is_empty() {
            return Vec::new();
        }

        let corpus: Vec<String> = favourites
            .iter()
            .chain(pool.iter().copied())
            .map(featurize)
            .collect();
        let matrix = self.vectorizer.fit_transform(&corpus);
        let mut scored: Vec<(&Book, f64)> = pool
            .iter()
            .enumerate()
            .map(|(offset, book)| {
                let row = favourites.len() + offset;
                (*book, mean_similarity(&matrix, favourites.len(), row))
            })
            .collect();
        scored.sort_by(|left, right| right.1.total_cmp(&left.1));
        scored.truncate(self.limit);
        debug!(
            "suggested {} of {} candidates from {} favourites",
            scored.len(),
            pool.len(),
            favourites.len()
        );
        scored
            .into_iter()
            .map(|(book, score)| ScoredBook::new(book.clone(), score))
            .collect()
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "averaging similarities divides by the favourite count"
)]
fn mean_similarity(matrix: &crate::TfidfMatrix, favourites: usize, row: usize) -> f64 {
    let total = (0..favourites)
        .filter_map(|favourite| matrix.linear_kernel(favourite, row))
        .fold(0.0, |sum, similarity| sum + similarity);
    total / favourites as f64
}
