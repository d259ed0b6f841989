//! Recommendation operations over a catalogue.

use folio_core::{CatalogReader, FavouriteSet, FavouriteStore};
use log::{debug, info};

use crate::{PopularityRanker, RecommendError, ScoredBook, SimilaritySuggester};

/// Recommendation service backed by a catalogue `C`.
///
/// Read-only operations need `C: CatalogReader`; operations that change a
/// reader's favourites need `C: FavouriteStore`.
///
/// # Examples
///
/// ```
/// use folio_core::{Book, MemoryCatalog};
/// use folio_scorer::Recommender;
///
/// let catalog = MemoryCatalog::with_books([
///     Book::new(1, "Dune").expect("valid").with_votes(120, 8.2),
///     Book::new(2, "Emma").expect("valid").with_votes(40, 7.1),
/// ]);
/// let recommender = Recommender::new(catalog);
/// let ranked = recommender.rank_popular().expect("ranking succeeds");
/// assert_eq!(ranked.first().map(|scored| scored.book.id), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct Recommender<C> {
    catalog: C,
    ranker: PopularityRanker,
    suggester: SimilaritySuggester,
}

impl<C> Recommender<C> {
    /// Wrap `catalog` with the default ranker and suggester.
    #[must_use]
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            ranker: PopularityRanker::default(),
            suggester: SimilaritySuggester::default(),
        }
    }

    /// Replace the popularity ranker.
    #[must_use]
    pub fn with_ranker(mut self, ranker: PopularityRanker) -> Self {
        self.ranker = ranker;
        self
    }

    /// Replace the similarity suggester.
    #[must_use]
    pub fn with_suggester(mut self, suggester: SimilaritySuggester) -> Self {
        self.suggester = suggester;
        self
    }

    /// Borrow the underlying catalogue.
    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Return the underlying catalogue.
    #[must_use]
    pub fn into_catalog(self) -> C {
        self.catalog
    }
}

impl<C: CatalogReader> Recommender<C> {
    /// Rank the whole catalogue by weighted rating.
    ///
    /// # Errors
    ///
    /// Propagates catalogue read failures and ranking errors.
    pub fn rank_popular(&self) -> Result<Vec<ScoredBook>, RecommendError> {
        let books = self.catalog.list_all_books()?;
        Ok(self.ranker.rank_catalog(&books)?)
    }

    /// Recommendations shown alongside book `book_id`.
    ///
    /// The book is resolved by id and then re-resolved by its title, so an
    /// earlier book with the same title shadows it. The result is the global
    /// popularity ranking and does not depend on the book itself.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::Catalog`] when the id or title does not
    /// resolve, and propagates ranking errors.
    pub fn recommend_for_book(&self, book_id: u64) -> Result<Vec<ScoredBook>, RecommendError> {
        let requested = self.catalog.get_book(book_id)?;
        let resolved = self.catalog.find_book_by_title(&requested.title)?;
        if resolved.id != book_id {
            debug!(
                "book {book_id} resolved by title {:?} to book {}",
                requested.title, resolved.id
            );
        }
        self.rank_popular()
    }

    /// Content-based suggestions for reader `user_id`.
    ///
    /// The catalogue is split into the reader's favourites and the remaining
    /// candidates, which keep catalogue order.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::Catalog`] when the profile is missing or the
    /// catalogue cannot be read.
    pub fn suggest_for_user(&self, user_id: u64) -> Result<Vec<ScoredBook>, RecommendError> {
        let favourite_ids: FavouriteSet = self.catalog.list_favourites(user_id)?.iter().collect();
        let (favourites, candidates) = favourite_ids.partition(self.catalog.list_all_books()?);
        Ok(self.suggester.suggest_scored(&favourites, &candidates))
    }
}

impl<C: FavouriteStore> Recommender<C> {
    /// Mark `book_id` as a favourite of `user_id`, then rank the catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::Catalog`] when the profile or book is
    /// missing or the book is already a favourite, and propagates ranking
    /// errors.
    pub fn add_favourite_and_recommend(
        &mut self,
        user_id: u64,
        book_id: u64,
    ) -> Result<Vec<ScoredBook>, RecommendError> {
        self.catalog.add_favourite(user_id, book_id)?;
        info!("user {user_id} added book {book_id} to favourites");
        self.rank_popular()
    }

    /// Remove `book_id` from the favourites of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::Catalog`] when the profile or book is
    /// missing or the book is not a favourite.
    pub fn remove_favourite(&mut self, user_id: u64, book_id: u64) -> Result<(), RecommendError> {
        self.catalog.remove_favourite(user_id, book_id)?;
        info!("user {user_id} removed book {book_id} from favourites");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{Book, CatalogError, MemoryCatalog};
    use rstest::{fixture, rstest};

    const READER: u64 = 1;

    fn book(id: u64, title: &str, votes: u32, average: f64) -> Book {
        Book::new(id, title)
            .expect("valid book")
            .with_votes(votes, average)
    }

    #[fixture]
    fn recommender() -> Recommender<MemoryCatalog> {
        Recommender::new(
            MemoryCatalog::with_books([
                book(1, "A", 100, 8.0),
                book(2, "B", 10, 9.5),
                book(3, "C", 50, 6.0),
                book(4, "b", 200, 7.0),
            ])
            .with_profile(READER, [1]),
        )
    }

    fn ids(books: &[ScoredBook]) -> Vec<u64> {
        books.iter().map(|scored| scored.book.id).collect()
    }

    #[rstest]
    fn recommendations_ignore_the_requested_book(recommender: Recommender<MemoryCatalog>) {
        let global = recommender.rank_popular().expect("rank");
        let for_book = recommender.recommend_for_book(3).expect("recommend");
        assert_eq!(ids(&global), ids(&for_book));
    }

    #[rstest]
    fn title_shadowing_still_recommends(recommender: Recommender<MemoryCatalog>) {
        let result = recommender.recommend_for_book(4).expect("resolves via book 2");
        assert!(!result.is_empty());
    }

    #[rstest]
    fn unknown_book_is_not_found(recommender: Recommender<MemoryCatalog>) {
        let err = recommender
            .recommend_for_book(42)
            .expect_err("missing book");
        assert!(err.is_not_found());
        assert!(matches!(
            err,
            RecommendError::Catalog(CatalogError::BookNotFound { id: 42 })
        ));
    }

    #[rstest]
    fn favourites_round_trip(mut recommender: Recommender<MemoryCatalog>) {
        let ranked = recommender
            .add_favourite_and_recommend(READER, 3)
            .expect("add favourite");
        assert_eq!(ids(&ranked), ids(&recommender.rank_popular().expect("rank")));
        let duplicate = recommender
            .add_favourite_and_recommend(READER, 3)
            .expect_err("already a favourite");
        assert!(matches!(
            duplicate,
            RecommendError::Catalog(CatalogError::AlreadyFavourite { .. })
        ));
        recommender.remove_favourite(READER, 3).expect("remove");
        let favourites = recommender
            .catalog()
            .favourites(READER)
            .map(|set| set.iter().collect::<Vec<_>>());
        assert_eq!(favourites, Some(vec![1]));
    }

    #[rstest]
    fn suggestions_require_a_profile(recommender: Recommender<MemoryCatalog>) {
        let err = recommender.suggest_for_user(77).expect_err("no profile");
        assert!(matches!(
            err,
            RecommendError::Catalog(CatalogError::ProfileNotFound { user_id: 77 })
        ));
        let suggestions = recommender.suggest_for_user(READER).expect("suggest");
        assert!(suggestions.iter().all(|scored| scored.book.id != 1));
    }

    #[rstest]
    fn configured_parts_are_used(recommender: Recommender<MemoryCatalog>) {
        let ranker = PopularityRanker::with_percentile(0.0).expect("valid percentile");
        assert!(ranker.percentile().abs() < f64::EPSILON);
        let tuned = recommender
            .with_ranker(ranker)
            .with_suggester(SimilaritySuggester::new(1));

        assert_eq!(ids(&tuned.rank_popular().expect("rank")).len(), 4);
        assert_eq!(tuned.suggest_for_user(READER).expect("suggest").len(), 1);

        let catalog = tuned.into_catalog();
        assert_eq!(
            catalog
                .favourites(READER)
                .map(|set| set.iter().collect::<Vec<_>>()),
            Some(vec![1])
        );
    }
}
