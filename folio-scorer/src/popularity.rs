//! Global popularity ranking.
//!
//! Ranking happens in three passes over the catalogue. The vote threshold
//! `m` is the 90th percentile of the known vote counts. Books with at least
//! `m` votes and a known average qualify. Each qualifying book is then
//! scored with [`weighted_rating`] against the mean average `C` and the
//! result is sorted best first.

use folio_core::Book;
use log::debug;

use crate::{RankingError, ScoredBook, ScoringParameters, weighted_rating};

/// Percentile of the vote-count distribution used as the default threshold.
pub const DEFAULT_VOTE_PERCENTILE: f64 = 90.0;

/// Mean of the known vote averages, or `None` when no book has one.
///
/// Non-finite averages are ignored.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "the arithmetic mean divides a float sum by the sample size"
)]
pub fn global_mean(books: &[Book]) -> Option<f64> {
    let (sum, count) = books
        .iter()
        .filter_map(|book| book.vote_average)
        .filter(|average| average.is_finite())
        .fold((0.0_f64, 0_usize), |(sum, count), average| {
            (sum + average, count + 1)
        });
    (count > 0).then(|| sum / count as f64)
}

/// The `percentile`-th percentile of the known vote counts.
///
/// Interpolates linearly between the two nearest ranks. Returns `0.0` when
/// no book has a vote count. `percentile` is clamped to `0.0..=100.0` and a
/// NaN percentile is read as `0.0`.
#[must_use]
pub fn vote_threshold(books: &[Book], percentile: f64) -> f64 {
    let bounded = if percentile.is_nan() {
        0.0
    } else {
        percentile.clamp(0.0, 100.0)
    };
    let mut counts: Vec<f64> = books
        .iter()
        .filter_map(|book| book.vote_count)
        .map(f64::from)
        .collect();
    counts.sort_by(f64::total_cmp);
    interpolate(&counts, bounded).unwrap_or(0.0)
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "rank positions are non-negative and bounded by the sample length"
)]
fn interpolate(sorted: &[f64], percentile: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = percentile / 100.0 * last as f64;
    let lower_rank = rank.floor();
    let lower = *sorted.get(lower_rank as usize)?;
    let upper = *sorted.get(rank.ceil() as usize)?;
    Some(lower + (upper - lower) * (rank - lower_rank))
}

/// Whether `book` has enough votes to be ranked against `threshold`.
///
/// Books whose average is missing or non-finite never qualify, matching the
/// averages [`global_mean`] takes into account.
#[must_use]
pub fn qualifies(book: &Book, threshold: f64) -> bool {
    book.vote_average.is_some_and(f64::is_finite)
        && book
            .vote_count
            .is_some_and(|count| f64::from(count) >= threshold)
}

impl ScoringParameters {
    /// Derive `C` and the default-percentile `m` from a catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`RankingError::UndefinedGlobalMean`] when no book carries a
    /// vote average.
    pub fn from_catalog(books: &[Book]) -> Result<Self, RankingError> {
        PopularityRanker::default().parameters(books)
    }
}

/// Ranks books by weighted rating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopularityRanker {
    percentile: f64,
}

impl Default for PopularityRanker {
    fn default() -> Self {
        Self {
            percentile: DEFAULT_VOTE_PERCENTILE,
        }
    }
}

impl PopularityRanker {
    /// Build a ranker that derives `m` from the given vote-count percentile.
    ///
    /// # Errors
    ///
    /// Returns [`RankingError::InvalidPercentile`] unless
    /// `0.0 <= percentile <= 100.0`.
    pub fn with_percentile(percentile: f64) -> Result<Self, RankingError> {
        if (0.0..=100.0).contains(&percentile) {
            Ok(Self { percentile })
        } else {
            Err(RankingError::InvalidPercentile { percentile })
        }
    }

    /// Percentile used to derive the vote threshold.
    #[must_use]
    pub const fn percentile(&self) -> f64 {
        self.percentile
    }

    /// Compute `C` and `m` for `books`.
    ///
    /// # Errors
    ///
    /// Returns [`RankingError::UndefinedGlobalMean`] when no book carries a
    /// vote average.
    pub fn parameters(&self, books: &[Book]) -> Result<ScoringParameters, RankingError> {
        let mean = global_mean(books).ok_or(RankingError::UndefinedGlobalMean)?;
        Ok(ScoringParameters::new(
            mean,
            vote_threshold(books, self.percentile),
        ))
    }

    /// Score and sort the books qualifying under `params`.
    ///
    /// Books with equal scores keep their catalogue order.
    ///
    /// # Errors
    ///
    /// Propagates [`ScoreError`](crate::ScoreError) from scoring a
    /// qualifying book.
    pub fn rank(
        &self,
        books: &[Book],
        params: ScoringParameters,
    ) -> Result<Vec<ScoredBook>, RankingError> {
        let mut scored = books
            .iter()
            .filter(|book| qualifies(book, params.vote_threshold))
            .map(|book| {
                weighted_rating(book, params).map(|score| ScoredBook::new(book.clone(), score))
            })
            .collect::<Result<Vec<_>, _>>()?;
        scored.sort_by(|left, right| right.score.total_cmp(&left.score));
        Ok(scored)
    }

    /// Rank `books` by weighted rating using parameters derived from them.
    ///
    /// An empty list is returned when no book qualifies, including when no
    /// book has a vote count.
    ///
    /// # Errors
    ///
    /// Returns [`RankingError::UndefinedGlobalMean`] when some book
    /// qualifies but no average is known, and propagates scoring errors.
    pub fn rank_catalog(&self, books: &[Book]) -> Result<Vec<ScoredBook>, RankingError> {
        let threshold = vote_threshold(books, self.percentile);
        if !books.iter().any(|book| qualifies(book, threshold)) {
            debug!(
                "no book out of {} reaches the vote threshold {threshold}",
                books.len()
            );
            return Ok(Vec::new());
        }
        let mean = global_mean(books).ok_or(RankingError::UndefinedGlobalMean)?;
        let ranked = self.rank(books, ScoringParameters::new(mean, threshold))?;
        debug!(
            "ranked {} of {} books with C={mean:.3} m={threshold:.1}",
            ranked.len(),
            books.len()
        );
        Ok(ranked)
    }
}

/// Rank `books` by weighted rating with the default percentile.
///
/// # Errors
///
/// See [`PopularityRanker::rank_catalog`].
///
/// # Examples
///
/// ```
/// use folio_core::Book;
/// use folio_scorer::rank_popular;
///
/// let books = vec![
///     Book::new(1, "A").expect("valid").with_votes(100, 8.0),
///     Book::new(2, "B").expect("valid").with_votes(10, 9.5),
///     Book::new(3, "C").expect("valid").with_votes(50, 6.0),
/// ];
/// let ranked = rank_popular(&books).expect("ranking succeeds");
/// let titles: Vec<_> = ranked.iter().map(|book| book.title.as_str()).collect();
/// assert_eq!(titles, ["A"]);
/// ```
pub fn rank_popular(books: &[Book]) -> Result<Vec<Book>, RankingError> {
    Ok(PopularityRanker::default()
        .rank_catalog(books)?
        .into_iter()
        .map(ScoredBook::into_book)
        .collect())
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point parameters"
)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn book(id: u64, votes: Option<u32>, average: Option<f64>) -> Book {
        Book::new(id, format!("Book {id}"))
            .expect("valid book")
            .with_vote_count(votes)
            .with_vote_average(average)
    }

    #[fixture]
    fn trio() -> Vec<Book> {
        vec![
            book(1, Some(100), Some(8.0)),
            book(2, Some(10), Some(9.5)),
            book(3, Some(50), Some(6.0)),
        ]
    }

    #[rstest]
    fn threshold_interpolates_between_ranks(trio: Vec<Book>) {
        let threshold = vote_threshold(&trio, DEFAULT_VOTE_PERCENTILE);
        assert!((threshold - 90.0).abs() < 1e-9, "got {threshold}");
    }

    #[rstest]
    #[case(0.0, 10.0)]
    #[case(50.0, 50.0)]
    #[case(100.0, 100.0)]
    fn threshold_endpoints(trio: Vec<Book>, #[case] percentile: f64, #[case] expected: f64) {
        let threshold = vote_threshold(&trio, percentile);
        assert!((threshold - expected).abs() < 1e-9);
    }

    #[rstest]
    fn nan_percentile_reads_as_lowest_rank(trio: Vec<Book>) {
        let threshold = vote_threshold(&trio, f64::NAN);
        assert!((threshold - 10.0).abs() < 1e-9, "got {threshold}");
    }

    #[rstest]
    fn threshold_defaults_to_zero_without_counts() {
        let books = vec![book(1, None, Some(7.0))];
        assert!(vote_threshold(&books, 90.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn global_mean_skips_missing_averages() {
        let books = vec![
            book(1, Some(1), Some(6.0)),
            book(2, Some(1), None),
            book(3, Some(1), Some(8.0)),
        ];
        let mean = global_mean(&books).expect("two averages known");
        assert!((mean - 7.0).abs() < 1e-12);
        assert_eq!(global_mean(&[book(4, Some(1), None)]), None);
    }

    #[rstest]
    fn parameters_require_an_average() {
        let books = vec![book(1, Some(10), None)];
        assert_eq!(
            ScoringParameters::from_catalog(&books),
            Err(RankingError::UndefinedGlobalMean)
        );
    }

    #[rstest]
    fn ranks_only_qualifying_books(trio: Vec<Book>) {
        let ranked = PopularityRanker::default()
            .rank_catalog(&trio)
            .expect("ranking succeeds");
        let ids: Vec<u64> = ranked.iter().map(|scored| scored.book.id).collect();
        assert_eq!(ids, vec![1]);
        let expected_mean = (8.0 + 9.5 + 6.0) / 3.0;
        let expected = (100.0 / 190.0) * 8.0 + (90.0 / 190.0) * expected_mean;
        let score = ranked.first().map(|scored| scored.score).expect("one result");
        assert!((score - expected).abs() < 1e-9);
    }

    #[rstest]
    fn empty_when_no_vote_counts() {
        let books = vec![book(1, None, Some(7.0)), book(2, None, None)];
        let ranked = rank_popular(&books).expect("soft empty result");
        assert!(ranked.is_empty());
        assert!(rank_popular(&[]).expect("empty catalogue").is_empty());
    }

    #[rstest]
    fn books_without_average_never_qualify() {
        let books = vec![book(1, Some(500), None), book(2, Some(5), Some(7.0))];
        let ranked = PopularityRanker::with_percentile(0.0)
            .expect("valid percentile")
            .rank_catalog(&books)
            .expect("ranking succeeds");
        let ids: Vec<u64> = ranked.iter().map(|scored| scored.book.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[rstest]
    fn non_finite_averages_are_skipped_not_fatal() {
        let books = vec![
            book(1, Some(100), Some(f64::NAN)),
            book(2, Some(100), Some(8.0)),
            book(3, Some(100), Some(f64::INFINITY)),
        ];
        assert!(!qualifies(books.first().expect("first book"), 0.0));
        let ranked = rank_popular(&books).expect("non-finite averages are skipped");
        let ids: Vec<u64> = ranked.iter().map(|book| book.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[rstest]
    fn ties_keep_catalogue_order() {
        let books = vec![
            book(5, Some(10), Some(7.0)),
            book(2, Some(10), Some(7.0)),
            book(9, Some(10), Some(7.0)),
        ];
        let ranked = rank_popular(&books).expect("ranking succeeds");
        let ids: Vec<u64> = ranked.iter().map(|book| book.id).collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }

    #[rstest]
    #[case(-1.0)]
    #[case(100.5)]
    #[case(f64::NAN)]
    fn rejects_out_of_range_percentiles(#[case] percentile: f64) {
        assert!(matches!(
            PopularityRanker::with_percentile(percentile),
            Err(RankingError::InvalidPercentile { .. })
        ));
    }
}
