//! The IMDb-style weighted rating formula.
//!
//! A book with `v` votes and average `R` scores
//! `v / (v + m) * R + m / (v + m) * C`, where `m` is the vote threshold and
//! `C` the catalogue-wide mean. Books with few votes are pulled toward `C`.

use folio_core::Book;
use log::debug;

use crate::{ScoreError, ScoringParameters};

/// Score `book` against the catalogue-wide `params`.
///
/// The result is a convex combination of the book's own average and the
/// global mean, so it always lies between the two. When both the vote count
/// and the threshold are zero the book's own average is returned.
///
/// # Errors
///
/// Returns [`ScoreError::MissingVotes`] when the book lacks a vote count or
/// average, [`ScoreError::NonFinite`] when any input is NaN or infinite, and
/// [`ScoreError::NegativeThreshold`] when `params.vote_threshold < 0`.
///
/// # Examples
///
/// ```
/// use folio_core::Book;
/// use folio_scorer::{ScoringParameters, weighted_rating};
///
/// let book = Book::new(1, "A").expect("valid book").with_votes(100, 8.0);
/// let score = weighted_rating(&book, ScoringParameters::new(7.0, 100.0))
///     .expect("scorable book");
/// assert!((score - 7.5).abs() < 1e-12);
/// ```
pub fn weighted_rating(book: &Book, params: ScoringParameters) -> Result<f64, ScoreError> {
    let (Some(count), Some(rating)) = (book.vote_count, book.vote_average) else {
        return Err(ScoreError::MissingVotes { book_id: book.id });
    };
    if !(rating.is_finite() && params.global_mean.is_finite() && params.vote_threshold.is_finite())
    {
        return Err(ScoreError::NonFinite { book_id: book.id });
    }
    if params.vote_threshold < 0.0 {
        return Err(ScoreError::NegativeThreshold {
            threshold: params.vote_threshold,
        });
    }
    let votes = f64::from(count);
    match blend(votes, rating, params) {
        Some(score) => Ok(score),
        None => {
            debug!(
                "book {} has no votes and the threshold is zero; using its own average",
                book.id
            );
            Ok(rating)
        }
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "the weighted rating is a floating-point blend"
)]
fn blend(votes: f64, rating: f64, params: ScoringParameters) -> Option<f64> {
    let total = votes + params.vote_threshold;
    if total <= 0.0 {
        return None;
    }
    Some((votes / total) * rating + (params.vote_threshold / total) * params.global_mean)
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point scores"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn rated(count: u32, average: f64) -> Book {
        Book::new(7, "Rated")
            .expect("valid book")
            .with_votes(count, average)
    }

    #[rstest]
    #[case(100, 8.0, 7.0, 100.0, 7.5)]
    #[case(50, 6.0, 7.0, 50.0, 6.5)]
    #[case(0, 9.0, 6.0, 10.0, 6.0)]
    #[case(10, 9.0, 6.0, 0.0, 9.0)]
    fn blends_rating_with_global_mean(
        #[case] count: u32,
        #[case] average: f64,
        #[case] global_mean: f64,
        #[case] threshold: f64,
        #[case] expected: f64,
    ) {
        let score = weighted_rating(
            &rated(count, average),
            ScoringParameters::new(global_mean, threshold),
        )
        .expect("scorable");
        assert!((score - expected).abs() < 1e-12, "got {score}");
    }

    #[rstest]
    fn zero_votes_and_zero_threshold_returns_own_average() {
        let score = weighted_rating(&rated(0, 4.5), ScoringParameters::new(7.0, 0.0))
            .expect("degenerate input still scores");
        assert!((score - 4.5).abs() < f64::EPSILON);
    }

    #[rstest]
    fn missing_statistics_are_rejected() {
        let unrated = Book::new(3, "Unrated").expect("valid book");
        let err = weighted_rating(&unrated, ScoringParameters::new(7.0, 10.0))
            .expect_err("unrated book cannot be scored");
        assert_eq!(err, ScoreError::MissingVotes { book_id: 3 });

        let half = unrated.with_vote_count(Some(12));
        let partial = weighted_rating(&half, ScoringParameters::new(7.0, 10.0))
            .expect_err("average is still missing");
        assert_eq!(partial, ScoreError::MissingVotes { book_id: 3 });
    }

    #[rstest]
    #[case(ScoringParameters::new(f64::NAN, 10.0))]
    #[case(ScoringParameters::new(7.0, f64::INFINITY))]
    fn non_finite_parameters_are_rejected(#[case] params: ScoringParameters) {
        let err = weighted_rating(&rated(10, 8.0), params).expect_err("non-finite input");
        assert_eq!(err, ScoreError::NonFinite { book_id: 7 });
    }

    #[rstest]
    fn negative_threshold_is_rejected() {
        let err = weighted_rating(&rated(10, 8.0), ScoringParameters::new(7.0, -1.0))
            .expect_err("negative threshold");
        assert!(matches!(err, ScoreError::NegativeThreshold { .. }));
    }
}
