//! TF-IDF text vectorisation for content similarity.
//!
//! Each book is reduced to a short feature text, the corpus of feature texts
//! is turned into L2-normalised TF-IDF rows, and similarity between two rows
//! is their dot product (the linear kernel). Because rows are unit length the
//! linear kernel equals cosine similarity.

use std::collections::BTreeMap;

use folio_core::Book;

/// Feature text for `book`: its title, a space, and its joined author names.
///
/// ```
/// use folio_core::Book;
/// use folio_scorer::featurize;
///
/// let book = Book::new(1, "Dune").expect("valid").with_authors(["Frank Herbert"]);
/// assert_eq!(featurize(&book), "Dune Frank Herbert");
/// ```
#[must_use]
pub fn featurize(book: &Book) -> String {
    format!("{} {}", book.title, book.author_names())
}

/// Tokenisation and weighting options for [`TfidfVectorizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TfidfOptions {
    /// Lowercase tokens before counting.
    pub lowercase: bool,
    /// Shortest token, in characters, kept in the vocabulary.
    pub min_token_chars: usize,
    /// Add one to document frequencies as if an extra document held every term.
    pub smooth_idf: bool,
    /// Replace raw term counts with `1 + ln(count)`.
    pub sublinear_tf: bool,
    /// Scale each row to unit Euclidean length.
    pub normalise: bool,
}

impl Default for TfidfOptions {
    fn default() -> Self {
        Self {
            lowercase: true,
            min_token_chars: 2,
            smooth_idf: true,
            sublinear_tf: false,
            normalise: true,
        }
    }
}

/// Fits a vocabulary to a corpus and produces its TF-IDF matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TfidfVectorizer {
    options: TfidfOptions,
}

impl TfidfVectorizer {
    /// Build a vectoriser with explicit options.
    #[must_use]
    pub const fn new(options: TfidfOptions) -> Self {
        Self { options }
    }

    /// Options in effect.
    #[must_use]
    pub const fn options(&self) -> TfidfOptions {
        self.options
    }

    /// Split `text` into tokens.
    ///
    /// A token is a maximal run of alphanumeric characters or underscores at
    /// least `min_token_chars` long.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(|ch: char| !(ch.is_alphanumeric() || ch == '_'))
            .filter(|token| token.chars().count() >= self.options.min_token_chars)
            .map(|token| {
                if self.options.lowercase {
                    token.to_lowercase()
                } else {
                    token.to_owned()
                }
            })
            .collect()
    }

    /// Fit the vocabulary to `corpus` and return one row per document.
    ///
    /// Vocabulary columns are ordered lexicographically. A document with no
    /// surviving tokens yields an all-zero row.
    #[must_use]
    pub fn fit_transform<S: AsRef<str>>(&self, corpus: &[S]) -> TfidfMatrix {
        let documents: Vec<BTreeMap<String, u32>> = corpus
            .iter()
            .map(|text| term_counts(self.tokenize(text.as_ref())))
            .collect();

        let mut document_frequency: BTreeMap<&str, u32> = BTreeMap::new();
        for counts in &documents {
            for term in counts.keys() {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }
        let vocabulary: Vec<String> = document_frequency
            .keys()
            .map(|term| (*term).to_owned())
            .collect();
        let columns: BTreeMap<&str, usize> = document_frequency
            .keys()
            .enumerate()
            .map(|(column, term)| (*term, column))
            .collect();
        let idf: Vec<f64> = document_frequency
            .values()
            .map(|&frequency| self.inverse_document_frequency(documents.len(), frequency))
            .collect();

        let rows = documents
            .iter()
            .map(|counts| self.weigh_row(counts, &columns, &idf))
            .collect();
        TfidfMatrix { vocabulary, rows }
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "idf is a logarithm of document-count ratios"
    )]
    fn inverse_document_frequency(&self, documents: usize, frequency: u32) -> f64 {
        let total = documents as f64;
        let df = f64::from(frequency);
        if self.options.smooth_idf {
            ((1.0 + total) / (1.0 + df)).ln() + 1.0
        } else {
            (total / df).ln() + 1.0
        }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "term weights multiply term frequency by idf"
    )]
    fn weigh_row(
        &self,
        counts: &BTreeMap<String, u32>,
        columns: &BTreeMap<&str, usize>,
        idf: &[f64],
    ) -> Vec<f64> {
        let mut row = vec![0.0; idf.len()];
        for (term, &count) in counts {
            let Some(&column) = columns.get(term.as_str()) else {
                continue;
            };
            let tf = if self.options.sublinear_tf {
                1.0 + f64::from(count).ln()
            } else {
                f64::from(count)
            };
            if let (Some(cell), Some(weight)) = (row.get_mut(column), idf.get(column)) {
                *cell = tf * weight;
            }
        }
        if self.options.normalise {
            normalise(&mut row);
        }
        row
    }
}

fn term_counts(tokens: Vec<String>) -> BTreeMap<String, u32> {
    let mut counts = BTreeMap::new();
    for token in tokens {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

#[expect(
    clippy::float_arithmetic,
    reason = "L2 normalisation divides by the Euclidean norm"
)]
fn normalise(row: &mut [f64]) {
    let norm = dot(row, row).sqrt();
    if norm > 0.0 {
        row.iter_mut().for_each(|cell| *cell /= norm);
    }
}

/// Dot product of two equal-length rows.
///
/// Extra cells in the longer row are ignored. Rows with no cells give
/// `+0.0`.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the dot product sums element-wise products"
)]
pub fn dot(left: &[f64], right: &[f64]) -> f64 {
    left.iter()
        .zip(right)
        .fold(0.0, |total, (a, b)| total + a * b)
}

/// Dense TF-IDF matrix with one row per fitted document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TfidfMatrix {
    vocabulary: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl TfidfMatrix {
    /// Number of documents.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the matrix holds no documents.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Terms backing each column, in column order.
    #[must_use]
    pub const fn vocabulary(&self) -> &[String] {
        self.vocabulary.as_slice()
    }

    /// Row for document `index`.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Linear kernel between documents `left` and `right`.
    ///
    /// Returns `None` when either index is out of range.
    #[must_use]
    pub fn linear_kernel(&self, left: usize, right: usize) -> Option<f64> {
        Some(dot(self.row(left)?, self.row(right)?))
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point weights"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Dune Frank Herbert", &["dune", "frank", "herbert"])]
    #[case("A tale of 2 cities", &["tale", "of", "cities"])]
    #[case("snake_case, hyphen-ated!", &["snake_case", "hyphen", "ated"])]
    #[case("", &[])]
    fn tokenizes_word_runs(#[case] text: &str, #[case] expected: &[&str]) {
        let tokens = TfidfVectorizer::default().tokenize(text);
        assert_eq!(tokens, expected);
    }

    #[rstest]
    fn vocabulary_is_sorted_and_deduplicated() {
        let matrix = TfidfVectorizer::default().fit_transform(&["b a_ cc", "cc dd b"]);
        assert_eq!(matrix.vocabulary(), ["a_", "cc", "dd"]);
        assert_eq!(matrix.len(), 2);
    }

    #[rstest]
    fn rows_are_unit_length() {
        let matrix = TfidfVectorizer::default()
            .fit_transform(&["Dune Frank Herbert", "Dune Messiah Frank Herbert", "Cooking"]);
        for index in 0..matrix.len() {
            let row = matrix.row(index).expect("row in range");
            let norm = dot(row, row).sqrt();
            assert!((norm - 1.0).abs() < 1e-12, "row {index} has norm {norm}");
        }
    }

    #[rstest]
    fn matches_smoothed_idf_weights() {
        // "xx" appears in both documents, "yy" only in the first.
        let matrix = TfidfVectorizer::default().fit_transform(&["xx yy", "xx"]);
        let shared = (3.0_f64 / 3.0).ln() + 1.0;
        let unique = (3.0_f64 / 2.0).ln() + 1.0;
        let norm = shared.hypot(unique);
        let row = matrix.row(0).expect("first row");
        assert!((row.first().copied().unwrap_or_default() - shared / norm).abs() < 1e-12);
        assert!((row.get(1).copied().unwrap_or_default() - unique / norm).abs() < 1e-12);
    }

    #[rstest]
    fn unsmoothed_idf_counts_only_real_documents() {
        let vectorizer = TfidfVectorizer::new(TfidfOptions {
            smooth_idf: false,
            normalise: false,
            ..TfidfOptions::default()
        });
        assert!(!vectorizer.options().smooth_idf);
        let matrix = vectorizer.fit_transform(&["xx yy", "xx"]);
        let row = matrix.row(0).expect("first row");
        let shared = row.first().copied().unwrap_or_default();
        let unique = row.get(1).copied().unwrap_or_default();
        assert!((shared - 1.0).abs() < 1e-12, "got {shared}");
        assert!((unique - (2.0_f64.ln() + 1.0)).abs() < 1e-12, "got {unique}");
    }

    #[rstest]
    fn sublinear_tf_dampens_repeated_terms() {
        let options = TfidfOptions {
            sublinear_tf: true,
            normalise: false,
            ..TfidfOptions::default()
        };
        let matrix = TfidfVectorizer::new(options).fit_transform(&["xx xx xx xx"]);
        let weight = matrix
            .row(0)
            .and_then(|row| row.first().copied())
            .expect("one term");
        assert!((weight - (1.0 + 4.0_f64.ln())).abs() < 1e-12, "got {weight}");
    }

    #[rstest]
    fn related_texts_score_higher() {
        let matrix = TfidfVectorizer::default().fit_transform(&[
            "Dune Frank Herbert",
            "Dune Messiah Frank Herbert",
            "Cooking 101 Chef Ann",
        ]);
        let related = matrix.linear_kernel(0, 1).expect("in range");
        let unrelated = matrix.linear_kernel(0, 2).expect("in range");
        assert!(related > 0.5);
        assert!(unrelated.abs() < 1e-12);
        assert_eq!(matrix.linear_kernel(0, 3), None);
    }

    #[rstest]
    fn tokenless_documents_yield_zero_rows() {
        let matrix = TfidfVectorizer::default().fit_transform(&["a b c", "real words"]);
        let row = matrix.row(0).expect("first row");
        assert!(row.iter().all(|cell| *cell == 0.0));
    }

    #[rstest]
    fn featurize_keeps_trailing_space_without_authors() {
        let book = Book::new(4, "Solo").expect("valid book");
        assert_eq!(featurize(&book), "Solo ");
    }
}
