//! Pairwise TF-IDF vectorisation.
//!
//! The vocabulary and inverse document frequencies are fitted on exactly the
//! documents being compared; no corpus state survives between calls. Term
//! weights are therefore local to a pair and only the resulting cosine is
//! meaningful across pairs.
//!
//! Analysis lower-cases the text, keeps tokens of two or more word
//! characters, drops English stop words and emits unigrams plus bigrams of
//! the surviving tokens.

use std::collections::{BTreeMap, HashMap};

use crate::error::TfidfError;
use crate::stop_words::is_stop_word;

const DEFAULT_MAX_FEATURES: usize = 1000;

/// L2-normalised sparse term-weight vector.
pub type TermVector = BTreeMap<String, f64>;

/// TF-IDF vectorizer refitted on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairwiseTfidf {
    max_features: usize,
}

impl Default for PairwiseTfidf {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

impl PairwiseTfidf {
    /// Limit the vocabulary to the `max_features` most frequent terms.
    #[must_use]
    pub const fn with_max_features(max_features: usize) -> Self {
        Self { max_features }
    }

    /// Fit on `documents` and return one normalised vector per document.
    ///
    /// # Errors
    /// Returns [`TfidfError::EmptyVocabulary`] when no document contributes
    /// a term.
    pub fn fit_transform(&self, documents: &[&str]) -> Result<Vec<TermVector>, TfidfError> {
        let counts: Vec<HashMap<String, usize>> =
            documents.iter().map(|doc| term_counts(doc)).collect();
        let vocabulary = self.select_vocabulary(&counts);
        if vocabulary.is_empty() {
            return Err(TfidfError::EmptyVocabulary);
        }
        let idf = inverse_document_frequency(&counts, &vocabulary);
        Ok(counts
            .iter()
            .map(|doc| weigh_document(doc, &idf))
            .collect())
    }

    fn select_vocabulary(&self, counts: &[HashMap<String, usize>]) -> Vec<String> {
        let mut totals: HashMap<&str, usize> = HashMap::new();
        for doc in counts {
            for (term, count) in doc {
                *totals.entry(term.as_str()).or_default() += count;
            }
        }
        let mut ranked: Vec<(&str, usize)> = totals.into_iter().collect();
        ranked.sort_by(|(left_term, left), (right_term, right)| {
            right.cmp(left).then_with(|| left_term.cmp(right_term))
        });
        ranked
            .into_iter()
            .take(self.max_features)
            .map(|(term, _)| term.to_owned())
            .collect()
    }
}

/// Cosine similarity between two normalised vectors, clamped to `0.0..=1.0`.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "cosine similarity is a dot product"
)]
pub fn cosine(left: &TermVector, right: &TermVector) -> f64 {
    let dot: f64 = left
        .iter()
        .filter_map(|(term, weight)| right.get(term).map(|other| weight * other))
        .sum();
    if dot.is_finite() {
        dot.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Split `text` into analysed terms: unigrams followed by bigrams.
pub(crate) fn analyse(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2 && !is_stop_word(token))
        .collect();
    let bigrams = tokens
        .windows(2)
        .filter_map(|pair| match pair {
            [first, second] => Some(format!("{first} {second}")),
            _ => None,
        });
    tokens
        .iter()
        .map(|token| (*token).to_owned())
        .chain(bigrams)
        .collect::<Vec<_>>()
}

fn term_counts(text: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for term in analyse(text) {
        *counts.entry(term).or_default() += 1;
    }
    counts
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "smoothed idf works on small document counts"
)]
fn inverse_document_frequency(
    counts: &[HashMap<String, usize>],
    vocabulary: &[String],
) -> HashMap<String, f64> {
    let documents = counts.len() as f64;
    vocabulary
        .iter()
        .map(|term| {
            let frequency = counts.iter().filter(|doc| doc.contains_key(term)).count() as f64;
            let idf = ((1.0 + documents) / (1.0 + frequency)).ln() + 1.0;
            (term.clone(), idf)
        })
        .collect()
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "term weights multiply counts by idf and normalise"
)]
fn weigh_document(counts: &HashMap<String, usize>, idf: &HashMap<String, f64>) -> TermVector {
    let raw: TermVector = counts
        .iter()
        .filter_map(|(term, count)| {
            idf.get(term)
                .map(|weight| (term.clone(), *count as f64 * weight))
        })
        .collect();
    let norm = raw.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm == 0.0 {
        return raw;
    }
    raw.into_iter().map(|(term, w)| (term, w / norm)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn analysis_drops_stop_words_and_short_tokens() {
        let terms = analyse("I love the Rust language, a lot!");
        assert_eq!(
            terms,
            vec![
                "love",
                "rust",
                "language",
                "lot",
                "love rust",
                "rust language",
                "language lot",
            ]
        );
    }

    #[rstest]
    fn identical_documents_are_fully_similar() {
        let rows = PairwiseTfidf::default()
            .fit_transform(&["data engineering at scale", "data engineering at scale"])
            .expect("vocabulary is non-empty");
        let [left, right] = rows.as_slice() else {
            panic!("expected two rows");
        };
        assert!((cosine(left, right) - 1.0).abs() < 1e-9);
    }

    #[rstest]
    fn disjoint_documents_score_zero() {
        let rows = PairwiseTfidf::default()
            .fit_transform(&["embedded firmware", "watercolour painting"])
            .expect("vocabulary is non-empty");
        let [left, right] = rows.as_slice() else {
            panic!("expected two rows");
        };
        assert_eq!(cosine(left, right), 0.0);
    }

    #[rstest]
    fn partial_overlap_is_between_bounds() {
        let rows = PairwiseTfidf::default()
            .fit_transform(&["machine learning research", "machine learning products"])
            .expect("vocabulary is non-empty");
        let [left, right] = rows.as_slice() else {
            panic!("expected two rows");
        };
        let score = cosine(left, right);
        assert!(score > 0.0 && score < 1.0, "unexpected cosine {score}");
    }

    #[rstest]
    fn stop_word_only_documents_have_no_vocabulary() {
        let err = PairwiseTfidf::default()
            .fit_transform(&["the and of", "a I"])
            .expect_err("vocabulary must be empty");
        assert_eq!(err, TfidfError::EmptyVocabulary);
    }

    #[rstest]
    fn vocabulary_is_capped_by_frequency() {
        let rows = PairwiseTfidf::with_max_features(1)
            .fit_transform(&["python python java", "python"])
            .expect("vocabulary is non-empty");
        assert!(rows.iter().all(|row| row.keys().all(|term| term == "python")));
    }

    #[rstest]
    fn rows_are_unit_length() {
        let rows = PairwiseTfidf::default()
            .fit_transform(&["distributed systems mentor", "systems"])
            .expect("vocabulary is non-empty");
        for row in rows {
            let norm: f64 = row.values().map(|w| w * w).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }
}
