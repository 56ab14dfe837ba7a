//! External text capabilities consulted by the engine.
//!
//! Sentiment classification and topic extraction are opaque services: the
//! engine receives them as injected trait objects, calls them synchronously,
//! and degrades to a neutral result when they are absent or fail.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sentiment label assigned to a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Favourable tone.
    Positive,
    /// Neither favourable nor unfavourable.
    Neutral,
    /// Unfavourable tone.
    Negative,
}

/// Classification of one text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentResult {
    /// Winning label.
    pub sentiment: Sentiment,
    /// Probability of the winning label.
    pub confidence: f64,
    /// Probability per label.
    pub scores: BTreeMap<Sentiment, f64>,
}

impl SentimentResult {
    /// Result reported when no trained classifier is available.
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            confidence: 0.5,
            scores: BTreeMap::from([
                (Sentiment::Positive, 0.33),
                (Sentiment::Neutral, 0.34),
                (Sentiment::Negative, 0.33),
            ]),
        }
    }
}

/// One extracted topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Topic {
    /// Zero-based topic index.
    pub topic_id: usize,
    /// Keywords ordered by weight.
    pub keywords: Vec<String>,
    /// Keyword weights aligned with `keywords`.
    pub weights: Vec<f64>,
}

/// Topics extracted from a document set.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TopicSummary {
    /// Extracted topics.
    pub topics: Vec<Topic>,
    /// Model coherence; `0.0` when nothing was extracted.
    pub coherence_score: f64,
}

/// Errors raised by, or while preparing input for, external capabilities.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CapabilityError {
    /// Training texts and labels differ in length.
    #[error("expected one label per text, found {texts} texts and {labels} labels")]
    LengthMismatch {
        /// Number of texts supplied.
        texts: usize,
        /// Number of labels supplied.
        labels: usize,
    },
    /// The classifier has not been trained.
    #[error("classifier is not trained")]
    Untrained,
    /// The classifier returned a different number of results than texts.
    #[error("classifier returned {returned} results for {expected} texts")]
    ResultCountMismatch {
        /// Number of texts submitted.
        expected: usize,
        /// Number of results returned.
        returned: usize,
    },
    /// The service failed for another reason.
    #[error("capability failed: {0}")]
    Failed(String),
}

/// Labelled texts for fitting a classifier.
///
/// Construction validates the shape so mismatched inputs are rejected at the
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingSet {
    texts: Vec<String>,
    labels: Vec<Sentiment>,
}

impl TrainingSet {
    /// Pair texts with labels.
    ///
    /// # Errors
    /// Returns [`CapabilityError::LengthMismatch`] when the counts differ.
    pub fn new(texts: Vec<String>, labels: Vec<Sentiment>) -> Result<Self, CapabilityError> {
        if texts.len() != labels.len() {
            return Err(CapabilityError::LengthMismatch {
                texts: texts.len(),
                labels: labels.len(),
            });
        }
        Ok(Self { texts, labels })
    }

    /// Iterate over `(text, label)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Sentiment)> + '_ {
        self.texts
            .iter()
            .map(String::as_str)
            .zip(self.labels.iter().copied())
    }

    /// Number of labelled texts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Report whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// Stateless sentiment classification.
pub trait TextClassifier: Send + Sync {
    /// Classify each text, returning one result per input in order.
    ///
    /// # Errors
    /// Returns [`CapabilityError`] when the classifier cannot run.
    fn classify(&self, texts: &[String]) -> Result<Vec<SentimentResult>, CapabilityError>;
}

/// Unsupervised topic extraction over a document set.
pub trait TopicExtractor: Send + Sync {
    /// Extract up to `num_topics` topics.
    ///
    /// # Errors
    /// Returns [`CapabilityError`] when extraction fails.
    fn extract(&self, texts: &[String], num_topics: usize)
    -> Result<TopicSummary, CapabilityError>;
}

/// Classify `texts`, answering neutral when the classifier is absent, fails,
/// or returns a mismatched batch.
#[must_use]
pub fn classify_or_neutral(
    classifier: Option<&dyn TextClassifier>,
    texts: &[String],
) -> Vec<SentimentResult> {
    let neutral = || vec![SentimentResult::neutral(); texts.len()];
    let Some(classifier) = classifier else {
        return neutral();
    };
    match classifier.classify(texts) {
        Ok(results) if results.len() == texts.len() => results,
        Ok(results) => {
            log::warn!(
                "{}; answering neutral",
                CapabilityError::ResultCountMismatch {
                    expected: texts.len(),
                    returned: results.len(),
                }
            );
            neutral()
        }
        Err(err) => {
            log::warn!("text classifier failed: {err}; answering neutral");
            neutral()
        }
    }
}

/// Extract topics, answering an empty summary when the extractor is absent,
/// fails, or there are fewer documents than requested topics.
#[must_use]
pub fn extract_topics_or_empty(
    extractor: Option<&dyn TopicExtractor>,
    texts: &[String],
    num_topics: usize,
) -> TopicSummary {
    if texts.is_empty() || texts.len() < num_topics {
        return TopicSummary::default();
    }
    let Some(extractor) = extractor else {
        return TopicSummary::default();
    };
    extractor
        .extract(texts, num_topics)
        .unwrap_or_else(|err| {
            log::warn!("topic extractor failed: {err}; answering with no topics");
            TopicSummary::default()
        })
}
