//! Error types raised while configuring scorers or vectorising text.
#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors raised when a weight table is unusable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightsError {
    /// A weight was NaN, infinite or negative.
    #[error("weight for {factor} must be finite and non-negative, found {value}")]
    InvalidWeight {
        /// Factor whose weight was rejected.
        factor: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// The weights did not sum to one.
    #[error("weights must sum to 1.0, found {total}")]
    NotNormalised {
        /// Actual total.
        total: f64,
    },
}

/// Errors raised while fitting the pairwise TF-IDF vectorizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TfidfError {
    /// Tokenisation and stop-word removal left no terms.
    #[error("empty vocabulary; documents contain only stop words or short tokens")]
    EmptyVocabulary,
}
