//! Score a candidate profile against a seeker profile.
//!
//! The `PairScorer` trait is the seam between the match scorer and the
//! candidate ranker: the ranker is generic over it so alternative scorers can
//! be plugged in and per-candidate failures stay typed.

use thiserror::Error;

use crate::{MatchResult, ProfileRecord};

/// Failure to score a single seeker/candidate pair.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    /// A factor or the composite evaluated to NaN or infinity.
    #[error("{factor} score is not finite")]
    NonFiniteScore {
        /// Name of the offending factor, or `match_percent`.
        factor: &'static str,
    },
}

/// Calculate a compatibility result for a candidate.
///
/// Implementations must be thread-safe (`Send` + `Sync`) so ranking batches
/// can run across threads. Sparse or empty profiles are valid input and must
/// produce a defined, low score rather than an error; errors are reserved for
/// results that cannot be represented, such as non-finite scores.
///
/// Implementations must:
/// - Produce `match_percent` within `0.0..=100.0`.
/// - Produce breakdown entries within `0.0..=100.0`.
///
/// Use [`PairScorer::sanitise`] to apply the range guard.
///
/// # Examples
///
/// ```rust
/// use alumni_match_core::{FactorBreakdown, MatchError, MatchResult, PairScorer, ProfileRecord};
///
/// struct FlatScorer;
///
/// impl PairScorer for FlatScorer {
///     fn score(
///         &self,
///         _seeker: &ProfileRecord,
///         _candidate: &ProfileRecord,
///     ) -> Result<MatchResult, MatchError> {
///         Ok(MatchResult::new(50.0, FactorBreakdown::new(), String::new()))
///     }
/// }
///
/// let result = FlatScorer
///     .score(&ProfileRecord::new(), &ProfileRecord::new())
///     .expect("flat score");
/// assert_eq!(result.match_percent, 50.0);
/// ```
pub trait PairScorer: Send + Sync {
    /// Score `candidate` for `seeker`.
    ///
    /// # Errors
    /// Returns [`MatchError`] when the pair cannot be given a finite score.
    fn score(
        &self,
        seeker: &ProfileRecord,
        candidate: &ProfileRecord,
    ) -> Result<MatchResult, MatchError>;

    /// Clamp a percentage into `0.0..=100.0`.
    ///
    /// # Errors
    /// Returns [`MatchError::NonFiniteScore`] naming `factor` when the value
    /// is NaN or infinite.
    fn sanitise(factor: &'static str, percent: f64) -> Result<f64, MatchError>
    where
        Self: Sized,
    {
        if !percent.is_finite() {
            return Err(MatchError::NonFiniteScore { factor });
        }
        Ok(percent.clamp(0.0, 100.0))
    }
}

/// Round `value` to `places` decimal places, ties to even on the exact
/// binary value.
///
/// # Examples
/// ```
/// use alumni_match_core::round_to;
///
/// assert_eq!(round_to(46.666_666, 2), 46.67);
/// assert_eq!(round_to(0.123_456_78, 4), 0.1235);
/// assert_eq!(round_to(13.125, 2), 13.12);
/// ```
#[must_use]
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}
