//! Engagement scoring from a user's activity, messages and posts.
//!
//! Four sub-scores are combined with fixed weights into a composite in
//! `0.0..=100.0`. Time windows are measured against an injected [`Clock`],
//! and records with missing or unparsable timestamps are treated as
//! happening at that instant.

mod insights;
mod signals;
mod trend;

use alumni_match_core::{
    ActivityLog, Clock, EngagementRequest, EngagementResult, FactorBreakdown, Message, Post,
    ProfileId, SystemClock, round_to,
};

use crate::error::WeightsError;
use crate::matcher::validate_weights;

pub use insights::insights;
pub use signals::{
    SignalScores, activity_frequency, content_contribution, interaction_quality, response_time,
};
pub use trend::activity_trend;

/// Breakdown key for activity frequency.
pub const ACTIVITY_FACTOR: &str = "activity_frequency";
/// Breakdown key for interaction quality.
pub const INTERACTION_FACTOR: &str = "interaction_quality";
/// Breakdown key for response time.
pub const RESPONSE_FACTOR: &str = "response_time";
/// Breakdown key for content contribution.
pub const CONTENT_FACTOR: &str = "content_contribution";

/// Relative weight of each engagement signal. The weights must sum to one.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EngagementWeights {
    /// Weight of activity frequency.
    pub activity: f64,
    /// Weight of interaction quality.
    pub interaction: f64,
    /// Weight of response time.
    pub response: f64,
    /// Weight of content contribution.
    pub content: f64,
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self {
            activity: 0.30,
            interaction: 0.25,
            response: 0.20,
            content: 0.25,
        }
    }
}

impl EngagementWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`WeightsError`] for negative, non-finite or unnormalised
    /// weights.
    pub fn validate(self) -> Result<Self, WeightsError> {
        validate_weights(&[
            (ACTIVITY_FACTOR, self.activity),
            (INTERACTION_FACTOR, self.interaction),
            (RESPONSE_FACTOR, self.response),
            (CONTENT_FACTOR, self.content),
        ])?;
        Ok(self)
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "the composite is a weighted sum"
    )]
    fn combine(self, signals: SignalScores) -> f64 {
        signals.activity * self.activity
            + signals.interaction * self.interaction
            + signals.response * self.response
            + signals.content * self.content
    }
}

/// Scores user engagement against a clock.
///
/// # Examples
/// ```
/// use alumni_match_core::ProfileId;
/// use alumni_match_scorer::EngagementScorer;
///
/// let result = EngagementScorer::new().calculate(&ProfileId::from(7_i64), &[], &[], &[]);
/// assert_eq!(result.score, 10.0);
/// assert_eq!(result.trend.as_str(), "stable");
/// ```
#[derive(Debug, Clone)]
pub struct EngagementScorer<C: Clock = SystemClock> {
    clock: C,
    weights: EngagementWeights,
}

impl EngagementScorer<SystemClock> {
    /// Construct a scorer reading the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for EngagementScorer<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> EngagementScorer<C> {
    /// Construct a scorer reading `clock` with the default weights.
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            weights: EngagementWeights::default(),
        }
    }

    /// Replace the weights while returning `self` for chaining.
    ///
    /// # Errors
    /// Propagates [`EngagementWeights::validate`] failures.
    pub fn with_weights(mut self, weights: EngagementWeights) -> Result<Self, WeightsError> {
        self.weights = weights.validate()?;
        Ok(self)
    }

    /// Score the user's engagement.
    ///
    /// The composite and each breakdown entry are rounded to two decimal
    /// places; insights are derived from the unrounded values.
    #[must_use]
    pub fn calculate(
        &self,
        user_id: &ProfileId,
        activity_logs: &[ActivityLog],
        messages: &[Message],
        posts: &[Post],
    ) -> EngagementResult {
        let now = self.clock.now();
        let signals = SignalScores::measure(activity_logs, messages, posts, now);
        let overall = self.weights.combine(signals);
        let result = EngagementResult {
            score: round_to(overall, 2),
            breakdown: FactorBreakdown::new()
                .with_factor(ACTIVITY_FACTOR, round_to(signals.activity, 2))
                .with_factor(INTERACTION_FACTOR, round_to(signals.interaction, 2))
                .with_factor(RESPONSE_FACTOR, round_to(signals.response, 2))
                .with_factor(CONTENT_FACTOR, round_to(signals.content, 2)),
            insights: insights(overall, signals),
            trend: activity_trend(activity_logs, now),
        };
        log::debug!(
            "engagement for user {user_id}: {} ({})",
            result.score,
            result.trend
        );
        result
    }

    /// Score a decoded engagement request.
    #[must_use]
    pub fn score_request(&self, request: &EngagementRequest) -> EngagementResult {
        self.calculate(
            &request.user_id,
            &request.activity_logs,
            &request.messages,
            &request.posts,
        )
    }
}
