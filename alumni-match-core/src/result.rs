//! Results produced by the matching, ranking and engagement engines.

use std::fmt;

use serde::Serialize;

use crate::{FactorBreakdown, ProfileId, ProfileRecord};

/// Outcome of scoring one candidate for one seeker.
///
/// `match_percent` is a convex combination of the breakdown entries under
/// the scorer's weights, except for distance-ranked results where it is
/// derived from `knn_distance` and the breakdown is kept for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// Composite score in `0.0..=100.0`.
    pub match_percent: f64,
    /// Per-factor percentages.
    pub breakdown: FactorBreakdown,
    /// Human-readable summary of the match.
    pub explanation: String,
    /// Euclidean distance in standardised feature space, when distance
    /// ranking produced the result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knn_distance: Option<f64>,
}

impl MatchResult {
    /// Construct a result without a distance annotation.
    #[must_use]
    pub const fn new(match_percent: f64, breakdown: FactorBreakdown, explanation: String) -> Self {
        Self {
            match_percent,
            breakdown,
            explanation,
            knn_distance: None,
        }
    }
}

/// A ranked match with the candidate's identity and display metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMatch {
    /// Candidate identity, when supplied.
    pub candidate_id: Option<ProfileId>,
    /// Candidate display name.
    pub candidate_name: String,
    /// Candidate headline.
    pub candidate_headline: String,
    /// Candidate employer.
    pub candidate_company: String,
    /// The score itself.
    #[serde(flatten)]
    pub result: MatchResult,
}

impl RankedMatch {
    /// Attach `candidate`'s identity to a score.
    #[must_use]
    pub fn for_candidate(candidate: &ProfileRecord, result: MatchResult) -> Self {
        Self {
            candidate_id: candidate.id.clone(),
            candidate_name: candidate.display_name().to_owned(),
            candidate_headline: candidate.headline.clone(),
            candidate_company: candidate.company.clone().unwrap_or_default(),
            result,
        }
    }

    /// Shortcut for the composite score.
    #[must_use]
    pub const fn match_percent(&self) -> f64 {
        self.result.match_percent
    }
}

/// Detailed explanation of a single match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchExplanation {
    /// Composite score in `0.0..=100.0`.
    pub match_score: f64,
    /// Per-factor percentages.
    pub breakdown: FactorBreakdown,
    /// Skills both profiles share, sorted.
    pub common_skills: Vec<String>,
    /// Up to five candidate skills the seeker lacks, sorted.
    pub skills_you_can_learn: Vec<String>,
    /// Whether both profiles share a category.
    pub same_category: bool,
    /// The candidate's years of experience.
    pub candidate_experience_years: u32,
    /// The match scorer's explanation sentence.
    pub recommendation_reason: String,
    /// Reasons the match is worthwhile, strongest factors first.
    pub match_reasons: Vec<String>,
}

/// Direction of recent activity compared with the week before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Activity grew by more than 20%.
    Increasing,
    /// Activity fell by more than 20%.
    Decreasing,
    /// Activity changed by at most 20%, or there was too little data.
    Stable,
}

impl Trend {
    /// Return the trend as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engagement score with its breakdown, advice and trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementResult {
    /// Composite score in `0.0..=100.0`.
    #[serde(rename = "engagement_score")]
    pub score: f64,
    /// The four sub-scores.
    pub breakdown: FactorBreakdown,
    /// Advisory sentences in rule-firing order.
    pub insights: Vec<String>,
    /// Activity direction.
    pub trend: Trend,
}
