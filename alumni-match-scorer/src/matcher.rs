//! Weighted match scoring with a generated explanation.
//!
//! The composite is `100 * Σ weight_i * factor_i`, rounded to two decimal
//! places. Breakdown entries are each factor scaled to a percentage and
//! rounded independently, so they need not recombine exactly to the
//! composite.

use alumni_match_core::{FactorBreakdown, MatchError, MatchResult, PairScorer, ProfileRecord, round_to};

use crate::error::WeightsError;
use crate::similarity::{FactorScores, SimilarityEngine, in_sweet_spot};

/// Breakdown key for the skills factor.
pub const SKILLS_FACTOR: &str = "skills_overlap";
/// Breakdown key for the text factor.
pub const TEXT_FACTOR: &str = "text_similarity";
/// Breakdown key for the category factor.
pub const CATEGORY_FACTOR: &str = "category_match";
/// Breakdown key for the seniority factor.
pub const SENIORITY_FACTOR: &str = "experience_relevance";

const WEIGHT_TOLERANCE: f64 = 1e-9;
const LISTED_SKILLS: usize = 3;

/// Relative weight of each match factor. The weights must sum to one.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MatchWeights {
    /// Weight of the skills factor.
    pub skills: f64,
    /// Weight of the text factor.
    pub text: f64,
    /// Weight of the category factor.
    pub category: f64,
    /// Weight of the seniority factor.
    pub seniority: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            skills: 0.35,
            text: 0.30,
            category: 0.15,
            seniority: 0.20,
        }
    }
}

impl MatchWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`WeightsError::InvalidWeight`] for a negative or non-finite
    /// weight and [`WeightsError::NotNormalised`] when the total is not one.
    pub fn validate(self) -> Result<Self, WeightsError> {
        validate_weights(&[
            (SKILLS_FACTOR, self.skills),
            (TEXT_FACTOR, self.text),
            (CATEGORY_FACTOR, self.category),
            (SENIORITY_FACTOR, self.seniority),
        ])?;
        Ok(self)
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "the composite is a weighted sum"
    )]
    fn combine(self, factors: FactorScores) -> f64 {
        (factors.skills * self.skills
            + factors.text * self.text
            + factors.category * self.category
            + factors.seniority * self.seniority)
            * 100.0
    }
}

/// Check that `weights` are finite, non-negative and sum to one.
#[expect(
    clippy::float_arithmetic,
    reason = "validation sums the weights"
)]
pub(crate) fn validate_weights(weights: &[(&'static str, f64)]) -> Result<(), WeightsError> {
    if let Some(&(factor, value)) = weights
        .iter()
        .find(|(_, value)| !value.is_finite() || *value < 0.0)
    {
        return Err(WeightsError::InvalidWeight { factor, value });
    }
    let total: f64 = weights.iter().map(|(_, value)| value).sum();
    if (total - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(WeightsError::NotNormalised { total });
    }
    Ok(())
}

/// Scores a candidate for a seeker from the four similarity factors.
///
/// # Examples
/// ```
/// use alumni_match_core::{PairScorer, ProfileRecord};
/// use alumni_match_scorer::MatchScorer;
///
/// let seeker = ProfileRecord::new()
///     .with_skills(["python", "sql"])
///     .with_category("Civil");
/// let candidate = ProfileRecord::new()
///     .with_skills(["python", "java"])
///     .with_category("Civil")
///     .with_years_experience(5);
/// let result = MatchScorer::new().score(&seeker, &candidate).expect("finite score");
/// assert_eq!(result.match_percent, 46.67);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchScorer {
    engine: SimilarityEngine,
    weights: MatchWeights,
}

impl MatchScorer {
    /// Construct a scorer with the default weights.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a scorer with custom weights.
    ///
    /// # Errors
    /// Propagates [`MatchWeights::validate`] failures.
    pub fn with_weights(weights: MatchWeights) -> Result<Self, WeightsError> {
        Ok(Self {
            engine: SimilarityEngine::new(),
            weights: weights.validate()?,
        })
    }

    /// The similarity engine backing this scorer.
    #[must_use]
    pub const fn engine(&self) -> &SimilarityEngine {
        &self.engine
    }
}

impl PairScorer for MatchScorer {
    fn score(
        &self,
        seeker: &ProfileRecord,
        candidate: &ProfileRecord,
    ) -> Result<MatchResult, MatchError> {
        let factors = self.engine.similarity(seeker, candidate);
        let percent = Self::sanitise("match_percent", self.weights.combine(factors))?;
        let breakdown = breakdown(factors)?;
        let explanation = explain(percent, seeker, candidate, factors);
        Ok(MatchResult::new(round_to(percent, 2), breakdown, explanation))
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "factors are scaled to percentages"
)]
fn breakdown(factors: FactorScores) -> Result<FactorBreakdown, MatchError> {
    let scaled = |factor: &'static str, value: f64| {
        MatchScorer::sanitise(factor, value * 100.0).map(|percent| round_to(percent, 2))
    };
    Ok(FactorBreakdown::new()
        .with_factor(SKILLS_FACTOR, scaled(SKILLS_FACTOR, factors.skills)?)
        .with_factor(TEXT_FACTOR, scaled(TEXT_FACTOR, factors.text)?)
        .with_factor(CATEGORY_FACTOR, scaled(CATEGORY_FACTOR, factors.category)?)
        .with_factor(
            SENIORITY_FACTOR,
            scaled(SENIORITY_FACTOR, factors.seniority)?,
        ))
}

/// Qualitative label for a composite percentage.
#[must_use]
pub fn strength_label(percent: f64) -> &'static str {
    if percent >= 80.0 {
        "excellent"
    } else if percent >= 60.0 {
        "good"
    } else if percent >= 40.0 {
        "moderate"
    } else {
        "basic"
    }
}

fn explain(
    percent: f64,
    seeker: &ProfileRecord,
    candidate: &ProfileRecord,
    factors: FactorScores,
) -> String {
    let mut parts = vec![format!(
        "This is a {} match ({percent:.0}%).",
        strength_label(percent)
    )];

    let shared: Vec<&str> = seeker
        .skills
        .intersection(&candidate.skills)
        .map(String::as_str)
        .collect();
    if !shared.is_empty() {
        let listed = shared
            .iter()
            .take(LISTED_SKILLS)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        let extra = shared.len().saturating_sub(LISTED_SKILLS);
        if extra > 0 {
            parts.push(format!("Common skills: {listed} (+{extra} more)."));
        } else {
            parts.push(format!("Common skills: {listed}."));
        }
    }

    if factors.category >= 1.0 {
        parts.push("Same branch/department.".to_owned());
    }

    let years = candidate.years_experience;
    if in_sweet_spot(years) {
        parts.push(format!(
            "Alumni has {years} years of relevant industry experience."
        ));
    }

    parts.join(" ")
}
