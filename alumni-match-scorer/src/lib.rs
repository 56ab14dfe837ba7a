//! Scoring engines for alumni mentorship matching.
//!
//! The crate provides two independent capabilities:
//! - **Pair matching** rates a candidate for a seeker from four factors:
//!   Jaccard overlap of skills, TF-IDF cosine of the combined bio and
//!   headline, category agreement and a piecewise seniority curve. The
//!   [`MatchScorer`] implements [`PairScorer`](alumni_match_core::PairScorer)
//!   so rankers can swap it for any other pair scorer.
//! - **Engagement scoring** rates a user's participation from activity logs,
//!   messages and posts against an injected
//!   [`Clock`](alumni_match_core::Clock), producing a composite, a
//!   breakdown, advice and a week-over-week trend.
//!
//! # Examples
//!
//! ```
//! use alumni_match_core::{PairScorer, ProfileRecord};
//! use alumni_match_scorer::MatchScorer;
//!
//! let seeker = ProfileRecord::new().with_skills(["rust"]).with_category("Civil");
//! let candidate = ProfileRecord::new()
//!     .with_skills(["rust"])
//!     .with_category("Civil")
//!     .with_years_experience(3);
//! let result = MatchScorer::new().score(&seeker, &candidate).expect("finite score");
//! assert_eq!(result.match_percent, 70.0);
//! ```

#![forbid(unsafe_code)]

mod engagement;
mod error;
mod explain;
mod matcher;
mod similarity;
mod stop_words;
mod tfidf;

pub use engagement::{
    ACTIVITY_FACTOR, CONTENT_FACTOR, EngagementScorer, EngagementWeights, INTERACTION_FACTOR,
    RESPONSE_FACTOR, SignalScores, activity_frequency, activity_trend, content_contribution,
    insights, interaction_quality, response_time,
};
pub use error::{TfidfError, WeightsError};
pub use matcher::{
    CATEGORY_FACTOR, MatchScorer, MatchWeights, SENIORITY_FACTOR, SKILLS_FACTOR, TEXT_FACTOR,
    strength_label,
};
pub use similarity::{
    CATEGORY_MISMATCH_SCORE, FactorScores, SWEET_SPOT_MAX_YEARS, SWEET_SPOT_MIN_YEARS,
    SimilarityEngine, category_similarity, in_sweet_spot, same_category, seniority_score,
    skills_similarity,
};
pub use tfidf::{PairwiseTfidf, TermVector, cosine};
