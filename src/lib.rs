//! Facade crate for the alumni mentorship matching engine.
//!
//! This crate re-exports the domain records, the pair and engagement scorers
//! and, behind the default `ranker` feature, the candidate ranker.
//!
//! ```
//! use alumni_match::{MatchScorer, PairScorer, ProfileRecord};
//!
//! let seeker = ProfileRecord::new().with_skills(["python"]);
//! let candidate = ProfileRecord::new().with_skills(["python", "sql"]);
//! let result = MatchScorer::new().score(&seeker, &candidate).expect("finite score");
//! assert!(result.match_percent > 0.0);
//! ```

#![forbid(unsafe_code)]

pub use alumni_match_core::{
    ActivityLog, CapabilityError, Clock, EngagementRequest, EngagementResult, FactorBreakdown,
    MatchError, MatchExplanation, MatchRequest, MatchResult, Message, PairScorer, Post,
    ProfileError, ProfileId, ProfileRecord, RankRequest, RankedMatch, Sentiment,
    SentimentRequest, SentimentResult, SystemClock, TextClassifier, Topic, TopicExtractor,
    TopicSummary, TopicsRequest, TrainingSet, Trend, classify_or_neutral, extract_topics_or_empty,
};

pub use alumni_match_scorer::{
    EngagementScorer, EngagementWeights, MatchScorer, MatchWeights, SimilarityEngine,
    WeightsError,
};

#[cfg(feature = "ranker")]
pub use alumni_match_ranker::{
    CandidateRanker, RankStrategy, RankerConfig, Ranking, SkipReason, SkippedCandidate,
};

#[cfg(feature = "test-support")]
pub use alumni_match_core::test_support;
