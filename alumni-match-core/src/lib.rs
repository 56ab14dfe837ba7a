//! Core domain types for the alumni matching engine.
//!
//! The crate holds the records the scoring engines consume (profiles and
//! time-stamped activity), the results they produce, and the seams through
//! which external capabilities are injected:
//!
//! - [`ProfileRecord`] is decoded once at the boundary from a free-form JSON
//!   mapping; absent optional fields take documented defaults.
//! - [`ActivityLog`], [`Message`] and [`Post`] carry raw timestamps that are
//!   resolved against a [`Clock`] when the engagement engine needs them.
//! - [`PairScorer`] is the contract shared by the match scorer and the
//!   candidate ranker.
//! - [`TextClassifier`] and [`TopicExtractor`] describe opaque services the
//!   engine never reimplements; their absence degrades to neutral defaults.

#![forbid(unsafe_code)]

pub mod activity;
pub mod breakdown;
pub mod capability;
pub mod profile;
pub mod request;
pub mod result;
pub mod scorer;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod time;

pub use activity::{ActivityLog, Message, Post, Timestamped};
pub use breakdown::FactorBreakdown;
pub use capability::{
    CapabilityError, Sentiment, SentimentResult, TextClassifier, Topic, TopicExtractor,
    TopicSummary, TrainingSet, classify_or_neutral, extract_topics_or_empty,
};
pub use profile::{ProfileError, ProfileId, ProfileRecord};
pub use request::{
    EngagementRequest, MatchRequest, RankRequest, SentimentRequest, TopicsRequest,
};
pub use result::{EngagementResult, MatchExplanation, MatchResult, RankedMatch, Trend};
pub use scorer::{MatchError, PairScorer, round_to};
pub use time::{Clock, SystemClock, parse_timestamp};
