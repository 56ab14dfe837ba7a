//! Transport-agnostic request shapes.
//!
//! Requests are decoded from JSON at the boundary. A request that does not
//! match its shape is rejected as a whole; rank candidates are kept as raw
//! mappings so one malformed candidate only removes that candidate.

use serde::{Deserialize, Serialize};

use crate::{ActivityLog, Message, Post, ProfileId, ProfileRecord};

const DEFAULT_RANK_LIMIT: i64 = 10;

const DEFAULT_NUM_TOPICS: usize = 5;

const fn default_rank_limit() -> i64 {
    DEFAULT_RANK_LIMIT
}

const fn default_num_topics() -> usize {
    DEFAULT_NUM_TOPICS
}

/// Score one candidate for one seeker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRequest {
    /// Profile looking for a mentor.
    #[serde(alias = "student_profile")]
    pub seeker: ProfileRecord,
    /// Profile being evaluated.
    #[serde(alias = "alumni_profile")]
    pub candidate: ProfileRecord,
}

/// Rank candidates for a seeker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankRequest {
    /// Profile looking for a mentor.
    #[serde(alias = "student_profile")]
    pub seeker: ProfileRecord,
    /// Free-form candidate mappings, decoded one by one.
    #[serde(alias = "alumni_profiles")]
    pub candidates: Vec<serde_json::Value>,
    /// Maximum number of results; values at or below zero yield nothing.
    #[serde(default = "default_rank_limit")]
    pub limit: i64,
}

impl RankRequest {
    /// The limit as a count, with negative values treated as zero.
    #[must_use]
    pub fn effective_limit(&self) -> usize {
        usize::try_from(self.limit).unwrap_or(0)
    }
}

/// Calculate engagement for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementRequest {
    /// User whose history is supplied.
    pub user_id: ProfileId,
    /// Platform activity events.
    #[serde(default)]
    pub activity_logs: Vec<ActivityLog>,
    /// Messages in the order they were exchanged.
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Authored posts.
    #[serde(default)]
    pub posts: Vec<Post>,
}

/// Classify the sentiment of a batch of texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentRequest {
    /// Texts to classify.
    pub texts: Vec<String>,
}

/// Extract topics from a document set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicsRequest {
    /// Documents to model.
    pub texts: Vec<String>,
    /// Number of topics wanted.
    #[serde(default = "default_num_topics")]
    pub num_topics: usize,
}
