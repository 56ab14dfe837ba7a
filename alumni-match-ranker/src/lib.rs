//! Candidate ranking for alumni mentorship matching.
//!
//! This crate provides [`CandidateRanker`], which turns a seeker profile and
//! a list of candidate profiles into a size-limited, ordered list of
//! [`RankedMatch`](alumni_match_core::RankedMatch) entries. Two strategies
//! are available:
//!
//! - [`RankStrategy::Direct`] scores every candidate with a
//!   [`PairScorer`](alumni_match_core::PairScorer) and sorts by match
//!   percent, keeping input order for ties.
//! - [`RankStrategy::Distance`] extracts [`FeatureVector`]s, standardises
//!   them over the candidate set and returns the Euclidean nearest
//!   neighbours. It falls back to the direct strategy when there are fewer
//!   candidates or usable vectors than the limit, or when the seeker has no
//!   usable vector.
//!
//! Candidates that cannot be decoded or scored never abort a batch; they are
//! reported in [`Ranking::skipped`].

#![forbid(unsafe_code)]

mod features;
mod knn;
mod ranker;

pub use features::{FEATURE_COUNT, FeatureVector, FeatureVectorizer, category_code};
pub use knn::{Neighbour, Standardiser, euclidean, nearest};
pub use ranker::{
    CandidateRanker, ParseStrategyError, RankStrategy, RankerConfig, Ranking, SkipReason,
    SkippedCandidate,
};
