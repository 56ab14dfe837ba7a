//! `CandidateRanker` implementation with direct and distance strategies.
//!
//! The direct strategy scores every candidate with a [`PairScorer`] and
//! keeps the best. The distance strategy orders candidates by Euclidean
//! distance in a standardised feature space and falls back to the direct
//! strategy whenever there is too little signal to rank by distance.

use std::fmt;
use std::str::FromStr;

use alumni_match_core::{
    MatchError, MatchResult, PairScorer, ProfileError, ProfileId, ProfileRecord, RankRequest,
    RankedMatch, round_to,
};
use alumni_match_scorer::MatchScorer;
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::features::{FeatureVector, FeatureVectorizer};
use crate::knn::{Standardiser, nearest};

const DISTANCE_PENALTY: f64 = 20.0;

/// How candidates are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankStrategy {
    /// Score every candidate and sort by match percent.
    #[default]
    Direct,
    /// Rank by distance in standardised feature space.
    Distance,
}

impl RankStrategy {
    /// Lower-case name of the strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Distance => "distance",
        }
    }
}

impl fmt::Display for RankStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a strategy name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ranking strategy {value:?}; expected `direct` or `distance`")]
pub struct ParseStrategyError {
    /// The rejected input.
    pub value: String,
}

impl FromStr for RankStrategy {
    type Err = ParseStrategyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "distance" | "knn" => Ok(Self::Distance),
            _ => Err(ParseStrategyError {
                value: value.to_owned(),
            }),
        }
    }
}

/// Configuration for [`CandidateRanker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RankerConfig {
    /// Strategy used by [`CandidateRanker::rank`].
    pub strategy: RankStrategy,
}

/// Why a candidate was left out of a ranking.
#[derive(Debug, Error)]
pub enum SkipReason {
    /// The candidate mapping could not be decoded.
    #[error("candidate profile is invalid: {0}")]
    InvalidProfile(#[source] ProfileError),
    /// The pair scorer rejected the candidate.
    #[error("candidate could not be scored: {0}")]
    Scoring(#[source] MatchError),
}

/// A candidate omitted from a ranking, with its input position.
#[derive(Debug)]
pub struct SkippedCandidate {
    /// Position of the candidate in the caller's list.
    pub index: usize,
    /// Identity of the candidate, when it could be read.
    pub candidate_id: Option<ProfileId>,
    /// Why the candidate was omitted.
    pub reason: SkipReason,
}

impl Serialize for SkippedCandidate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SkippedCandidate", 3)?;
        state.serialize_field("index", &self.index)?;
        state.serialize_field("candidate_id", &self.candidate_id)?;
        state.serialize_field("reason", &self.reason.to_string())?;
        state.end()
    }
}

/// Ranked matches plus the candidates that were omitted.
#[derive(Debug, Default, Serialize)]
pub struct Ranking {
    /// Matches ordered by non-increasing match percent.
    pub matches: Vec<RankedMatch>,
    /// Candidates omitted because they could not be decoded or scored,
    /// ordered by input position.
    pub skipped: Vec<SkippedCandidate>,
    /// Strategy that produced `matches`, after any fallback.
    pub strategy: RankStrategy,
}

impl Ranking {
    fn empty(strategy: RankStrategy, skipped: Vec<SkippedCandidate>) -> Self {
        Self {
            matches: Vec::new(),
            skipped,
            strategy,
        }
    }
}

/// A candidate paired with its position in the caller's list.
type Entry<'a> = (usize, &'a ProfileRecord);

/// Produces size-limited, ordered candidate lists for a seeker.
///
/// The ranker is generic over the pair scorer so alternative scoring models
/// can be plugged in.
///
/// # Examples
/// ```
/// use alumni_match_core::{ProfileId, ProfileRecord};
/// use alumni_match_ranker::CandidateRanker;
///
/// let seeker = ProfileRecord::new().with_skills(["rust"]).with_category("Civil");
/// let candidates = vec![
///     ProfileRecord::new().with_id(1_i64).with_skills(["go"]),
///     ProfileRecord::new().with_id(2_i64).with_skills(["rust"]).with_category("Civil"),
/// ];
/// let ranking = CandidateRanker::new().rank(&seeker, &candidates, 1);
/// assert_eq!(ranking.matches.len(), 1);
/// assert_eq!(
///     ranking.matches.first().and_then(|m| m.candidate_id.clone()),
///     Some(ProfileId::Number(2))
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CandidateRanker<S: PairScorer = MatchScorer> {
    scorer: S,
    vectorizer: FeatureVectorizer,
    config: RankerConfig,
}

impl CandidateRanker<MatchScorer> {
    /// Construct a ranker using the default match scorer and configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_scorer(MatchScorer::new())
    }
}

impl Default for CandidateRanker<MatchScorer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PairScorer> CandidateRanker<S> {
    /// Construct a ranker around `scorer` with the default configuration.
    #[must_use]
    pub fn with_scorer(scorer: S) -> Self {
        Self::with_config(scorer, RankerConfig::default())
    }

    /// Construct a ranker with explicit configuration.
    #[must_use]
    pub const fn with_config(scorer: S, config: RankerConfig) -> Self {
        Self {
            scorer,
            vectorizer: FeatureVectorizer,
            config,
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Rank `candidates` using the configured strategy.
    #[must_use]
    pub fn rank(
        &self,
        seeker: &ProfileRecord,
        candidates: &[ProfileRecord],
        limit: usize,
    ) -> Ranking {
        self.rank_with(self.config.strategy, seeker, candidates, limit)
    }

    /// Rank `candidates` using an explicit strategy.
    #[must_use]
    pub fn rank_with(
        &self,
        strategy: RankStrategy,
        seeker: &ProfileRecord,
        candidates: &[ProfileRecord],
        limit: usize,
    ) -> Ranking {
        let entries: Vec<Entry<'_>> = candidates.iter().enumerate().collect();
        self.rank_entries(strategy, seeker, &entries, limit, Vec::new())
    }

    /// Decode free-form candidate mappings and rank those that decode.
    ///
    /// Undecodable candidates are reported as
    /// [`SkipReason::InvalidProfile`] without affecting the others.
    #[must_use]
    pub fn rank_values(
        &self,
        strategy: RankStrategy,
        seeker: &ProfileRecord,
        candidates: &[serde_json::Value],
        limit: usize,
    ) -> Ranking {
        let mut skipped = Vec::new();
        let mut decoded = Vec::with_capacity(candidates.len());
        for (index, value) in candidates.iter().enumerate() {
            match ProfileRecord::from_value(value.clone()) {
                Ok(profile) => decoded.push((index, profile)),
                Err(err) => {
                    log::warn!("skipping candidate {index}: {err}");
                    skipped.push(SkippedCandidate {
                        index,
                        candidate_id: raw_id(value),
                        reason: SkipReason::InvalidProfile(err),
                    });
                }
            }
        }
        let entries: Vec<Entry<'_>> = decoded
            .iter()
            .map(|(index, profile)| (*index, profile))
            .collect();
        self.rank_entries(strategy, seeker, &entries, limit, skipped)
    }

    /// Rank a decoded request with the configured strategy.
    #[must_use]
    pub fn rank_request(&self, request: &RankRequest) -> Ranking {
        self.rank_values(
            self.config.strategy,
            &request.seeker,
            &request.candidates,
            request.effective_limit(),
        )
    }

    fn rank_entries(
        &self,
        strategy: RankStrategy,
        seeker: &ProfileRecord,
        entries: &[Entry<'_>],
        limit: usize,
        mut skipped: Vec<SkippedCandidate>,
    ) -> Ranking {
        if limit == 0 || entries.is_empty() {
            return Ranking::empty(strategy, skipped);
        }
        let (matches, used) = match strategy {
            RankStrategy::Direct => (
                self.rank_direct(seeker, entries, limit, &mut skipped),
                RankStrategy::Direct,
            ),
            RankStrategy::Distance => {
                if let Some(matches) = self.rank_distance(seeker, entries, limit, &mut skipped) {
                    (matches, RankStrategy::Distance)
                } else {
                    log::debug!("distance ranking lacks signal; falling back to direct");
                    (
                        self.rank_direct(seeker, entries, limit, &mut skipped),
                        RankStrategy::Direct,
                    )
                }
            }
        };
        skipped.sort_by_key(|skip| skip.index);
        log::debug!(
            "ranked {} of {} candidates with the {used} strategy ({} skipped)",
            matches.len(),
            entries.len(),
            skipped.len()
        );
        Ranking {
            matches,
            skipped,
            strategy: used,
        }
    }

    fn rank_direct(
        &self,
        seeker: &ProfileRecord,
        entries: &[Entry<'_>],
        limit: usize,
        skipped: &mut Vec<SkippedCandidate>,
    ) -> Vec<RankedMatch> {
        let mut matches: Vec<RankedMatch> = entries
            .iter()
            .filter_map(|&(index, candidate)| {
                self.score_or_skip(seeker, index, candidate, skipped)
                    .map(|result| RankedMatch::for_candidate(candidate, result))
            })
            .collect();
        matches.sort_by(|left, right| right.match_percent().total_cmp(&left.match_percent()));
        matches.truncate(limit);
        matches
    }

    /// Returns `None` when the distance preconditions do not hold.
    #[expect(
        clippy::float_arithmetic,
        reason = "distance is converted to a percentage"
    )]
    fn rank_distance(
        &self,
        seeker: &ProfileRecord,
        entries: &[Entry<'_>],
        limit: usize,
        skipped: &mut Vec<SkippedCandidate>,
    ) -> Option<Vec<RankedMatch>> {
        if entries.len() < limit {
            return None;
        }
        let (usable, vectors): (Vec<Entry<'_>>, Vec<FeatureVector>) = entries
            .iter()
            .filter_map(|&entry| self.vectorizer.extract(entry.1).map(|vector| (entry, vector)))
            .unzip();
        if usable.len() < limit {
            return None;
        }
        let query = self.vectorizer.extract(seeker)?;

        let standardiser = Standardiser::fit(&vectors);
        let points: Vec<_> = vectors.iter().map(|v| standardiser.transform(v)).collect();
        let neighbours = nearest(&standardiser.transform(&query), &points, limit);

        let mut matches = Vec::with_capacity(neighbours.len());
        for neighbour in neighbours {
            let Some(&(index, candidate)) = usable.get(neighbour.position) else {
                continue;
            };
            let Some(mut result) = self.score_or_skip(seeker, index, candidate, skipped) else {
                continue;
            };
            let similarity = (100.0 - DISTANCE_PENALTY * neighbour.distance).max(0.0);
            result.explanation =
                format!("k-NN similarity: {similarity:.0}%. {}", result.explanation);
            result.match_percent = round_to(similarity, 2);
            result.knn_distance = Some(round_to(neighbour.distance, 4));
            matches.push(RankedMatch::for_candidate(candidate, result));
        }
        Some(matches)
    }

    fn score_or_skip(
        &self,
        seeker: &ProfileRecord,
        index: usize,
        candidate: &ProfileRecord,
        skipped: &mut Vec<SkippedCandidate>,
    ) -> Option<MatchResult> {
        match self.scorer.score(seeker, candidate) {
            Ok(result) => Some(result),
            Err(err) => {
                log::warn!("skipping candidate {index}: {err}");
                skipped.push(SkippedCandidate {
                    index,
                    candidate_id: candidate.id.clone(),
                    reason: SkipReason::Scoring(err),
                });
                None
            }
        }
    }
}

fn raw_id(value: &serde_json::Value) -> Option<ProfileId> {
    value
        .get("id")
        .and_then(|id| serde_json::from_value(id.clone()).ok())
}

#[cfg(test)]
mod tests;
