//! Property-based tests for the candidate ranker.
//!
//! # Invariants tested
//!
//! - **Size:** rankings never exceed the requested limit.
//! - **Order:** match percents are non-increasing for both strategies.
//! - **Determinism:** ranking identical input twice yields identical order.
//! - **Monotonic distance score:** a larger neighbour distance never earns a
//!   higher score.

use alumni_match_core::{ProfileId, ProfileRecord};
use alumni_match_ranker::{CandidateRanker, RankStrategy, Ranking};
use proptest::prelude::*;

const SKILLS: &[&str] = &["python", "sql", "java", "rust", "go", "aws"];
const CATEGORIES: &[&str] = &["", "Civil", "Mechanical", "Electronics", "Biotechnology"];

fn profile_strategy() -> impl Strategy<Value = ProfileRecord> {
    (
        prop::collection::btree_set(prop::sample::select(SKILLS), 0..4),
        "[a-z ]{0,30}",
        prop::sample::select(CATEGORIES),
        0_u32..20,
        any::<bool>(),
    )
        .prop_map(|(skills, bio, category, years, linked)| {
            ProfileRecord::new()
                .with_skills(skills)
                .with_bio(bio)
                .with_category(category)
                .with_years_experience(years)
                .with_links(linked.then_some("https://linkedin.example"), None, None)
        })
}

fn pool_strategy() -> impl Strategy<Value = Vec<ProfileRecord>> {
    prop::collection::vec(profile_strategy(), 0..25).prop_map(|profiles| {
        profiles
            .into_iter()
            .zip(0_i64..)
            .map(|(profile, id)| profile.with_id(id))
            .collect()
    })
}

fn strategy_strategy() -> impl Strategy<Value = RankStrategy> {
    prop_oneof![Just(RankStrategy::Direct), Just(RankStrategy::Distance)]
}

fn ids(ranking: &Ranking) -> Vec<Option<ProfileId>> {
    ranking
        .matches
        .iter()
        .map(|entry| entry.candidate_id.clone())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: rankings respect the limit and are sorted by match percent.
    #[test]
    fn rankings_are_bounded_and_sorted(
        seeker in profile_strategy(),
        pool in pool_strategy(),
        limit in 0_usize..12,
        strategy in strategy_strategy(),
    ) {
        let ranking = CandidateRanker::new().rank_with(strategy, &seeker, &pool, limit);
        prop_assert!(ranking.matches.len() <= limit);
        prop_assert!(ranking.matches.len() <= pool.len());
        let percents: Vec<f64> = ranking.matches.iter().map(|entry| entry.match_percent()).collect();
        for pair in percents.windows(2) {
            if let [earlier, later] = pair {
                prop_assert!(earlier >= later);
            }
        }
        for percent in percents {
            prop_assert!((0.0..=100.0).contains(&percent));
        }
    }

    /// Property: ranking identical input twice yields the same order.
    #[test]
    fn rankings_are_deterministic(
        seeker in profile_strategy(),
        pool in pool_strategy(),
        limit in 1_usize..12,
        strategy in strategy_strategy(),
    ) {
        let ranker = CandidateRanker::new();
        let first = ranker.rank_with(strategy, &seeker, &pool, limit);
        let second = ranker.rank_with(strategy, &seeker, &pool, limit);
        prop_assert_eq!(ids(&first), ids(&second));
        prop_assert_eq!(first.strategy, second.strategy);
    }

    /// Property: distance scores fall as neighbour distance grows.
    #[test]
    fn distance_scores_are_monotonic(
        seeker in profile_strategy(),
        pool in pool_strategy(),
        limit in 1_usize..8,
    ) {
        let ranking = CandidateRanker::new().rank_with(RankStrategy::Distance, &seeker, &pool, limit);
        if ranking.strategy == RankStrategy::Distance {
            let pairs: Vec<(f64, f64)> = ranking
                .matches
                .iter()
                .filter_map(|entry| entry.result.knn_distance.map(|d| (d, entry.match_percent())))
                .collect();
            prop_assert_eq!(pairs.len(), ranking.matches.len());
            for window in pairs.windows(2) {
                if let [(near, near_score), (far, far_score)] = window {
                    prop_assert!(near <= far);
                    prop_assert!(near_score >= far_score);
                }
            }
        }
    }
}
