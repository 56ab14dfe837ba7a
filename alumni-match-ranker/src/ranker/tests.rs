//! Tests for the `CandidateRanker`.

use super::*;
use alumni_match_core::FactorBreakdown;
use alumni_match_core::test_support::{alumnus, student};
use rstest::{fixture, rstest};
use serde_json::json;

/// Scores by candidate id, failing for negative ids.
struct IdScorer;

impl PairScorer for IdScorer {
    fn score(
        &self,
        _seeker: &ProfileRecord,
        candidate: &ProfileRecord,
    ) -> Result<MatchResult, MatchError> {
        let value = match &candidate.id {
            Some(ProfileId::Number(id)) if *id < 0 => f64::NAN,
            _ => f64::from(candidate.years_experience),
        };
        let percent = Self::sanitise("match_percent", value)?;
        Ok(MatchResult::new(
            percent,
            FactorBreakdown::new(),
            String::from("fixed"),
        ))
    }
}

#[fixture]
fn seeker() -> ProfileRecord {
    student(&["python", "sql"], "Civil").with_bio("Aspiring data engineer")
}

fn ids(ranking: &Ranking) -> Vec<Option<ProfileId>> {
    ranking
        .matches
        .iter()
        .map(|entry| entry.candidate_id.clone())
        .collect()
}

fn numbered(values: &[i64]) -> Vec<Option<ProfileId>> {
    values.iter().map(|id| Some(ProfileId::Number(*id))).collect()
}

#[rstest]
fn direct_ranking_sorts_descending(seeker: ProfileRecord) {
    let candidates = vec![
        alumnus(1, &["go"], "Mechanical", 20),
        alumnus(2, &["python", "sql"], "Civil", 4),
        alumnus(3, &["python"], "Civil", 1),
    ];
    let ranking = CandidateRanker::new().rank(&seeker, &candidates, 10);
    assert_eq!(ids(&ranking), numbered(&[2, 3, 1]));
    assert_eq!(ranking.strategy, RankStrategy::Direct);
    assert!(ranking.skipped.is_empty());
}

#[rstest]
fn ties_keep_input_order(seeker: ProfileRecord) {
    let candidates = vec![
        alumnus(7, &["go"], "Civil", 3),
        alumnus(5, &["go"], "Civil", 3),
        alumnus(6, &["go"], "Civil", 3),
    ];
    let ranker = CandidateRanker::new();
    let first = ranker.rank(&seeker, &candidates, 3);
    let second = ranker.rank(&seeker, &candidates, 3);
    assert_eq!(ids(&first), numbered(&[7, 5, 6]));
    assert_eq!(ids(&first), ids(&second));
}

#[rstest]
#[case(0, 0)]
#[case(1, 1)]
#[case(2, 2)]
#[case(50, 3)]
fn output_is_truncated_to_limit(seeker: ProfileRecord, #[case] limit: usize, #[case] len: usize) {
    let candidates = vec![
        alumnus(1, &["go"], "Civil", 3),
        alumnus(2, &["python"], "Civil", 3),
        alumnus(3, &["sql"], "Civil", 3),
    ];
    let ranking = CandidateRanker::new().rank(&seeker, &candidates, limit);
    assert_eq!(ranking.matches.len(), len);
}

#[rstest]
fn empty_candidate_list_yields_nothing(seeker: ProfileRecord) {
    let ranking = CandidateRanker::new().rank_with(RankStrategy::Distance, &seeker, &[], 5);
    assert!(ranking.matches.is_empty());
    assert!(ranking.skipped.is_empty());
}

#[rstest]
fn metadata_is_attached(seeker: ProfileRecord) {
    let candidate = alumnus(4, &["python"], "Civil", 3).with_headline("Data engineer");
    let ranking = CandidateRanker::new().rank(&seeker, &[candidate], 1);
    let first = ranking.matches.first().expect("one match");
    assert_eq!(first.candidate_name, "Alumnus 4");
    assert_eq!(first.candidate_headline, "Data engineer");
    assert_eq!(first.candidate_company, "");
}

#[rstest]
fn scoring_failures_are_isolated(seeker: ProfileRecord) {
    let candidates = vec![
        alumnus(1, &[], "", 30),
        alumnus(-2, &[], "", 90),
        alumnus(3, &[], "", 60),
    ];
    let ranking = CandidateRanker::with_scorer(IdScorer).rank(&seeker, &candidates, 5);
    assert_eq!(ids(&ranking), numbered(&[3, 1]));
    let [skip] = ranking.skipped.as_slice() else {
        panic!("expected one skipped candidate");
    };
    assert_eq!(skip.index, 1);
    assert_eq!(skip.candidate_id, Some(ProfileId::Number(-2)));
    assert!(matches!(skip.reason, SkipReason::Scoring(_)));
}

#[rstest]
fn undecodable_candidates_are_skipped(seeker: ProfileRecord) {
    let candidates = vec![
        json!({ "id": 1, "skills": ["python"], "category": "Civil" }),
        json!({ "id": 2, "years_experience": -4 }),
        json!("not a profile"),
        json!({ "id": "alum-4", "skills": ["sql"], "branch": "Civil" }),
    ];
    let ranking =
        CandidateRanker::new().rank_values(RankStrategy::Direct, &seeker, &candidates, 10);
    assert_eq!(ranking.matches.len(), 2);
    let skipped: Vec<(usize, Option<ProfileId>)> = ranking
        .skipped
        .iter()
        .map(|skip| (skip.index, skip.candidate_id.clone()))
        .collect();
    assert_eq!(skipped, vec![(1, Some(ProfileId::Number(2))), (2, None)]);
    assert!(
        ranking
            .skipped
            .iter()
            .all(|skip| matches!(skip.reason, SkipReason::InvalidProfile(_)))
    );
}

#[rstest]
fn request_limit_is_honoured(seeker: ProfileRecord) {
    let request = RankRequest {
        seeker,
        candidates: vec![json!({ "id": 1 }), json!({ "id": 2 })],
        limit: -3,
    };
    assert!(CandidateRanker::new().rank_request(&request).matches.is_empty());
}

#[rstest]
fn request_without_limit_keeps_ten(seeker: ProfileRecord) {
    let candidates: Vec<_> = (1..=12).map(|id| json!({ "id": id })).collect();
    let request: RankRequest = serde_json::from_value(json!({
        "student_profile": seeker,
        "alumni_profiles": candidates,
    }))
    .expect("request decodes");
    let ranking = CandidateRanker::new().rank_request(&request);
    assert_eq!(ranking.matches.len(), 10);
    assert_eq!(CandidateRanker::new().config().strategy, RankStrategy::Direct);
}

#[rstest]
fn distance_falls_back_when_too_few_candidates(seeker: ProfileRecord) {
    let candidates = vec![alumnus(1, &["go"], "Civil", 3)];
    let ranking = CandidateRanker::new().rank_with(RankStrategy::Distance, &seeker, &candidates, 2);
    assert_eq!(ranking.strategy, RankStrategy::Direct);
    assert_eq!(ranking.matches.len(), 1);
    assert!(ranking.matches.iter().all(|m| m.result.knn_distance.is_none()));
}

#[rstest]
fn distance_falls_back_when_vectors_are_blank(seeker: ProfileRecord) {
    let candidates = vec![
        ProfileRecord::new().with_id(1_i64),
        ProfileRecord::new().with_id(2_i64),
        alumnus(3, &["go"], "Civil", 3),
    ];
    let ranking = CandidateRanker::new().rank_with(RankStrategy::Distance, &seeker, &candidates, 2);
    assert_eq!(ranking.strategy, RankStrategy::Direct);
}

#[rstest]
fn distance_falls_back_for_a_blank_seeker() {
    let candidates = vec![
        alumnus(1, &["go"], "Civil", 3),
        alumnus(2, &["sql"], "Civil", 5),
    ];
    let ranking = CandidateRanker::new().rank_with(
        RankStrategy::Distance,
        &ProfileRecord::new(),
        &candidates,
        2,
    );
    assert_eq!(ranking.strategy, RankStrategy::Direct);
}

#[rstest]
fn distance_ranking_prefers_the_closest_profile(seeker: ProfileRecord) {
    let twin = seeker.clone().with_id(9_i64).with_name("Twin");
    let candidates = vec![
        alumnus(1, &["go", "rust", "k8s", "aws"], "Mechanical", 15),
        twin,
        alumnus(2, &["python"], "Electronics", 6).with_bio("A much longer biography here"),
    ];
    let ranking = CandidateRanker::new().rank_with(RankStrategy::Distance, &seeker, &candidates, 2);
    assert_eq!(ranking.strategy, RankStrategy::Distance);
    assert_eq!(ranking.matches.len(), 2);
    let first = ranking.matches.first().expect("nearest neighbour");
    assert_eq!(first.candidate_id, Some(ProfileId::Number(9)));
    assert_eq!(first.result.knn_distance, Some(0.0));
    assert!((first.match_percent() - 100.0).abs() < 1e-9);
    assert!(first.result.explanation.starts_with("k-NN similarity: 100%. This is a"));
    assert_eq!(first.result.breakdown.len(), 4);
    let percents: Vec<f64> = ranking.matches.iter().map(RankedMatch::match_percent).collect();
    assert!(percents.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[rstest]
#[case("direct", RankStrategy::Direct)]
#[case("Distance", RankStrategy::Distance)]
#[case(" knn ", RankStrategy::Distance)]
fn strategies_parse_case_insensitively(#[case] raw: &str, #[case] expected: RankStrategy) {
    assert_eq!(raw.parse::<RankStrategy>(), Ok(expected));
}

#[rstest]
fn unknown_strategy_is_rejected() {
    let err = "random".parse::<RankStrategy>().expect_err("unknown strategy");
    assert_eq!(err.value, "random");
}

#[rstest]
fn skipped_candidates_serialise_reason_text() {
    let skip = SkippedCandidate {
        index: 2,
        candidate_id: Some(ProfileId::Number(4)),
        reason: SkipReason::Scoring(MatchError::NonFiniteScore {
            factor: "match_percent",
        }),
    };
    let value = serde_json::to_value(&skip).expect("serialise");
    assert_eq!(value["index"], 2);
    assert_eq!(value["candidate_id"], 4);
    assert!(
        value["reason"]
            .as_str()
            .is_some_and(|reason| reason.starts_with("candidate could not be scored"))
    );
}
