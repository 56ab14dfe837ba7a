//! Per-factor similarity between a seeker and a candidate.
//!
//! Each factor lands in `0.0..=1.0` and is computed independently from raw
//! profile fields:
//! - **skills**: Jaccard index of the skill sets, zero when either is empty;
//! - **text**: TF-IDF cosine of `bio + " " + headline`, fitted on the pair;
//! - **category**: `1.0` for equal non-empty categories, `0.3` otherwise;
//! - **seniority**: piecewise on the candidate's years of experience.

use alumni_match_core::ProfileRecord;

use crate::tfidf::{PairwiseTfidf, cosine};

/// Partial credit awarded when categories differ.
pub const CATEGORY_MISMATCH_SCORE: f64 = 0.3;

/// Fewest years of experience in the mentoring sweet spot.
pub const SWEET_SPOT_MIN_YEARS: u32 = 2;

/// Most years of experience in the mentoring sweet spot.
pub const SWEET_SPOT_MAX_YEARS: u32 = 8;

/// Raw factor scores for one pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorScores {
    /// Jaccard index of the skill sets.
    pub skills: f64,
    /// Cosine similarity of the combined texts.
    pub text: f64,
    /// Category agreement.
    pub category: f64,
    /// Candidate seniority fit.
    pub seniority: f64,
}

/// Computes the four similarity factors.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityEngine {
    vectorizer: PairwiseTfidf,
}

impl SimilarityEngine {
    /// Construct an engine with the default text pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an engine around a specific vectorizer.
    #[must_use]
    pub const fn with_vectorizer(vectorizer: PairwiseTfidf) -> Self {
        Self { vectorizer }
    }

    /// Compute all factors for `candidate` relative to `seeker`.
    #[must_use]
    pub fn similarity(&self, seeker: &ProfileRecord, candidate: &ProfileRecord) -> FactorScores {
        FactorScores {
            skills: skills_similarity(seeker, candidate),
            text: self.text_similarity(&seeker.combined_text(), &candidate.combined_text()),
            category: category_similarity(seeker, candidate),
            seniority: seniority_score(candidate.years_experience),
        }
    }

    /// Cosine similarity of two texts under a pair-local TF-IDF fit.
    ///
    /// Blank input and vectorisation failures both yield `0.0`.
    #[must_use]
    pub fn text_similarity(&self, seeker_text: &str, candidate_text: &str) -> f64 {
        if seeker_text.trim().is_empty() || candidate_text.trim().is_empty() {
            return 0.0;
        }
        match self.vectorizer.fit_transform(&[seeker_text, candidate_text]) {
            Ok(rows) => match rows.as_slice() {
                [left, right] => cosine(left, right),
                _ => 0.0,
            },
            Err(err) => {
                log::debug!("text similarity degraded to zero: {err}");
                0.0
            }
        }
    }
}

/// Jaccard index of the two skill sets; `0.0` if either is empty.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "the Jaccard index divides two small set sizes"
)]
pub fn skills_similarity(seeker: &ProfileRecord, candidate: &ProfileRecord) -> f64 {
    if seeker.skills.is_empty() || candidate.skills.is_empty() {
        return 0.0;
    }
    let shared = seeker.skills.intersection(&candidate.skills).count();
    let union = seeker.skills.union(&candidate.skills).count();
    if union == 0 {
        return 0.0;
    }
    shared as f64 / union as f64
}

/// `1.0` when both categories are equal and non-empty, otherwise the
/// mismatch credit.
#[must_use]
pub fn category_similarity(seeker: &ProfileRecord, candidate: &ProfileRecord) -> f64 {
    if same_category(seeker, candidate) {
        1.0
    } else {
        CATEGORY_MISMATCH_SCORE
    }
}

/// Report whether both profiles name the same, non-empty category.
#[must_use]
pub fn same_category(seeker: &ProfileRecord, candidate: &ProfileRecord) -> bool {
    !seeker.category.is_empty() && seeker.category == candidate.category
}

/// Seniority fit for a candidate with `years` of experience.
#[must_use]
pub const fn seniority_score(years: u32) -> f64 {
    if in_sweet_spot(years) {
        1.0
    } else if years > SWEET_SPOT_MAX_YEARS {
        0.8
    } else {
        0.5
    }
}

/// Report whether `years` falls inside the sweet spot.
#[must_use]
pub const fn in_sweet_spot(years: u32) -> bool {
    years >= SWEET_SPOT_MIN_YEARS && years <= SWEET_SPOT_MAX_YEARS
}

#[cfg(test)]
mod tests {
    use super::*;
    use alumni_match_core::test_support::{alumnus, student};
    use rstest::rstest;

    #[rstest]
    #[case(&["python", "sql"], &["python", "java"], 1.0 / 3.0)]
    #[case(&["python"], &["python"], 1.0)]
    #[case(&["python"], &["Python"], 0.0)]
    #[case(&[] as &[&str], &["python"], 0.0)]
    #[case(&["python"], &[] as &[&str], 0.0)]
    fn skills_use_case_sensitive_jaccard(
        #[case] seeker: &[&str],
        #[case] candidate: &[&str],
        #[case] expected: f64,
    ) {
        let score = skills_similarity(&student(seeker, "Civil"), &alumnus(2, candidate, "Civil", 4));
        assert!((score - expected).abs() < 1e-9);
    }

    #[rstest]
    #[case("Civil", "Civil", 1.0)]
    #[case("Civil", "civil", 0.3)]
    #[case("Civil", "Mechanical", 0.3)]
    #[case("", "", 0.3)]
    fn category_awards_partial_credit(
        #[case] seeker: &str,
        #[case] candidate: &str,
        #[case] expected: f64,
    ) {
        let score = category_similarity(&student(&[], seeker), &alumnus(2, &[], candidate, 0));
        assert!((score - expected).abs() < 1e-9);
    }

    #[rstest]
    #[case(0, 0.5)]
    #[case(1, 0.5)]
    #[case(2, 1.0)]
    #[case(8, 1.0)]
    #[case(9, 0.8)]
    #[case(40, 0.8)]
    fn seniority_is_piecewise(#[case] years: u32, #[case] expected: f64) {
        assert!((seniority_score(years) - expected).abs() < 1e-9);
    }

    #[rstest]
    #[case("", "backend engineer")]
    #[case("   ", "backend engineer")]
    #[case("the of and", "a an the")]
    fn blank_or_stop_word_text_scores_zero(#[case] left: &str, #[case] right: &str) {
        assert_eq!(SimilarityEngine::new().text_similarity(left, right), 0.0);
    }

    #[rstest]
    fn empty_bios_yield_zero_text_similarity() {
        let factors = SimilarityEngine::new().similarity(
            &student(&["python"], "Civil"),
            &alumnus(2, &["python"], "Civil", 5),
        );
        assert_eq!(factors.text, 0.0);
        assert!((factors.skills - 1.0).abs() < 1e-9);
    }

    #[rstest]
    fn overlapping_bios_score_above_zero() {
        let seeker = student(&[], "Civil").with_bio("I want to learn cloud infrastructure");
        let candidate = alumnus(2, &[], "Civil", 5)
            .with_headline("Cloud infrastructure engineer at a startup");
        let factors = SimilarityEngine::new().similarity(&seeker, &candidate);
        assert!(factors.text > 0.0 && factors.text <= 1.0);
    }
}
