//! Detailed breakdown of why a candidate suits a seeker.

use alumni_match_core::{
    FactorBreakdown, MatchError, MatchExplanation, PairScorer, ProfileRecord,
};

use crate::matcher::{
    CATEGORY_FACTOR, MatchScorer, SENIORITY_FACTOR, SKILLS_FACTOR, TEXT_FACTOR,
};
use crate::similarity::same_category;

const LEARNABLE_SKILLS: usize = 5;
const FALLBACK_REASON: &str = "Good overall compatibility based on multiple factors";

/// Factor thresholds and the reason each one earns, in reporting order.
const REASONS: [(&str, f64, &str); 4] = [
    (
        SKILLS_FACTOR,
        60.0,
        "Strong skills overlap - can provide relevant guidance",
    ),
    (
        CATEGORY_FACTOR,
        80.0,
        "Same academic background - understands your coursework",
    ),
    (
        SENIORITY_FACTOR,
        80.0,
        "Optimal experience level - recently transitioned to industry",
    ),
    (TEXT_FACTOR, 60.0, "Similar interests and career goals"),
];

impl MatchScorer {
    /// Score the pair and expand the result with shared and learnable
    /// skills plus a list of match reasons.
    ///
    /// # Errors
    /// Propagates [`MatchError`] from scoring.
    ///
    /// # Examples
    /// ```
    /// use alumni_match_core::ProfileRecord;
    /// use alumni_match_scorer::MatchScorer;
    ///
    /// let seeker = ProfileRecord::new().with_skills(["python"]);
    /// let candidate = ProfileRecord::new().with_skills(["python", "go"]);
    /// let detail = MatchScorer::new().explain(&seeker, &candidate).expect("finite score");
    /// assert_eq!(detail.common_skills, vec!["python"]);
    /// assert_eq!(detail.skills_you_can_learn, vec!["go"]);
    /// ```
    pub fn explain(
        &self,
        seeker: &ProfileRecord,
        candidate: &ProfileRecord,
    ) -> Result<MatchExplanation, MatchError> {
        let result = self.score(seeker, candidate)?;
        let match_reasons = match_reasons(&result.breakdown);
        Ok(MatchExplanation {
            match_score: result.match_percent,
            common_skills: seeker
                .skills
                .intersection(&candidate.skills)
                .cloned()
                .collect(),
            skills_you_can_learn: candidate
                .skills
                .difference(&seeker.skills)
                .take(LEARNABLE_SKILLS)
                .cloned()
                .collect(),
            same_category: same_category(seeker, candidate),
            candidate_experience_years: candidate.years_experience,
            recommendation_reason: result.explanation,
            breakdown: result.breakdown,
            match_reasons,
        })
    }
}

fn match_reasons(breakdown: &FactorBreakdown) -> Vec<String> {
    let reasons: Vec<String> = REASONS
        .iter()
        .filter(|(factor, threshold, _)| {
            breakdown
                .get(factor)
                .is_some_and(|value| value >= *threshold)
        })
        .map(|(_, _, reason)| (*reason).to_owned())
        .collect();
    if reasons.is_empty() {
        vec![FALLBACK_REASON.to_owned()]
    } else {
        reasons
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alumni_match_core::test_support::{alumnus, student};
    use rstest::rstest;

    #[rstest]
    fn worked_example_lists_reasons_in_order() {
        let detail = MatchScorer::new()
            .explain(
                &student(&["python", "sql"], "Civil"),
                &alumnus(2, &["python", "java"], "Civil", 5),
            )
            .expect("finite score");
        assert_eq!(detail.common_skills, vec!["python"]);
        assert_eq!(detail.skills_you_can_learn, vec!["java"]);
        assert!(detail.same_category);
        assert_eq!(detail.candidate_experience_years, 5);
        assert_eq!(
            detail.match_reasons,
            vec![
                "Same academic background - understands your coursework",
                "Optimal experience level - recently transitioned to industry",
            ]
        );
        assert!(detail.recommendation_reason.starts_with("This is a moderate match"));
    }

    #[rstest]
    fn learnable_skills_are_capped_and_sorted() {
        let detail = MatchScorer::new()
            .explain(
                &student(&[], "Civil"),
                &alumnus(2, &["go", "aws", "rust", "k8s", "sql", "c"], "Civil", 1),
            )
            .expect("finite score");
        assert_eq!(detail.skills_you_can_learn, vec!["aws", "c", "go", "k8s", "rust"]);
        assert!(detail.common_skills.is_empty());
    }

    #[rstest]
    fn empty_categories_are_not_the_same() {
        let detail = MatchScorer::new()
            .explain(&student(&[], ""), &alumnus(2, &[], "", 0))
            .expect("finite score");
        assert!(!detail.same_category);
        assert_eq!(detail.match_reasons, vec![FALLBACK_REASON]);
    }

    #[rstest]
    fn thresholds_are_inclusive() {
        let breakdown = FactorBreakdown::new()
            .with_factor(SKILLS_FACTOR, 60.0)
            .with_factor(TEXT_FACTOR, 60.0)
            .with_factor(CATEGORY_FACTOR, 30.0)
            .with_factor(SENIORITY_FACTOR, 50.0);
        assert_eq!(
            match_reasons(&breakdown),
            vec![
                "Strong skills overlap - can provide relevant guidance",
                "Similar interests and career goals",
            ]
        );
    }
}
