//! Human-readable advice derived from the engagement scores.

use super::signals::SignalScores;

const TIP_THRESHOLD: f64 = 50.0;
const STRENGTH_THRESHOLD: f64 = 80.0;

/// Build the insight list: one tier sentence, tips for weak signals, then
/// praise for strong ones.
#[must_use]
pub fn insights(overall: f64, signals: SignalScores) -> Vec<String> {
    let tier = if overall >= 80.0 {
        "Highly engaged user! Excellent participation."
    } else if overall >= 60.0 {
        "Good engagement level. Keep up the great work!"
    } else if overall >= 40.0 {
        "Moderate engagement. Consider increasing activity."
    } else {
        "Low engagement detected. Recommendations provided below."
    };

    let tips = [
        (
            signals.activity,
            "Tip: Increase daily platform visits to boost engagement.",
        ),
        (
            signals.interaction,
            "Tip: Engage more with posts and messages from peers.",
        ),
        (
            signals.response,
            "Tip: Try to respond to messages more promptly.",
        ),
        (
            signals.content,
            "Tip: Share your knowledge by creating posts and discussions.",
        ),
    ];
    let strengths = [
        (
            signals.activity,
            "Strong activity frequency! You're very active.",
        ),
        (
            signals.interaction,
            "Excellent interaction quality! Your contributions are valuable.",
        ),
    ];

    std::iter::once(tier)
        .chain(
            tips.into_iter()
                .filter(|(score, _)| *score < TIP_THRESHOLD)
                .map(|(_, tip)| tip),
        )
        .chain(
            strengths
                .into_iter()
                .filter(|(score, _)| *score >= STRENGTH_THRESHOLD)
                .map(|(_, praise)| praise),
        )
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn inactive_users_get_every_tip() {
        let lines = insights(0.0, SignalScores::default());
        assert_eq!(
            lines,
            vec![
                "Low engagement detected. Recommendations provided below.",
                "Tip: Increase daily platform visits to boost engagement.",
                "Tip: Engage more with posts and messages from peers.",
                "Tip: Try to respond to messages more promptly.",
                "Tip: Share your knowledge by creating posts and discussions.",
            ]
        );
    }

    #[rstest]
    fn strong_activity_is_praised() {
        let signals = SignalScores {
            activity: 100.0,
            interaction: 50.0,
            response: 100.0,
            content: 100.0,
        };
        assert_eq!(
            insights(92.5, signals),
            vec![
                "Highly engaged user! Excellent participation.",
                "Strong activity frequency! You're very active.",
            ]
        );
    }

    #[rstest]
    #[case(80.0, "Highly engaged user! Excellent participation.")]
    #[case(60.0, "Good engagement level. Keep up the great work!")]
    #[case(59.99, "Moderate engagement. Consider increasing activity.")]
    #[case(39.99, "Low engagement detected. Recommendations provided below.")]
    fn tier_sentence_leads(#[case] overall: f64, #[case] expected: &str) {
        let lines = insights(overall, SignalScores::default());
        assert_eq!(lines.first().map(String::as_str), Some(expected));
    }
}
