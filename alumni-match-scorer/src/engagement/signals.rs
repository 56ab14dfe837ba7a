//! The four engagement sub-scores, each in `0.0..=100.0` except interaction
//! quality, which tops out at `50.0`.

use alumni_match_core::{ActivityLog, Message, Post, Timestamped};
use chrono::{DateTime, Duration, Utc};

const RECENT_WINDOW_DAYS: i64 = 30;
const QUALITY_SAMPLE: usize = 10;
const QUALITY_BONUS: f64 = 1.5;
const QUALITY_CAP: f64 = 30.0;
const QUANTITY_CAP: f64 = 70.0;
const NEUTRAL_RESPONSE: f64 = 50.0;

/// Sub-scores before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SignalScores {
    /// Volume of recent platform activity.
    pub activity: f64,
    /// Depth of messages and reception of posts.
    pub interaction: f64,
    /// Promptness of consecutive messages.
    pub response: f64,
    /// Recent post volume plus a bonus for rich posts.
    pub content: f64,
}

impl SignalScores {
    /// Compute every sub-score against the instant `now`.
    #[must_use]
    pub fn measure(
        activity_logs: &[ActivityLog],
        messages: &[Message],
        posts: &[Post],
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            activity: activity_frequency(activity_logs, now),
            interaction: interaction_quality(messages, posts),
            response: response_time(messages, now),
            content: content_contribution(posts, now),
        }
    }
}

fn is_recent<T: Timestamped>(record: &T, now: DateTime<Utc>) -> bool {
    record.occurred_at(now) > now - Duration::days(RECENT_WINDOW_DAYS)
}

/// Score the number of activity entries in the last 30 days.
#[must_use]
pub fn activity_frequency(activity_logs: &[ActivityLog], now: DateTime<Utc>) -> f64 {
    if activity_logs.is_empty() {
        return 0.0;
    }
    let count = activity_logs
        .iter()
        .filter(|log| is_recent(*log, now))
        .count();
    activity_curve(count)
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "piecewise-linear curve over small counts"
)]
fn activity_curve(count: usize) -> f64 {
    let n = count as f64;
    match count {
        50.. => 100.0,
        30.. => 80.0 + (n - 30.0),
        15.. => 60.0 + (n - 15.0) * (20.0 / 15.0),
        5.. => 40.0 + (n - 5.0) * 2.0,
        _ => n * 8.0,
    }
}

/// Score average message length and count alongside average post reactions
/// and count.
///
/// Each present channel contributes up to `50.0`; when both are present the
/// channel scores are averaged.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "channel scores are averaged"
)]
pub fn interaction_quality(messages: &[Message], posts: &[Post]) -> f64 {
    let message_score = message_quality(messages);
    let post_score = post_quality(posts);
    match (message_score, post_score) {
        (Some(left), Some(right)) => (left + right) / 2.0,
        (Some(score), None) | (None, Some(score)) => score,
        (None, None) => 0.0,
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "saturating ratios of lengths and counts"
)]
fn message_quality(messages: &[Message]) -> Option<f64> {
    if messages.is_empty() {
        return None;
    }
    let count = messages.len() as f64;
    let total_length: usize = messages.iter().map(Message::content_len).sum();
    let average_length = total_length as f64 / count;
    let length_score = (average_length / 100.0).min(1.0) * 50.0;
    let count_score = (count / 20.0).min(1.0) * 50.0;
    Some((length_score + count_score) / 2.0)
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "saturating ratios of reactions and counts"
)]
fn post_quality(posts: &[Post]) -> Option<f64> {
    if posts.is_empty() {
        return None;
    }
    let count = posts.len() as f64;
    let total_reactions: u64 = posts.iter().map(|post| post.reactions_count).sum();
    let average_reactions = total_reactions as f64 / count;
    let reaction_score = (average_reactions / 10.0).min(1.0) * 50.0;
    let count_score = (count / 10.0).min(1.0) * 50.0;
    Some((reaction_score + count_score) / 2.0)
}

/// Score the mean gap between consecutive messages in supplied order.
///
/// Fewer than two messages yields the neutral `50.0`.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "mean gap in fractional hours"
)]
pub fn response_time(messages: &[Message], now: DateTime<Utc>) -> f64 {
    let instants: Vec<DateTime<Utc>> = messages
        .iter()
        .map(|message| message.occurred_at(now))
        .collect();
    let gaps: Vec<f64> = instants
        .windows(2)
        .filter_map(|pair| match pair {
            [previous, current] => {
                Some((*current - *previous).num_milliseconds() as f64 / 3_600_000.0)
            }
            _ => None,
        })
        .collect();
    if gaps.is_empty() {
        log::debug!(
            "{} messages leave no reply gap; response time is neutral",
            messages.len()
        );
        return NEUTRAL_RESPONSE;
    }
    let average = gaps.iter().sum::<f64>() / gaps.len() as f64;
    response_bucket(average)
}

fn response_bucket(average_hours: f64) -> f64 {
    if average_hours <= 1.0 {
        100.0
    } else if average_hours <= 4.0 {
        80.0
    } else if average_hours <= 12.0 {
        60.0
    } else if average_hours <= 24.0 {
        40.0
    } else {
        20.0
    }
}

/// Score recent post volume plus a capped bonus for images and tags on the
/// first ten recent posts.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "volume ratio plus additive bonus"
)]
pub fn content_contribution(posts: &[Post], now: DateTime<Utc>) -> f64 {
    if posts.is_empty() {
        return 0.0;
    }
    let recent: Vec<&Post> = posts.iter().filter(|post| is_recent(*post, now)).collect();
    let quantity = (recent.len() as f64 / 10.0).min(1.0) * QUANTITY_CAP;
    let bonus: f64 = recent
        .iter()
        .take(QUALITY_SAMPLE)
        .map(|post| {
            let image = if post.has_images() { QUALITY_BONUS } else { 0.0 };
            let tag = if post.has_tags() { QUALITY_BONUS } else { 0.0 };
            image + tag
        })
        .sum();
    quantity + bonus.min(QUALITY_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alumni_match_core::test_support::{
        FixedClock, logs_days_ago, post_days_ago, spaced_messages,
    };
    use rstest::{fixture, rstest};

    #[fixture]
    fn clock() -> FixedClock {
        FixedClock::reference()
    }

    fn close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[rstest]
    #[case(0, 0.0)]
    #[case(4, 32.0)]
    #[case(5, 40.0)]
    #[case(14, 58.0)]
    #[case(15, 60.0)]
    #[case(30, 80.0)]
    #[case(49, 99.0)]
    #[case(50, 100.0)]
    #[case(60, 100.0)]
    fn activity_curve_is_piecewise_linear(#[case] count: usize, #[case] expected: f64) {
        close(activity_curve(count), expected);
    }

    #[rstest]
    fn old_activity_is_ignored(clock: FixedClock) {
        let logs = logs_days_ago(&clock, &[1, 2, 3, 31, 45]);
        close(activity_frequency(&logs, clock.0), 24.0);
    }

    #[rstest]
    fn missing_timestamps_count_as_recent(clock: FixedClock) {
        let logs = vec![ActivityLog::default(); 5];
        close(activity_frequency(&logs, clock.0), 40.0);
    }

    #[rstest]
    fn interaction_averages_both_channels(clock: FixedClock) {
        let messages = spaced_messages(&clock, 20, 1, &"x".repeat(100));
        close(interaction_quality(&messages, &[]), 50.0);

        let posts: Vec<Post> = (0..10)
            .map(|day| Post {
                reactions_count: 0,
                ..post_days_ago(&clock, day, false, false)
            })
            .collect();
        close(interaction_quality(&[], &posts), 25.0);
        close(interaction_quality(&messages, &posts), 37.5);
        close(interaction_quality(&[], &[]), 0.0);
    }

    #[rstest]
    #[case(1, 0, 50.0)]
    #[case(2, 1, 100.0)]
    #[case(3, 4, 80.0)]
    #[case(3, 12, 60.0)]
    #[case(3, 24, 40.0)]
    #[case(3, 25, 20.0)]
    fn response_time_buckets_mean_gap(
        clock: FixedClock,
        #[case] count: usize,
        #[case] gap_hours: i64,
        #[case] expected: f64,
    ) {
        let messages = spaced_messages(&clock, count, gap_hours, "hello");
        close(response_time(&messages, clock.0), expected);
    }

    #[rstest]
    fn content_rewards_rich_recent_posts(clock: FixedClock) {
        let posts = vec![
            post_days_ago(&clock, 1, true, true),
            post_days_ago(&clock, 2, true, false),
            post_days_ago(&clock, 40, true, true),
        ];
        close(content_contribution(&posts, clock.0), 14.0 + 4.5);
    }

    #[rstest]
    fn content_bonus_is_capped(clock: FixedClock) {
        let posts: Vec<Post> = (0..15)
            .map(|day| post_days_ago(&clock, day, true, true))
            .collect();
        close(content_contribution(&posts, clock.0), 100.0);
    }

    #[rstest]
    fn no_posts_scores_zero(clock: FixedClock) {
        close(content_contribution(&[], clock.0), 0.0);
    }
}
