//! Week-over-week activity trend.

use alumni_match_core::{ActivityLog, Timestamped, Trend};
use chrono::{DateTime, Duration, Utc};

const MIN_LOGS: usize = 10;
const CHANGE_THRESHOLD: f64 = 0.2;

/// Compare activity in the last seven days with the seven days before.
///
/// Fewer than ten logs, or no activity in the earlier week, reports
/// [`Trend::Stable`].
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "relative change between two weekly counts"
)]
pub fn activity_trend(activity_logs: &[ActivityLog], now: DateTime<Utc>) -> Trend {
    if activity_logs.len() < MIN_LOGS {
        return Trend::Stable;
    }
    let week_ago = now - Duration::days(7);
    let fortnight_ago = now - Duration::days(14);
    let (mut recent, mut previous) = (0_usize, 0_usize);
    for log in activity_logs {
        let at = log.occurred_at(now);
        if week_ago < at && at <= now {
            recent += 1;
        } else if fortnight_ago < at && at <= week_ago {
            previous += 1;
        }
    }
    if previous == 0 {
        return Trend::Stable;
    }
    let change = (recent as f64 - previous as f64) / previous as f64;
    if change > CHANGE_THRESHOLD {
        Trend::Increasing
    } else if change < -CHANGE_THRESHOLD {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alumni_match_core::test_support::{FixedClock, logs_days_ago};
    use rstest::rstest;

    #[rstest]
    #[case(&[1, 1, 1, 1, 1, 1, 1, 1, 1], Trend::Stable)]
    #[case(&[1, 1, 1, 1, 1, 1, 1, 8, 8, 8], Trend::Increasing)]
    #[case(&[1, 1, 8, 8, 8, 8, 8, 8, 8, 8], Trend::Decreasing)]
    #[case(&[1, 1, 1, 1, 1, 8, 8, 8, 8, 8], Trend::Stable)]
    #[case(&[1, 1, 1, 1, 1, 1, 1, 1, 1, 1], Trend::Stable)]
    #[case(&[1, 1, 1, 1, 1, 1, 20, 20, 20, 20], Trend::Stable)]
    fn trend_compares_adjacent_weeks(#[case] days: &[i64], #[case] expected: Trend) {
        let clock = FixedClock::reference();
        let logs = logs_days_ago(&clock, days);
        assert_eq!(activity_trend(&logs, clock.0), expected);
    }

    #[rstest]
    fn future_entries_count_in_neither_week() {
        let clock = FixedClock::reference();
        let mut logs = logs_days_ago(&clock, &[8, 8, 8, 8, 8, 1, 1, 1, 1, 1]);
        logs.push(ActivityLog::at(clock.hours_after(5)));
        logs.push(ActivityLog::at(clock.hours_after(6)));
        assert_eq!(activity_trend(&logs, clock.0), Trend::Stable);
    }

    #[rstest]
    fn exactly_seven_days_falls_in_the_earlier_week() {
        let clock = FixedClock::reference();
        let logs = logs_days_ago(&clock, &[7, 7, 7, 7, 7, 7, 1, 1, 1, 1]);
        assert_eq!(activity_trend(&logs, clock.0), Trend::Decreasing);
    }
}
