//! Deterministic fixtures shared by unit, behaviour and property tests.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::{ActivityLog, Clock, Message, Post, ProfileRecord};

/// [`Clock`] frozen at a fixed instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Midday on 1 June 2025, UTC.
    #[must_use]
    pub fn reference() -> Self {
        Self(
            Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
                .single()
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        )
    }

    /// Instant `days` before the frozen time, formatted as RFC 3339.
    #[must_use]
    pub fn days_ago(&self, days: i64) -> String {
        (self.0 - Duration::days(days)).to_rfc3339()
    }

    /// Instant `hours` after the frozen time, formatted as RFC 3339.
    #[must_use]
    pub fn hours_after(&self, hours: i64) -> String {
        (self.0 + Duration::hours(hours)).to_rfc3339()
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// One activity log entry per element of `days`, each that many days ago.
#[must_use]
pub fn logs_days_ago(clock: &FixedClock, days: &[i64]) -> Vec<ActivityLog> {
    days.iter()
        .map(|&day| ActivityLog::at(clock.days_ago(day)))
        .collect()
}

/// `count` messages with `content`, spaced `gap_hours` apart.
#[must_use]
pub fn spaced_messages(
    clock: &FixedClock,
    count: usize,
    gap_hours: i64,
    content: &str,
) -> Vec<Message> {
    (0_i64..)
        .take(count)
        .map(|step| Message::new(clock.hours_after(step * gap_hours), content))
        .collect()
}

/// A post `days` ago with optional image and tag.
#[must_use]
pub fn post_days_ago(clock: &FixedClock, days: i64, image: bool, tag: bool) -> Post {
    let mut post = Post::at(clock.days_ago(days));
    if image {
        post.image_urls.push("https://cdn.example/image.png".to_owned());
    }
    if tag {
        post.tags.push("career".to_owned());
    }
    post
}

/// A seeker profile with a typical student shape.
#[must_use]
pub fn student(skills: &[&str], category: &str) -> ProfileRecord {
    ProfileRecord::new()
        .with_id(1_i64)
        .with_name("Student")
        .with_skills(skills.iter().copied())
        .with_category(category)
}

/// A candidate profile with a typical alumni shape.
#[must_use]
pub fn alumnus(id: i64, skills: &[&str], category: &str, years: u32) -> ProfileRecord {
    ProfileRecord::new()
        .with_id(id)
        .with_name(format!("Alumnus {id}"))
        .with_skills(skills.iter().copied())
        .with_category(category)
        .with_years_experience(years)
}
