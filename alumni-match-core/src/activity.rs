//! Time-stamped behavioural records consumed by the engagement engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::profile::null_as_default;
use crate::time::resolve_or_now;

/// A record that carries a raw timestamp.
///
/// Both the `timestamp` and `created_at` keys are accepted when decoding.
pub trait Timestamped {
    /// Raw timestamp as supplied, if any.
    fn raw_timestamp(&self) -> Option<&str>;

    /// Resolve the timestamp, treating missing or unparsable values as `now`.
    fn occurred_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        resolve_or_now(self.raw_timestamp(), now)
    }
}

/// Keep string timestamps and drop every other JSON value, which then
/// resolves to `now`.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(raw) => Some(raw),
        Value::Null => None,
        other => {
            log::debug!("ignoring non-string timestamp {other}");
            None
        }
    })
}

/// A single platform activity event such as a login or page view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityLog {
    /// When the event happened.
    #[serde(alias = "created_at", deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<String>,
    /// Free-form event label.
    #[serde(deserialize_with = "null_as_default")]
    pub action: Option<String>,
}

impl ActivityLog {
    /// Build a log entry at the given raw timestamp.
    #[must_use]
    pub fn at(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            action: None,
        }
    }
}

impl Timestamped for ActivityLog {
    fn raw_timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }
}

/// A chat or direct message authored by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    /// When the message was sent.
    #[serde(alias = "created_at", deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<String>,
    /// Message body.
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
}

impl Message {
    /// Build a message with the given raw timestamp and body.
    #[must_use]
    pub fn new(timestamp: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            content: content.into(),
        }
    }

    /// Body length in characters.
    #[must_use]
    pub fn content_len(&self) -> usize {
        self.content.chars().count()
    }
}

impl Timestamped for Message {
    fn raw_timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }
}

/// A feed post authored by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    /// When the post was published.
    #[serde(alias = "created_at", deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<String>,
    /// Number of reactions the post received.
    #[serde(deserialize_with = "null_as_default")]
    pub reactions_count: u64,
    /// Attached image URLs.
    #[serde(deserialize_with = "null_as_default")]
    pub image_urls: Vec<String>,
    /// Attached images under the legacy key.
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    /// Topic tags.
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

impl Post {
    /// Build an untagged, image-free post at the given raw timestamp.
    #[must_use]
    pub fn at(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            ..Self::default()
        }
    }

    /// Report whether either image field carries at least one entry.
    #[must_use]
    pub fn has_images(&self) -> bool {
        !self.image_urls.is_empty() || !self.images.is_empty()
    }

    /// Report whether the post carries at least one tag.
    #[must_use]
    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }
}

impl Timestamped for Post {
    fn raw_timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }
}
