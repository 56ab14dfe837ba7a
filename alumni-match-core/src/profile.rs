//! Profile records exchanged by seekers and candidates.
//!
//! Profiles arrive as free-form field mappings. They are validated once when
//! decoded into a [`ProfileRecord`]; absent fields and explicit `null`s take
//! their documented defaults.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Opaque profile identity.
///
/// Upstream systems use both numeric and string identifiers, so both are
/// accepted and echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileId {
    /// Numeric identifier.
    Number(i64),
    /// Textual identifier.
    Text(String),
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for ProfileId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ProfileId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// A seeker or candidate profile.
///
/// Skills are kept in a sorted set: comparisons are case-sensitive and no
/// canonicalisation is applied. `category` is the academic branch; the
/// legacy `branch` and `years_of_experience` keys are accepted as aliases.
///
/// # Examples
/// ```
/// use alumni_match_core::ProfileRecord;
///
/// let profile = ProfileRecord::new()
///     .with_skills(["rust", "sql"])
///     .with_category("Computer Engineering")
///     .with_years_experience(4);
/// assert_eq!(profile.skills.len(), 2);
/// assert_eq!(profile.years_experience, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileRecord {
    /// Identity used to attach results back to the caller's records.
    pub id: Option<ProfileId>,
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: Option<String>,
    /// Current employer, for display only.
    #[serde(deserialize_with = "null_as_default")]
    pub company: Option<String>,
    /// Declared skills.
    #[serde(deserialize_with = "null_as_default")]
    pub skills: BTreeSet<String>,
    /// Free-text biography; may be empty.
    #[serde(deserialize_with = "null_as_default")]
    pub bio: String,
    /// One-line headline; may be empty.
    #[serde(deserialize_with = "null_as_default")]
    pub headline: String,
    /// Academic branch or department.
    #[serde(alias = "branch", deserialize_with = "null_as_default")]
    pub category: String,
    /// Whole years of industry experience.
    #[serde(alias = "years_of_experience", deserialize_with = "null_as_default")]
    pub years_experience: u32,
    /// `LinkedIn` profile URL.
    #[serde(deserialize_with = "null_as_default")]
    pub linkedin_url: Option<String>,
    /// `GitHub` profile URL.
    #[serde(deserialize_with = "null_as_default")]
    pub github_url: Option<String>,
    /// Resume download URL.
    #[serde(deserialize_with = "null_as_default")]
    pub resume_url: Option<String>,
}

/// Errors raised while decoding a free-form profile mapping.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The payload was not a JSON object.
    #[error("profile must be a JSON object, found {found}")]
    NotAnObject {
        /// JSON type that was supplied instead.
        found: &'static str,
    },
    /// A field carried a value of the wrong shape.
    #[error("profile field has an invalid value: {source}")]
    InvalidField {
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}

impl ProfileRecord {
    /// Construct an empty profile with every field at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a profile from a free-form JSON mapping.
    ///
    /// # Errors
    /// Returns [`ProfileError::NotAnObject`] for non-object payloads and
    /// [`ProfileError::InvalidField`] when a field has the wrong type, for
    /// example negative experience or a non-list skill set.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ProfileError> {
        if !value.is_object() {
            return Err(ProfileError::NotAnObject {
                found: json_type_name(&value),
            });
        }
        serde_json::from_value(value).map_err(|source| ProfileError::InvalidField { source })
    }

    /// Set the identity while returning `self` for chaining.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ProfileId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the display name while returning `self` for chaining.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the skill set while returning `self` for chaining.
    #[must_use]
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    /// Set the biography while returning `self` for chaining.
    #[must_use]
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    /// Set the headline while returning `self` for chaining.
    #[must_use]
    pub fn with_headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = headline.into();
        self
    }

    /// Set the category while returning `self` for chaining.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the years of experience while returning `self` for chaining.
    #[must_use]
    pub const fn with_years_experience(mut self, years: u32) -> Self {
        self.years_experience = years;
        self
    }

    /// Set the external link fields while returning `self` for chaining.
    #[must_use]
    pub fn with_links(
        mut self,
        linkedin: Option<&str>,
        github: Option<&str>,
        resume: Option<&str>,
    ) -> Self {
        self.linkedin_url = linkedin.map(str::to_owned);
        self.github_url = github.map(str::to_owned);
        self.resume_url = resume.map(str::to_owned);
        self
    }

    /// Text fed to the text-similarity factor: bio and headline joined by a
    /// single space.
    #[must_use]
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.bio, self.headline)
    }

    /// Report whether the `LinkedIn` link is present and non-empty.
    #[must_use]
    pub fn has_linkedin(&self) -> bool {
        is_present(self.linkedin_url.as_deref())
    }

    /// Report whether the `GitHub` link is present and non-empty.
    #[must_use]
    pub fn has_github(&self) -> bool {
        is_present(self.github_url.as_deref())
    }

    /// Report whether the resume link is present and non-empty.
    #[must_use]
    pub fn has_resume(&self) -> bool {
        is_present(self.resume_url.as_deref())
    }

    /// Name used in ranked output.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}

fn is_present(link: Option<&str>) -> bool {
    link.is_some_and(|value| !value.is_empty())
}

const fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Treat an explicit JSON `null` the same as an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
