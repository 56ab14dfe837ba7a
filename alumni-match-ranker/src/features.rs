//! Fixed-shape numeric features for distance ranking.

use alumni_match_core::ProfileRecord;

/// Number of fields in a [`FeatureVector`].
pub const FEATURE_COUNT: usize = 8;

/// Categories with a dedicated code; anything else encodes as `0`.
const CATEGORY_CODES: [(&str, u8); 5] = [
    ("Computer Engineering", 1),
    ("Information Technology", 2),
    ("Electronics", 3),
    ("Mechanical", 4),
    ("Civil", 5),
];

/// Profile features in a fixed order: skill count, years of experience, bio
/// length, headline length, `LinkedIn`, `GitHub` and resume presence, and
/// category code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Borrow the raw field values.
    #[must_use]
    pub const fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    /// Report whether every field is zero.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|value| *value == 0.0)
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}

/// Extracts [`FeatureVector`]s from profiles.
///
/// # Examples
/// ```
/// use alumni_match_core::ProfileRecord;
/// use alumni_match_ranker::FeatureVectorizer;
///
/// let profile = ProfileRecord::new().with_skills(["rust"]).with_category("Civil");
/// let vector = FeatureVectorizer.extract(&profile).expect("profile has signal");
/// assert_eq!(vector.as_array(), &[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 5.0]);
/// assert!(FeatureVectorizer.extract(&ProfileRecord::new()).is_none());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureVectorizer;

impl FeatureVectorizer {
    /// Encode `profile`, returning `None` when every field is zero.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "counts and lengths are far below f64 precision limits"
    )]
    pub fn extract(&self, profile: &ProfileRecord) -> Option<FeatureVector> {
        let vector = FeatureVector([
            profile.skills.len() as f64,
            f64::from(profile.years_experience),
            profile.bio.chars().count() as f64,
            profile.headline.chars().count() as f64,
            flag(profile.has_linkedin()),
            flag(profile.has_github()),
            flag(profile.has_resume()),
            f64::from(category_code(&profile.category)),
        ]);
        (!vector.is_blank()).then_some(vector)
    }
}

const fn flag(present: bool) -> f64 {
    if present { 1.0 } else { 0.0 }
}

/// Numeric code for a category; unknown categories map to `0`.
#[must_use]
pub fn category_code(category: &str) -> u8 {
    CATEGORY_CODES
        .iter()
        .find(|(name, _)| *name == category)
        .map_or(0, |(_, code)| *code)
}
