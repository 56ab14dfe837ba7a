//! Named decomposition of a composite score.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Per-factor percentages in `0.0..=100.0`, kept in factor order.
///
/// Serialises as a JSON object whose keys follow insertion order.
///
/// # Examples
/// ```
/// use alumni_match_core::FactorBreakdown;
///
/// let breakdown = FactorBreakdown::new()
///     .with_factor("skills_overlap", 33.33)
///     .with_factor("text_similarity", 0.0);
/// assert_eq!(breakdown.get("skills_overlap"), Some(33.33));
/// assert_eq!(breakdown.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FactorBreakdown {
    factors: Vec<(&'static str, f64)>,
}

impl FactorBreakdown {
    /// Construct an empty breakdown.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            factors: Vec::new(),
        }
    }

    /// Append a factor while returning `self` for chaining.
    ///
    /// A repeated name replaces the earlier value in place.
    #[must_use]
    pub fn with_factor(mut self, name: &'static str, percent: f64) -> Self {
        if let Some(entry) = self.factors.iter_mut().find(|(key, _)| *key == name) {
            entry.1 = percent;
        } else {
            self.factors.push((name, percent));
        }
        self
    }

    /// Return the percentage recorded for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.factors
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    /// Iterate over `(name, percent)` pairs in factor order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.factors.iter().copied()
    }

    /// Number of recorded factors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    /// Report whether no factors are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

impl Serialize for FactorBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.factors.len()))?;
        for (name, value) in &self.factors {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
