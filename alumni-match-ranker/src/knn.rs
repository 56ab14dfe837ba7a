//! Z-score standardisation and Euclidean nearest neighbours.

use crate::features::{FEATURE_COUNT, FeatureVector};

/// Per-dimension mean and scale fitted on a set of vectors.
///
/// The scale is the population standard deviation; dimensions with zero
/// variance use a scale of `1.0` so they contribute nothing after centring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Standardiser {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl Standardiser {
    /// Fit on `vectors`. An empty slice yields the identity transform.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "mean and variance over candidate features"
    )]
    pub fn fit(vectors: &[FeatureVector]) -> Self {
        let mut mean = [0.0; FEATURE_COUNT];
        let mut scale = [1.0; FEATURE_COUNT];
        if vectors.is_empty() {
            return Self { mean, scale };
        }
        let count = vectors.len() as f64;
        for (dimension, (centre, spread)) in mean.iter_mut().zip(scale.iter_mut()).enumerate() {
            let column = || {
                vectors
                    .iter()
                    .filter_map(move |vector| vector.as_array().get(dimension).copied())
            };
            let average = column().sum::<f64>() / count;
            let variance = column()
                .map(|value| (value - average).powi(2))
                .sum::<f64>()
                / count;
            let deviation = variance.sqrt();
            *centre = average;
            *spread = if deviation > 0.0 { deviation } else { 1.0 };
        }
        Self { mean, scale }
    }

    /// Apply the fitted transform to `vector`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "z-score transform"
    )]
    pub fn transform(&self, vector: &FeatureVector) -> [f64; FEATURE_COUNT] {
        let mut scaled = *vector.as_array();
        for ((value, centre), spread) in scaled.iter_mut().zip(&self.mean).zip(&self.scale) {
            *value = (*value - centre) / spread;
        }
        scaled
    }
}

/// Euclidean distance between two standardised vectors.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "Euclidean distance"
)]
pub fn euclidean(left: &[f64; FEATURE_COUNT], right: &[f64; FEATURE_COUNT]) -> f64 {
    left.iter()
        .zip(right)
        .map(|(a, b)| (a - b).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// A neighbour found by [`nearest`]: its position in the input and its
/// distance from the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbour {
    /// Position of the neighbour in the searched slice.
    pub position: usize,
    /// Distance from the query in standardised space.
    pub distance: f64,
}

/// The `k` points closest to `query`, nearest first with ties in input
/// order.
#[must_use]
pub fn nearest(
    query: &[f64; FEATURE_COUNT],
    points: &[[f64; FEATURE_COUNT]],
    k: usize,
) -> Vec<Neighbour> {
    let mut neighbours: Vec<Neighbour> = points
        .iter()
        .enumerate()
        .map(|(position, point)| Neighbour {
            position,
            distance: euclidean(query, point),
        })
        .collect();
    neighbours.sort_by(|left, right| {
        left.distance
            .total_cmp(&right.distance)
            .then(left.position.cmp(&right.position))
    });
    neighbours.truncate(k);
    neighbours
}
