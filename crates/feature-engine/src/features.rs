//! Feature Vector

use serde::{Deserialize, Serialize};

/// Number of features both regression models expect
pub const FEATURE_DIMENSION: usize = 5;

/// Normalized feature vector for model inference.
///
/// Fixed order: activator content, pozzolan content, curing time,
/// vertical stress, loading amplitude. Entries lie in [0, 1] when the raw
/// inputs are within their documented domains. A vector is built fresh per
/// prediction request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [f64; FEATURE_DIMENSION],
}

impl FeatureVector {
    /// Wrap an already-normalized set of values.
    pub fn new(values: [f64; FEATURE_DIMENSION]) -> Self {
        Self { values }
    }

    /// The normalized values in model input order.
    pub fn values(&self) -> &[f64; FEATURE_DIMENSION] {
        &self.values
    }

    /// The normalized values as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}
