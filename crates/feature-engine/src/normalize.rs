//! Feature Normalization

use crate::bounds::{ACTIVATOR_RANGE, AMPLITUDE_RANGE, POZZOLAN_RANGE, STRESS_RANGE};
use crate::features::FeatureVector;
use crate::inputs::RawInputs;

fn min_max(value: f64, range: (f64, f64)) -> f64 {
    (value - range.0) / (range.1 - range.0)
}

/// Map raw test parameters onto the models' [0, 1] feature scale.
///
/// Pure and deterministic. Domains are not checked here; out-of-domain raw
/// values silently produce entries outside [0, 1], which callers prevent by
/// validating upstream.
pub fn normalize(raw: &RawInputs) -> FeatureVector {
    FeatureVector::new([
        min_max(raw.activator_content, ACTIVATOR_RANGE),
        min_max(raw.pozzolan_content, POZZOLAN_RANGE),
        (f64::from(raw.curing_time) - 1.0) / 2.0,
        min_max(raw.vertical_stress, STRESS_RANGE),
        min_max(raw.loading_amplitude, AMPLITUDE_RANGE),
    ])
}
