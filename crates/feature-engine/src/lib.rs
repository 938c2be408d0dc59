//! Soil Feature Engineering
//!
//! Raw test-parameter model, domain bounds, and the pure normalization
//! step that produces the model feature vector.

mod bounds;
mod features;
mod inputs;
mod normalize;

pub use bounds::{
    validate, BoundsError, ACTIVATOR_RANGE, AMPLITUDE_RANGE, CURING_DAYS, POZZOLAN_RANGE,
    STRESS_RANGE,
};
pub use features::{FeatureVector, FEATURE_DIMENSION};
pub use inputs::RawInputs;
pub use normalize::normalize;
