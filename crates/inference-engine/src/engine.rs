//! Two-Model Prediction Engine

use crate::regressor::{OnnxRegressor, Regressor};
use crate::InferenceError;
use feature_engine::FeatureVector;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Output of one prediction request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoilPrediction {
    /// Predicted shear modulus
    pub shear_modulus: f64,
    /// Predicted damping ratio
    pub damping_ratio: f64,
}

/// Holds the two loaded regression models for the process lifetime.
///
/// Models are read-only after load, so the engine is safe to share across
/// concurrent requests without locking.
pub struct PredictionEngine {
    shear_model: Box<dyn Regressor>,
    damping_model: Box<dyn Regressor>,
}

impl std::fmt::Debug for PredictionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionEngine").finish_non_exhaustive()
    }
}

impl PredictionEngine {
    /// Load both ONNX model artifacts. Either load failing is fatal.
    pub fn load(shear_path: &Path, damping_path: &Path) -> Result<Self, InferenceError> {
        let shear_model = OnnxRegressor::load(shear_path)?;
        let damping_model = OnnxRegressor::load(damping_path)?;
        info!("Prediction engine ready");
        Ok(Self::new(Box::new(shear_model), Box::new(damping_model)))
    }

    /// Build an engine from already-constructed regressors.
    pub fn new(shear_model: Box<dyn Regressor>, damping_model: Box<dyn Regressor>) -> Self {
        Self {
            shear_model,
            damping_model,
        }
    }

    /// Run both models on one feature vector.
    ///
    /// Both predictions are returned together or the whole request fails;
    /// there is no partial result and no retry.
    pub fn predict(&self, features: &FeatureVector) -> Result<SoilPrediction, InferenceError> {
        let shear_modulus = self.shear_model.predict(features)?;
        let damping_ratio = self.damping_model.predict(features)?;
        debug!(shear_modulus, damping_ratio, "prediction complete");

        Ok(SoilPrediction {
            shear_modulus,
            damping_ratio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRegressor(f64);

    impl Regressor for FixedRegressor {
        fn predict(&self, _features: &FeatureVector) -> Result<f64, InferenceError> {
            Ok(self.0)
        }
    }

    struct FailingRegressor;

    impl Regressor for FailingRegressor {
        fn predict(&self, _features: &FeatureVector) -> Result<f64, InferenceError> {
            Err(InferenceError::Predict("stub failure".to_string()))
        }
    }

    fn features() -> FeatureVector {
        FeatureVector::new([0.5, 0.5, 0.5, 0.5, 0.5])
    }

    #[test]
    fn test_both_outputs_returned_together() {
        let engine = PredictionEngine::new(
            Box::new(FixedRegressor(42.5)),
            Box::new(FixedRegressor(0.0731)),
        );

        let prediction = engine.predict(&features()).unwrap();
        assert_eq!(prediction.shear_modulus, 42.5);
        assert_eq!(prediction.damping_ratio, 0.0731);
    }

    #[test]
    fn test_shear_failure_fails_whole_request() {
        let engine =
            PredictionEngine::new(Box::new(FailingRegressor), Box::new(FixedRegressor(1.0)));
        assert!(engine.predict(&features()).is_err());
    }

    #[test]
    fn test_damping_failure_fails_whole_request() {
        let engine =
            PredictionEngine::new(Box::new(FixedRegressor(1.0)), Box::new(FailingRegressor));
        assert!(engine.predict(&features()).is_err());
    }

    #[test]
    fn test_identical_inputs_are_idempotent() {
        let engine = PredictionEngine::new(
            Box::new(FixedRegressor(12.25)),
            Box::new(FixedRegressor(0.5)),
        );
        let first = engine.predict(&features()).unwrap();
        let second = engine.predict(&features()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_artifact_fails_load() {
        let err = PredictionEngine::load(
            Path::new("/nonexistent/shear.onnx"),
            Path::new("/nonexistent/damping.onnx"),
        )
        .unwrap_err();
        assert!(matches!(err, InferenceError::ModelLoad(_)));
    }
}
