//! Regression Model Loading and Execution

use crate::InferenceError;
use feature_engine::{FeatureVector, FEATURE_DIMENSION};
use std::path::Path;
use tract_onnx::prelude::*;
use tracing::{debug, info};

/// Capability interface for a single-output regression model.
///
/// Keeps the model family swappable: anything that maps the fixed-length
/// feature vector to one scalar can stand behind it.
pub trait Regressor: Send + Sync {
    /// Predict one scalar from the normalized feature vector.
    fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError>;
}

type OnnxPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Regressor backed by a serialized ONNX model, executed with tract.
pub struct OnnxRegressor {
    model: OnnxPlan,
    path: String,
}

impl OnnxRegressor {
    /// Load a model artifact and pin its input to a single 5-feature row.
    ///
    /// A missing or corrupt artifact fails here, once, at startup.
    pub fn load(path: &Path) -> Result<Self, InferenceError> {
        info!("Loading regression model from {}", path.display());
        let model = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|m| m.with_input_fact(0, f32::fact([1, FEATURE_DIMENSION]).into()))
            .and_then(|m| m.into_optimized())
            .and_then(|m| m.into_runnable())
            .map_err(|e| InferenceError::ModelLoad(format!("{}: {e}", path.display())))?;

        Ok(Self {
            model,
            path: path.display().to_string(),
        })
    }

    /// Path the model was loaded from.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Regressor for OnnxRegressor {
    fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let row: Vec<f32> = features.as_slice().iter().map(|&v| v as f32).collect();
        let input = tract_ndarray::Array2::from_shape_vec((1, FEATURE_DIMENSION), row)
            .map_err(|e| InferenceError::Predict(e.to_string()))?;

        let outputs = self
            .model
            .run(tvec!(Tensor::from(input).into()))
            .map_err(|e| InferenceError::Predict(e.to_string()))?;

        let output = outputs.first().ok_or(InferenceError::EmptyOutput)?;
        let output = output
            .cast_to::<f32>()
            .map_err(|e| InferenceError::Predict(e.to_string()))?;
        let value = output
            .as_slice::<f32>()
            .map_err(|e| InferenceError::Predict(e.to_string()))?
            .first()
            .copied()
            .ok_or(InferenceError::EmptyOutput)?;

        debug!("{} predicted {value}", self.path);
        Ok(f64::from(value))
    }
}
