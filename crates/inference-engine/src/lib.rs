//! ONNX Regression Inference
//!
//! Loads the two pre-trained soil property models and runs them behind a
//! uniform regressor interface using tract-onnx.

mod engine;
mod regressor;

pub use engine::{PredictionEngine, SoilPrediction};
pub use regressor::{OnnxRegressor, Regressor};

use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model load failed: {0}")]
    ModelLoad(String),
    #[error("Inference failed: {0}")]
    Predict(String),
    #[error("Model produced no scalar output")]
    EmptyOutput,
}
