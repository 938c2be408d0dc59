//! Prediction Route

use axum::{extract::State, Json};
use feature_engine::{normalize, validate, RawInputs};
use serde::Serialize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;

/// Response for the predict endpoint
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub shear_modulus: f64,
    pub damping_ratio: f64,
    /// Shear modulus formatted to 4 decimal digits for display
    pub shear_modulus_display: String,
    /// Damping ratio formatted to 4 decimal digits for display
    pub damping_ratio_display: String,
    /// Activator content effective within the pozzolan fraction (%),
    /// informational only
    pub effective_activator_content: f64,
}

/// Run one prediction: validate the raw inputs, normalize, call both
/// models, return both outputs together.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(raw): Json<RawInputs>,
) -> Result<Json<PredictResponse>, ApiError> {
    validate(&raw)?;

    let features = normalize(&raw);
    debug!(?features, "running prediction");

    let prediction = state.engine.predict(&features)?;
    state.prediction_count.fetch_add(1, Ordering::Relaxed);

    Ok(Json(PredictResponse {
        shear_modulus: prediction.shear_modulus,
        damping_ratio: prediction.damping_ratio,
        shear_modulus_display: format!("{:.4}", prediction.shear_modulus),
        damping_ratio_display: format!("{:.4}", prediction.damping_ratio),
        effective_activator_content: raw.effective_activator_content(),
    }))
}
