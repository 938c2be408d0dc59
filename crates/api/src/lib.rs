//! Soil Prediction API Server
//!
//! Serves the single-page input form and the JSON prediction endpoint.

use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod error;
mod routes;
mod settings;

pub use error::ApiError;
pub use settings::Settings;

use feature_engine::FEATURE_DIMENSION;
use inference_engine::PredictionEngine;

/// Application state shared across handlers.
///
/// The engine is read-only after startup; the only mutable piece is a
/// monotonic request counter.
pub struct AppState {
    /// Loaded prediction engine
    pub engine: PredictionEngine,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
    /// Number of predictions served since startup
    pub prediction_count: AtomicU64,
}

impl AppState {
    /// Create application state around a loaded engine
    pub fn new(engine: PredictionEngine) -> Self {
        Self {
            engine,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            prediction_count: AtomicU64::new(0),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: ComponentStatus,
    pub metrics: SystemMetrics,
}

/// Component status
#[derive(Debug, Serialize)]
pub struct ComponentStatus {
    pub models: ComponentHealth,
}

/// Individual component health
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub status: String,
    pub feature_dimension: usize,
}

/// System metrics
#[derive(Debug, Serialize)]
pub struct SystemMetrics {
    pub prediction_count: u64,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/predict", post(routes::predict::predict))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the input form page
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        components: ComponentStatus {
            models: ComponentHealth {
                status: "loaded".to_string(),
                feature_dimension: FEATURE_DIMENSION,
            },
        },
        metrics: SystemMetrics {
            prediction_count: state.prediction_count.load(Ordering::Relaxed),
        },
    };

    Json(response)
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Load both models and run the server until shutdown.
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    use anyhow::Context;

    let engine = PredictionEngine::load(
        Path::new(&settings.shear_model_path),
        Path::new(&settings.damping_model_path),
    )
    .context("loading regression models")?;

    let state = Arc::new(AppState::new(engine));
    let app = create_router(state);

    info!("Starting API server on {}", settings.bind_addr);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("binding {}", settings.bind_addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use feature_engine::FeatureVector;
    use http_body_util::BodyExt;
    use inference_engine::{InferenceError, Regressor};
    use tower::ServiceExt;

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

    fn test_state(shear: f64, damping: f64) -> Arc<AppState> {
        Arc::new(AppState::new(PredictionEngine::new(
            Box::new(FixedRegressor(shear)),
            Box::new(FixedRegressor(damping)),
        )))
    }

    fn predict_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    const VALID_BODY: &str = r#"{
        "activator_content": 6.0,
        "pozzolan_content": 20.0,
        "curing_time": 1,
        "vertical_stress": 100.0,
        "loading_amplitude": 0.1
    }"#;

    #[tokio::test]
    async fn test_predict_returns_both_outputs() {
        let app = create_router(test_state(42.5, 0.0731));

        let response = app.oneshot(predict_request(VALID_BODY)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["shear_modulus"], 42.5);
        assert_eq!(json["damping_ratio"], 0.0731);
        assert_eq!(json["shear_modulus_display"], "42.5000");
        assert_eq!(json["damping_ratio_display"], "0.0731");
        assert!((json["effective_activator_content"].as_f64().unwrap() - 1.2).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_out_of_domain_input_is_rejected() {
        let app = create_router(test_state(1.0, 1.0));

        let body = r#"{
            "activator_content": 12.0,
            "pozzolan_content": 20.0,
            "curing_time": 1,
            "vertical_stress": 100.0,
            "loading_amplitude": 0.1
        }"#;
        let response = app.oneshot(predict_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].as_str().unwrap().contains("activator_content"));
    }

    #[tokio::test]
    async fn test_invalid_curing_time_is_rejected() {
        let app = create_router(test_state(1.0, 1.0));

        let body = r#"{
            "activator_content": 6.0,
            "pozzolan_content": 20.0,
            "curing_time": 5,
            "vertical_stress": 100.0,
            "loading_amplitude": 0.1
        }"#;
        let response = app.oneshot(predict_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_predict_failure_withholds_both_outputs() {
        let state = Arc::new(AppState::new(PredictionEngine::new(
            Box::new(FixedRegressor(42.5)),
            Box::new(FailingRegressor),
        )));
        let app = create_router(state);

        let response = app.oneshot(predict_request(VALID_BODY)).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json.get("shear_modulus").is_none());
        assert!(json.get("damping_ratio").is_none());
    }

    #[tokio::test]
    async fn test_health_reports_prediction_count() {
        let state = test_state(1.0, 2.0);
        let app = create_router(state.clone());

        let response = app
            .clone()
            .oneshot(predict_request(VALID_BODY))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["metrics"]["prediction_count"], 1);
        assert_eq!(json["components"]["models"]["feature_dimension"], 5);
    }

    #[tokio::test]
    async fn test_index_serves_form() {
        let app = create_router(test_state(1.0, 2.0));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let page = String::from_utf8(body.to_vec()).unwrap();
        assert!(page.contains("Shear Modulus"));
        assert!(page.contains("/api/v1/predict"));
    }
}
