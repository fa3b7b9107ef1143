//! Diagnosis API Server
//!
//! REST API serving breast-cancer diagnosis predictions from a model
//! loaded once at startup.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use data_validator::FeatureValidator;
use inference_engine::{ArtifactPaths, InferenceEngine, ModelArtifacts, ModelMetadata};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

pub mod config;
mod error;
mod logging;
mod routes;

pub use config::Settings;
pub use error::ApiError;
pub use logging::init_logging;
pub use routes::health::{HealthResponse, ModelAccuracy};

/// A successfully loaded model and everything derived from it
pub struct LoadedModel {
    pub engine: InferenceEngine,
    pub metadata: ModelMetadata,
    pub validator: FeatureValidator,
}

impl LoadedModel {
    pub fn new(artifacts: ModelArtifacts) -> Self {
        let (engine, metadata) = artifacts.into_parts();
        let validator = FeatureValidator::new(metadata.feature_count);
        Self {
            engine,
            metadata,
            validator,
        }
    }
}

/// Application state shared read-only across handlers.
///
/// Built once at startup; `model` is `None` when the artifacts failed to
/// load, and stays that way until restart.
pub struct AppState {
    /// Loaded model, absent in degraded mode
    pub model: Option<LoadedModel>,
    /// Prometheus handle when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    fn build(model: Option<LoadedModel>) -> Self {
        Self {
            model,
            metrics: None,
        }
    }

    /// Load artifacts from disk, falling back to degraded mode on failure
    pub fn load(paths: &ArtifactPaths) -> Self {
        match ModelArtifacts::load(paths) {
            Ok(artifacts) => {
                match artifacts.metadata.accuracy {
                    Some(accuracy) => info!("Model loaded successfully. Accuracy: {}", accuracy),
                    None => info!("Model loaded successfully. Accuracy: N/A"),
                }
                Self::from_artifacts(artifacts)
            }
            Err(e) => {
                error!("Failed to load model artifacts: {}", e);
                Self::degraded()
            }
        }
    }

    /// State serving an already-loaded model
    pub fn from_artifacts(artifacts: ModelArtifacts) -> Self {
        Self::build(Some(LoadedModel::new(artifacts)))
    }

    /// State with no model; every prediction is refused
    pub fn degraded() -> Self {
        Self::build(None)
    }

    /// Attach a Prometheus handle for `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::health::health_check))
        .route("/predict", post(routes::predict::predict))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Prometheus exposition, 404 when metrics are disabled
async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the server with the given settings.
///
/// Logging must already be initialized.
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let mut state = AppState::load(&settings.artifacts.paths());

    if settings.metrics.enabled {
        let handle = PrometheusBuilder::new().install_recorder()?;
        state = state.with_metrics(handle);
    }

    let app = create_router(Arc::new(state));
    let addr = settings.server.addr();

    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
