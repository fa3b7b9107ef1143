//! Health Route

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::AppState;

const SERVICE_MESSAGE: &str = "API de diagnóstico de cáncer de mama";

/// Stored accuracy, or the `"N/A"` sentinel when unknown
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModelAccuracy {
    Known(f64),
    Unavailable(&'static str),
}

impl From<Option<f64>> for ModelAccuracy {
    fn from(accuracy: Option<f64>) -> Self {
        accuracy.map_or(ModelAccuracy::Unavailable("N/A"), ModelAccuracy::Known)
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub model_loaded: bool,
    pub model_accuracy: ModelAccuracy,
}

/// Health check handler: 200 when the model is loaded, 503 otherwise
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    info!("Health check requested");
    metrics::counter!("diagnosis_health_checks_total").increment(1);

    let loaded = state.is_loaded();
    let response = HealthResponse {
        status: if loaded { "ok" } else { "degraded" },
        message: SERVICE_MESSAGE,
        model_loaded: loaded,
        model_accuracy: state.model.as_ref().and_then(|m| m.metadata.accuracy).into(),
    };

    let status = if loaded {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accuracy_sentinel() {
        assert_eq!(serde_json::to_value(ModelAccuracy::from(None)).unwrap(), json!("N/A"));
        assert_eq!(serde_json::to_value(ModelAccuracy::from(Some(0.97))).unwrap(), json!(0.97));
    }
}
