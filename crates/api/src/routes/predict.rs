//! Prediction Route

use axum::{body::Bytes, extract::State, Json};
use data_validator::parse_lenient;
use inference_engine::{format_prediction, PredictionResult};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, info_span};
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

/// Predict handler.
///
/// The raw body is taken as bytes so that malformed JSON gets the
/// service's own 400 response rather than the extractor's rejection.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PredictionResult>, ApiError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("predict", %request_id);
    span.in_scope(|| run_prediction(&state, &body)).map(Json)
}

fn run_prediction(state: &AppState, body: &[u8]) -> Result<PredictionResult, ApiError> {
    let model = state.model.as_ref().ok_or_else(|| {
        error!("Prediction attempted without a loaded model");
        ApiError::ModelUnavailable
    })?;

    let payload = parse_body(body)?;
    let features = model.validator.validate_payload(&payload)?;
    let raw = model.engine.predict(&features)?;
    let result = format_prediction(&raw);

    info!(latency_us = raw.latency_us, "Prediction: {}", result.prediction.as_str());
    metrics::counter!("diagnosis_predictions_total", "diagnosis" => result.prediction.as_str())
        .increment(1);

    Ok(result)
}

/// Parse the body as JSON, treating empty values (`null`, `{}`, `[]`,
/// `""`, `false`, `0`) the same as a missing body
fn parse_body(body: &[u8]) -> Result<Value, ApiError> {
    let text = std::str::from_utf8(body).map_err(|e| {
        debug!("Request body is not UTF-8: {}", e);
        ApiError::MissingBody
    })?;
    let payload = parse_lenient(text).map_err(|e| {
        debug!("Request body is not JSON: {}", e);
        ApiError::MissingBody
    })?;

    let empty = match &payload {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    };

    if empty {
        Err(ApiError::MissingBody)
    } else {
        Ok(payload)
    }
}
