//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use data_validator::{SchemaIssue, ValidationError};
use inference_engine::InferenceError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Failures of the prediction endpoint
#[derive(Debug, Error)]
pub enum ApiError {
    /// Artifacts did not load at startup
    #[error("model not loaded")]
    ModelUnavailable,

    /// Body absent, not JSON, or empty
    #[error("request body is missing or not JSON")]
    MissingBody,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Scaling or classification failed on validated input
    #[error(transparent)]
    Internal(#[from] InferenceError),
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a [SchemaIssue]>,
}

impl ErrorBody<'_> {
    fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::ModelUnavailable => "unavailable",
            ApiError::MissingBody => "missing_body",
            ApiError::Validation(e) if e.is_schema() => "schema",
            ApiError::Validation(_) => "semantic",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        metrics::counter!("diagnosis_prediction_errors_total", "kind" => self.kind()).increment(1);

        match &self {
            ApiError::ModelUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorBody::message("Modelo no disponible")),
            )
                .into_response(),
            ApiError::MissingBody => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::message("No se proporcionaron datos JSON")),
            )
                .into_response(),
            ApiError::Validation(e) if e.is_schema() => {
                warn!("Validation error: {:?}", e.details());
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ErrorBody {
                        error: "Datos inválidos".to_string(),
                        details: Some(e.details()),
                    }),
                )
                    .into_response()
            }
            ApiError::Validation(e) => {
                warn!("Invalid feature data: {}", e);
                (StatusCode::BAD_REQUEST, Json(ErrorBody::message(e.to_string()))).into_response()
            }
            ApiError::Internal(e) => {
                error!("Unexpected inference error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody::message("Error interno del servidor")),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::ModelUnavailable, StatusCode::SERVICE_UNAVAILABLE),
            (ApiError::MissingBody, StatusCode::BAD_REQUEST),
            (
                ApiError::Validation(ValidationError::Schema(Vec::new())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::Validation(ValidationError::FeatureCount { expected: 30, actual: 3 }),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Validation(ValidationError::NonFinite { index: 0 }),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Internal(InferenceError::InferenceFailed("boom".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
