//! Validation Error Types

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// A single schema problem found in a prediction payload.
///
/// Serialized as one entry of the `details` array of a 422 response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaIssue {
    /// Machine-readable issue kind (`missing`, `list_type`, ...)
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Path to the offending field: field names and list indices
    pub loc: Vec<Value>,
    /// Human-readable description
    pub msg: String,
    /// The offending input value
    pub input: Value,
}

impl SchemaIssue {
    pub(crate) fn new(kind: &'static str, loc: Vec<Value>, msg: &str, input: Value) -> Self {
        Self {
            kind,
            loc,
            msg: msg.to_string(),
            input,
        }
    }
}

/// Errors during payload validation
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// Payload shape does not match `{"features": [number, ...]}`
    #[error("payload does not match schema ({} issue(s))", .0.len())]
    Schema(Vec<SchemaIssue>),

    /// Feature vector has the wrong length
    #[error("Se esperaban {expected} features, recibidas {actual}")]
    FeatureCount { expected: usize, actual: usize },

    /// Feature vector contains NaN or an infinity
    #[error("Features contienen valores inválidos")]
    NonFinite { index: usize },
}

impl ValidationError {
    /// Whether this is a shape error rather than a value error
    pub fn is_schema(&self) -> bool {
        matches!(self, ValidationError::Schema(_))
    }

    /// Structured issues for schema errors, empty otherwise
    pub fn details(&self) -> &[SchemaIssue] {
        match self {
            ValidationError::Schema(issues) => issues,
            _ => &[],
        }
    }
}

/// Errors from fitting or applying the standard scaler
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScalerError {
    #[error("Scaler expects {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Cannot fit scaler on an empty sample set")]
    EmptyInput,
}
