//! Prediction Payload Validator

use crate::error::{SchemaIssue, ValidationError};
use crate::features::FeatureVector;
use serde_json::Value;
use tracing::debug;

/// Feature count assumed when model metadata does not provide one
pub const DEFAULT_FEATURE_COUNT: usize = 30;

const FEATURES_FIELD: &str = "features";

/// Validates `{"features": [...]}` payloads against the loaded model.
///
/// Checks run in a fixed order: payload shape first, then vector length,
/// then numeric validity. The first failing stage decides the error.
#[derive(Debug, Clone)]
pub struct FeatureValidator {
    expected_count: usize,
}

impl FeatureValidator {
    /// Create a validator expecting `expected_count` features
    pub fn new(expected_count: usize) -> Self {
        Self { expected_count }
    }

    pub fn expected_count(&self) -> usize {
        self.expected_count
    }

    /// Validate a parsed JSON payload into a feature vector
    pub fn validate_payload(&self, payload: &Value) -> Result<FeatureVector, ValidationError> {
        let values = Self::extract_features(payload)?;
        self.validate_features(&values)?;
        debug!("Validated feature vector of length {}", values.len());
        Ok(FeatureVector::new(values))
    }

    /// Check length and finiteness of already-extracted values
    pub fn validate_features(&self, values: &[f64]) -> Result<(), ValidationError> {
        if values.len() != self.expected_count {
            return Err(ValidationError::FeatureCount {
                expected: self.expected_count,
                actual: values.len(),
            });
        }

        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(ValidationError::NonFinite { index });
        }

        Ok(())
    }

    /// Pull the numeric `features` list out of the payload, collecting
    /// every shape problem found
    fn extract_features(payload: &Value) -> Result<Vec<f64>, ValidationError> {
        let object = payload.as_object().ok_or_else(|| {
            ValidationError::Schema(vec![SchemaIssue::new(
                "model_type",
                Vec::new(),
                "Input should be a valid dictionary",
                payload.clone(),
            )])
        })?;

        let field = object.get(FEATURES_FIELD).ok_or_else(|| {
            ValidationError::Schema(vec![SchemaIssue::new(
                "missing",
                vec![Value::from(FEATURES_FIELD)],
                "Field required",
                payload.clone(),
            )])
        })?;

        let items = field.as_array().ok_or_else(|| {
            ValidationError::Schema(vec![SchemaIssue::new(
                "list_type",
                vec![Value::from(FEATURES_FIELD)],
                "Input should be a valid list",
                field.clone(),
            )])
        })?;

        let mut values = Vec::with_capacity(items.len());
        let mut issues = Vec::new();
        for (i, item) in items.iter().enumerate() {
            match coerce_number(item) {
                Ok(v) => values.push(v),
                Err((kind, msg)) => issues.push(SchemaIssue::new(
                    kind,
                    vec![Value::from(FEATURES_FIELD), Value::from(i)],
                    msg,
                    item.clone(),
                )),
            }
        }

        if issues.is_empty() {
            Ok(values)
        } else {
            Err(ValidationError::Schema(issues))
        }
    }
}

/// Read one list element as a float.
///
/// Booleans and numeric strings are accepted (`"1.5"`, `" 2 "`, `"NaN"`,
/// `"-inf"`, `"1e400"`); non-finite results are left for the finiteness
/// check to reject.
fn coerce_number(item: &Value) -> Result<f64, (&'static str, &'static str)> {
    match item {
        Value::Number(n) => n.as_f64().ok_or(("float_type", "Input should be a valid number")),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            (
                "float_parsing",
                "Input should be a valid number, unable to parse string as a number",
            )
        }),
        _ => Err(("float_type", "Input should be a valid number")),
    }
}

impl Default for FeatureValidator {
    fn default() -> Self {
        Self::new(DEFAULT_FEATURE_COUNT)
    }
}
