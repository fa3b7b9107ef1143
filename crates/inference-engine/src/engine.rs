//! Inference Pipeline

use crate::classifier::LogisticRegression;
use crate::InferenceError;
use data_validator::{FeatureVector, StandardScaler};
use tracing::{debug, info, warn};

/// Raw output of a single-sample inference
#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// Predicted class, 0 or 1
    pub class: u8,
    /// `[P(class=0), P(class=1)]`
    pub probabilities: [f64; 2],
    /// Time spent scaling and classifying, in microseconds
    pub latency_us: u64,
}

/// Scale-then-classify pipeline over a fitted scaler and classifier.
///
/// Inputs are expected to be validated already; any failure here means
/// the scaler and classifier do not fit together.
pub struct InferenceEngine {
    scaler: StandardScaler,
    classifier: LogisticRegression,
}

impl InferenceEngine {
    /// Create an engine from loaded artifacts
    pub fn new(scaler: StandardScaler, classifier: LogisticRegression) -> Self {
        if scaler.n_features() != classifier.n_features() {
            warn!(
                "Scaler expects {} features but classifier expects {}",
                scaler.n_features(),
                classifier.n_features()
            );
        }
        info!("Creating inference engine for {} features", classifier.n_features());
        Self { scaler, classifier }
    }

    /// Run inference on a validated feature vector
    pub fn predict(&self, features: &FeatureVector) -> Result<InferenceResult, InferenceError> {
        let start = std::time::Instant::now();

        let row = features.to_row();
        let scaled = self.scaler.transform(&row)?;
        if let Some(index) = scaled.iter().position(|v| !v.is_finite()) {
            return Err(InferenceError::InferenceFailed(format!(
                "scaled feature {} is not finite",
                index
            )));
        }

        let class = self.classifier.predict(&scaled)?;
        let proba = self.classifier.predict_proba(&scaled)?;

        let class = *class.first().ok_or_else(|| {
            InferenceError::InferenceFailed("classifier returned no prediction".to_string())
        })?;
        let probabilities = [proba[[0, 0]], proba[[0, 1]]];
        if probabilities.iter().any(|p| !p.is_finite()) {
            return Err(InferenceError::InferenceFailed(format!(
                "classifier produced non-finite probabilities {:?}",
                probabilities
            )));
        }

        let latency_us = start.elapsed().as_micros() as u64;
        debug!("Inference completed in {}us", latency_us);

        Ok(InferenceResult {
            class,
            probabilities,
            latency_us,
        })
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn classifier(&self) -> &LogisticRegression {
        &self.classifier
    }
}
