//! Diagnosis Inference Engine
//!
//! Loads the trained classifier, scaler and metadata produced by the
//! trainer, and runs the scale-then-classify pipeline for single samples.

mod artifacts;
mod classifier;
mod diagnosis;
mod engine;

pub use artifacts::{
    ArtifactError, ArtifactPaths, ModelArtifacts, ModelMetadata, METADATA_FILE, MODEL_FILE,
    SCALER_FILE,
};
pub use classifier::{LogisticRegression, TrainingOptions};
pub use diagnosis::{format_prediction, Confidence, Diagnosis, PredictionResult};
pub use engine::{InferenceEngine, InferenceResult};

use data_validator::ScalerError;
use thiserror::Error;

/// Errors during training or inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: String, actual: String },
    #[error("Scaling failed: {0}")]
    Scaling(#[from] ScalerError),
    #[error("Training failed: {0}")]
    TrainingFailed(String),
}
