//! Model Artifact Store
//!
//! Three files make up a model: the classifier and the scaler as postcard
//! blobs, and a JSON metadata side-car. The classifier and scaler are
//! required; missing metadata falls back to defaults.

use crate::classifier::LogisticRegression;
use crate::engine::InferenceEngine;
use chrono::{DateTime, Utc};
use data_validator::{StandardScaler, DEFAULT_FEATURE_COUNT};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Default classifier file name
pub const MODEL_FILE: &str = "breast_cancer_model.bin";
/// Default scaler file name
pub const SCALER_FILE: &str = "scaler.bin";
/// Default metadata file name
pub const METADATA_FILE: &str = "model_metadata.json";

/// Errors loading or saving artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {}", .path.display())]
    Missing { path: PathBuf },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to decode {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("Invalid metadata in {}: {source}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode artifact: {0}")]
    Encode(String),
}

fn default_feature_count() -> usize {
    DEFAULT_FEATURE_COUNT
}

/// Side-car record written by the trainer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Test-set accuracy
    #[serde(default)]
    pub accuracy: Option<f64>,
    /// Number of features the model expects
    #[serde(default = "default_feature_count")]
    pub feature_count: usize,
    #[serde(default)]
    pub train_size: Option<usize>,
    #[serde(default)]
    pub test_size: Option<usize>,
    /// Feature column names in model order
    #[serde(default)]
    pub feature_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<DateTime<Utc>>,
}

impl Default for ModelMetadata {
    fn default() -> Self {
        Self {
            accuracy: None,
            feature_count: DEFAULT_FEATURE_COUNT,
            train_size: None,
            test_size: None,
            feature_names: Vec::new(),
            trained_at: None,
        }
    }
}

/// Locations of the three artifact files
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
    pub metadata: PathBuf,
}

impl ArtifactPaths {
    /// Default file names inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join(MODEL_FILE),
            scaler: dir.join(SCALER_FILE),
            metadata: dir.join(METADATA_FILE),
        }
    }
}

/// A complete, loaded model
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub classifier: LogisticRegression,
    pub scaler: StandardScaler,
    pub metadata: ModelMetadata,
}

impl ModelArtifacts {
    /// Load classifier, scaler, then metadata.
    ///
    /// Metadata is only read once the other two succeed.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let classifier: LogisticRegression = read_blob(&paths.model)?;
        info!("Classifier loaded from {}", paths.model.display());

        let scaler: StandardScaler = read_blob(&paths.scaler)?;
        info!("Scaler loaded from {}", paths.scaler.display());

        let metadata = if paths.metadata.exists() {
            let bytes = read_file(&paths.metadata)?;
            let metadata = serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Metadata {
                path: paths.metadata.clone(),
                source,
            })?;
            info!("Metadata loaded from {}", paths.metadata.display());
            metadata
        } else {
            info!("No metadata at {}, using defaults", paths.metadata.display());
            ModelMetadata::default()
        };

        Ok(Self {
            classifier,
            scaler,
            metadata,
        })
    }

    /// Write all three artifacts, creating parent directories
    pub fn save(&self, paths: &ArtifactPaths) -> Result<(), ArtifactError> {
        write_file(&paths.model, &encode(&self.classifier)?)?;
        write_file(&paths.scaler, &encode(&self.scaler)?)?;
        let metadata = serde_json::to_vec_pretty(&self.metadata)
            .map_err(|e| ArtifactError::Encode(e.to_string()))?;
        write_file(&paths.metadata, &metadata)?;
        info!(
            "Saved model artifacts: {}, {}, {}",
            paths.model.display(),
            paths.scaler.display(),
            paths.metadata.display()
        );
        Ok(())
    }

    /// Split into the inference pipeline and its metadata
    pub fn into_parts(self) -> (InferenceEngine, ModelMetadata) {
        (InferenceEngine::new(self.scaler, self.classifier), self.metadata)
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, ArtifactError> {
    std::fs::read(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ArtifactError::Missing {
                path: path.to_path_buf(),
            }
        } else {
            ArtifactError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

fn read_blob<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = read_file(path)?;
    postcard::from_bytes(&bytes).map_err(|e| ArtifactError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, ArtifactError> {
    postcard::to_allocvec(value).map_err(|e| ArtifactError::Encode(e.to_string()))
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ArtifactError> {
    let io_err = |source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, bytes).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifacts() -> ModelArtifacts {
        ModelArtifacts {
            classifier: LogisticRegression::from_weights(vec![0.5, -0.25, 1.0], 0.1),
            scaler: StandardScaler::from_params(vec![1.0, 2.0, 3.0], vec![0.5, 1.5, 2.0]).unwrap(),
            metadata: ModelMetadata {
                accuracy: Some(0.9737),
                feature_count: 3,
                train_size: Some(8),
                test_size: Some(2),
                feature_names: vec!["a".into(), "b".into(), "c".into()],
                trained_at: None,
            },
        }
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::in_dir(dir.path().join("model"));
        artifacts().save(&paths).unwrap();

        let loaded = ModelArtifacts::load(&paths).unwrap();
        assert_eq!(loaded.classifier, artifacts().classifier);
        assert_eq!(loaded.scaler, artifacts().scaler);
        assert_eq!(loaded.metadata, artifacts().metadata);
    }

    #[test]
    fn test_missing_metadata_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::in_dir(dir.path());
        artifacts().save(&paths).unwrap();
        std::fs::remove_file(&paths.metadata).unwrap();

        let loaded = ModelArtifacts::load(&paths).unwrap();
        assert_eq!(loaded.metadata, ModelMetadata::default());
        assert_eq!(loaded.metadata.feature_count, 30);
        assert!(loaded.metadata.accuracy.is_none());
    }

    #[test]
    fn test_partial_metadata_defaults_missing_fields() {
        let metadata: ModelMetadata = serde_json::from_str(r#"{"accuracy": 0.95}"#).unwrap();
        assert_eq!(metadata.accuracy, Some(0.95));
        assert_eq!(metadata.feature_count, 30);
        assert!(metadata.feature_names.is_empty());
    }

    #[test]
    fn test_missing_classifier_fails() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::in_dir(dir.path());
        artifacts().save(&paths).unwrap();
        std::fs::remove_file(&paths.model).unwrap();

        let err = ModelArtifacts::load(&paths).unwrap_err();
        assert!(matches!(err, ArtifactError::Missing { path } if path == paths.model));
    }

    #[test]
    fn test_corrupt_scaler_fails() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::in_dir(dir.path());
        artifacts().save(&paths).unwrap();
        std::fs::write(&paths.scaler, [0xFF]).unwrap();

        let err = ModelArtifacts::load(&paths).unwrap_err();
        assert!(matches!(err, ArtifactError::Decode { .. }));
    }

    #[test]
    fn test_corrupt_metadata_fails() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::in_dir(dir.path());
        artifacts().save(&paths).unwrap();
        std::fs::write(&paths.metadata, "{not json").unwrap();

        let err = ModelArtifacts::load(&paths).unwrap_err();
        assert!(matches!(err, ArtifactError::Metadata { .. }));
    }
}
