//! Diagnosis Model Trainer
//!
//! Fits the standard scaler and logistic regression on the breast-cancer
//! CSV and writes the artifacts the API loads at startup.

pub mod dataset;
pub mod report;
pub mod split;

pub use dataset::{load_csv, parse_csv, Dataset, DatasetError};
pub use report::{ClassMetrics, ClassificationReport};
pub use split::{stratified_split, SplitError, SplitIndices};

use data_validator::{ScalerError, StandardScaler};
use inference_engine::{
    ArtifactError, ArtifactPaths, InferenceError, LogisticRegression, ModelArtifacts, ModelMetadata,
    TrainingOptions,
};
use ndarray::Axis;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

/// Errors during a training run
#[derive(Debug, Error)]
pub enum TrainError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Split(#[from] SplitError),
    #[error(transparent)]
    Scaling(#[from] ScalerError),
    #[error(transparent)]
    Model(#[from] InferenceError),
    #[error(transparent)]
    Artifacts(#[from] ArtifactError),
}

/// Settings for one training run
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Input CSV
    pub data: PathBuf,
    /// Directory receiving the artifacts
    pub output_dir: PathBuf,
    /// Fraction of each class held out for evaluation
    pub test_size: f64,
    /// Shuffle seed
    pub seed: u64,
    pub options: TrainingOptions,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data: PathBuf::from("data/breast-cancer.csv"),
            output_dir: PathBuf::from("model"),
            test_size: 0.2,
            seed: 42,
            options: TrainingOptions::default(),
        }
    }
}

/// Outcome of a training run
#[derive(Debug, Clone)]
pub struct TrainingSummary {
    pub metadata: ModelMetadata,
    pub report: ClassificationReport,
    pub paths: ArtifactPaths,
}

/// Fit on a dataset already in memory; nothing is written
pub fn fit_dataset(
    dataset: &Dataset,
    config: &TrainConfig,
) -> Result<(ModelArtifacts, ClassificationReport), TrainError> {
    let (benign, malignant) = dataset.class_counts();
    info!("Class distribution: benign={}, malignant={}", benign, malignant);

    let split = stratified_split(&dataset.targets, config.test_size, config.seed)?;
    info!("Training set: {} samples, test set: {} samples", split.train.len(), split.test.len());

    let x_train = dataset.features.select(Axis(0), &split.train);
    let y_train = dataset.targets.select(Axis(0), &split.train);
    let x_test = dataset.features.select(Axis(0), &split.test);
    let y_test = dataset.targets.select(Axis(0), &split.test);

    let (scaler, x_train) = StandardScaler::fit_transform(&x_train)?;
    let x_test = scaler.transform(&x_test)?;

    let classifier = LogisticRegression::fit(&x_train, &y_train, &config.options)?;
    let report = ClassificationReport::compute(&y_test, &classifier.predict(&x_test)?);
    info!("Model accuracy: {:.4}", report.accuracy);

    let metadata = ModelMetadata {
        accuracy: Some(report.accuracy),
        feature_count: dataset.n_features(),
        train_size: Some(split.train.len()),
        test_size: Some(split.test.len()),
        feature_names: dataset.feature_names.clone(),
        trained_at: Some(chrono::Utc::now()),
    };

    Ok((
        ModelArtifacts {
            classifier,
            scaler,
            metadata,
        },
        report,
    ))
}

/// Load the CSV, train, evaluate and save the artifacts
pub fn train(config: &TrainConfig) -> Result<TrainingSummary, TrainError> {
    let dataset = load_csv(&config.data)?;
    let (artifacts, report) = fit_dataset(&dataset, config)?;

    let paths = ArtifactPaths::in_dir(&config.output_dir);
    artifacts.save(&paths)?;

    Ok(TrainingSummary {
        metadata: artifacts.metadata,
        report,
        paths,
    })
}
