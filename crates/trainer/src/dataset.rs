//! Breast-cancer CSV loading

use ndarray::{Array1, Array2};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Target column
pub const DIAGNOSIS_COLUMN: &str = "diagnosis";
/// Columns carried by the CSV that are not features
pub const DISCARDED_COLUMNS: [&str; 2] = ["id", "Unnamed: 32"];

/// Errors reading the training CSV
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset not found at {}", .0.display())]
    NotFound(PathBuf),
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Dataset is empty")]
    Empty,
    #[error("Column 'diagnosis' not found")]
    MissingDiagnosis,
    #[error("Row {row}: unknown diagnosis {value:?}, expected M or B")]
    UnknownDiagnosis { row: usize, value: String },
    #[error("Row {row}: column {column} has non-numeric value {value:?}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
    #[error("Row {row}: expected {expected} fields, got {actual}")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Feature matrix with 0/1 targets (1 = malignant)
#[derive(Debug, Clone)]
pub struct Dataset {
    pub feature_names: Vec<String>,
    pub features: Array2<f64>,
    pub targets: Array1<f64>,
}

impl Dataset {
    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Number of (benign, malignant) samples
    pub fn class_counts(&self) -> (usize, usize) {
        let malignant = self.targets.iter().filter(|&&t| t == 1.0).count();
        (self.targets.len() - malignant, malignant)
    }
}

/// Read and parse the CSV at `path`
pub fn load_csv(path: &Path) -> Result<Dataset, DatasetError> {
    let text = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            DatasetError::NotFound(path.to_path_buf())
        } else {
            DatasetError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let dataset = parse_csv(&text)?;
    info!(
        "Loaded dataset: {} rows, {} features",
        dataset.n_samples(),
        dataset.n_features()
    );
    Ok(dataset)
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split(',')
        .map(|field| field.trim().trim_matches('"'))
        .collect()
}

/// Parse CSV text with a header row.
///
/// Fields are comma-separated without embedded commas; `id` and
/// `Unnamed: 32` are dropped and `diagnosis` becomes the target.
pub fn parse_csv(text: &str) -> Result<Dataset, DatasetError> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = lines.next().ok_or(DatasetError::Empty)?;
    let columns = split_fields(header);

    let diagnosis_idx = columns
        .iter()
        .position(|c| *c == DIAGNOSIS_COLUMN)
        .ok_or(DatasetError::MissingDiagnosis)?;
    let feature_idx: Vec<usize> = (0..columns.len())
        .filter(|&i| i != diagnosis_idx && !DISCARDED_COLUMNS.iter().any(|d| *d == columns[i]))
        .collect();
    let feature_names = feature_idx.iter().map(|&i| columns[i].to_string()).collect();

    let mut values = Vec::new();
    let mut targets = Vec::new();
    for (line_no, line) in lines {
        let row = line_no + 1;
        let fields = split_fields(line);
        if fields.len() != columns.len() {
            return Err(DatasetError::RowLength {
                row,
                expected: columns.len(),
                actual: fields.len(),
            });
        }

        let target = match fields[diagnosis_idx] {
            "M" => 1.0,
            "B" => 0.0,
            other => {
                return Err(DatasetError::UnknownDiagnosis {
                    row,
                    value: other.to_string(),
                })
            }
        };
        targets.push(target);

        for &i in &feature_idx {
            let value = fields[i].parse::<f64>().map_err(|_| DatasetError::InvalidValue {
                row,
                column: columns[i].to_string(),
                value: fields[i].to_string(),
            })?;
            values.push(value);
        }
    }

    if targets.is_empty() {
        return Err(DatasetError::Empty);
    }

    let features = Array2::from_shape_vec((targets.len(), feature_idx.len()), values)
        .map_err(|_| DatasetError::Empty)?;

    Ok(Dataset {
        feature_names,
        features,
        targets: Array1::from(targets),
    })
}
