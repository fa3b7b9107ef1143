//! Feature Vector

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Ordered feature values describing one sample to classify
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Raw feature values, in the order the model was trained on
    pub values: Vec<f64>,
}

impl FeatureVector {
    /// Wrap raw values without checking them
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Reshape into a single-row matrix
    pub fn to_row(&self) -> Array2<f64> {
        Array2::from_shape_fn((1, self.values.len()), |(_, j)| self.values[j])
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}
