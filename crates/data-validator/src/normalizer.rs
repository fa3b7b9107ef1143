//! Feature Standardization

use crate::error::ScalerError;
use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fitted z-score scaler: `(x - mean) / scale` per feature column.
///
/// `scale` is the population standard deviation of the training column,
/// replaced by 1.0 for constant columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Build a scaler from precomputed parameters
    pub fn from_params(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ScalerError> {
        if mean.len() != scale.len() {
            return Err(ScalerError::DimensionMismatch {
                expected: mean.len(),
                actual: scale.len(),
            });
        }
        let scale = scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect();
        Ok(Self { mean, scale })
    }

    /// Fit column means and standard deviations on a sample matrix
    pub fn fit(x: &Array2<f64>) -> Result<Self, ScalerError> {
        let mean = x.mean_axis(Axis(0)).ok_or(ScalerError::EmptyInput)?;
        let std = x.std_axis(Axis(0), 0.0);
        debug!("Fitted scaler on {} samples x {} features", x.nrows(), x.ncols());
        Self::from_params(mean.to_vec(), std.to_vec())
    }

    /// Standardize every row of `x`
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>, ScalerError> {
        if x.ncols() != self.mean.len() {
            return Err(ScalerError::DimensionMismatch {
                expected: self.mean.len(),
                actual: x.ncols(),
            });
        }
        let mean = ArrayView1::from(self.mean.as_slice());
        let scale = ArrayView1::from(self.scale.as_slice());
        Ok((x - &mean) / &scale)
    }

    /// Fit and transform in one step
    pub fn fit_transform(x: &Array2<f64>) -> Result<(Self, Array2<f64>), ScalerError> {
        let scaler = Self::fit(x)?;
        let scaled = scaler.transform(x)?;
        Ok((scaler, scaled))
    }

    /// Number of features the scaler was fitted on
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }
}
