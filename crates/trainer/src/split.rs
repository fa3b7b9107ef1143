//! Stratified train/test split

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;

/// Errors splitting a dataset into train and test rows
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplitError {
    #[error("Test size must be in (0, 1), got {0}")]
    InvalidTestSize(f64),

    #[error("Split of {total} samples left an empty side (train={train}, test={test})")]
    EmptySide {
        total: usize,
        train: usize,
        test: usize,
    },
}

/// Row indices of each side of a split
#[derive(Debug, Clone, PartialEq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Split rows so each class keeps its proportion in both sides.
///
/// `test_size` is the fraction of each class held out, rounded to the
/// nearest row. The same seed always yields the same split.
pub fn stratified_split(
    targets: &Array1<f64>,
    test_size: f64,
    seed: u64,
) -> Result<SplitIndices, SplitError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(SplitError::InvalidTestSize(test_size));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();

    for class in [0.0, 1.0] {
        let mut indices: Vec<usize> = targets
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t == class)
            .map(|(i, _)| i)
            .collect();
        indices.shuffle(&mut rng);

        let n_test = (indices.len() as f64 * test_size).round() as usize;
        test.extend_from_slice(&indices[..n_test]);
        train.extend_from_slice(&indices[n_test..]);
    }

    if train.is_empty() || test.is_empty() {
        return Err(SplitError::EmptySide {
            total: targets.len(),
            train: train.len(),
            test: test.len(),
        });
    }

    train.shuffle(&mut rng);
    test.shuffle(&mut rng);
    Ok(SplitIndices { train, test })
}
