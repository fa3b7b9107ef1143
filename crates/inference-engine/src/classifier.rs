//! Logistic Regression Classifier

use crate::InferenceError;
use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Gradient descent settings for [`LogisticRegression::fit`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingOptions {
    /// Inverse L2 regularization strength
    pub c: f64,
    /// Maximum gradient descent iterations
    pub max_iter: usize,
    /// Stop once the gradient norm drops below this
    pub tol: f64,
    /// Step size
    pub learning_rate: f64,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 1000,
            tol: 1e-6,
            learning_rate: 0.1,
        }
    }
}

/// Binary logistic regression over standardized features.
///
/// Class 1 is predicted when `P(class=1) > 0.5`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    coefficients: Vec<f64>,
    intercept: f64,
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl LogisticRegression {
    /// Build a model from known weights
    pub fn from_weights(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Fit on `x` (samples x features) against 0/1 targets `y`.
    ///
    /// Minimizes mean log-loss plus `|w|^2 / (2 * c * n)`; the intercept is
    /// not regularized.
    pub fn fit(
        x: &Array2<f64>,
        y: &Array1<f64>,
        options: &TrainingOptions,
    ) -> Result<Self, InferenceError> {
        let n_samples = x.nrows();
        let n_features = x.ncols();

        if n_samples != y.len() {
            return Err(InferenceError::InvalidInputShape {
                expected: format!("{} targets", n_samples),
                actual: format!("{} targets", y.len()),
            });
        }
        if n_samples == 0 {
            return Err(InferenceError::TrainingFailed("no training samples".to_string()));
        }
        if options.c <= 0.0 {
            return Err(InferenceError::TrainingFailed(format!(
                "regularization parameter c must be positive, got {}",
                options.c
            )));
        }

        let alpha = 1.0 / (options.c * n_samples as f64);
        let lr = options.learning_rate;
        let mut weights = Array1::<f64>::zeros(n_features);
        let mut bias = 0.0;
        let mut iterations = 0;

        for _ in 0..options.max_iter {
            iterations += 1;

            let predictions = (x.dot(&weights) + bias).mapv(sigmoid);
            let errors = &predictions - y;
            let dw = x.t().dot(&errors) / n_samples as f64 + alpha * &weights;
            let db = errors.mean().unwrap_or(0.0);

            let grad_norm = (dw.mapv(|v| v * v).sum() + db * db).sqrt();
            if grad_norm < options.tol {
                debug!("Converged after {} iterations (grad norm {:.2e})", iterations, grad_norm);
                break;
            }

            weights = weights - lr * dw;
            bias -= lr * db;
        }

        info!(
            "Fitted logistic regression: {} samples, {} features, {} iterations",
            n_samples, n_features, iterations
        );

        Ok(Self {
            coefficients: weights.to_vec(),
            intercept: bias,
        })
    }

    /// Number of input features
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Raw linear scores `x . w + b`
    pub fn decision_function(&self, x: &Array2<f64>) -> Result<Array1<f64>, InferenceError> {
        if x.ncols() != self.coefficients.len() {
            return Err(InferenceError::InvalidInputShape {
                expected: format!("{} features", self.coefficients.len()),
                actual: format!("{} features", x.ncols()),
            });
        }
        let weights = ArrayView1::from(self.coefficients.as_slice());
        Ok(x.dot(&weights) + self.intercept)
    }

    /// Class probabilities, one `[P(0), P(1)]` row per sample
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>, InferenceError> {
        let positive = self.decision_function(x)?.mapv(sigmoid);
        let negative = positive.mapv(|p| 1.0 - p);
        ndarray::stack(Axis(1), &[negative.view(), positive.view()])
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))
    }

    /// Predicted classes (0 or 1) for every sample
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<u8>, InferenceError> {
        Ok(self.decision_function(x)?.mapv(|z| u8::from(z > 0.0)))
    }

    /// Fraction of samples whose predicted class matches `y`
    pub fn score(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<f64, InferenceError> {
        let predictions = self.predict(x)?;
        if predictions.is_empty() {
            return Ok(0.0);
        }
        let correct = predictions
            .iter()
            .zip(y.iter())
            .filter(|(p, t)| f64::from(**p) == **t)
            .count();
        Ok(correct as f64 / predictions.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn separable() -> (Array2<f64>, Array1<f64>) {
        let x = array![
            [-2.0, -1.5],
            [-1.5, -2.0],
            [-1.0, -1.2],
            [1.0, 1.2],
            [1.5, 2.0],
            [2.0, 1.5],
        ];
        let y = array![0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        (x, y)
    }

    #[test]
    fn test_fit_separable() {
        let (x, y) = separable();
        let model = LogisticRegression::fit(&x, &y, &TrainingOptions::default()).unwrap();
        assert_eq!(model.n_features(), 2);
        assert_eq!(model.score(&x, &y).unwrap(), 1.0);
    }

    #[test]
    fn test_predict_proba_rows_sum_to_one() {
        let (x, y) = separable();
        let model = LogisticRegression::fit(&x, &y, &TrainingOptions::default()).unwrap();
        let proba = model.predict_proba(&x).unwrap();
        assert_eq!(proba.shape(), &[6, 2]);
        for row in proba.rows() {
            assert!((row.sum() - 1.0).abs() < 1e-12);
        }
        assert!(proba[[0, 0]] > 0.5);
        assert!(proba[[5, 1]] > 0.5);
    }

    #[test]
    fn test_known_weights() {
        let model = LogisticRegression::from_weights(vec![1.0, -1.0], 0.0);
        let proba = model.predict_proba(&array![[0.0, 0.0], [3.0, 0.0]]).unwrap();
        assert!((proba[[0, 1]] - 0.5).abs() < 1e-12);
        assert!((proba[[1, 1]] - sigmoid(3.0)).abs() < 1e-12);
        assert_eq!(model.predict(&array![[0.0, 0.0], [3.0, 0.0]]).unwrap(), array![0u8, 1]);
    }

    #[test]
    fn test_feature_mismatch() {
        let model = LogisticRegression::from_weights(vec![1.0; 3], 0.0);
        let err = model.predict_proba(&array![[1.0, 2.0]]).unwrap_err();
        assert!(matches!(err, InferenceError::InvalidInputShape { .. }));
    }

    #[test]
    fn test_target_length_mismatch() {
        let (x, _) = separable();
        let err = LogisticRegression::fit(&x, &array![0.0, 1.0], &TrainingOptions::default())
            .unwrap_err();
        assert!(matches!(err, InferenceError::InvalidInputShape { .. }));
    }

    #[test]
    fn test_sigmoid_extremes_are_finite() {
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert_eq!(sigmoid(1000.0), 1.0);
    }
}
