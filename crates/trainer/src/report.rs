//! Evaluation report

use ndarray::Array1;
use std::fmt;

/// Precision, recall and F1 for one class
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    pub label: &'static str,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class metrics plus overall accuracy on a held-out set
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub total: usize,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl ClassificationReport {
    /// Compare 0/1 targets against predicted classes
    pub fn compute(y_true: &Array1<f64>, y_pred: &Array1<u8>) -> Self {
        let pairs: Vec<(u8, u8)> = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (u8::from(t == 1.0), p))
            .collect();

        let classes = [(0u8, "Benigno"), (1u8, "Maligno")]
            .into_iter()
            .map(|(class, label)| {
                let tp = pairs.iter().filter(|&&(t, p)| t == class && p == class).count();
                let predicted = pairs.iter().filter(|&&(_, p)| p == class).count();
                let support = pairs.iter().filter(|&&(t, _)| t == class).count();
                let precision = ratio(tp, predicted);
                let recall = ratio(tp, support);
                let f1 = if precision + recall == 0.0 {
                    0.0
                } else {
                    2.0 * precision * recall / (precision + recall)
                };
                ClassMetrics {
                    label,
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect();

        let correct = pairs.iter().filter(|(t, p)| t == p).count();
        Self {
            classes,
            accuracy: ratio(correct, pairs.len()),
            total: pairs.len(),
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>10} {:>10} {:>10} {:>10} {:>10}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>10} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                c.label, c.precision, c.recall, c.f1, c.support
            )?;
        }
        write!(f, "{:>10} {:>32.2} {:>10}", "accuracy", self.accuracy, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_metrics() {
        let y_true = array![0.0, 0.0, 1.0, 1.0, 1.0];
        let y_pred = array![0u8, 1, 1, 1, 0];
        let report = ClassificationReport::compute(&y_true, &y_pred);

        assert!((report.accuracy - 0.6).abs() < 1e-12);
        let benign = &report.classes[0];
        assert_eq!(benign.support, 2);
        assert!((benign.precision - 0.5).abs() < 1e-12);
        assert!((benign.recall - 0.5).abs() < 1e-12);
        let malignant = &report.classes[1];
        assert_eq!(malignant.support, 3);
        assert!((malignant.precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((malignant.recall - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_display_lists_both_classes() {
        let report = ClassificationReport::compute(&array![0.0, 1.0], &array![0u8, 1]);
        let text = report.to_string();
        assert!(text.contains("Benigno"));
        assert!(text.contains("Maligno"));
        assert!(text.contains("1.00"));
    }
}
