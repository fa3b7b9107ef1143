//! Diagnosis labels and response shaping

use crate::engine::InferenceResult;
use serde::{Deserialize, Serialize};

/// Diagnosis predicted by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnosis {
    /// Class 0
    #[serde(rename = "Benigno")]
    Benign,
    /// Class 1
    #[serde(rename = "Maligno")]
    Malignant,
}

impl Diagnosis {
    /// Map a classifier output to a diagnosis; only 1 is malignant
    pub fn from_class(class: u8) -> Self {
        if class == 1 {
            Diagnosis::Malignant
        } else {
            Diagnosis::Benign
        }
    }

    /// Wire label
    pub fn as_str(&self) -> &'static str {
        match self {
            Diagnosis::Benign => "Benigno",
            Diagnosis::Malignant => "Maligno",
        }
    }

    pub fn numeric(&self) -> u8 {
        match self {
            Diagnosis::Benign => 0,
            Diagnosis::Malignant => 1,
        }
    }
}

/// Per-class probabilities, rounded to 4 decimals each
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Confidence {
    #[serde(rename = "Benigno")]
    pub benign: f64,
    #[serde(rename = "Maligno")]
    pub malignant: f64,
}

/// Body of a successful prediction response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: Diagnosis,
    pub confidence: Confidence,
    pub prediction_numeric: u8,
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Shape a raw inference result into the response body.
///
/// The two probabilities are rounded independently, so they may not sum
/// to exactly 1.
pub fn format_prediction(result: &InferenceResult) -> PredictionResult {
    let diagnosis = Diagnosis::from_class(result.class);
    PredictionResult {
        prediction: diagnosis,
        confidence: Confidence {
            benign: round4(result.probabilities[0]),
            malignant: round4(result.probabilities[1]),
        },
        prediction_numeric: diagnosis.numeric(),
    }
}
