//! Data Validation and Standardization
//!
//! Turns raw prediction payloads into checked feature vectors and provides
//! the standard scaler applied to them before classification.

mod error;
mod features;
mod normalizer;
mod payload;
mod validator;

pub use error::{ScalerError, SchemaIssue, ValidationError};
pub use features::FeatureVector;
pub use normalizer::StandardScaler;
pub use payload::parse_lenient;
pub use validator::{FeatureValidator, DEFAULT_FEATURE_COUNT};
