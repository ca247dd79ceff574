//! Classifier handle and input features

use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// The four iris measurements a classifier consumes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrisFeatures {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
}

impl IrisFeatures {
    pub fn new(
        sepal_length: f64,
        sepal_width: f64,
        petal_length: f64,
        petal_width: f64,
    ) -> Result<Self, DomainError> {
        let features = Self {
            sepal_length,
            sepal_width,
            petal_length,
            petal_width,
        };
        features.validate()?;
        Ok(features)
    }

    pub fn as_array(&self) -> [f64; 4] {
        [
            self.sepal_length,
            self.sepal_width,
            self.petal_length,
            self.petal_width,
        ]
    }

    /// All measurements must be finite
    pub fn validate(&self) -> Result<(), DomainError> {
        const NAMES: [&str; 4] = ["sepal_length", "sepal_width", "petal_length", "petal_width"];

        for (name, value) in NAMES.iter().zip(self.as_array()) {
            if !value.is_finite() {
                return Err(DomainError::validation(format!(
                    "{} must be a finite number",
                    name
                )));
            }
        }

        Ok(())
    }
}

/// A loaded, read-only classifier. Inference is opaque to this crate.
pub trait Classifier: Send + Sync + Debug {
    /// Predict a class index. Indices outside the known species are passed through.
    fn predict(&self, features: &IrisFeatures) -> i64;

    /// Classifier family name reported by the artifact itself
    fn family(&self) -> &str;
}

/// Shared handle to a loaded classifier
pub type ModelHandle = Arc<dyn Classifier>;

/// Turns serialized artifact bytes into a classifier handle
pub trait ArtifactCodec: Send + Sync + Debug {
    fn decode(&self, bytes: &[u8]) -> Result<ModelHandle, DomainError>;
}
