//! Registry record entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::version::{validate_version_key, ModelVersion};
use crate::domain::DomainError;

/// Metrics recorded alongside the active version
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryMetrics {
    #[serde(default)]
    pub accuracy: Option<f64>,
}

/// The single persisted document describing the current deployment.
///
/// Always written whole; there is no partial update path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryRecord {
    #[serde(rename = "version")]
    active_version: String,
    /// Informational; filled from the version catalog when the document omits it
    #[serde(rename = "model_type", default)]
    model_kind: String,
    #[serde(default)]
    metrics: RegistryMetrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl RegistryRecord {
    pub fn new(
        active_version: impl Into<String>,
        model_kind: impl Into<String>,
        accuracy: Option<f64>,
    ) -> Self {
        Self {
            active_version: active_version.into(),
            model_kind: model_kind.into(),
            metrics: RegistryMetrics { accuracy },
            updated_at: None,
        }
    }

    /// Record for a known version, labelled with its classifier family
    pub fn for_version(version: ModelVersion, accuracy: Option<f64>) -> Self {
        Self::new(version.as_str(), version.model_kind(), accuracy)
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    pub fn active_version(&self) -> &str {
        &self.active_version
    }

    pub fn model_kind(&self) -> &str {
        &self.model_kind
    }

    pub fn accuracy(&self) -> Option<f64> {
        self.metrics.accuracy
    }

    pub fn metrics(&self) -> &RegistryMetrics {
        &self.metrics
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Whether this record describes the given version
    pub fn describes(&self, version: &str) -> bool {
        self.active_version == version
    }

    /// Equality ignoring `updated_at`
    pub fn same_content(&self, other: &Self) -> bool {
        self.active_version == other.active_version
            && self.model_kind == other.model_kind
            && self.metrics == other.metrics
    }

    /// Parse a persisted document, rejecting anything that is not fully well-formed
    pub fn from_json(raw: &[u8]) -> Result<Self, DomainError> {
        let mut record: Self = serde_json::from_slice(raw)
            .map_err(|e| DomainError::registry_corrupt(e.to_string()))?;
        record.validate()?;

        if record.model_kind.is_empty() {
            record.model_kind = ModelVersion::from_key(&record.active_version)
                .map_or("unknown", |v| v.model_kind())
                .to_string();
        }

        Ok(record)
    }

    pub fn to_json_pretty(&self) -> Result<Vec<u8>, DomainError> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| DomainError::internal(format!("Failed to serialize registry: {}", e)))
    }

    fn validate(&self) -> Result<(), DomainError> {
        validate_version_key(&self.active_version)
            .map_err(|e| DomainError::registry_corrupt(e.to_string()))?;

        if let Some(accuracy) = self.metrics.accuracy {
            if !accuracy.is_finite() || !(0.0..=1.0).contains(&accuracy) {
                return Err(DomainError::registry_corrupt(format!(
                    "accuracy {} outside [0, 1]",
                    accuracy
                )));
            }
        }

        Ok(())
    }
}
