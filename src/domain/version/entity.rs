//! Model version catalog and resolution types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Closed set of model versions this service knows how to switch to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelVersion {
    V1,
    V2,
}

impl ModelVersion {
    /// Every known version, in ascending order
    pub const ALL: [ModelVersion; 2] = [ModelVersion::V1, ModelVersion::V2];

    /// Hard default when nothing else names a version, and the fallback target
    /// when a registry-selected artifact is missing
    pub const BASELINE: ModelVersion = ModelVersion::V1;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }

    /// Classifier family label recorded in the registry for this version
    pub fn model_kind(&self) -> &'static str {
        match self {
            Self::V1 => "DummyClassifier",
            Self::V2 => "RandomForestClassifier",
        }
    }

    /// Parse a version key without producing an error
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == key)
    }
}

impl fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelVersion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| DomainError::invalid_version(s))
    }
}

/// Where a resolved version came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Ambient environment override or an explicitly requested version
    Override,
    /// Persisted registry document
    Registry,
    /// Hard default
    Default,
}

impl Provenance {
    /// Only versions the operator did not name explicitly may fall back to the baseline
    pub fn allows_fallback(&self) -> bool {
        !matches!(self, Self::Override)
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Override => write!(f, "override"),
            Self::Registry => write!(f, "registry"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Outcome of version resolution for a single request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedVersion {
    pub version: String,
    pub provenance: Provenance,
}

impl ResolvedVersion {
    pub fn new(version: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            version: version.into(),
            provenance,
        }
    }

    /// Explicitly requested version, trusted literally
    pub fn forced(version: impl Into<String>) -> Self {
        Self::new(version, Provenance::Override)
    }

    pub fn baseline() -> Self {
        Self::new(ModelVersion::BASELINE.as_str(), Provenance::Default)
    }
}
