use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("No artifact found for model version '{version}'")]
    ArtifactNotFound { version: String },

    #[error("Invalid model version '{value}'")]
    InvalidVersion { value: String },

    #[error("Model registry is corrupt: {message}")]
    RegistryCorrupt { message: String },

    #[error("Model unavailable for version '{version}'")]
    ModelUnavailable { version: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn artifact_not_found(version: impl Into<String>) -> Self {
        Self::ArtifactNotFound {
            version: version.into(),
        }
    }

    pub fn invalid_version(value: impl Into<String>) -> Self {
        Self::InvalidVersion {
            value: value.into(),
        }
    }

    pub fn registry_corrupt(message: impl Into<String>) -> Self {
        Self::RegistryCorrupt {
            message: message.into(),
        }
    }

    pub fn model_unavailable(version: impl Into<String>) -> Self {
        Self::ModelUnavailable {
            version: version.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
