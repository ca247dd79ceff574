//! Artifact store trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::ModelHandle;
use crate::domain::DomainError;

/// Durable storage of trained artifacts, one per version key
#[async_trait]
pub trait ArtifactStore: Send + Sync + Debug {
    /// Load the artifact stored under `version`, `Ok(None)` when absent
    async fn fetch(&self, version: &str) -> Result<Option<ModelHandle>, DomainError>;

    /// Check whether an artifact is stored under `version` without decoding it
    async fn contains(&self, version: &str) -> Result<bool, DomainError>;
}
