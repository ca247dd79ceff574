//! In-memory artifact store

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::{ArtifactStore, DomainError, ModelHandle};

/// Artifacts held in process memory, keyed by version
#[derive(Debug, Default)]
pub struct InMemoryArtifactStore {
    artifacts: RwLock<HashMap<String, ModelHandle>>,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_artifact(self, version: impl Into<String>, handle: ModelHandle) -> Self {
        if let Ok(mut artifacts) = self.artifacts.write() {
            artifacts.insert(version.into(), handle);
        }
        self
    }

    /// Store an artifact, superseding any previous one under the same version
    pub fn insert(&self, version: impl Into<String>, handle: ModelHandle) -> Result<(), DomainError> {
        let mut artifacts = self.artifacts.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        artifacts.insert(version.into(), handle);
        Ok(())
    }

    pub fn remove(&self, version: &str) -> Result<bool, DomainError> {
        let mut artifacts = self.artifacts.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(artifacts.remove(version).is_some())
    }
}

#[async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn fetch(&self, version: &str) -> Result<Option<ModelHandle>, DomainError> {
        let artifacts = self.artifacts.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(artifacts.get(version).cloned())
    }

    async fn contains(&self, version: &str) -> Result<bool, DomainError> {
        let artifacts = self.artifacts.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(artifacts.contains_key(version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::artifact::ConstantClassifier;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_fetch_and_remove() {
        let store = InMemoryArtifactStore::new()
            .with_artifact("v1", Arc::new(ConstantClassifier::new(0, "DummyClassifier")));

        assert!(store.fetch("v1").await.unwrap().is_some());
        assert!(store.contains("v1").await.unwrap());
        assert!(store.fetch("v2").await.unwrap().is_none());

        assert!(store.remove("v1").unwrap());
        assert!(!store.contains("v1").await.unwrap());
    }
}
