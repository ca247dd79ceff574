//! Registry mutator - the only writer of the registry document

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::{ArtifactStore, DomainError, ModelVersion, RegistryRecord, RegistryStore};

/// Switches the active model version
#[derive(Debug)]
pub struct RegistryMutator {
    registry: Arc<dyn RegistryStore>,
    artifacts: Arc<dyn ArtifactStore>,
    placeholder_accuracy: HashMap<ModelVersion, f64>,
    switch_lock: Mutex<()>,
}

impl RegistryMutator {
    pub fn new(
        registry: Arc<dyn RegistryStore>,
        artifacts: Arc<dyn ArtifactStore>,
        placeholder_accuracy: HashMap<ModelVersion, f64>,
    ) -> Self {
        Self {
            registry,
            artifacts,
            placeholder_accuracy,
            switch_lock: Mutex::new(()),
        }
    }

    /// Make `target` the active version.
    ///
    /// The new record carries over the known accuracy when the registry already
    /// describes `target`, otherwise the configured placeholder for that version.
    /// Nothing is written when validation fails.
    pub async fn switch_version(&self, target: &str) -> Result<RegistryRecord, DomainError> {
        let version: ModelVersion = target.parse()?;

        if !self.artifacts.contains(version.as_str()).await? {
            return Err(DomainError::artifact_not_found(version.as_str()));
        }

        let _guard = self.switch_lock.lock().await;

        let current = self.registry.snapshot().await;
        let accuracy = match &current {
            Some(record) if record.describes(version.as_str()) && record.accuracy().is_some() => {
                record.accuracy()
            }
            _ => self.placeholder_accuracy.get(&version).copied(),
        };

        let record = RegistryRecord::for_version(version, accuracy).with_updated_at(Utc::now());
        self.registry.replace(&record).await?;

        info!(
            from = current.as_ref().map(|r| r.active_version()).unwrap_or("none"),
            to = %version,
            accuracy = ?accuracy,
            "Switched active model version"
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::artifact::mock::{FixedClassifier, MockArtifactStore};
    use crate::domain::registry::mock::MockRegistryStore;
    use crate::infrastructure::registry::FileRegistryStore;

    fn placeholders() -> HashMap<ModelVersion, f64> {
        HashMap::from([(ModelVersion::V1, 0.33), (ModelVersion::V2, 0.95)])
    }

    fn both_artifacts() -> Arc<MockArtifactStore> {
        Arc::new(
            MockArtifactStore::new()
                .with_artifact("v1", FixedClassifier::handle(0, "Dummy"))
                .with_artifact("v2", FixedClassifier::handle(2, "Forest")),
        )
    }

    #[tokio::test]
    async fn test_switch_writes_full_record() {
        let registry = Arc::new(MockRegistryStore::new());
        let mutator = RegistryMutator::new(registry.clone(), both_artifacts(), placeholders());

        let record = mutator.switch_version("v2").await.unwrap();

        assert_eq!(record.active_version(), "v2");
        assert_eq!(record.model_kind(), "RandomForestClassifier");
        assert_eq!(record.accuracy(), Some(0.95));
        assert!(record.updated_at().is_some());
        assert_eq!(registry.current(), Some(record));
    }

    #[tokio::test]
    async fn test_switch_carries_known_accuracy_for_same_version() {
        let registry = Arc::new(
            MockRegistryStore::new()
                .with_record(RegistryRecord::for_version(ModelVersion::V2, Some(0.967))),
        );
        let mutator = RegistryMutator::new(registry.clone(), both_artifacts(), placeholders());

        let record = mutator.switch_version("v2").await.unwrap();
        assert_eq!(record.accuracy(), Some(0.967));
    }

    #[tokio::test]
    async fn test_switch_uses_placeholder_for_other_version() {
        let registry = Arc::new(
            MockRegistryStore::new()
                .with_record(RegistryRecord::for_version(ModelVersion::V2, Some(0.967))),
        );
        let mutator = RegistryMutator::new(registry, both_artifacts(), placeholders());

        let record = mutator.switch_version("v1").await.unwrap();
        assert_eq!(record.accuracy(), Some(0.33));
        assert_eq!(record.model_kind(), "DummyClassifier");
    }

    #[tokio::test]
    async fn test_switch_without_placeholder_records_unknown() {
        let registry = Arc::new(MockRegistryStore::new());
        let mutator = RegistryMutator::new(registry, both_artifacts(), HashMap::new());

        let record = mutator.switch_version("v2").await.unwrap();
        assert_eq!(record.accuracy(), None);
    }

    #[tokio::test]
    async fn test_switch_is_idempotent() {
        let registry = Arc::new(MockRegistryStore::new());
        let mutator = RegistryMutator::new(registry.clone(), both_artifacts(), placeholders());

        let first = mutator.switch_version("v2").await.unwrap();
        let second = mutator.switch_version("v2").await.unwrap();

        assert!(first.same_content(&second));
        assert!(registry.current().unwrap().same_content(&first));
    }

    #[tokio::test]
    async fn test_invalid_version_rejected_without_write() {
        let original = RegistryRecord::for_version(ModelVersion::V1, Some(0.33));
        let registry = Arc::new(MockRegistryStore::new().with_record(original.clone()));
        let mutator = RegistryMutator::new(registry.clone(), both_artifacts(), placeholders());

        for target in ["v3", "", "V2", "latest", "v1 "] {
            let err = mutator.switch_version(target).await.unwrap_err();
            assert!(matches!(err, DomainError::InvalidVersion { .. }));
        }

        assert_eq!(registry.write_count(), 0);
        assert_eq!(registry.current(), Some(original));
    }

    #[tokio::test]
    async fn test_missing_artifact_rejected_without_write() {
        let registry = Arc::new(MockRegistryStore::new());
        let artifacts =
            Arc::new(MockArtifactStore::new().with_artifact("v1", FixedClassifier::handle(0, "Dummy")));
        let mutator = RegistryMutator::new(registry.clone(), artifacts, placeholders());

        let err = mutator.switch_version("v2").await.unwrap_err();

        assert!(matches!(err, DomainError::ArtifactNotFound { version } if version == "v2"));
        assert_eq!(registry.write_count(), 0);
        assert_eq!(registry.current(), None);
    }

    #[tokio::test]
    async fn test_write_failure_propagates() {
        let registry = Arc::new(MockRegistryStore::new().with_write_error("read-only fs"));
        let mutator = RegistryMutator::new(registry, both_artifacts(), placeholders());

        let err = mutator.switch_version("v2").await.unwrap_err();
        assert!(matches!(err, DomainError::Storage { .. }));
    }

    #[tokio::test]
    async fn test_concurrent_switches_leave_a_complete_record() {
        let dir = tempfile::tempdir().unwrap();
        let registry = Arc::new(FileRegistryStore::new(dir.path().join("model_registry.json")));
        let mutator = Arc::new(RegistryMutator::new(
            registry.clone(),
            both_artifacts(),
            placeholders(),
        ));

        let mut handles = Vec::new();
        for i in 0..20 {
            let mutator = mutator.clone();
            let target = if i % 2 == 0 { "v1" } else { "v2" };
            handles.push(tokio::spawn(async move {
                mutator.switch_version(target).await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let record = registry.read().await.unwrap().unwrap();
        let expected = ModelVersion::from_key(record.active_version()).unwrap();
        assert!(record.same_content(&RegistryRecord::for_version(
            expected,
            placeholders().get(&expected).copied()
        )));
    }
}
