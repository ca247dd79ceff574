//! Model info service - read-only view of deployment state

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::{
    AccuracyReport, DomainError, ModelVersion, Provenance, RegistryRecord, RegistryStore,
    VersionMetadata,
};

use super::{ArtifactLoader, VersionResolver};

/// Availability and metadata for one known version
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionInfo {
    pub available: bool,
    pub active: bool,
    pub accuracy: AccuracyReport,
    pub model_type: String,
}

/// Snapshot of which model is active and which artifacts exist
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub active_version: String,
    pub source: Provenance,
    /// The registry document exactly as read, `None` in the bootstrap state
    pub registry: Option<RegistryRecord>,
    pub models: BTreeMap<ModelVersion, VersionInfo>,
}

impl ModelInfo {
    pub fn available_versions(&self) -> Vec<ModelVersion> {
        self.models
            .iter()
            .filter(|(_, info)| info.available)
            .map(|(version, _)| *version)
            .collect()
    }
}

/// Builds [`ModelInfo`] from a single registry read
#[derive(Debug)]
pub struct ModelInfoService {
    resolver: Arc<VersionResolver>,
    loader: Arc<ArtifactLoader>,
    registry: Arc<dyn RegistryStore>,
}

impl ModelInfoService {
    pub fn new(
        resolver: Arc<VersionResolver>,
        loader: Arc<ArtifactLoader>,
        registry: Arc<dyn RegistryStore>,
    ) -> Self {
        Self {
            resolver,
            loader,
            registry,
        }
    }

    pub async fn model_info(&self) -> Result<ModelInfo, DomainError> {
        let record = self.registry.snapshot().await;
        let resolved = self.resolver.resolve_with(record.as_ref());

        let mut models = BTreeMap::new();

        for version in ModelVersion::ALL {
            let metadata = VersionMetadata::from_registry(record.as_ref(), version.as_str());

            models.insert(
                version,
                VersionInfo {
                    available: self.loader.is_available(version.as_str()).await?,
                    active: resolved.version == version.as_str(),
                    accuracy: metadata.accuracy,
                    model_type: metadata.model_kind,
                },
            );
        }

        Ok(ModelInfo {
            active_version: resolved.version,
            source: resolved.provenance,
            registry: record,
            models,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::artifact::mock::{FixedClassifier, MockArtifactStore};
    use crate::domain::registry::mock::MockRegistryStore;
    use crate::infrastructure::services::{
        ArtifactLoaderConfig, FixedOverride, RegistryMutator,
    };
    use std::collections::HashMap;

    fn build(
        overrides: FixedOverride,
        registry: Arc<dyn RegistryStore>,
        artifacts: Arc<MockArtifactStore>,
    ) -> ModelInfoService {
        let resolver = Arc::new(VersionResolver::new(Arc::new(overrides), registry.clone()));
        let loader = Arc::new(ArtifactLoader::new(artifacts, ArtifactLoaderConfig::default()));
        ModelInfoService::new(resolver, loader, registry)
    }

    #[tokio::test]
    async fn test_bootstrap_info() {
        let artifacts = Arc::new(
            MockArtifactStore::new().with_artifact("v1", FixedClassifier::handle(0, "Dummy")),
        );
        let service = build(FixedOverride::none(), Arc::new(MockRegistryStore::new()), artifacts);

        let info = service.model_info().await.unwrap();

        assert_eq!(info.active_version, "v1");
        assert_eq!(info.source, Provenance::Default);
        assert!(info.registry.is_none());
        assert!(info.models[&ModelVersion::V1].available);
        assert!(info.models[&ModelVersion::V1].active);
        assert!(!info.models[&ModelVersion::V2].available);
        assert_eq!(info.available_versions(), vec![ModelVersion::V1]);
    }

    #[tokio::test]
    async fn test_info_reflects_registry() {
        let registry: Arc<dyn RegistryStore> = Arc::new(
            MockRegistryStore::new()
                .with_record(RegistryRecord::for_version(ModelVersion::V2, Some(0.95))),
        );
        let artifacts = Arc::new(
            MockArtifactStore::new()
                .with_artifact("v1", FixedClassifier::handle(0, "Dummy"))
                .with_artifact("v2", FixedClassifier::handle(2, "Forest")),
        );
        let service = build(FixedOverride::none(), registry, artifacts);

        let info = service.model_info().await.unwrap();

        assert_eq!(info.active_version, "v2");
        assert_eq!(info.source, Provenance::Registry);
        assert_eq!(info.models[&ModelVersion::V2].accuracy, AccuracyReport::Known(0.95));
        assert_eq!(info.models[&ModelVersion::V1].accuracy, AccuracyReport::Unknown);

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["registry"]["version"], "v2");
        assert_eq!(json["models"]["v2"]["model_type"], "RandomForestClassifier");
    }

    #[tokio::test]
    async fn test_info_during_switch_sees_whole_records() {
        let registry: Arc<dyn RegistryStore> = Arc::new(
            MockRegistryStore::new()
                .with_record(RegistryRecord::for_version(ModelVersion::V1, Some(0.33))),
        );
        let artifacts = Arc::new(
            MockArtifactStore::new()
                .with_artifact("v1", FixedClassifier::handle(0, "Dummy"))
                .with_artifact("v2", FixedClassifier::handle(2, "Forest")),
        );
        let service = Arc::new(build(FixedOverride::none(), registry.clone(), artifacts.clone()));
        let mutator = Arc::new(RegistryMutator::new(
            registry,
            artifacts,
            HashMap::from([(ModelVersion::V1, 0.33), (ModelVersion::V2, 0.95)]),
        ));

        let switch = {
            let mutator = mutator.clone();
            tokio::spawn(async move { mutator.switch_version("v2").await.unwrap() })
        };
        let read = {
            let service = service.clone();
            tokio::spawn(async move { service.model_info().await.unwrap() })
        };

        switch.await.unwrap();
        let info = read.await.unwrap();
        let record = info.registry.unwrap();

        let old = RegistryRecord::for_version(ModelVersion::V1, Some(0.33));
        let new = RegistryRecord::for_version(ModelVersion::V2, Some(0.95));
        assert!(record.same_content(&old) || record.same_content(&new));
        assert_eq!(info.active_version, record.active_version());
    }
}
