//! Prediction service - resolve, load, infer, annotate

use std::sync::Arc;

use tracing::debug;

use crate::domain::{
    DomainError, IrisFeatures, PredictionLabel, PredictionResult, RegistryRecord, RegistryStore,
    ResolvedVersion, VersionMetadata,
};

use super::{ArtifactLoader, VersionResolver};

/// Serves predictions from the active model version
#[derive(Debug)]
pub struct PredictionService {
    resolver: Arc<VersionResolver>,
    loader: Arc<ArtifactLoader>,
    registry: Arc<dyn RegistryStore>,
}

impl PredictionService {
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

    /// Predict with whichever version the resolver selects
    pub async fn predict(&self, features: IrisFeatures) -> Result<PredictionResult, DomainError> {
        let record = self.registry.snapshot().await;
        let resolved = self.resolver.resolve_with(record.as_ref());

        self.predict_resolved(resolved, record.as_ref(), features)
            .await
    }

    /// Predict with an explicitly named version. No fallback applies.
    pub async fn predict_with_version(
        &self,
        version: &str,
        features: IrisFeatures,
    ) -> Result<PredictionResult, DomainError> {
        let record = self.registry.snapshot().await;

        self.predict_resolved(ResolvedVersion::forced(version), record.as_ref(), features)
            .await
    }

    async fn predict_resolved(
        &self,
        resolved: ResolvedVersion,
        record: Option<&RegistryRecord>,
        features: IrisFeatures,
    ) -> Result<PredictionResult, DomainError> {
        features.validate()?;

        let loaded = self.loader.load(&resolved).await.map_err(|e| match e {
            DomainError::ArtifactNotFound { version } => DomainError::model_unavailable(version),
            other => other,
        })?;

        let class_index = loaded.model.predict(&features);
        let metadata = VersionMetadata::from_registry(record, &loaded.effective_version);

        debug!(
            requested = %resolved.version,
            effective = %loaded.effective_version,
            class_index,
            "Prediction served"
        );

        Ok(PredictionResult {
            fallback: loaded.fell_back(),
            effective_version: loaded.effective_version,
            requested_version: resolved.version,
            provenance: resolved.provenance,
            prediction: PredictionLabel::from(class_index),
            accuracy: metadata.accuracy,
            model_kind: metadata.model_kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::artifact::mock::{FixedClassifier, MockArtifactStore};
    use crate::domain::registry::mock::MockRegistryStore;
    use crate::domain::{AccuracyReport, ModelVersion, Provenance, Species};
    use crate::infrastructure::services::{ArtifactLoaderConfig, FixedOverride};

    fn service(
        overrides: FixedOverride,
        registry: MockRegistryStore,
        artifacts: MockArtifactStore,
    ) -> PredictionService {
        let registry: Arc<dyn RegistryStore> = Arc::new(registry);
        let resolver = Arc::new(VersionResolver::new(Arc::new(overrides), registry.clone()));
        let loader = Arc::new(ArtifactLoader::new(
            Arc::new(artifacts),
            ArtifactLoaderConfig::default(),
        ));
        PredictionService::new(resolver, loader, registry)
    }

    fn features() -> IrisFeatures {
        IrisFeatures::new(5.1, 3.5, 1.4, 0.2).unwrap()
    }

    #[tokio::test]
    async fn test_bootstrap_prediction_uses_v1_with_unknown_accuracy() {
        let service = service(
            FixedOverride::none(),
            MockRegistryStore::new(),
            MockArtifactStore::new().with_artifact("v1", FixedClassifier::handle(0, "Dummy")),
        );

        let result = service.predict(features()).await.unwrap();

        assert_eq!(result.effective_version, "v1");
        assert_eq!(result.provenance, Provenance::Default);
        assert_eq!(result.prediction, PredictionLabel::Species(Species::Setosa));
        assert_eq!(result.accuracy, AccuracyReport::Unknown);
        assert_eq!(result.model_kind, "DummyClassifier");
        assert!(!result.fallback);
    }

    #[tokio::test]
    async fn test_registry_v2_falls_back_to_v1() {
        let service = service(
            FixedOverride::none(),
            MockRegistryStore::new()
                .with_record(RegistryRecord::for_version(ModelVersion::V2, Some(0.95))),
            MockArtifactStore::new().with_artifact("v1", FixedClassifier::handle(1, "Dummy")),
        );

        let result = service.predict(features()).await.unwrap();

        assert_eq!(result.effective_version, "v1");
        assert_eq!(result.requested_version, "v2");
        assert_eq!(result.provenance, Provenance::Registry);
        assert!(result.fallback);
        assert_eq!(result.accuracy, AccuracyReport::Unknown);
        assert_eq!(result.model_kind, "DummyClassifier");
    }

    #[tokio::test]
    async fn test_registry_metadata_annotates_active_version() {
        let service = service(
            FixedOverride::none(),
            MockRegistryStore::new()
                .with_record(RegistryRecord::for_version(ModelVersion::V2, Some(0.967))),
            MockArtifactStore::new().with_artifact("v2", FixedClassifier::handle(2, "Forest")),
        );

        let result = service.predict(features()).await.unwrap();

        assert_eq!(result.effective_version, "v2");
        assert_eq!(result.prediction, PredictionLabel::Species(Species::Virginica));
        assert_eq!(result.accuracy, AccuracyReport::Known(0.967));
        assert_eq!(result.model_kind, "RandomForestClassifier");
    }

    #[tokio::test]
    async fn test_missing_override_artifact_is_unavailable() {
        let service = service(
            FixedOverride::some("v2"),
            MockRegistryStore::new(),
            MockArtifactStore::new().with_artifact("v1", FixedClassifier::handle(0, "Dummy")),
        );

        let err = service.predict(features()).await.unwrap_err();
        assert!(matches!(err, DomainError::ModelUnavailable { version } if version == "v2"));
    }

    #[tokio::test]
    async fn test_forced_version_bypasses_resolver() {
        let service = service(
            FixedOverride::some("v1"),
            MockRegistryStore::new(),
            MockArtifactStore::new()
                .with_artifact("v1", FixedClassifier::handle(0, "Dummy"))
                .with_artifact("v2", FixedClassifier::handle(2, "Forest")),
        );

        let result = service.predict_with_version("v2", features()).await.unwrap();

        assert_eq!(result.effective_version, "v2");
        assert_eq!(result.provenance, Provenance::Override);
    }

    #[tokio::test]
    async fn test_forced_version_never_falls_back() {
        let service = service(
            FixedOverride::none(),
            MockRegistryStore::new(),
            MockArtifactStore::new().with_artifact("v1", FixedClassifier::handle(0, "Dummy")),
        );

        let err = service
            .predict_with_version("v2", features())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ModelUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_out_of_range_index_passes_through() {
        let service = service(
            FixedOverride::none(),
            MockRegistryStore::new(),
            MockArtifactStore::new().with_artifact("v1", FixedClassifier::handle(5, "Odd")),
        );

        let result = service.predict(features()).await.unwrap();
        assert_eq!(result.prediction, PredictionLabel::Index(5));
    }

    #[tokio::test]
    async fn test_non_finite_features_rejected() {
        let service = service(
            FixedOverride::none(),
            MockRegistryStore::new(),
            MockArtifactStore::new().with_artifact("v1", FixedClassifier::handle(0, "Dummy")),
        );
        let features = IrisFeatures {
            sepal_length: f64::NAN,
            sepal_width: 3.5,
            petal_length: 1.4,
            petal_width: 0.2,
        };

        let err = service.predict(features).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }
}
