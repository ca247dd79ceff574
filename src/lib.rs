//! Iris model server
//!
//! Serves iris species predictions from one of several versioned model
//! artifacts. The active version is chosen from an environment override, a
//! persisted registry document, or a hard default, in that order. Registry
//! metadata (model family, accuracy) accompanies every prediction.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::collections::HashMap;
use std::sync::Arc;

use api::state::AppState;
use domain::{ArtifactStore, ModelVersion, RegistryStore};
use infrastructure::{
    artifact::{FsArtifactStore, JsonArtifactCodec},
    registry::FileRegistryStore,
    services::{
        ArtifactLoader, ArtifactLoaderConfig, EnvOverride, ModelInfoService, OverrideSource,
        PredictionService, RegistryMutator, VersionResolver,
    },
};
use tracing::info;

/// Create the application state backed by the file system, as configured
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let placeholders = config.versions.placeholder_accuracy_by_version()?;

    let registry: Arc<dyn RegistryStore> =
        Arc::new(FileRegistryStore::new(config.registry.path.clone()));
    let artifacts: Arc<dyn ArtifactStore> = Arc::new(FsArtifactStore::new(
        config.artifacts.store_config(),
        Arc::new(JsonArtifactCodec),
    ));
    let overrides: Arc<dyn OverrideSource> =
        Arc::new(EnvOverride::new(config.versions.override_env.clone()));

    info!(
        registry = %config.registry.path.display(),
        artifacts = %config.artifacts.dir.display(),
        override_env = %config.versions.override_env,
        "Model stores configured"
    );

    Ok(build_app_state(
        registry,
        artifacts,
        overrides,
        config.artifacts.loader_config(),
        placeholders,
    ))
}

/// Wire the services around the given stores
pub fn build_app_state(
    registry: Arc<dyn RegistryStore>,
    artifacts: Arc<dyn ArtifactStore>,
    overrides: Arc<dyn OverrideSource>,
    loader_config: ArtifactLoaderConfig,
    placeholder_accuracy: HashMap<ModelVersion, f64>,
) -> AppState {
    let resolver = Arc::new(VersionResolver::new(overrides, registry.clone()));
    let loader = Arc::new(ArtifactLoader::new(artifacts.clone(), loader_config));

    AppState {
        prediction_service: Arc::new(PredictionService::new(
            resolver.clone(),
            loader.clone(),
            registry.clone(),
        )),
        model_info_service: Arc::new(ModelInfoService::new(
            resolver.clone(),
            loader.clone(),
            registry.clone(),
        )),
        registry_mutator: Arc::new(RegistryMutator::new(
            registry,
            artifacts,
            placeholder_accuracy,
        )),
        resolver,
        loader,
    }
}
