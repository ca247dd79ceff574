//! Infrastructure services

mod artifact_loader;
mod model_info_service;
mod prediction_service;
mod registry_mutator;
mod version_resolver;

pub use artifact_loader::{ArtifactLoader, ArtifactLoaderConfig, LoadedArtifact};
pub use model_info_service::{ModelInfo, ModelInfoService, VersionInfo};
pub use prediction_service::PredictionService;
pub use registry_mutator::RegistryMutator;
pub use version_resolver::{EnvOverride, FixedOverride, OverrideSource, VersionResolver};
