//! Domain layer - Core business logic and entities

pub mod artifact;
pub mod error;
pub mod prediction;
pub mod registry;
pub mod version;

pub use artifact::{ArtifactCodec, ArtifactStore, Classifier, IrisFeatures, ModelHandle};
pub use error::DomainError;
pub use prediction::{AccuracyReport, PredictionLabel, PredictionResult, Species, VersionMetadata};
pub use registry::{RegistryMetrics, RegistryRecord, RegistryStore};
pub use version::{
    validate_version_key, ModelVersion, Provenance, ResolvedVersion, VersionValidationError,
};
