//! Artifact domain - opaque trained classifiers keyed by version

mod classifier;
mod repository;

pub use classifier::{ArtifactCodec, Classifier, IrisFeatures, ModelHandle};
pub use repository::ArtifactStore;

#[cfg(test)]
pub use repository::mock;
