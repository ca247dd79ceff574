//! Artifact storage, decoding and built-in classifier families

mod codec;
mod fs_store;
mod in_memory;

pub use codec::{
    ArtifactDocument, Centroid, ConstantClassifier, JsonArtifactCodec, NearestCentroidClassifier,
};
pub use fs_store::{FsArtifactStore, FsArtifactStoreConfig};
pub use in_memory::InMemoryArtifactStore;
