//! File-system artifact store

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{validate_version_key, ArtifactCodec, ArtifactStore, DomainError, ModelHandle};

/// Layout of artifacts on disk: `{dir}/{file_prefix}{version}.{extension}`
#[derive(Debug, Clone)]
pub struct FsArtifactStoreConfig {
    pub dir: PathBuf,
    pub file_prefix: String,
    pub extension: String,
}

impl Default for FsArtifactStoreConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("models"),
            file_prefix: "iris_".to_string(),
            extension: "json".to_string(),
        }
    }
}

/// Artifacts stored as files in a single directory
#[derive(Debug)]
pub struct FsArtifactStore {
    config: FsArtifactStoreConfig,
    codec: Arc<dyn ArtifactCodec>,
}

impl FsArtifactStore {
    pub fn new(config: FsArtifactStoreConfig, codec: Arc<dyn ArtifactCodec>) -> Self {
        Self { config, codec }
    }

    pub fn dir(&self) -> &Path {
        &self.config.dir
    }

    /// Path of the artifact for `version`, or `None` when the key cannot name a file
    pub fn path_for(&self, version: &str) -> Option<PathBuf> {
        if validate_version_key(version).is_err() {
            return None;
        }

        let file_name = if self.config.extension.is_empty() {
            format!("{}{}", self.config.file_prefix, version)
        } else {
            format!(
                "{}{}.{}",
                self.config.file_prefix, version, self.config.extension
            )
        };

        Some(self.config.dir.join(file_name))
    }
}

#[async_trait]
impl ArtifactStore for FsArtifactStore {
    async fn fetch(&self, version: &str) -> Result<Option<ModelHandle>, DomainError> {
        let Some(path) = self.path_for(version) else {
            debug!(version, "Version key cannot name an artifact");
            return Ok(None);
        };

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(DomainError::storage(format!(
                    "Failed to read artifact '{}': {}",
                    path.display(),
                    e
                )))
            }
        };

        debug!(version, path = %path.display(), bytes = bytes.len(), "Decoding artifact");

        self.codec.decode(&bytes).map(Some).map_err(|e| {
            DomainError::internal(format!("Artifact '{}' is unusable: {}", path.display(), e))
        })
    }

    async fn contains(&self, version: &str) -> Result<bool, DomainError> {
        let Some(path) = self.path_for(version) else {
            return Ok(false);
        };

        tokio::fs::try_exists(&path).await.map_err(|e| {
            DomainError::storage(format!(
                "Failed to stat artifact '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
