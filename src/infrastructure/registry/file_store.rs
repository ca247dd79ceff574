//! File-backed registry store with atomic replace

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{DomainError, RegistryRecord, RegistryStore};

/// Registry persisted as a single JSON document on disk.
///
/// Writes go to a sibling temp file which is synced and then renamed over the
/// document, so a reader in this or another process never sees a torn write.
/// The in-process lock additionally orders reads against writes.
#[derive(Debug)]
pub struct FileRegistryStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileRegistryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map_or_else(|| "registry".to_string(), |n| n.to_string_lossy().into_owned());

        self.parent_dir()
            .join(format!(".{}.{}.tmp", file_name, Uuid::new_v4()))
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    async fn write_temp(&self, temp: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = tokio::fs::File::create(temp).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        Ok(())
    }
}

#[async_trait]
impl RegistryStore for FileRegistryStore {
    async fn read(&self) -> Result<Option<RegistryRecord>, DomainError> {
        let _guard = self.lock.read().await;

        match tokio::fs::read(&self.path).await {
            Ok(bytes) => RegistryRecord::from_json(&bytes).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Registry document absent");
                Ok(None)
            }
            Err(e) => Err(DomainError::storage(format!(
                "Failed to read registry '{}': {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn replace(&self, record: &RegistryRecord) -> Result<(), DomainError> {
        let bytes = record.to_json_pretty()?;
        let _guard = self.lock.write().await;

        tokio::fs::create_dir_all(self.parent_dir())
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create registry dir: {}", e)))?;

        let temp = self.temp_path();

        if let Err(e) = self.write_temp(&temp, &bytes).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(DomainError::storage(format!(
                "Failed to write registry temp file '{}': {}",
                temp.display(),
                e
            )));
        }

        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(DomainError::storage(format!(
                "Failed to replace registry '{}': {}",
                self.path.display(),
                e
            )));
        }

        info!(
            path = %self.path.display(),
            version = record.active_version(),
            "Registry document replaced"
        );

        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
