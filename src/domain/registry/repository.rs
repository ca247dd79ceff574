//! Registry store trait

use std::fmt::Debug;

use async_trait::async_trait;
use tracing::warn;

use super::RegistryRecord;
use crate::domain::DomainError;

/// Persistence for the single registry document
#[async_trait]
pub trait RegistryStore: Send + Sync + Debug {
    /// Read the current record. `Ok(None)` is the bootstrap state.
    async fn read(&self) -> Result<Option<RegistryRecord>, DomainError>;

    /// Replace the whole document. Readers observe either the old or the new record.
    async fn replace(&self, record: &RegistryRecord) -> Result<(), DomainError>;

    /// Human-readable location, used in logs
    fn location(&self) -> String;

    /// Read the current record, treating any failure as the bootstrap state
    async fn snapshot(&self) -> Option<RegistryRecord> {
        match self.read().await {
            Ok(record) => record,
            Err(DomainError::RegistryCorrupt { message }) => {
                warn!(
                    location = %self.location(),
                    error = %message,
                    "Registry document is corrupt, treating as absent"
                );
                None
            }
            Err(e) => {
                warn!(
                    location = %self.location(),
                    error = %e,
                    "Registry unreadable, treating as absent"
                );
                None
            }
        }
    }
}
