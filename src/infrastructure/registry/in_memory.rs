//! In-memory registry store

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::{DomainError, RegistryRecord, RegistryStore};

/// Thread-safe in-memory registry
///
/// Useful for testing and ephemeral runs. The record is lost when the process terminates.
#[derive(Debug, Default)]
pub struct InMemoryRegistryStore {
    record: RwLock<Option<RegistryRecord>>,
}

impl InMemoryRegistryStore {
    /// Creates an empty (bootstrap) registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry already holding a record
    pub fn with_record(record: RegistryRecord) -> Self {
        Self {
            record: RwLock::new(Some(record)),
        }
    }
}

#[async_trait]
impl RegistryStore for InMemoryRegistryStore {
    async fn read(&self) -> Result<Option<RegistryRecord>, DomainError> {
        let record = self.record.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(record.clone())
    }

    async fn replace(&self, record: &RegistryRecord) -> Result<(), DomainError> {
        let mut current = self.record.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        *current = Some(record.clone());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
