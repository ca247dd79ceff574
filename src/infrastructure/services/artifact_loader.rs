//! Artifact loader - resolves a version to a model handle with baseline fallback

use std::sync::Arc;

use moka::future::Cache;
use tracing::{debug, warn};

use crate::domain::{ArtifactStore, DomainError, ModelHandle, ModelVersion, ResolvedVersion};

/// Configuration for the per-version handle cache
#[derive(Debug, Clone)]
pub struct ArtifactLoaderConfig {
    pub cache_enabled: bool,
    pub cache_capacity: u64,
}

impl Default for ArtifactLoaderConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_capacity: 16,
        }
    }
}

/// A model handle together with the version that actually supplied it
#[derive(Debug, Clone)]
pub struct LoadedArtifact {
    pub model: ModelHandle,
    pub effective_version: String,
    pub requested: ResolvedVersion,
}

impl LoadedArtifact {
    /// Whether the baseline artifact was substituted for the requested one
    pub fn fell_back(&self) -> bool {
        self.effective_version != self.requested.version
    }
}

/// Loads artifacts from durable storage.
///
/// Decoded handles are cached by version key. Absence is never cached, so a
/// newly deployed artifact is picked up on the next request. An artifact
/// rewritten under a version that is already cached is not observed until
/// [`ArtifactLoader::invalidate`] or [`ArtifactLoader::invalidate_all`] is called.
#[derive(Debug)]
pub struct ArtifactLoader {
    store: Arc<dyn ArtifactStore>,
    cache: Option<Cache<String, ModelHandle>>,
}

impl ArtifactLoader {
    pub fn new(store: Arc<dyn ArtifactStore>, config: ArtifactLoaderConfig) -> Self {
        let cache = config
            .cache_enabled
            .then(|| Cache::builder().max_capacity(config.cache_capacity).build());

        Self { store, cache }
    }

    /// Loader without a cache; every call reads storage
    pub fn uncached(store: Arc<dyn ArtifactStore>) -> Self {
        Self { store, cache: None }
    }

    /// Load the artifact for a resolved version.
    ///
    /// Override provenance is trusted literally and never falls back. Registry
    /// and default provenance fall back to the baseline when the requested
    /// artifact is missing.
    pub async fn load(&self, resolved: &ResolvedVersion) -> Result<LoadedArtifact, DomainError> {
        if let Some(model) = self.fetch(&resolved.version).await? {
            return Ok(LoadedArtifact {
                model,
                effective_version: resolved.version.clone(),
                requested: resolved.clone(),
            });
        }

        if !resolved.provenance.allows_fallback() {
            return Err(DomainError::artifact_not_found(&resolved.version));
        }

        let baseline = ModelVersion::BASELINE.as_str();

        if resolved.version != baseline {
            if let Some(model) = self.fetch(baseline).await? {
                warn!(
                    requested = %resolved.version,
                    provenance = %resolved.provenance,
                    fallback = baseline,
                    "Artifact missing, falling back to baseline"
                );

                return Ok(LoadedArtifact {
                    model,
                    effective_version: baseline.to_string(),
                    requested: resolved.clone(),
                });
            }
        }

        Err(DomainError::artifact_not_found(&resolved.version))
    }

    /// Whether an artifact is present in storage for `version`. The cache is not consulted.
    pub async fn is_available(&self, version: &str) -> Result<bool, DomainError> {
        self.store.contains(version).await
    }

    /// Drop the cached handle for one version
    pub async fn invalidate(&self, version: &str) {
        if let Some(cache) = &self.cache {
            cache.invalidate(version).await;
            debug!(version, "Invalidated cached artifact");
        }
    }

    /// Drop every cached handle
    pub fn invalidate_all(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
            debug!("Invalidated all cached artifacts");
        }
    }

    async fn fetch(&self, version: &str) -> Result<Option<ModelHandle>, DomainError> {
        let Some(cache) = &self.cache else {
            return self.store.fetch(version).await;
        };

        if let Some(model) = cache.get(version).await {
            debug!(version, "Artifact cache hit");
            return Ok(Some(model));
        }

        debug!(version, "Artifact cache miss");
        let fetched = self.store.fetch(version).await?;

        if let Some(model) = &fetched {
            cache.insert(version.to_string(), model.clone()).await;
        }

        Ok(fetched)
    }
}
