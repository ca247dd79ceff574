//! Version resolver - override > registry > default

use std::env::VarError;
use std::fmt::Debug;
use std::sync::Arc;

use tracing::debug;

use crate::domain::{Provenance, RegistryRecord, RegistryStore, ResolvedVersion};

/// Source of the ambient version override
pub trait OverrideSource: Send + Sync + Debug {
    /// The override value, if one is set
    fn current(&self) -> Option<String>;
}

/// Override read from an environment variable at resolution time
#[derive(Debug, Clone)]
pub struct EnvOverride {
    var: String,
}

impl EnvOverride {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl OverrideSource for EnvOverride {
    fn current(&self) -> Option<String> {
        override_value(std::env::var(&self.var))
    }
}

/// An unset, empty or non-UTF-8 variable is no override; anything else is taken verbatim.
fn override_value(raw: Result<String, VarError>) -> Option<String> {
    raw.ok().filter(|v| !v.is_empty())
}

/// Fixed override value
#[derive(Debug, Clone, Default)]
pub struct FixedOverride(Option<String>);

impl FixedOverride {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn some(version: impl Into<String>) -> Self {
        Self(Some(version.into()))
    }
}

impl OverrideSource for FixedOverride {
    fn current(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Determines which version a request should be served by. Never fails.
#[derive(Debug, Clone)]
pub struct VersionResolver {
    overrides: Arc<dyn OverrideSource>,
    registry: Arc<dyn RegistryStore>,
}

impl VersionResolver {
    pub fn new(overrides: Arc<dyn OverrideSource>, registry: Arc<dyn RegistryStore>) -> Self {
        Self {
            overrides,
            registry,
        }
    }

    /// Resolve against a fresh registry snapshot
    pub async fn resolve(&self) -> ResolvedVersion {
        let record = self.registry.snapshot().await;
        self.resolve_with(record.as_ref())
    }

    /// Resolve against a registry snapshot the caller already holds
    pub fn resolve_with(&self, record: Option<&RegistryRecord>) -> ResolvedVersion {
        let resolved = self
            .overrides
            .current()
            .map(|version| ResolvedVersion::new(version, Provenance::Override))
            .or_else(|| {
                record.map(|r| ResolvedVersion::new(r.active_version(), Provenance::Registry))
            })
            .unwrap_or_else(ResolvedVersion::baseline);

        debug!(
            version = %resolved.version,
            provenance = %resolved.provenance,
            "Resolved model version"
        );

        resolved
    }
}
