use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::{DomainError, ModelVersion};
use crate::infrastructure::artifact::FsArtifactStoreConfig;
use crate::infrastructure::services::ArtifactLoaderConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub registry: RegistryConfig,
    pub artifacts: ArtifactsConfig,
    pub versions: VersionsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Where the registry document lives
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub path: PathBuf,
}

/// Artifact layout and cache settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    pub dir: PathBuf,
    pub file_prefix: String,
    pub extension: String,
    pub cache_enabled: bool,
    pub cache_capacity: u64,
}

/// Version selection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VersionsConfig {
    /// Environment variable holding the version override
    pub override_env: String,
    /// Accuracy recorded on switch when nothing better is known, keyed by version
    pub placeholder_accuracy: HashMap<String, f64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("model_registry.json"),
        }
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        let store = FsArtifactStoreConfig::default();
        let loader = ArtifactLoaderConfig::default();

        Self {
            dir: store.dir,
            file_prefix: store.file_prefix,
            extension: store.extension,
            cache_enabled: loader.cache_enabled,
            cache_capacity: loader.cache_capacity,
        }
    }
}

impl Default for VersionsConfig {
    fn default() -> Self {
        Self {
            override_env: "MODEL_VERSION".to_string(),
            placeholder_accuracy: HashMap::from([
                ("v1".to_string(), 0.33),
                ("v2".to_string(), 0.95),
            ]),
        }
    }
}

impl ArtifactsConfig {
    pub fn store_config(&self) -> FsArtifactStoreConfig {
        FsArtifactStoreConfig {
            dir: self.dir.clone(),
            file_prefix: self.file_prefix.clone(),
            extension: self.extension.clone(),
        }
    }

    pub fn loader_config(&self) -> ArtifactLoaderConfig {
        ArtifactLoaderConfig {
            cache_enabled: self.cache_enabled,
            cache_capacity: self.cache_capacity,
        }
    }
}

impl VersionsConfig {
    /// Placeholder metrics keyed by known version, rejecting unknown keys and out-of-range values
    pub fn placeholder_accuracy_by_version(
        &self,
    ) -> Result<HashMap<ModelVersion, f64>, DomainError> {
        self.placeholder_accuracy
            .iter()
            .map(|(key, value)| {
                let version = key.parse::<ModelVersion>().map_err(|_| {
                    DomainError::configuration(format!(
                        "placeholder_accuracy names unknown version '{}'",
                        key
                    ))
                })?;

                if !value.is_finite() || !(0.0..=1.0).contains(value) {
                    return Err(DomainError::configuration(format!(
                        "placeholder_accuracy for '{}' must be within [0, 1], got {}",
                        key, value
                    )));
                }

                Ok((version, *value))
            })
            .collect()
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
