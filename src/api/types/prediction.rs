//! Request and response bodies for the serving endpoints

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, IrisFeatures, RegistryRecord};

/// Query parameters of `GET /predict`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PredictQuery {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
}

impl TryFrom<PredictQuery> for IrisFeatures {
    type Error = DomainError;

    fn try_from(query: PredictQuery) -> Result<Self, Self::Error> {
        IrisFeatures::new(
            query.sepal_length,
            query.sepal_width,
            query.petal_length,
            query.petal_width,
        )
    }
}

/// Body of `POST /switch-model`
#[derive(Debug, Clone, Deserialize)]
pub struct SwitchModelRequest {
    pub version: String,
}

/// Response of `POST /switch-model`
#[derive(Debug, Clone, Serialize)]
pub struct SwitchModelResponse {
    pub message: String,
    pub registry: RegistryRecord,
}

/// Body of `POST /admin/cache/invalidate`; no version clears everything
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvalidateCacheRequest {
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvalidateCacheResponse {
    pub invalidated: String,
}
