//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::services::{
    ArtifactLoader, ModelInfoService, PredictionService, RegistryMutator, VersionResolver,
};

/// Services shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<VersionResolver>,
    pub loader: Arc<ArtifactLoader>,
    pub prediction_service: Arc<PredictionService>,
    pub model_info_service: Arc<ModelInfoService>,
    pub registry_mutator: Arc<RegistryMutator>,
}
