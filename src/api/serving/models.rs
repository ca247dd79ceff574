//! Model info and switch handlers

use axum::extract::State;
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, SwitchModelRequest, SwitchModelResponse};
use crate::infrastructure::services::ModelInfo;

/// GET /model-info
pub async fn model_info(State(state): State<AppState>) -> Result<Json<ModelInfo>, ApiError> {
    let info = state.model_info_service.model_info().await?;
    Ok(Json(info))
}

/// POST /switch-model
pub async fn switch_model(
    State(state): State<AppState>,
    Json(request): Json<SwitchModelRequest>,
) -> Result<Json<SwitchModelResponse>, ApiError> {
    info!(target_version = %request.version, "Switch requested");

    let record = state
        .registry_mutator
        .switch_version(&request.version)
        .await?;

    Ok(Json(SwitchModelResponse {
        message: format!("Switched active model to {}", record.active_version()),
        registry: record,
    }))
}
