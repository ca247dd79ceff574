//! Artifact cache administration

use axum::extract::State;
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::{ApiError, InvalidateCacheRequest, InvalidateCacheResponse, Json};

/// POST /admin/cache/invalidate
///
/// Needed after an artifact is rewritten under a version that is already cached.
pub async fn invalidate_cache(
    State(state): State<AppState>,
    Json(request): Json<InvalidateCacheRequest>,
) -> Result<Json<InvalidateCacheResponse>, ApiError> {
    let invalidated = match request.version {
        Some(version) => {
            state.loader.invalidate(&version).await;
            version
        }
        None => {
            state.loader.invalidate_all();
            "all".to_string()
        }
    };

    info!(invalidated = %invalidated, "Artifact cache invalidated");

    Ok(Json(InvalidateCacheResponse { invalidated }))
}
