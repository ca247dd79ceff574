//! Prediction endpoint handlers

use axum::extract::{Path, State};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, PredictQuery, Query};
use crate::domain::{IrisFeatures, PredictionResult};

/// GET /predict
pub async fn predict(
    State(state): State<AppState>,
    Query(query): Query<PredictQuery>,
) -> Result<Json<PredictionResult>, ApiError> {
    let features = IrisFeatures::try_from(query)?;
    debug!(?features, "Predicting with resolved version");

    let result = state.prediction_service.predict(features).await?;

    Ok(Json(result))
}

/// GET /predict/{version}
pub async fn predict_with_version(
    State(state): State<AppState>,
    Path(version): Path<String>,
    Query(query): Query<PredictQuery>,
) -> Result<Json<PredictionResult>, ApiError> {
    let features = IrisFeatures::try_from(query)?;
    debug!(version = %version, ?features, "Predicting with explicit version");

    let result = state
        .prediction_service
        .predict_with_version(&version, features)
        .await?;

    Ok(Json(result))
}
