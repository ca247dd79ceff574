//! Prediction and model management endpoints

pub mod models;
pub mod predict;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create the serving router
pub fn create_serving_router() -> Router<AppState> {
    Router::new()
        .route("/predict", get(predict::predict))
        .route("/predict/{version}", get(predict::predict_with_version))
        .route("/model-info", get(models::model_info))
        .route("/switch-model", post(models::switch_model))
}
