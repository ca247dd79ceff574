use axum::{
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use super::admin;
use super::health;
use super::serving;
use super::state::AppState;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Prediction and model management
        .merge(serving::create_serving_router())
        // Operator endpoints
        .nest("/admin", admin::create_admin_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
