//! Health check endpoints for Kubernetes probes

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::Json;
use crate::domain::{ModelVersion, Provenance};

use super::state::AppState;

/// Service health with the currently resolved version
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub active_version: String,
    pub source: Provenance,
    pub available_versions: Vec<ModelVersion>,
    pub version: String,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Degraded,
    Unavailable,
}

/// Readiness detail
#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: HealthStatus,
    pub requested_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub latency_ms: u64,
}

/// Service banner for `GET /`
#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub endpoints: Vec<&'static str>,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION").to_string();

    match state.model_info_service.model_info().await {
        Ok(info) => {
            let available_versions = info.available_versions();
            let status = if available_versions.is_empty() {
                HealthStatus::Degraded
            } else {
                HealthStatus::Ok
            };

            let response = HealthResponse {
                status,
                active_version: info.active_version,
                source: info.source,
                available_versions,
                version,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            let resolved = state.resolver.resolve().await;
            tracing::warn!(error = %e, "Health check could not enumerate artifacts");

            let response = HealthResponse {
                status: HealthStatus::Degraded,
                active_version: resolved.version,
                source: resolved.provenance,
                available_versions: Vec::new(),
                version,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
    }
}

/// GET /ready - 200 when the resolved version (or its fallback) can be loaded
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let resolved = state.resolver.resolve().await;

    let (status_code, response) = match state.loader.load(&resolved).await {
        Ok(loaded) => (
            StatusCode::OK,
            ReadyResponse {
                status: if loaded.fell_back() {
                    HealthStatus::Degraded
                } else {
                    HealthStatus::Ok
                },
                requested_version: resolved.version.clone(),
                effective_version: Some(loaded.effective_version),
                message: None,
                latency_ms: start.elapsed().as_millis() as u64,
            },
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            ReadyResponse {
                status: HealthStatus::Unavailable,
                requested_version: resolved.version.clone(),
                effective_version: None,
                message: Some(e.to_string()),
                latency_ms: start.elapsed().as_millis() as u64,
            },
        ),
    };

    (status_code, Json(response))
}

/// GET /live
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

/// GET /
pub async fn root() -> impl IntoResponse {
    Json(RootResponse {
        message: "Iris model server".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: vec![
            "/health",
            "/ready",
            "/live",
            "/predict",
            "/predict/{version}",
            "/model-info",
            "/switch-model",
            "/admin/cache/invalidate",
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serialization() {
        assert_eq!(serde_json::to_string(&HealthStatus::Ok).unwrap(), "\"ok\"");
        assert_eq!(
            serde_json::to_string(&HealthStatus::Degraded).unwrap(),
            "\"degraded\""
        );
        assert_eq!(
            serde_json::to_string(&HealthStatus::Unavailable).unwrap(),
            "\"unavailable\""
        );
    }

    #[test]
    fn test_ready_response_omits_empty_fields() {
        let response = ReadyResponse {
            status: HealthStatus::Ok,
            requested_version: "v1".to_string(),
            effective_version: Some("v1".to_string()),
            message: None,
            latency_ms: 1,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"effective_version\":\"v1\""));
        assert!(!json.contains("message"));
    }
}
