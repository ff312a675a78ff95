//! Health check handlers for liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// "ok" or "not_ready: <reason>".
    pub status: String,

    pub service: String,

    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations_loaded: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments_loaded: Option<usize>,
}

impl HealthStatus {
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            locations_loaded: None,
            segments_loaded: None,
        }
    }

    pub fn ready(service: &str, version: &str, locations: usize, segments: usize) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            locations_loaded: Some(locations),
            segments_loaded: Some(segments),
        }
    }

    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            locations_loaded: None,
            segments_loaded: None,
        }
    }
}

/// Liveness probe handler.
///
/// Reports the service identity stored on [`AppState`]:
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"campusnav-service-route","version":"0.1.0"}
/// ```
pub async fn health_live(State(state): State<AppState>) -> impl IntoResponse {
    let status = HealthStatus::alive(state.service_name(), state.service_version());
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Ready once the campus graph holds at least one location. Waits behind any
/// in-flight status update.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = state.service_name();
    let version = state.service_version();

    let (locations, segments) = {
        let engine = state.engine().await;
        (engine.node_count(), engine.segment_count())
    };

    if locations == 0 {
        let status = HealthStatus::not_ready(service, version, "no locations loaded");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(service, version, locations, segments);
    (StatusCode::OK, Json(status)).into_response()
}
