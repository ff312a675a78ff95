//! Campus walking-route HTTP microservice.
//!
//! # Endpoints
//!
//! - `POST /api/v1/route` - Shortest walking route between two locations
//! - `POST /api/v1/route/alternatives` - Candidate routes between two locations
//! - `PUT /api/v1/paths/status` - Open or close the walkway between two locations
//! - `GET /api/admin/paths` - List walkways with their status
//! - `PATCH /api/admin/paths` - Set a walkway's status by path id
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post, put},
};
use tower_http::timeout::TimeoutLayer;

use campusnav_service_shared::{
    AppState, MetricsConfig, MetricsLayer, ServiceConfig, health_live, health_ready,
    metrics_handler,
};

pub mod handlers;

/// Build the service router.
///
/// Requests that run longer than `config.request_timeout` (including time
/// queued behind a status update) are answered with 408. Health probes report
/// this crate's name and version.
pub fn app(state: AppState, config: &ServiceConfig, metrics: &MetricsConfig) -> Router {
    let state = state.with_service(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    Router::new()
        .route("/api/v1/route", post(handlers::route))
        .route("/api/v1/route/alternatives", post(handlers::alternatives))
        .route("/api/v1/paths/status", put(handlers::update_path_status))
        .route(
            "/api/admin/paths",
            get(handlers::list_paths).patch(handlers::patch_path),
        )
        .route(&metrics.path, get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(MetricsLayer)
        .with_state(state)
}
