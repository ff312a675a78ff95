//! Shared infrastructure for campus navigation HTTP services.
//!
//! This crate provides the HTTP glue that sits between axum handlers and
//! `campusnav-lib`:
//!
//! - [`AppState`]: The route engine behind a fair read/write lock
//! - [`health`]: Liveness and readiness probe handlers
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`ServiceResponse`]: Wrapper for successful responses with content type
//! - [`config`]: Environment-driven service configuration
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking and metrics middleware
//! - Request types with validation for each endpoint
//!
//! Handlers stay thin: parse, validate, lock the engine, call the library,
//! format the response. Routing logic lives entirely in `campusnav-lib`.
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides fixture-backed state for handler
//! testing. Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

pub mod config;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ConfigError, ServiceConfig};
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_path_status_updated, record_route_calculated,
    record_route_distance, record_route_failed, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId, REQUEST_ID_HEADER};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_INVALID_STATUS, PROBLEM_ROUTE_NOT_FOUND, PROBLEM_SERVICE_UNAVAILABLE,
    PROBLEM_UNKNOWN_LOCATION, PROBLEM_UNKNOWN_PATH,
};
pub use request::{
    AdminPathPatchRequest, AlternativesRequest, PathStatusUpdateRequest, RouteRequest, Validate,
    MAX_ALTERNATIVE_ROUTES,
};
pub use response::ServiceResponse;
pub use state::{AppState, AppStateError};
