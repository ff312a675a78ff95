//! Prometheus metrics for campus navigation services.
//!
//! HTTP-level counters and histograms are recorded by
//! [`crate::middleware::MetricsLayer`]. The helpers below record business
//! metrics from handlers:
//!
//! - `campusnav_routes_calculated_total{endpoint}`
//! - `campusnav_routes_failed_total{reason}`
//! - `campusnav_route_distance_meters` (histogram)
//! - `campusnav_path_status_updates_total{status,applied}`

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Route for the exposition endpoint.
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Read `METRICS_ENABLED` (anything but "false" enables) and `METRICS_PATH`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// A path without a leading `/` gets one. Blank paths, route parameters
    /// and paths under `/api/` or `/health/` are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = lookup("METRICS_ENABLED")
            .map(|v| v.trim().to_lowercase() != "false")
            .unwrap_or(true);
        let path = match lookup("METRICS_PATH") {
            Some(value) => normalize_metrics_path(&value).ok_or(ConfigError {
                variable: "METRICS_PATH",
                value,
            })?,
            None => Self::default().path,
        };

        Ok(Self { enabled, path })
    }
}

fn normalize_metrics_path(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.contains(['{', '}', '*']) {
        return None;
    }

    let path = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    };
    if path == "/api" || path.starts_with("/api/") || path.starts_with("/health/") {
        return None;
    }
    Some(path)
}

/// Install the Prometheus recorder. Fails when disabled or called twice.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)?;

    Ok(())
}

/// Prometheus exposition text.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

#[derive(Debug, Clone)]
pub enum MetricsError {
    Disabled,
    AlreadyInitialized,
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

/// Count a route answered by `endpoint` ("route" or "alternatives").
pub fn record_route_calculated(endpoint: &str) {
    metrics::counter!(
        "campusnav_routes_calculated_total",
        "endpoint" => endpoint.to_string()
    )
    .increment(1);
}

/// Count a failed route request (e.g. "no_route", "unknown_location", "validation_error").
pub fn record_route_failed(reason: &str) {
    metrics::counter!(
        "campusnav_routes_failed_total",
        "reason" => reason.to_string()
    )
    .increment(1);
}

pub fn record_route_distance(distance: f64) {
    metrics::histogram!("campusnav_route_distance_meters").record(distance);
}

/// Count a status mutation; `applied` is false when the walkway was unknown.
pub fn record_path_status_updated(status: &str, applied: bool) {
    metrics::counter!(
        "campusnav_path_status_updates_total",
        "status" => status.to_string(),
        "applied" => if applied { "true" } else { "false" }
    )
    .increment(1);
}
