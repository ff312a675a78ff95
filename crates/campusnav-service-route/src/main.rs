//! Campus walking-route HTTP microservice.
//!
//! # Configuration
//!
//! - `CAMPUSNAV_DATA_PATH` - Path to the campus dataset JSON (default: campus.json)
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED`, `METRICS_PATH` - Prometheus exposition

use std::net::SocketAddr;

use tracing::{error, info};

use campusnav_service_route::app;
use campusnav_service_shared::{
    AppState, LoggingConfig, MetricsConfig, ServiceConfig, init_logging, init_metrics,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("route");
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env().inspect_err(|e| {
        error!(error = %e, "invalid metrics configuration");
    })?;
    if let Err(e) = init_metrics(&metrics_config) {
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env().inspect_err(|e| {
        error!(error = %e, "invalid service configuration");
    })?;

    info!(
        data_path = %config.data_path.display(),
        port = config.port,
        timeout_secs = config.request_timeout.as_secs(),
        "starting route service"
    );

    let state = AppState::load(&config.data_path).inspect_err(|e| {
        error!(error = %e, path = %config.data_path.display(), "failed to load application state");
    })?;

    {
        let engine = state.engine().await;
        info!(
            locations = engine.node_count(),
            segments = engine.segment_count(),
            "application state loaded"
        );
    }

    let router = app(state, &config, &metrics_config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
