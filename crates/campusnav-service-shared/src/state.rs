//! Application state for HTTP services.
//!
//! The route engine is mutable (path status updates) and shared by every
//! handler, so it lives behind a single `tokio::sync::RwLock`. Route queries
//! hold the read guard for the whole search; status updates take the write
//! guard. Tokio's lock is fair, so a queued status update is not starved by a
//! stream of route queries.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use campusnav_lib::{load_campus, Campus, Error as LibError, RouteEngine};

const DEFAULT_SERVICE_NAME: &str = "campusnav";

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Dataset file does not exist.
    DatasetNotFound(String),

    /// Dataset could not be read, parsed or turned into a graph.
    DatasetLoad(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatasetNotFound(path) => write!(f, "campus dataset not found: {}", path),
            Self::DatasetLoad(e) => write!(f, "failed to load campus dataset: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DatasetLoad(e) => Some(e),
            Self::DatasetNotFound(_) => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::DatasetLoad(err)
    }
}

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable; clones share the same engine.
///
/// # Example
///
/// ```ignore
/// use axum::extract::State;
/// use campusnav_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let engine = state.engine().await;
///     let route = engine.find_shortest_path("main", "library", false);
/// }
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    service_name: &'static str,
    service_version: &'static str,
}

struct AppStateInner {
    engine: RwLock<RouteEngine>,
    dataset_path: Option<PathBuf>,
}

impl AppState {
    /// Load a campus dataset and build the route engine from it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppStateError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(AppStateError::DatasetNotFound(path.display().to_string()));
        }

        tracing::info!(path = %path.display(), "loading campus dataset");
        let campus = load_campus(path)?;
        let engine = RouteEngine::from_campus(&campus)?;

        Ok(Self::build(engine, Some(path.to_path_buf())))
    }

    /// Build state from an in-memory dataset.
    pub fn from_campus(campus: &Campus) -> Result<Self, AppStateError> {
        Ok(Self::build(RouteEngine::from_campus(campus)?, None))
    }

    /// Wrap a pre-built engine.
    pub fn from_engine(engine: RouteEngine) -> Self {
        Self::build(engine, None)
    }

    fn build(engine: RouteEngine, dataset_path: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                engine: RwLock::new(engine),
                dataset_path,
            }),
            service_name: DEFAULT_SERVICE_NAME,
            service_version: env!("CARGO_PKG_VERSION"),
        }
    }

    /// Name and version reported by the health probes.
    ///
    /// Services pass their own `env!("CARGO_PKG_NAME")` and
    /// `env!("CARGO_PKG_VERSION")`.
    pub fn with_service(mut self, name: &'static str, version: &'static str) -> Self {
        self.service_name = name;
        self.service_version = version;
        self
    }

    pub fn service_name(&self) -> &'static str {
        self.service_name
    }

    pub fn service_version(&self) -> &'static str {
        self.service_version
    }

    /// Shared access for route queries.
    pub async fn engine(&self) -> RwLockReadGuard<'_, RouteEngine> {
        self.inner.engine.read().await
    }

    /// Exclusive access for status updates.
    pub async fn engine_mut(&self) -> RwLockWriteGuard<'_, RouteEngine> {
        self.inner.engine.write().await
    }

    /// Dataset file the state was loaded from, if any.
    pub fn dataset_path(&self) -> Option<&Path> {
        self.inner.dataset_path.as_deref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("AppState");
        debug.field("service", &self.service_name);
        debug.field("dataset_path", &self.inner.dataset_path);
        match self.inner.engine.try_read() {
            Ok(engine) => debug.field("engine", &*engine),
            Err(_) => debug.field("engine", &"<locked>"),
        };
        debug.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusnav_lib::{Location, PathStatus, Segment};

    fn small_campus() -> Campus {
        Campus::new(
            vec![
                Location::new("a", 0.0, 0.0),
                Location::new("b", 0.0, 1.0),
            ],
            vec![Segment::new("a", "b", 80.0, PathStatus::Open).with_id("ab")],
        )
    }

    #[tokio::test]
    async fn test_app_state_from_campus() {
        let state = AppState::from_campus(&small_campus()).unwrap();
        let engine = state.engine().await;

        assert_eq!(engine.node_count(), 2);
        assert_eq!(engine.segment_count(), 1);
        assert!(state.dataset_path().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_engine() {
        let state1 = AppState::from_campus(&small_campus()).unwrap();
        let state2 = state1.clone();

        assert!(state1.engine_mut().await.update_path_status("a", "b", false));
        assert!(state2
            .engine()
            .await
            .find_shortest_path("a", "b", false)
            .is_none());
    }

    #[test]
    fn test_app_state_debug() {
        let state = AppState::from_campus(&small_campus()).unwrap();
        let debug = format!("{:?}", state);

        assert!(debug.contains("AppState"));
        assert!(debug.contains("node_count: 2"));
    }

    #[test]
    fn test_service_identity_is_carried_by_clones() {
        let state = AppState::from_campus(&small_campus()).unwrap();
        assert_eq!(state.service_name(), "campusnav");

        let state = state.with_service("campusnav-service-route", "9.9.9");
        let clone = state.clone();
        assert_eq!(clone.service_name(), "campusnav-service-route");
        assert_eq!(clone.service_version(), "9.9.9");
    }

    #[test]
    fn test_app_state_error_display() {
        let err = AppStateError::DatasetNotFound("/path/to/campus.json".to_string());
        assert!(err.to_string().contains("/path/to/campus.json"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_app_state_load_nonexistent() {
        let result = AppState::load("/nonexistent/path/to/campus.json");

        match result.unwrap_err() {
            AppStateError::DatasetNotFound(path) => assert!(path.contains("nonexistent")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_app_state_load_rejects_bad_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campus.json");
        std::fs::write(&path, "not json").unwrap();

        let err = AppState::load(&path).unwrap_err();
        assert!(matches!(err, AppStateError::DatasetLoad(LibError::Json(_))));
    }
}
