//! Fixture-backed helpers for handler tests.

use std::path::PathBuf;
use std::sync::OnceLock;

use campusnav_lib::{load_campus, Campus};

use crate::state::AppState;

/// Shared campus fixture.
pub const TEST_FIXTURE_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../docs/fixtures/campus.json"
);

static TEST_CAMPUS: OnceLock<Campus> = OnceLock::new();

/// Fresh state built from the fixture dataset.
///
/// The parsed dataset is cached, but every call gets its own engine so that
/// status updates in one test do not leak into another.
///
/// # Panics
///
/// Panics if the fixture cannot be loaded.
pub fn test_state() -> AppState {
    let campus = TEST_CAMPUS.get_or_init(|| {
        let path = fixture_path();
        load_campus(&path)
            .unwrap_or_else(|e| panic!("failed to load test fixture from {:?}: {}", path, e))
    });
    AppState::from_campus(campus)
        .unwrap_or_else(|e| panic!("failed to build state from test fixture: {}", e))
}

pub fn fixture_path() -> PathBuf {
    PathBuf::from(TEST_FIXTURE_PATH)
}

/// Location and walkway ids in the fixture.
pub mod fixture_ids {
    pub const MAIN: &str = "main";
    pub const LIBRARY: &str = "library";
    pub const STUDENT_CENTER: &str = "student-center";
    pub const CAFETERIA: &str = "cafeteria";
    pub const SPORTS: &str = "sports";

    /// Student center to cafeteria, under construction in the fixture.
    pub const CONSTRUCTION_PATH: &str = "p3";
    /// Main building to student center stairs, not wheelchair accessible.
    pub const STAIRS_PATH: &str = "p5";
}

pub fn test_request_id() -> String {
    format!("test-{}", uuid::Uuid::now_v7())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_path_exists() {
        let path = fixture_path();
        assert!(path.exists(), "fixture not found at {:?}", path);
    }

    #[tokio::test]
    async fn test_state_contains_fixture_locations() {
        let state = test_state();
        let engine = state.engine().await;

        assert!(engine.contains(fixture_ids::MAIN));
        assert!(engine.contains(fixture_ids::SPORTS));
        assert!(engine.segment(fixture_ids::CONSTRUCTION_PATH).is_some());
    }

    #[tokio::test]
    async fn test_states_are_independent() {
        let first = test_state();
        let second = test_state();

        first
            .engine_mut()
            .await
            .update_path_status(fixture_ids::MAIN, fixture_ids::LIBRARY, false);

        let engine = second.engine().await;
        let edge = engine
            .node(fixture_ids::MAIN)
            .and_then(|node| node.edge_to(fixture_ids::LIBRARY))
            .unwrap();
        assert!(edge.is_available);
    }

    #[test]
    fn test_request_id_unique() {
        assert_ne!(test_request_id(), test_request_id());
    }
}
