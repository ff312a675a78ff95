//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use campusnav_lib::{build_graph, Location, PathStatus, RouteEngine, Segment};

/// Path to the shared campus fixture.
#[allow(dead_code)]
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/campus.json")
}

/// Four-building campus: main-library (150, open), library-student (200, open),
/// student-cafeteria (120, construction). Main and student center have no
/// direct walkway.
#[allow(dead_code)]
pub fn four_building_campus() -> (Vec<Location>, Vec<Segment>) {
    let locations = vec![
        Location::new("M", 9.85, 123.9167).with_name("Main Building"),
        Location::new("L", 9.8505, 123.917).with_name("Library"),
        Location::new("S", 9.851, 123.9165).with_name("Student Center"),
        Location::new("C", 9.8515, 123.9168).with_name("Cafeteria"),
    ];
    let segments = vec![
        Segment::new("M", "L", 150.0, PathStatus::Open).with_id("ml"),
        Segment::new("L", "S", 200.0, PathStatus::Open).with_id("ls"),
        Segment::new("S", "C", 120.0, PathStatus::Construction).with_id("sc"),
    ];
    (locations, segments)
}

#[allow(dead_code)]
pub fn four_building_engine() -> RouteEngine {
    let (locations, segments) = four_building_campus();
    RouteEngine::new(build_graph(&locations, &segments).expect("fixture graph builds"))
}

/// Locations named `n0..n{count}` laid out on a line.
#[allow(dead_code)]
pub fn numbered_locations(count: usize) -> Vec<Location> {
    (0..count)
        .map(|i| Location::new(format!("n{i}"), 0.0, i as f64))
        .collect()
}
