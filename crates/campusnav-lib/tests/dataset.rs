mod common;

use std::fs;

use campusnav_lib::{load_campus, Campus, Error, PathStatus};
use tempfile::tempdir;

use common::fixture_path;

#[test]
fn fixture_dataset_loads() {
    let campus = load_campus(&fixture_path()).expect("fixture loads");

    assert_eq!(campus.locations.len(), 5);
    assert_eq!(campus.segments.len(), 5);
    assert_eq!(
        campus.location("student-center").unwrap().display_name(),
        "Student Center"
    );
    assert_eq!(campus.segments[2].status, PathStatus::Construction);
}

#[test]
fn missing_dataset_reports_path() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("absent.json");

    let err = load_campus(&path).unwrap_err();
    assert!(matches!(err, Error::DatasetNotFound { path: ref p } if p == &path));
}

#[test]
fn malformed_dataset_is_a_json_error() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("campus.json");
    fs::write(&path, "{ \"locations\": [ { \"id\": 1 } ] }").unwrap();

    assert!(matches!(load_campus(&path), Err(Error::Json(_))));
}

#[test]
fn unknown_status_string_is_rejected() {
    let json = r#"{
        "locations": [{"id":"a","lat":0,"lng":0},{"id":"b","lat":0,"lng":1}],
        "segments": [{"fromId":"a","toId":"b","distance":5,"status":"flooded"}]
    }"#;
    assert!(Campus::from_json_str(json).is_err());
}

#[test]
fn negative_distance_in_file_fails_graph_build() {
    let json = r#"{
        "locations": [{"id":"a","lat":0,"lng":0},{"id":"b","lat":0,"lng":1}],
        "segments": [{"id":"x","fromId":"a","toId":"b","distance":-3,"status":"open"}]
    }"#;
    let campus = Campus::from_json_str(json).expect("json parses");
    assert!(matches!(
        campus.build_graph(),
        Err(Error::InvalidDistance { .. })
    ));
}

#[test]
fn empty_document_is_an_empty_campus() {
    let campus = Campus::from_json_str("{}").expect("json parses");
    assert!(campus.locations.is_empty());
    assert!(campus.build_graph().unwrap().is_empty());
}
