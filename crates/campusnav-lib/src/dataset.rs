//! Campus dataset records and JSON loading.
//!
//! A campus dataset is a single JSON document with two arrays:
//!
//! ```json
//! {
//!   "locations": [{ "id": "main", "name": "Main Building", "lat": 9.85, "lng": 123.9167 }],
//!   "segments": [{ "id": "p1", "fromId": "main", "toId": "library", "distance": 150, "status": "open" }]
//! }
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::{build_graph, Node};

/// Environment variable that overrides the dataset location.
pub const DATA_PATH_ENV: &str = "CAMPUSNAV_DATA_PATH";

const DEFAULT_DATASET_FILE: &str = "campus.json";

/// Geographic coordinate of a location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Operator-facing state of a walkway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStatus {
    Open,
    Closed,
    Construction,
}

impl PathStatus {
    /// Only open paths can be walked.
    pub fn is_open(self) -> bool {
        self == PathStatus::Open
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PathStatus::Open => "open",
            PathStatus::Closed => "closed",
            PathStatus::Construction => "construction",
        }
    }
}

impl fmt::Display for PathStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PathStatus {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(PathStatus::Open),
            "closed" => Ok(PathStatus::Closed),
            "construction" => Ok(PathStatus::Construction),
            _ => Err(Error::InvalidPathStatus {
                value: value.to_string(),
            }),
        }
    }
}

fn default_true() -> bool {
    true
}

/// A building or waypoint supplied by the campus dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub lat: f64,
    pub lng: f64,
    /// Informational wheelchair-access flag for the building itself.
    #[serde(default = "default_true")]
    pub accessible: bool,
}

impl Location {
    pub fn new(id: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            name: None,
            lat,
            lng,
            accessible: true,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn position(&self) -> Coordinate {
        Coordinate {
            lat: self.lat,
            lng: self.lng,
        }
    }

    /// Display name, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// A bidirectional walkway between two locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Path identifier. Derived from the endpoints when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub from_id: String,
    pub to_id: String,
    /// Length in meters.
    pub distance: f64,
    pub status: PathStatus,
    #[serde(default = "default_true")]
    pub is_accessible: bool,
}

impl Segment {
    pub fn new(
        from_id: impl Into<String>,
        to_id: impl Into<String>,
        distance: f64,
        status: PathStatus,
    ) -> Self {
        Self {
            id: None,
            name: None,
            from_id: from_id.into(),
            to_id: to_id.into(),
            distance,
            status,
            is_accessible: true,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Mark the walkway as not wheelchair accessible (stairs, steep ramps).
    pub fn inaccessible(mut self) -> Self {
        self.is_accessible = false;
        self
    }

    pub fn path_id(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("{}-{}", self.from_id, self.to_id))
    }
}

/// In-memory campus dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Campus {
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl Campus {
    pub fn new(locations: Vec<Location>, segments: Vec<Segment>) -> Self {
        Self {
            locations,
            segments,
        }
    }

    /// Parse a campus dataset from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let campus: Campus = serde_json::from_str(json)?;
        debug!(
            locations = campus.locations.len(),
            segments = campus.segments.len(),
            "parsed campus dataset"
        );
        Ok(campus)
    }

    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|location| location.id == id)
    }

    /// Build the routing graph for this dataset.
    pub fn build_graph(&self) -> Result<Vec<Node>> {
        build_graph(&self.locations, &self.segments)
    }
}

/// Load a campus dataset from a JSON file.
pub fn load_campus(path: &Path) -> Result<Campus> {
    if !path.exists() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = fs::read_to_string(path)?;
    let campus = Campus::from_json_str(&contents)?;
    info!(
        path = %path.display(),
        locations = campus.locations.len(),
        segments = campus.segments.len(),
        "campus dataset loaded"
    );
    Ok(campus)
}

/// Resolve the dataset path from `CAMPUSNAV_DATA_PATH`, else `campus.json`
/// in the working directory.
pub fn default_dataset_path() -> PathBuf {
    std::env::var_os(DATA_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_status_parses_case_insensitively() {
        assert_eq!("open".parse::<PathStatus>().unwrap(), PathStatus::Open);
        assert_eq!("CLOSED".parse::<PathStatus>().unwrap(), PathStatus::Closed);
        assert_eq!(
            " Construction ".parse::<PathStatus>().unwrap(),
            PathStatus::Construction
        );
    }

    #[test]
    fn path_status_rejects_unknown_values() {
        let err = "flooded".parse::<PathStatus>().unwrap_err();
        assert!(matches!(err, Error::InvalidPathStatus { ref value } if value == "flooded"));
    }

    #[test]
    fn only_open_status_is_walkable() {
        assert!(PathStatus::Open.is_open());
        assert!(!PathStatus::Closed.is_open());
        assert!(!PathStatus::Construction.is_open());
    }

    #[test]
    fn segment_path_id_falls_back_to_endpoints() {
        let segment = Segment::new("main", "library", 150.0, PathStatus::Open);
        assert_eq!(segment.path_id(), "main-library");
        assert_eq!(segment.with_id("p1").path_id(), "p1");
    }

    #[test]
    fn segment_json_uses_camel_case_and_defaults() {
        let json = r#"{"fromId":"a","toId":"b","distance":12.5,"status":"construction"}"#;
        let segment: Segment = serde_json::from_str(json).unwrap();
        assert_eq!(segment.from_id, "a");
        assert_eq!(segment.to_id, "b");
        assert_eq!(segment.status, PathStatus::Construction);
        assert!(segment.is_accessible);
        assert!(segment.id.is_none());
    }

    #[test]
    fn location_display_name_falls_back_to_id() {
        let location = Location::new("gym", 1.0, 2.0);
        assert_eq!(location.display_name(), "gym");
        assert_eq!(
            location.with_name("Sports Complex").display_name(),
            "Sports Complex"
        );
    }
}
