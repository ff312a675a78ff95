//! Campus navigation library entry points.
//!
//! This crate exposes helpers to load a campus dataset (locations and the
//! walkways between them), build the routing graph, and answer walking-route
//! queries while operators open and close paths at runtime. Higher-level
//! consumers (CLI, HTTP service) should only depend on the functions exported
//! here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod accessibility;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod graph;
pub mod path;

pub use accessibility::{
    AccessibilityPolicy, AssumeAccessible, SegmentAccessibility, ACCESSIBILITY_PENALTY,
};
pub use dataset::{
    default_dataset_path, load_campus, Campus, Coordinate, Location, PathStatus, Segment,
    DATA_PATH_ENV,
};
pub use engine::{
    estimated_minutes, PathResult, RouteEngine, SegmentInfo, DEFAULT_MAX_ROUTES,
    WALKING_SPEED_M_PER_MIN,
};
pub use error::{Error, Result};
pub use graph::{build_graph, Edge, Node};
pub use path::{find_route_dijkstra, RouteSearch};
