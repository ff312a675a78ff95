//! Route engine for campus walking directions.
//!
//! This module provides:
//! - [`RouteEngine`] - Owns the campus graph, answers route queries and applies
//!   path status changes in place
//! - [`PathResult`] - Route returned to collaborators (ids, distance, ETA, waypoints)
//! - [`SegmentInfo`] - Operator view of a walkway and its current status
//!
//! The engine holds no interior mutability. Callers that share it between
//! threads wrap it in a lock so that a status change never interleaves with a
//! running query.
//!
//! # Example
//!
//! ```ignore
//! use campusnav_lib::{load_campus, RouteEngine};
//!
//! let campus = load_campus("campus.json".as_ref())?;
//! let mut engine = RouteEngine::from_campus(&campus)?;
//! engine.update_path_status("student-center", "cafeteria", true);
//! let route = engine.find_shortest_path("main", "cafeteria", false);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::accessibility::{AccessibilityPolicy, AssumeAccessible};
use crate::dataset::{Campus, Coordinate, PathStatus, Segment};
use crate::error::Result;
use crate::graph::Node;
use crate::path::{find_route_dijkstra, RouteSearch};

/// Walking speed used for arrival estimates, in meters per minute.
pub const WALKING_SPEED_M_PER_MIN: f64 = 80.0;

/// Number of routes requested from [`RouteEngine::find_alternative_routes`]
/// when the caller does not say.
pub const DEFAULT_MAX_ROUTES: usize = 3;

/// Whole minutes needed to walk `distance` meters, rounded up.
pub fn estimated_minutes(distance: f64) -> u64 {
    (distance / WALKING_SPEED_M_PER_MIN).ceil() as u64
}

/// Computed walking route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResult {
    /// Node ids from start to end, both inclusive.
    pub path: Vec<String>,
    /// Total raw length in meters.
    pub distance: f64,
    /// Walking time in minutes.
    pub estimated_time: u64,
    /// One coordinate per entry in `path`.
    pub waypoints: Vec<Coordinate>,
}

impl PathResult {
    /// Number of walkways along the route.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Operator view of a walkway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentInfo {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub from_id: String,
    pub to_id: String,
    pub distance: f64,
    pub status: PathStatus,
    pub is_accessible: bool,
}

/// Owns the campus graph and answers route queries against it.
pub struct RouteEngine {
    nodes: HashMap<String, Node>,
    order: Vec<String>,
    segments: Vec<SegmentInfo>,
    segment_index: HashMap<String, usize>,
    policy: Arc<dyn AccessibilityPolicy>,
}

impl RouteEngine {
    /// Create an engine that treats every connection as accessible.
    pub fn new(nodes: Vec<Node>) -> Self {
        Self::with_policy(nodes, Arc::new(AssumeAccessible))
    }

    /// Create an engine with a custom accessibility policy.
    pub fn with_policy(nodes: Vec<Node>, policy: Arc<dyn AccessibilityPolicy>) -> Self {
        let mut segments = Vec::new();
        let mut segment_index = HashMap::new();
        for node in &nodes {
            for edge in &node.connections {
                if segment_index.contains_key(&edge.path_id) {
                    continue;
                }
                segment_index.insert(edge.path_id.clone(), segments.len());
                segments.push(SegmentInfo {
                    id: edge.path_id.clone(),
                    name: None,
                    from_id: node.id.clone(),
                    to_id: edge.neighbor_id.clone(),
                    distance: edge.distance,
                    status: if edge.is_available {
                        PathStatus::Open
                    } else {
                        PathStatus::Closed
                    },
                    is_accessible: edge.accessible,
                });
            }
        }

        let order = nodes.iter().map(|node| node.id.clone()).collect();
        let nodes = nodes
            .into_iter()
            .map(|node| (node.id.clone(), node))
            .collect();

        Self {
            nodes,
            order,
            segments,
            segment_index,
            policy,
        }
    }

    /// Build the graph for a campus dataset and wrap it in an engine.
    ///
    /// Walkway names and the exact closed/construction status are taken from
    /// the dataset records.
    pub fn from_campus(campus: &Campus) -> Result<Self> {
        Self::from_campus_with_policy(campus, Arc::new(AssumeAccessible))
    }

    pub fn from_campus_with_policy(
        campus: &Campus,
        policy: Arc<dyn AccessibilityPolicy>,
    ) -> Result<Self> {
        let mut engine = Self::with_policy(campus.build_graph()?, policy);
        engine.annotate_segments(&campus.segments);
        info!(
            nodes = engine.node_count(),
            segments = engine.segment_count(),
            policy = engine.policy.name(),
            "route engine ready"
        );
        Ok(engine)
    }

    fn annotate_segments(&mut self, records: &[Segment]) {
        for record in records {
            if let Some(&idx) = self.segment_index.get(&record.path_id()) {
                let info = &mut self.segments[idx];
                if info.name.is_none() {
                    info.name = record.name.clone();
                }
                info.status = record.status;
            }
        }
    }

    pub fn policy(&self) -> &dyn AccessibilityPolicy {
        self.policy.as_ref()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Nodes in construction order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Walkways in discovery order with their current status.
    pub fn segments(&self) -> &[SegmentInfo] {
        &self.segments
    }

    pub fn segment(&self, path_id: &str) -> Option<&SegmentInfo> {
        self.segment_index
            .get(path_id)
            .map(|&idx| &self.segments[idx])
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Find the shortest walking route over currently available paths.
    ///
    /// With `prefer_accessible`, connections the accessibility policy rejects
    /// cost 1.5x their length during selection. The reported distance is
    /// always the raw length. Returns `None` when either id is unknown or no
    /// route exists; asking for a route from a node to itself yields a
    /// single-node route of length zero.
    pub fn find_shortest_path(
        &self,
        start_id: &str,
        end_id: &str,
        prefer_accessible: bool,
    ) -> Option<PathResult> {
        let search = find_route_dijkstra(
            &self.nodes,
            self.policy.as_ref(),
            start_id,
            end_id,
            prefer_accessible,
        );

        match search {
            Some(search) => {
                let result = self.to_result(search);
                debug!(
                    start = start_id,
                    goal = end_id,
                    hops = result.hop_count(),
                    distance = result.distance,
                    "route found"
                );
                Some(result)
            }
            None => {
                debug!(start = start_id, goal = end_id, "no route found");
                None
            }
        }
    }

    /// Alternative route discovery.
    ///
    /// Currently returns the primary shortest route as the only entry, or an
    /// empty list when there is none. The signature is kept so callers need
    /// not change once k-shortest-path search lands.
    pub fn find_alternative_routes(
        &self,
        start_id: &str,
        end_id: &str,
        max_routes: usize,
    ) -> Vec<PathResult> {
        if max_routes == 0 {
            return Vec::new();
        }
        self.find_shortest_path(start_id, end_id, false)
            .into_iter()
            .take(max_routes)
            .collect()
    }

    /// Open or close the walkway between two nodes, in both directions.
    ///
    /// Returns `false` and changes nothing when either node or the
    /// connection between them does not exist.
    pub fn update_path_status(&mut self, from_id: &str, to_id: &str, is_available: bool) -> bool {
        let Some(path_id) = self
            .nodes
            .get(from_id)
            .and_then(|node| node.edge_to(to_id))
            .map(|edge| edge.path_id.clone())
        else {
            debug!(from = from_id, to = to_id, "ignoring status update for unknown walkway");
            return false;
        };

        self.apply_availability(from_id, to_id, &path_id, is_available);

        if let Some(&idx) = self.segment_index.get(&path_id) {
            let info = &mut self.segments[idx];
            if is_available {
                info.status = PathStatus::Open;
            } else if info.status.is_open() {
                info.status = PathStatus::Closed;
            }
        }

        info!(
            path_id = %path_id,
            from = from_id,
            to = to_id,
            available = is_available,
            "walkway availability updated"
        );
        true
    }

    /// Set the status of a walkway by its path id.
    ///
    /// Returns `false` when the path id is unknown.
    pub fn set_segment_status(&mut self, path_id: &str, status: PathStatus) -> bool {
        let Some(&idx) = self.segment_index.get(path_id) else {
            debug!(path_id, "ignoring status update for unknown path id");
            return false;
        };

        let (from_id, to_id) = {
            let info = &self.segments[idx];
            (info.from_id.clone(), info.to_id.clone())
        };
        self.apply_availability(&from_id, &to_id, path_id, status.is_open());
        self.segments[idx].status = status;

        info!(path_id, status = %status, "walkway status updated");
        true
    }

    fn apply_availability(&mut self, from_id: &str, to_id: &str, path_id: &str, available: bool) {
        if let Some(node) = self.nodes.get_mut(from_id) {
            node.set_availability(to_id, path_id, available);
        }
        if from_id != to_id {
            if let Some(node) = self.nodes.get_mut(to_id) {
                node.set_availability(from_id, path_id, available);
            }
        }
    }

    /// Location ids that closely resemble `query`, best match first.
    pub fn suggest_locations(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .order
            .iter()
            .filter_map(|id| {
                let node = self.nodes.get(id)?;
                let score = strsim::jaro_winkler(&needle, &node.id.to_lowercase())
                    .max(strsim::jaro_winkler(&needle, &node.name.to_lowercase()));
                (score >= 0.8).then_some((score, node.id.as_str()))
            })
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, id)| id.to_string())
            .collect()
    }

    fn to_result(&self, search: RouteSearch) -> PathResult {
        let waypoints = search
            .steps
            .iter()
            .filter_map(|id| self.nodes.get(id).map(|node| node.position))
            .collect();

        PathResult {
            estimated_time: estimated_minutes(search.distance),
            distance: search.distance,
            path: search.steps,
            waypoints,
        }
    }
}

impl fmt::Debug for RouteEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEngine")
            .field("node_count", &self.nodes.len())
            .field("segment_count", &self.segments.len())
            .field("policy", &self.policy.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Location;
    use crate::graph::build_graph;

    fn engine() -> RouteEngine {
        let locations = vec![
            Location::new("a", 0.0, 0.0),
            Location::new("b", 0.0, 1.0),
        ];
        let segments = vec![Segment::new("a", "b", 10.0, PathStatus::Construction).with_id("ab")];
        RouteEngine::new(build_graph(&locations, &segments).unwrap())
    }

    #[test]
    fn estimated_minutes_rounds_up() {
        assert_eq!(estimated_minutes(0.0), 0);
        assert_eq!(estimated_minutes(80.0), 1);
        assert_eq!(estimated_minutes(81.0), 2);
        assert_eq!(estimated_minutes(470.0), 6);
    }

    #[test]
    fn segments_derived_from_nodes_without_dataset() {
        let engine = engine();
        assert_eq!(engine.segment_count(), 1);
        let info = engine.segment("ab").unwrap();
        assert_eq!(info.from_id, "a");
        assert_eq!(info.to_id, "b");
        // Without the dataset record the construction state collapses to closed.
        assert_eq!(info.status, PathStatus::Closed);
    }

    #[test]
    fn closing_keeps_construction_status() {
        let campus = Campus::new(
            vec![Location::new("a", 0.0, 0.0), Location::new("b", 0.0, 1.0)],
            vec![Segment::new("a", "b", 10.0, PathStatus::Construction).with_id("ab")],
        );
        let mut engine = RouteEngine::from_campus(&campus).unwrap();
        assert_eq!(engine.segment("ab").unwrap().status, PathStatus::Construction);

        assert!(engine.update_path_status("a", "b", false));
        assert_eq!(engine.segment("ab").unwrap().status, PathStatus::Construction);

        assert!(engine.update_path_status("b", "a", true));
        assert_eq!(engine.segment("ab").unwrap().status, PathStatus::Open);
    }

    #[test]
    fn path_result_hop_count() {
        let result = PathResult {
            path: vec!["a".into(), "b".into(), "c".into()],
            distance: 2.0,
            estimated_time: 1,
            waypoints: vec![],
        };
        assert_eq!(result.hop_count(), 2);
    }

    #[test]
    fn path_result_serializes_camel_case() {
        let engine = engine();
        let result = engine.find_shortest_path("a", "a", false).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"estimatedTime\":0"));
        assert!(json.contains("\"waypoints\":[{\"lat\":0.0,\"lng\":0.0}]"));
    }

    #[test]
    fn debug_reports_sizes_and_policy() {
        let debug = format!("{:?}", engine());
        assert!(debug.contains("node_count: 2"));
        assert!(debug.contains("assume-accessible"));
    }
}
