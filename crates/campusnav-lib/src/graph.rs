use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::dataset::{Coordinate, Location, Segment};
use crate::error::{Error, Result};

/// Directed half of a walkway, owned by the node it leaves from.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub neighbor_id: String,
    /// Length in meters.
    pub distance: f64,
    /// Identifier of the walkway; shared by both directions.
    pub path_id: String,
    /// `false` blocks traversal in both directions.
    pub is_available: bool,
    /// Accessibility metadata carried from the walkway record.
    pub accessible: bool,
}

/// Routable point in the campus graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub position: Coordinate,
    /// Edges in discovery order.
    pub connections: Vec<Edge>,
}

impl Node {
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
            connections: Vec::new(),
        }
    }

    /// First edge leading to `neighbor`, if any.
    pub fn edge_to(&self, neighbor: &str) -> Option<&Edge> {
        self.connections
            .iter()
            .find(|edge| edge.neighbor_id == neighbor)
    }

    /// Edges that can currently be walked.
    pub fn available_connections(&self) -> impl Iterator<Item = &Edge> {
        self.connections.iter().filter(|edge| edge.is_available)
    }

    pub(crate) fn set_availability(
        &mut self,
        neighbor: &str,
        path_id: &str,
        is_available: bool,
    ) -> usize {
        let mut touched = 0;
        for edge in self
            .connections
            .iter_mut()
            .filter(|edge| edge.neighbor_id == neighbor && edge.path_id == path_id)
        {
            edge.is_available = is_available;
            touched += 1;
        }
        touched
    }
}

/// Build the campus routing graph from flat location and walkway records.
///
/// Each walkway contributes two edges, one per direction, carrying the same
/// path id, distance and availability. Walkways that reference an unknown
/// location are dropped. Duplicate location ids, duplicate path ids and
/// negative or non-finite distances are rejected.
pub fn build_graph(locations: &[Location], segments: &[Segment]) -> Result<Vec<Node>> {
    let mut nodes: Vec<Node> = Vec::with_capacity(locations.len());
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(locations.len());

    for location in locations {
        if index.insert(location.id.as_str(), nodes.len()).is_some() {
            return Err(Error::DuplicateLocation {
                id: location.id.clone(),
            });
        }
        nodes.push(Node::new(
            location.id.clone(),
            location.display_name(),
            location.position(),
        ));
    }

    let mut path_ids: HashSet<String> = HashSet::with_capacity(segments.len());
    let mut dropped = 0usize;
    for segment in segments {
        let path_id = segment.path_id();
        if !segment.distance.is_finite() || segment.distance < 0.0 {
            return Err(Error::InvalidDistance {
                path_id,
                distance: segment.distance,
            });
        }
        if !path_ids.insert(path_id.clone()) {
            return Err(Error::DuplicatePath { id: path_id });
        }

        let (Some(&from), Some(&to)) = (
            index.get(segment.from_id.as_str()),
            index.get(segment.to_id.as_str()),
        ) else {
            warn!(
                path_id = %path_id,
                from = %segment.from_id,
                to = %segment.to_id,
                "dropping walkway with unknown endpoint"
            );
            dropped += 1;
            continue;
        };

        let is_available = segment.status.is_open();
        nodes[from].connections.push(Edge {
            neighbor_id: segment.to_id.clone(),
            distance: segment.distance,
            path_id: path_id.clone(),
            is_available,
            accessible: segment.is_accessible,
        });
        nodes[to].connections.push(Edge {
            neighbor_id: segment.from_id.clone(),
            distance: segment.distance,
            path_id,
            is_available,
            accessible: segment.is_accessible,
        });
    }

    debug!(
        nodes = nodes.len(),
        segments = segments.len() - dropped,
        dropped,
        "built campus graph"
    );

    Ok(nodes)
}
