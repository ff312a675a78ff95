use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::accessibility::{edge_weight, AccessibilityPolicy};
use crate::graph::Node;

/// Raw outcome of a shortest-path search.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSearch {
    /// Node ids from start to goal, both inclusive.
    pub steps: Vec<String>,
    /// Sum of raw edge lengths along `steps`.
    pub distance: f64,
    /// Sum of weighted edge costs along `steps` (includes accessibility penalties).
    pub cost: f64,
}

/// Run Dijkstra's algorithm over available edges only.
///
/// Returns `None` when either endpoint is unknown or the goal cannot be
/// reached. Equal-cost candidates are settled in node id order so repeated
/// queries return the same path.
pub fn find_route_dijkstra(
    graph: &HashMap<String, Node>,
    policy: &dyn AccessibilityPolicy,
    start: &str,
    goal: &str,
    prefer_accessible: bool,
) -> Option<RouteSearch> {
    let start_node = graph.get(start)?;
    if !graph.contains_key(goal) {
        return None;
    }

    if start == goal {
        return Some(RouteSearch {
            steps: vec![start_node.id.clone()],
            distance: 0.0,
            cost: 0.0,
        });
    }

    let mut costs: HashMap<&str, f64> = HashMap::new();
    let mut lengths: HashMap<&str, f64> = HashMap::new();
    let mut parents: HashMap<&str, &str> = HashMap::new();
    let mut settled: HashSet<&str> = HashSet::new();
    let mut queue = BinaryHeap::new();

    costs.insert(start_node.id.as_str(), 0.0);
    lengths.insert(start_node.id.as_str(), 0.0);
    queue.push(QueueEntry::new(start_node.id.as_str(), 0.0));

    while let Some(entry) = queue.pop() {
        if !settled.insert(entry.node) {
            continue;
        }

        if entry.node == goal {
            return Some(RouteSearch {
                steps: reconstruct_path(&parents, start, goal),
                distance: lengths.get(entry.node).copied().unwrap_or(0.0),
                cost: entry.cost.0,
            });
        }

        let Some(current) = graph.get(entry.node) else {
            continue;
        };
        let current_length = lengths.get(entry.node).copied().unwrap_or(0.0);

        for edge in current.available_connections() {
            let Some(neighbor) = graph.get(edge.neighbor_id.as_str()) else {
                continue;
            };
            let next = neighbor.id.as_str();
            if settled.contains(next) {
                continue;
            }

            let next_cost =
                entry.cost.0 + edge_weight(policy, current, neighbor, edge, prefer_accessible);
            if next_cost < *costs.get(next).unwrap_or(&f64::INFINITY) {
                costs.insert(next, next_cost);
                lengths.insert(next, current_length + edge.distance);
                parents.insert(next, current.id.as_str());
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    None
}

fn reconstruct_path(parents: &HashMap<&str, &str>, start: &str, goal: &str) -> Vec<String> {
    let mut path = vec![goal.to_string()];
    let mut current = goal;
    while current != start {
        match parents.get(current) {
            Some(&parent) => {
                path.push(parent.to_string());
                current = parent;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry<'a> {
    node: &'a str,
    cost: FloatOrd,
}

impl<'a> QueueEntry<'a> {
    fn new(node: &'a str, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
