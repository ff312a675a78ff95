//! Accessibility weighting strategies.
//!
//! When a route query asks for accessible routing, every connection the
//! active [`AccessibilityPolicy`] reports as non-accessible has its weight
//! inflated by [`ACCESSIBILITY_PENALTY`]. The penalty biases edge selection
//! only; reported route distances stay raw.
//!
//! The engine defaults to [`AssumeAccessible`], under which the penalty never
//! applies. [`SegmentAccessibility`] reads the per-walkway `isAccessible`
//! flag from the dataset instead.

use std::fmt;

use crate::graph::{Edge, Node};

/// Weight multiplier for non-accessible connections.
pub const ACCESSIBILITY_PENALTY: f64 = 1.5;

/// Decides whether a connection is wheelchair accessible.
pub trait AccessibilityPolicy: Send + Sync + fmt::Debug {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    fn is_accessible(&self, from: &Node, to: &Node, edge: &Edge) -> bool;
}

/// Treats every connection as accessible.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeAccessible;

impl AccessibilityPolicy for AssumeAccessible {
    fn name(&self) -> &'static str {
        "assume-accessible"
    }

    fn is_accessible(&self, _from: &Node, _to: &Node, _edge: &Edge) -> bool {
        true
    }
}

/// Uses the accessibility flag recorded on each walkway.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentAccessibility;

impl AccessibilityPolicy for SegmentAccessibility {
    fn name(&self) -> &'static str {
        "segment-flags"
    }

    fn is_accessible(&self, _from: &Node, _to: &Node, edge: &Edge) -> bool {
        edge.accessible
    }
}

/// Cost of walking `edge` from `from` to `to` under the given policy.
pub fn edge_weight(
    policy: &dyn AccessibilityPolicy,
    from: &Node,
    to: &Node,
    edge: &Edge,
    prefer_accessible: bool,
) -> f64 {
    if prefer_accessible && !policy.is_accessible(from, to, edge) {
        edge.distance * ACCESSIBILITY_PENALTY
    } else {
        edge.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Coordinate;

    fn fixture() -> (Node, Node, Edge) {
        let origin = Coordinate { lat: 0.0, lng: 0.0 };
        let edge = Edge {
            neighbor_id: "b".to_string(),
            distance: 100.0,
            path_id: "stairs".to_string(),
            is_available: true,
            accessible: false,
        };
        (Node::new("a", "A", origin), Node::new("b", "B", origin), edge)
    }

    #[test]
    fn assume_accessible_never_penalizes() {
        let (a, b, edge) = fixture();
        assert_eq!(edge_weight(&AssumeAccessible, &a, &b, &edge, true), 100.0);
    }

    #[test]
    fn segment_flags_penalize_only_when_preferred() {
        let (a, b, edge) = fixture();
        assert_eq!(edge_weight(&SegmentAccessibility, &a, &b, &edge, true), 150.0);
        assert_eq!(edge_weight(&SegmentAccessibility, &a, &b, &edge, false), 100.0);
    }
}
