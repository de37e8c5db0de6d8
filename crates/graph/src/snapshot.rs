//! Serializable projection of a whole flow graph.

use std::collections::{HashMap, HashSet};

use rivulet_core::NodeId;
use serde::{Deserialize, Serialize};

use crate::edge::Edge;
use crate::handle::HandleRole;
use crate::node::{Handles, Node};

/// All nodes and edges of a flow, in insertion order.
///
/// This is the wire format saved by hosts and accepted back by
/// [`GraphStore::load`](crate::store::GraphStore::load). Snapshots taken
/// from a store always satisfy referential integrity; snapshots arriving
/// from outside are repaired by [`sanitize`](Self::sanitize) first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowSnapshot {
    /// Nodes, in insertion order.
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Edges, in insertion order.
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl FlowSnapshot {
    /// Build a snapshot from parts.
    #[must_use]
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Serialize to a JSON string.
    ///
    /// Snapshots contain only JSON-representable data, so serialization
    /// cannot fail in practice; an empty string is returned if it ever does.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Repair a host-provided snapshot so it satisfies the store's
    /// invariants: duplicate node and edge ids keep their first occurrence,
    /// edges whose endpoints are missing or whose handles are not declared
    /// by the endpoint node are dropped, and embedded endpoint-node copies
    /// some hosts denormalize onto edges are stripped.
    pub fn sanitize(&mut self) {
        let mut seen_nodes = HashSet::new();
        self.nodes.retain(|node| {
            if seen_nodes.insert(node.id.clone()) {
                true
            } else {
                tracing::warn!(node = %node.id, "dropping node with duplicate id");
                false
            }
        });

        let declared: HashMap<&NodeId, &Handles> = self
            .nodes
            .iter()
            .map(|node| (&node.id, &node.handles))
            .collect();

        let mut seen_edges = HashSet::new();
        self.edges.retain(|edge| {
            if !seen_edges.insert(edge.id.clone()) {
                tracing::warn!(edge = %edge.id, "dropping edge with duplicate id");
                return false;
            }
            let Some(source) = declared.get(&edge.source) else {
                tracing::warn!(
                    edge = %edge.id,
                    node = %edge.source,
                    "dropping edge with missing source node"
                );
                return false;
            };
            let Some(target) = declared.get(&edge.target) else {
                tracing::warn!(
                    edge = %edge.id,
                    node = %edge.target,
                    "dropping edge with missing target node"
                );
                return false;
            };
            if !source.contains(HandleRole::Source, &edge.source_handle) {
                tracing::warn!(
                    edge = %edge.id,
                    handle = %edge.source_handle,
                    "dropping edge with undeclared source handle"
                );
                return false;
            }
            if !target.contains(HandleRole::Target, &edge.target_handle) {
                tracing::warn!(
                    edge = %edge.id,
                    handle = %edge.target_handle,
                    "dropping edge with undeclared target handle"
                );
                return false;
            }
            true
        });

        for edge in &mut self.edges {
            edge.extra.remove("sourceNode");
            edge.extra.remove("targetNode");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rivulet_core::Point;

    fn node_with_handles(id: &str) -> Node {
        Node::new(id.parse().unwrap(), Point::default()).with_handles(Handles {
            source: vec!["right".parse().unwrap(), "bottom".parse().unwrap()],
            target: vec!["top".parse().unwrap(), "left".parse().unwrap()],
        })
    }

    fn edge(id: &str, source: &str, target: &str) -> Edge {
        Edge::new(
            id.parse().unwrap(),
            source.parse().unwrap(),
            "bottom".parse().unwrap(),
            target.parse().unwrap(),
            "top".parse().unwrap(),
        )
    }

    #[test]
    fn sanitize_drops_edges_with_missing_endpoints() {
        let mut snapshot = FlowSnapshot::new(
            vec![node_with_handles("a"), node_with_handles("b")],
            vec![edge("e1", "a", "b"), edge("e2", "a", "ghost")],
        );
        snapshot.sanitize();

        assert_eq!(snapshot.edges.len(), 1);
        assert_eq!(snapshot.edges[0].id.as_str(), "e1");
        assert_eq!(snapshot.nodes.len(), 2);
    }

    #[test]
    fn sanitize_keeps_first_of_duplicate_node_ids() {
        let mut first = node_with_handles("a");
        first.position = Point::new(1.0, 1.0);
        let mut second = node_with_handles("a");
        second.position = Point::new(9.0, 9.0);

        let mut snapshot = FlowSnapshot::new(vec![first, second], vec![]);
        snapshot.sanitize();

        assert_eq!(snapshot.nodes.len(), 1);
        assert_eq!(snapshot.nodes[0].position, Point::new(1.0, 1.0));
    }

    #[test]
    fn sanitize_keeps_first_of_duplicate_edge_ids() {
        let mut snapshot = FlowSnapshot::new(
            vec![node_with_handles("a"), node_with_handles("b")],
            vec![edge("e1", "a", "b"), edge("e1", "b", "a")],
        );
        snapshot.sanitize();

        assert_eq!(snapshot.edges.len(), 1);
        assert_eq!(snapshot.edges[0].source.as_str(), "a");
    }

    #[test]
    fn sanitize_drops_edges_with_undeclared_handles() {
        let mut no_handles = node_with_handles("b");
        no_handles.handles = Handles::default();

        let mut snapshot = FlowSnapshot::new(
            vec![node_with_handles("a"), no_handles],
            vec![edge("e1", "a", "b")],
        );
        snapshot.sanitize();

        assert!(snapshot.edges.is_empty());
    }

    #[test]
    fn sanitize_strips_denormalized_endpoint_copies() {
        let raw = r#"{
            "nodes": [
                {"id": "a", "handles": {"source": ["bottom"], "target": []}},
                {"id": "b", "handles": {"source": [], "target": ["top"]}}
            ],
            "edges": [{
                "id": "e1",
                "source": "a",
                "target": "b",
                "sourceHandle": "bottom",
                "targetHandle": "top",
                "sourceNode": {"id": "a"},
                "targetNode": {"id": "b"}
            }]
        }"#;
        let mut snapshot: FlowSnapshot = serde_json::from_str(raw).unwrap();
        snapshot.sanitize();

        assert_eq!(snapshot.edges.len(), 1);
        assert!(snapshot.edges[0].extra.is_empty());
    }

    #[test]
    fn empty_snapshot_serializes_to_empty_collections() {
        let json = FlowSnapshot::default().to_json();
        assert_eq!(json, r#"{"nodes":[],"edges":[]}"#);
    }
}
