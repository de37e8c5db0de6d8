//! Property tests: wire-format roundtrips, load sanitization, and store
//! invariants over generated graphs.

use std::collections::HashSet;

use proptest::prelude::*;
use rivulet_core::{Payload, Point, Size};
use rivulet_graph::{
    Edge, FlowSnapshot, GraphStore, Handles, Node, NodeKind, resolve_handle_bounds,
};

/// Generate a JSON scalar that roundtrips exactly.
fn arb_scalar() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        any::<bool>().prop_map(serde_json::Value::Bool),
        any::<i32>().prop_map(|n| serde_json::json!(n)),
        "[a-z ]{0,12}".prop_map(serde_json::Value::String),
    ]
}

/// Generate a small payload record.
fn arb_payload() -> impl Strategy<Value = Payload> {
    proptest::collection::btree_map("[a-z]{1,6}", arb_scalar(), 0..4)
        .prop_map(|map| map.into_iter().collect())
}

fn standard_handles() -> Handles {
    Handles {
        source: vec!["right".parse().unwrap(), "bottom".parse().unwrap()],
        target: vec!["top".parse().unwrap(), "left".parse().unwrap()],
    }
}

/// Generate the varying parts of a node: position, optional size, whether
/// it declares the standard handles, and a payload.
fn arb_node_fields() -> impl Strategy<Value = (Point, Option<Size>, bool, Payload)> {
    (
        (-500.0f64..500.0, -500.0f64..500.0).prop_map(|(x, y)| Point::new(x, y)),
        proptest::option::of((40.0f64..400.0, 30.0f64..300.0).prop_map(|(w, h)| Size::new(w, h))),
        any::<bool>(),
        arb_payload(),
    )
}

fn build_node(id: String, fields: (Point, Option<Size>, bool, Payload)) -> Node {
    let (position, size, with_handles, data) = fields;
    let mut node = Node::new(id.parse().unwrap(), position).with_data(data);
    node.size = size;
    if with_handles {
        node = node.with_handles(standard_handles());
    }
    node
}

fn arb_source_handle() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("right"), Just("bottom")]
}

fn arb_target_handle() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("top"), Just("left")]
}

/// Generate a snapshot of 1..6 nodes plus edges wired only between nodes
/// that declare handles, with unique node and edge ids.
fn arb_snapshot() -> impl Strategy<Value = FlowSnapshot> {
    proptest::collection::vec(arb_node_fields(), 1..6).prop_flat_map(|fields| {
        let nodes: Vec<Node> = fields
            .into_iter()
            .enumerate()
            .map(|(i, f)| build_node(format!("n{i}"), f))
            .collect();
        let count = nodes.len();

        proptest::collection::vec(
            (0..count, 0..count, arb_source_handle(), arb_target_handle()),
            0..8,
        )
        .prop_map(move |picks| {
            let mut edges = Vec::new();
            let mut seen = HashSet::new();
            for (i, (s, t, sh, th)) in picks.into_iter().enumerate() {
                if nodes[s].handles.is_empty() || nodes[t].handles.is_empty() {
                    continue;
                }
                if !seen.insert((s, t, sh, th)) {
                    continue;
                }
                edges.push(Edge::new(
                    format!("e{i}").parse().unwrap(),
                    nodes[s].id.clone(),
                    sh.parse().unwrap(),
                    nodes[t].id.clone(),
                    th.parse().unwrap(),
                ));
            }
            FlowSnapshot::new(nodes.clone(), edges)
        })
    })
}

proptest! {
    #[test]
    fn snapshot_roundtrips_through_json(snapshot in arb_snapshot()) {
        let json = serde_json::to_string(&snapshot).expect("serialize");
        let back: FlowSnapshot = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(snapshot, back);
    }

    #[test]
    fn loaded_graphs_roundtrip_through_serialize(
        snapshot in arb_snapshot(),
        select_first in any::<bool>(),
    ) {
        let mut snapshot = snapshot;
        if select_first {
            snapshot.nodes[0].view.selected = true;
        }

        let store = GraphStore::from_snapshot(snapshot);
        let first = store.snapshot();
        let reloaded = GraphStore::from_snapshot(first.clone());

        prop_assert_eq!(reloaded.snapshot(), first);
        prop_assert_eq!(reloaded.to_json(), store.to_json());
    }

    #[test]
    fn load_always_restores_referential_integrity(
        snapshot in arb_snapshot(),
        ghost in "[a-z]{1,5}",
    ) {
        let mut snapshot = snapshot;
        snapshot.edges.push(Edge::new(
            "e-dangling".parse().unwrap(),
            snapshot.nodes[0].id.clone(),
            "bottom".parse().unwrap(),
            format!("ghost-{ghost}").parse().unwrap(),
            "top".parse().unwrap(),
        ));

        let store = GraphStore::from_snapshot(snapshot);
        prop_assert!(store.validate().is_ok());
    }

    #[test]
    fn load_keeps_ids_pairwise_distinct(snapshot in arb_snapshot()) {
        let mut snapshot = snapshot;
        // Duplicate the first node and, when present, the first edge.
        snapshot.nodes.push(snapshot.nodes[0].clone());
        if let Some(edge) = snapshot.edges.first().cloned() {
            snapshot.edges.push(edge);
        }

        let store = GraphStore::from_snapshot(snapshot);

        let mut node_ids = HashSet::new();
        prop_assert!(store.nodes().all(|node| node_ids.insert(node.id.clone())));
        let mut edge_ids = HashSet::new();
        prop_assert!(store.edges().all(|edge| edge_ids.insert(edge.id.clone())));
    }

    #[test]
    fn handle_geometry_is_a_pure_function(w in 20.0f64..800.0, h in 20.0f64..600.0) {
        let first = resolve_handle_bounds(NodeKind::Custom, Size::new(w, h));
        let second = resolve_handle_bounds(NodeKind::Custom, Size::new(w, h));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn anchors_track_node_position_exactly(
        x in -500.0f64..500.0,
        y in -500.0f64..500.0,
        w in 40.0f64..400.0,
        h in 30.0f64..300.0,
    ) {
        let mut node = build_node(
            "n0".to_owned(),
            (Point::new(x, y), Some(Size::new(w, h)), true, Payload::new()),
        );
        node.handle_bounds = resolve_handle_bounds(NodeKind::Custom, Size::new(w, h));

        let anchor = node
            .handle_anchor(rivulet_graph::HandleRole::Source, &"bottom".parse().unwrap())
            .expect("derived bounds include bottom");
        // The bottom anchor sits at the node's horizontal midpoint, 4px
        // below its border (box center 1px outside, half a box further).
        prop_assert!(
            (anchor.x - (x + w / 2.0)).abs() < 1e-9,
            "anchor x drift: {} vs {}",
            anchor.x,
            x + w / 2.0
        );
        prop_assert!(
            (anchor.y - (y + h + 4.0)).abs() < 1e-9,
            "anchor y drift: {} vs {}",
            anchor.y,
            y + h + 4.0
        );
    }
}

/// Re-parsed coordinates must come back bit for bit, even when the decimal
/// form needs all 17 significant digits.
#[test]
fn full_precision_coordinates_survive_reparsing() {
    let position = Point::new(370.885_127_492_123_73, -66.917_205_037_681_97);
    let node = Node::new("n0".parse().unwrap(), position);
    let snapshot = FlowSnapshot::new(vec![node], Vec::new());

    let json = serde_json::to_string(&snapshot).unwrap();
    let back: FlowSnapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(back.nodes[0].position.x.to_bits(), position.x.to_bits());
    assert_eq!(back.nodes[0].position.y.to_bits(), position.y.to_bits());
}

/// Verify the snapshot wire shape is exactly `{nodes, edges}`.
#[test]
fn snapshot_json_has_only_nodes_and_edges_keys() {
    let store = GraphStore::new();
    let value: serde_json::Value = serde_json::from_str(&store.to_json()).unwrap();
    let object = value.as_object().unwrap();

    assert_eq!(object.len(), 2);
    assert!(object.contains_key("nodes"));
    assert!(object.contains_key("edges"));
}
