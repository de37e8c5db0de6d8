//! Domain events emitted by graph mutations.
//!
//! Events are queued synchronously in emission order and drained by the
//! host with [`EventEmitter::take_events`]. They are projections of state
//! changes -- the graph itself is the source of truth.

use std::fmt;

use chrono::{DateTime, Utc};
use rivulet_core::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};

use crate::edge::Edge;
use crate::node::Node;
use crate::snapshot::FlowSnapshot;

/// The mutation a `flowSaved` event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionType {
    /// A node was added.
    NodeAdded,
    /// A node was moved.
    NodeMoved,
    /// A node's payload changed.
    NodeUpdated,
    /// A node was resized.
    NodeResized,
    /// A node became the selection.
    NodeSelected,
    /// The selection was cleared.
    SelectionCleared,
    /// A node (and its incident edges) was deleted.
    NodeDeleted,
    /// An edge was created.
    ConnectionCreated,
    /// An edge was deleted.
    EdgeDeleted,
}

impl ActionType {
    /// Wire name of the action.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NodeAdded => "nodeAdded",
            Self::NodeMoved => "nodeMoved",
            Self::NodeUpdated => "nodeUpdated",
            Self::NodeResized => "nodeResized",
            Self::NodeSelected => "nodeSelected",
            Self::SelectionCleared => "selectionCleared",
            Self::NodeDeleted => "nodeDeleted",
            Self::ConnectionCreated => "connectionCreated",
            Self::EdgeDeleted => "edgeDeleted",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event queued by a successful graph mutation.
///
/// Serializes to the host wire shape `{"name": ..., "event": {...}}`.
/// Every successful mutation queues exactly one [`FlowSaved`](Self::FlowSaved)
/// as its last event, carrying the post-mutation snapshot both as a JSON
/// string and as a structured value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "name",
    content = "event",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum FlowEvent {
    /// The graph changed and the new state should be persisted.
    FlowSaved {
        /// Post-mutation snapshot, serialized to a JSON string.
        flow_data: String,
        /// Post-mutation snapshot as a structured value.
        flow_data_object: FlowSnapshot,
        /// The mutation that produced this save.
        action_type: ActionType,
        /// When the mutation completed.
        timestamp: DateTime<Utc>,
    },
    /// A node became the selection.
    NodeSelected {
        /// The selected node.
        node: Node,
    },
    /// A node was added.
    NodeAdded {
        /// The node as stored.
        node: Node,
    },
    /// A node was moved.
    NodeMoved {
        /// The node with its new position.
        node: Node,
    },
    /// A node's payload changed.
    NodeUpdated {
        /// The node with its merged payload.
        node: Node,
    },
    /// An edge was created.
    ConnectionCreated {
        /// The stored edge.
        connection: Edge,
    },
    /// A node was deleted.
    NodeDeleted {
        /// Id of the removed node.
        node_id: NodeId,
    },
    /// An edge was deleted.
    EdgeDeleted {
        /// Id of the removed edge.
        edge_id: EdgeId,
    },
    /// The selection was cleared.
    SelectionCleared {},
}

impl FlowEvent {
    /// Wire name of the event.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::FlowSaved { .. } => "flowSaved",
            Self::NodeSelected { .. } => "nodeSelected",
            Self::NodeAdded { .. } => "nodeAdded",
            Self::NodeMoved { .. } => "nodeMoved",
            Self::NodeUpdated { .. } => "nodeUpdated",
            Self::ConnectionCreated { .. } => "connectionCreated",
            Self::NodeDeleted { .. } => "nodeDeleted",
            Self::EdgeDeleted { .. } => "edgeDeleted",
            Self::SelectionCleared {} => "selectionCleared",
        }
    }
}

/// Synchronous event queue.
///
/// Mutations push events here; the host drains them after each call. There
/// is no buffering limit and no delivery guarantee beyond ordering.
#[derive(Debug, Clone, Default)]
pub struct EventEmitter {
    pending: Vec<FlowEvent>,
}

impl EventEmitter {
    /// Queue an event.
    pub fn emit(&mut self, event: FlowEvent) {
        self.pending.push(event);
    }

    /// Queue the `flowSaved` event for a completed mutation.
    pub fn emit_saved(&mut self, action_type: ActionType, snapshot: FlowSnapshot) {
        let flow_data = snapshot.to_json();
        self.pending.push(FlowEvent::FlowSaved {
            flow_data,
            flow_data_object: snapshot,
            action_type,
            timestamp: Utc::now(),
        });
    }

    /// Drain all queued events, oldest first.
    pub fn take_events(&mut self) -> Vec<FlowEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Number of queued events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Discard all queued events.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rivulet_core::Point;

    #[test]
    fn flow_saved_serializes_to_host_wire_shape() {
        let snapshot = FlowSnapshot::default();
        let fixed = Utc.with_ymd_and_hms(2026, 8, 22, 10, 0, 0).unwrap();
        let event = FlowEvent::FlowSaved {
            flow_data: snapshot.to_json(),
            flow_data_object: snapshot,
            action_type: ActionType::NodeAdded,
            timestamp: fixed,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["name"], "flowSaved");
        assert_eq!(json["event"]["actionType"], "nodeAdded");
        assert_eq!(json["event"]["flowData"], r#"{"nodes":[],"edges":[]}"#);
        assert_eq!(json["event"]["flowDataObject"]["nodes"], serde_json::json!([]));

        let stamp = json["event"]["timestamp"].as_str().unwrap();
        let parsed = DateTime::parse_from_rfc3339(stamp).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), fixed);
    }

    #[test]
    fn selection_cleared_has_an_empty_event_object() {
        let json = serde_json::to_value(FlowEvent::SelectionCleared {}).unwrap();

        assert_eq!(json["name"], "selectionCleared");
        assert_eq!(json["event"], serde_json::json!({}));
    }

    #[test]
    fn deletion_events_use_camel_case_id_keys() {
        let json = serde_json::to_value(FlowEvent::NodeDeleted {
            node_id: "n1".parse().unwrap(),
        })
        .unwrap();
        assert_eq!(json["name"], "nodeDeleted");
        assert_eq!(json["event"]["nodeId"], "n1");

        let json = serde_json::to_value(FlowEvent::EdgeDeleted {
            edge_id: "e1".parse().unwrap(),
        })
        .unwrap();
        assert_eq!(json["event"]["edgeId"], "e1");
    }

    #[test]
    fn take_events_drains_in_emission_order() {
        let mut emitter = EventEmitter::default();
        emitter.emit(FlowEvent::NodeSelected {
            node: Node::new("n1".parse().unwrap(), Point::default()),
        });
        emitter.emit_saved(ActionType::NodeSelected, FlowSnapshot::default());

        let events = emitter.take_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name(), "nodeSelected");
        assert_eq!(events[1].name(), "flowSaved");
        assert_eq!(emitter.pending_count(), 0);
    }

    #[test]
    fn event_names_match_their_wire_tags() {
        let events = vec![
            FlowEvent::NodeAdded {
                node: Node::new("n1".parse().unwrap(), Point::default()),
            },
            FlowEvent::NodeDeleted {
                node_id: "n1".parse().unwrap(),
            },
            FlowEvent::SelectionCleared {},
        ];

        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["name"], event.name());
        }
    }
}
