//! Directed edges between node handles.

use rivulet_core::{EdgeId, HandleId, NodeId, Payload, Point};
use serde::{Deserialize, Serialize};

fn default_kind() -> String {
    "smoothstep".to_owned()
}

/// A directed connection from one node's source handle to another node's
/// target handle.
///
/// The `sourceX`/`sourceY`/`targetX`/`targetY` fields are cached
/// canvas-absolute anchor coordinates. They are refreshed whenever an
/// endpoint's geometry changes and both endpoints resolve; otherwise the
/// stored values are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// Unique id within the graph.
    pub id: EdgeId,
    /// Node the edge originates from.
    pub source: NodeId,
    /// Node the edge terminates at.
    pub target: NodeId,
    /// Source handle on the origin node.
    pub source_handle: HandleId,
    /// Target handle on the destination node.
    pub target_handle: HandleId,
    /// Routing style of the edge.
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    /// Domain payload the edge carries.
    #[serde(default, skip_serializing_if = "Payload::is_empty")]
    pub data: Payload,
    /// Cached source anchor, horizontal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_x: Option<f64>,
    /// Cached source anchor, vertical.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_y: Option<f64>,
    /// Cached target anchor, horizontal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_x: Option<f64>,
    /// Cached target anchor, vertical.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_y: Option<f64>,
    /// Host fields this engine does not interpret.
    #[serde(flatten)]
    pub extra: Payload,
}

impl Edge {
    /// Create a smoothstep edge between the given handles.
    pub fn new(
        id: EdgeId,
        source: NodeId,
        source_handle: HandleId,
        target: NodeId,
        target_handle: HandleId,
    ) -> Self {
        Self {
            id,
            source,
            target,
            source_handle,
            target_handle,
            kind: default_kind(),
            data: Payload::new(),
            source_x: None,
            source_y: None,
            target_x: None,
            target_y: None,
            extra: Payload::new(),
        }
    }

    /// Set the routing style.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Set the domain payload.
    #[must_use]
    pub fn with_data(mut self, data: Payload) -> Self {
        self.data = data;
        self
    }

    /// Overwrite both cached anchors with canvas-absolute points.
    pub fn set_anchors(&mut self, source: Point, target: Point) {
        self.source_x = Some(source.x);
        self.source_y = Some(source.y);
        self.target_x = Some(target.x);
        self.target_y = Some(target.y);
    }

    /// Whether the edge starts or ends at `node`.
    #[must_use]
    pub fn touches(&self, node: &NodeId) -> bool {
        self.source == *node || self.target == *node
    }

    /// Whether the edge connects exactly these endpoints.
    #[must_use]
    pub fn matches_endpoints(
        &self,
        source: &NodeId,
        source_handle: &HandleId,
        target: &NodeId,
        target_handle: &HandleId,
    ) -> bool {
        self.source == *source
            && self.source_handle == *source_handle
            && self.target == *target
            && self.target_handle == *target_handle
    }
}
