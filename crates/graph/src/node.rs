//! Flow nodes: declared handles, geometry, payload, and view flags.

use rivulet_core::{HandleId, NodeId, Payload, Point, Size};
use serde::{Deserialize, Serialize};

use crate::handle::{HandleBounds, HandleRole};

/// Kind of a node, selecting its handle layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Standard block with source handles on the right and bottom,
    /// target handles on the top and left.
    #[default]
    Custom,
}

/// Handle ids a node declares, grouped by role. Edges may only attach to
/// declared handles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Handles {
    /// Handles edges may originate from.
    #[serde(default)]
    pub source: Vec<HandleId>,
    /// Handles edges may terminate at.
    #[serde(default)]
    pub target: Vec<HandleId>,
}

impl Handles {
    /// Whether the node declares no handles at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source.is_empty() && self.target.is_empty()
    }

    /// Whether `id` is declared under `role`.
    #[must_use]
    pub fn contains(&self, role: HandleRole, id: &HandleId) -> bool {
        self.ids(role).contains(id)
    }

    /// Declared handle ids for one role.
    #[must_use]
    pub fn ids(&self, role: HandleRole) -> &[HandleId] {
        match role {
            HandleRole::Source => &self.source,
            HandleRole::Target => &self.target,
        }
    }
}

/// Transient editor state carried on the node wire format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewFlags {
    /// Node is the current selection.
    #[serde(default)]
    pub selected: bool,
    /// Node is mid-drag.
    #[serde(default)]
    pub dragging: bool,
    /// Node is mid-resize.
    #[serde(default)]
    pub resizing: bool,
    /// Node has been measured by a renderer at least once.
    #[serde(default)]
    pub initialized: bool,
}

/// A node in the flow graph.
///
/// Geometry fields mirror the host wire format: `position` is the top-left
/// corner on the canvas, `dimensions` is the measured pixel extent and wins
/// over the requested `size` when both are present. Unrecognized wire fields
/// survive in `extra` so saved flows round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique id within the graph.
    pub id: NodeId,
    /// Node kind.
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    /// Top-left corner on the canvas.
    #[serde(default)]
    pub position: Point,
    /// Requested pixel extent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// Measured pixel extent, preferred over `size` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Size>,
    /// Domain payload the node carries.
    #[serde(default, skip_serializing_if = "Payload::is_empty")]
    pub data: Payload,
    /// Handle ids edges may attach to.
    #[serde(default, skip_serializing_if = "Handles::is_empty")]
    pub handles: Handles,
    /// Derived handle geometry.
    #[serde(
        rename = "handleBounds",
        default,
        skip_serializing_if = "HandleBounds::is_empty"
    )]
    pub handle_bounds: HandleBounds,
    /// Transient editor flags.
    #[serde(flatten)]
    pub view: ViewFlags,
    /// Host fields this engine does not interpret.
    #[serde(flatten)]
    pub extra: Payload,
}

impl Node {
    /// Create a node at `position` with no declared handles or payload.
    pub fn new(id: NodeId, position: Point) -> Self {
        Self {
            id,
            kind: NodeKind::default(),
            position,
            size: None,
            dimensions: None,
            data: Payload::new(),
            handles: Handles::default(),
            handle_bounds: HandleBounds::default(),
            view: ViewFlags::default(),
            extra: Payload::new(),
        }
    }

    /// Set the requested pixel extent.
    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the measured pixel extent.
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: Size) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Set the domain payload.
    #[must_use]
    pub fn with_data(mut self, data: Payload) -> Self {
        self.data = data;
        self
    }

    /// Set the declared handles.
    #[must_use]
    pub fn with_handles(mut self, handles: Handles) -> Self {
        self.handles = handles;
        self
    }

    /// Pixel extent used for handle geometry: measured dimensions when
    /// available, otherwise the requested size.
    #[must_use]
    pub fn render_extent(&self) -> Option<Size> {
        self.dimensions.or(self.size)
    }

    /// Canvas-absolute attachment point of one of this node's handles, if
    /// its geometry has been derived.
    #[must_use]
    pub fn handle_anchor(&self, role: HandleRole, id: &HandleId) -> Option<Point> {
        self.handle_bounds
            .get(role, id)
            .map(|bound| bound.anchor().translated(self.position.x, self.position.y))
    }
}
