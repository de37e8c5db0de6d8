//! The flow-graph store: nodes, edges, selection, and the event queue.
//!
//! All mutations are synchronous and atomic. A failed operation returns an
//! error without changing state or queueing events; a successful one queues
//! its entity events followed by exactly one `flowSaved` carrying the
//! post-mutation snapshot.

use indexmap::IndexMap;
use rivulet_core::{EdgeId, HandleId, NodeId, Payload, Point, Size};

use crate::edge::Edge;
use crate::error::FlowError;
use crate::event::{ActionType, EventEmitter, FlowEvent};
use crate::handle::{HandleRole, resolve_handle_bounds};
use crate::node::Node;
use crate::snapshot::FlowSnapshot;
use crate::view::ViewState;

/// Owning state of one flow graph.
///
/// Nodes and edges keep insertion order, so snapshots serialize in the
/// order entities were created and survive round-trips unchanged.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
    view: ViewState,
    emitter: EventEmitter,
}

impl GraphStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from a host-provided snapshot. See [`load`](Self::load).
    #[must_use]
    pub fn from_snapshot(snapshot: FlowSnapshot) -> Self {
        let mut store = Self::new();
        store.load(snapshot);
        store
    }

    /// Replace the whole graph with a host-provided snapshot.
    ///
    /// The snapshot is sanitized first (see [`FlowSnapshot::sanitize`]),
    /// handle geometry is derived for nodes missing it, edge anchors are
    /// refreshed, and any queued events are discarded. Loading itself emits
    /// nothing.
    pub fn load(&mut self, mut snapshot: FlowSnapshot) {
        snapshot.sanitize();

        self.nodes.clear();
        self.edges.clear();
        self.view.clear();
        self.emitter.clear();

        for mut node in snapshot.nodes {
            self.prepare_node(&mut node);
            self.nodes.insert(node.id.clone(), node);
        }
        for edge in snapshot.edges {
            self.edges.insert(edge.id.clone(), edge);
        }

        let ids: Vec<EdgeId> = self.edges.keys().cloned().collect();
        for id in &ids {
            self.refresh_edge_anchors(id);
        }

        tracing::debug!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "flow loaded"
        );
    }

    /// Snapshot the current graph, with view flags merged back onto nodes.
    #[must_use]
    pub fn snapshot(&self) -> FlowSnapshot {
        let nodes = self
            .nodes
            .values()
            .map(|node| {
                let mut node = node.clone();
                node.view = self.view.flags_for(&node.id);
                node
            })
            .collect();
        let edges = self.edges.values().cloned().collect();
        FlowSnapshot::new(nodes, edges)
    }

    /// Serialize the current graph to a JSON string.
    #[must_use]
    pub fn to_json(&self) -> String {
        self.snapshot().to_json()
    }

    /// Add a node.
    ///
    /// A `selected` flag on the incoming node claims the selection; handle
    /// geometry is derived when the node declares handles and has a known
    /// extent.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::DuplicateNodeId`] if a node with this id exists.
    pub fn add_node(&mut self, node: Node) -> Result<(), FlowError> {
        if self.nodes.contains_key(&node.id) {
            return Err(FlowError::DuplicateNodeId(node.id));
        }

        let mut node = node;
        self.prepare_node(&mut node);
        let mut event_node = node.clone();
        event_node.view = self.view.flags_for(&node.id);

        tracing::debug!(node = %node.id, "node added");
        self.nodes.insert(node.id.clone(), node);
        self.emitter.emit(FlowEvent::NodeAdded { node: event_node });
        self.finish(ActionType::NodeAdded);
        Ok(())
    }

    /// Move a node to a new canvas position, refreshing the anchors of
    /// every incident edge.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NodeNotFound`] if the node does not exist.
    pub fn move_node(&mut self, id: &NodeId, position: Point) -> Result<(), FlowError> {
        let Some(node) = self.nodes.get_mut(id) else {
            return Err(FlowError::NodeNotFound(id.clone()));
        };
        node.position = position;
        let mut event_node = node.clone();
        event_node.view = self.view.flags_for(id);

        self.refresh_anchors_touching(id);
        tracing::debug!(node = %id, x = position.x, y = position.y, "node moved");
        self.emitter.emit(FlowEvent::NodeMoved { node: event_node });
        self.finish(ActionType::NodeMoved);
        Ok(())
    }

    /// Shallow-merge a payload patch into a node's data.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NodeNotFound`] if the node does not exist.
    pub fn update_node(&mut self, id: &NodeId, patch: Payload) -> Result<(), FlowError> {
        let Some(node) = self.nodes.get_mut(id) else {
            return Err(FlowError::NodeNotFound(id.clone()));
        };
        node.data.merge(patch);
        let mut event_node = node.clone();
        event_node.view = self.view.flags_for(id);

        tracing::debug!(node = %id, "node payload updated");
        self.emitter.emit(FlowEvent::NodeUpdated { node: event_node });
        self.finish(ActionType::NodeUpdated);
        Ok(())
    }

    /// Resize a node and rederive its handle geometry from the new size.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NodeNotFound`] if the node does not exist.
    pub fn resize_node(&mut self, id: &NodeId, size: Size) -> Result<(), FlowError> {
        let Some(node) = self.nodes.get_mut(id) else {
            return Err(FlowError::NodeNotFound(id.clone()));
        };
        node.size = Some(size);
        if !node.handles.is_empty() {
            node.handle_bounds = resolve_handle_bounds(node.kind, size);
        }

        self.refresh_anchors_touching(id);
        tracing::debug!(node = %id, width = size.width, height = size.height, "node resized");
        self.finish(ActionType::NodeResized);
        Ok(())
    }

    /// Make a node the current selection, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NodeNotFound`] if the node does not exist.
    pub fn select_node(&mut self, id: &NodeId) -> Result<(), FlowError> {
        let Some(node) = self.nodes.get(id) else {
            return Err(FlowError::NodeNotFound(id.clone()));
        };
        let mut event_node = node.clone();
        self.view.select(id);
        event_node.view = self.view.flags_for(id);

        tracing::debug!(node = %id, "node selected");
        self.emitter.emit(FlowEvent::NodeSelected { node: event_node });
        self.finish(ActionType::NodeSelected);
        Ok(())
    }

    /// Clear the selection. Always succeeds, even when nothing is selected.
    pub fn clear_selection(&mut self) {
        self.view.clear_selection();
        tracing::debug!("selection cleared");
        self.emitter.emit(FlowEvent::SelectionCleared {});
        self.finish(ActionType::SelectionCleared);
    }

    /// Delete a node and every edge that touches it.
    ///
    /// Cascaded `edgeDeleted` events precede the `nodeDeleted` event; the
    /// whole cascade produces a single `flowSaved`. Deleting the selected
    /// node clears the selection without a `selectionCleared` event.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NodeNotFound`] if the node does not exist.
    pub fn delete_node(&mut self, id: &NodeId) -> Result<(), FlowError> {
        if !self.nodes.contains_key(id) {
            return Err(FlowError::NodeNotFound(id.clone()));
        }

        let touching: Vec<EdgeId> = self
            .edges
            .values()
            .filter(|edge| edge.touches(id))
            .map(|edge| edge.id.clone())
            .collect();
        for edge_id in &touching {
            self.edges.shift_remove(edge_id);
            self.emitter.emit(FlowEvent::EdgeDeleted {
                edge_id: edge_id.clone(),
            });
        }

        self.nodes.shift_remove(id);
        self.view.remove(id);
        tracing::debug!(node = %id, cascaded = touching.len(), "node deleted");
        self.emitter.emit(FlowEvent::NodeDeleted {
            node_id: id.clone(),
        });
        self.finish(ActionType::NodeDeleted);
        Ok(())
    }

    /// Delete a single edge.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::EdgeNotFound`] if the edge does not exist.
    pub fn delete_edge(&mut self, id: &EdgeId) -> Result<(), FlowError> {
        if self.edges.shift_remove(id).is_none() {
            return Err(FlowError::EdgeNotFound(id.clone()));
        }
        tracing::debug!(edge = %id, "edge deleted");
        self.emitter.emit(FlowEvent::EdgeDeleted {
            edge_id: id.clone(),
        });
        self.finish(ActionType::EdgeDeleted);
        Ok(())
    }

    /// Connect a source handle to a target handle with a new edge.
    ///
    /// The edge id is derived from the endpoints; a numeric suffix is
    /// appended if that id is already taken. Anchors are cached when both
    /// endpoint nodes have derived geometry. Returns the new edge's id.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NodeNotFound`] if either node does not exist,
    /// [`FlowError::InvalidHandle`] if a handle is not declared for its
    /// role, or [`FlowError::DuplicateEdge`] if an edge already connects
    /// these exact handles.
    pub fn connect(
        &mut self,
        source: &NodeId,
        source_handle: &HandleId,
        target: &NodeId,
        target_handle: &HandleId,
    ) -> Result<EdgeId, FlowError> {
        let Some(source_node) = self.nodes.get(source) else {
            return Err(FlowError::NodeNotFound(source.clone()));
        };
        let Some(target_node) = self.nodes.get(target) else {
            return Err(FlowError::NodeNotFound(target.clone()));
        };
        if !source_node.handles.contains(HandleRole::Source, source_handle) {
            return Err(FlowError::InvalidHandle {
                node: source.clone(),
                role: HandleRole::Source,
                handle: source_handle.clone(),
            });
        }
        if !target_node.handles.contains(HandleRole::Target, target_handle) {
            return Err(FlowError::InvalidHandle {
                node: target.clone(),
                role: HandleRole::Target,
                handle: target_handle.clone(),
            });
        }
        if self
            .edges
            .values()
            .any(|edge| edge.matches_endpoints(source, source_handle, target, target_handle))
        {
            return Err(FlowError::DuplicateEdge {
                source_node: source.clone(),
                source_handle: source_handle.clone(),
                target_node: target.clone(),
                target_handle: target_handle.clone(),
            });
        }

        let source_anchor = source_node.handle_anchor(HandleRole::Source, source_handle);
        let target_anchor = target_node.handle_anchor(HandleRole::Target, target_handle);

        let id = self.derive_edge_id(source, source_handle, target, target_handle);
        let mut edge = Edge::new(
            id.clone(),
            source.clone(),
            source_handle.clone(),
            target.clone(),
            target_handle.clone(),
        );
        if let (Some(source_anchor), Some(target_anchor)) = (source_anchor, target_anchor) {
            edge.set_anchors(source_anchor, target_anchor);
        }

        tracing::debug!(edge = %id, source = %source, target = %target, "connection created");
        self.edges.insert(id.clone(), edge.clone());
        self.emitter
            .emit(FlowEvent::ConnectionCreated { connection: edge });
        self.finish(ActionType::ConnectionCreated);
        Ok(id)
    }

    /// Check referential integrity: the selection points at an existing
    /// node, every edge endpoint exists, and every edge handle is declared
    /// by its endpoint node.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), FlowError> {
        if let Some(selected) = self.view.selected()
            && !self.nodes.contains_key(selected)
        {
            return Err(FlowError::NodeNotFound(selected.clone()));
        }
        for edge in self.edges.values() {
            let Some(source) = self.nodes.get(&edge.source) else {
                return Err(FlowError::NodeNotFound(edge.source.clone()));
            };
            let Some(target) = self.nodes.get(&edge.target) else {
                return Err(FlowError::NodeNotFound(edge.target.clone()));
            };
            if !source.handles.contains(HandleRole::Source, &edge.source_handle) {
                return Err(FlowError::InvalidHandle {
                    node: edge.source.clone(),
                    role: HandleRole::Source,
                    handle: edge.source_handle.clone(),
                });
            }
            if !target.handles.contains(HandleRole::Target, &edge.target_handle) {
                return Err(FlowError::InvalidHandle {
                    node: edge.target.clone(),
                    role: HandleRole::Target,
                    handle: edge.target_handle.clone(),
                });
            }
        }
        Ok(())
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Look up an edge by id.
    #[must_use]
    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The currently selected node, if any.
    #[must_use]
    pub fn selected_node(&self) -> Option<&Node> {
        self.view.selected().and_then(|id| self.nodes.get(id))
    }

    /// Drain all queued events, oldest first.
    pub fn take_events(&mut self) -> Vec<FlowEvent> {
        self.emitter.take_events()
    }

    /// Capture an incoming node's view flags and derive missing handle
    /// geometry.
    fn prepare_node(&mut self, node: &mut Node) {
        let flags = std::mem::take(&mut node.view);
        self.view.capture(&node.id, flags);

        if node.handle_bounds.is_empty()
            && !node.handles.is_empty()
            && let Some(extent) = node.render_extent()
        {
            node.handle_bounds = resolve_handle_bounds(node.kind, extent);
        }
    }

    /// Recompute cached anchors for every edge touching `node`.
    fn refresh_anchors_touching(&mut self, node: &NodeId) {
        let touching: Vec<EdgeId> = self
            .edges
            .values()
            .filter(|edge| edge.touches(node))
            .map(|edge| edge.id.clone())
            .collect();
        for id in &touching {
            self.refresh_edge_anchors(id);
        }
    }

    /// Recompute one edge's cached anchors. Stored anchors are kept when
    /// either endpoint has no derived geometry for the edge's handle.
    fn refresh_edge_anchors(&mut self, id: &EdgeId) {
        let Some(edge) = self.edges.get(id) else {
            return;
        };
        let source = self
            .nodes
            .get(&edge.source)
            .and_then(|node| node.handle_anchor(HandleRole::Source, &edge.source_handle));
        let target = self
            .nodes
            .get(&edge.target)
            .and_then(|node| node.handle_anchor(HandleRole::Target, &edge.target_handle));

        if let (Some(source), Some(target)) = (source, target)
            && let Some(edge) = self.edges.get_mut(id)
        {
            edge.set_anchors(source, target);
        }
    }

    /// Derive an edge id from its endpoints, suffixing a counter on
    /// collision.
    fn derive_edge_id(
        &self,
        source: &NodeId,
        source_handle: &HandleId,
        target: &NodeId,
        target_handle: &HandleId,
    ) -> EdgeId {
        let base = format!("e-{source}:{source_handle}-{target}:{target_handle}");
        let mut n = 1u32;
        loop {
            let candidate = if n == 1 {
                base.clone()
            } else {
                format!("{base}-{n}")
            };
            let id = EdgeId::new(candidate).expect("derived edge ids are non-blank");
            if !self.edges.contains_key(&id) {
                return id;
            }
            n += 1;
        }
    }

    /// Queue the `flowSaved` event that closes every successful mutation.
    fn finish(&mut self, action: ActionType) {
        let snapshot = self.snapshot();
        self.emitter.emit_saved(action, snapshot);
    }
}
