//! Flow-graph mutation errors.
//!
//! Every failed operation returns one of these without touching the graph
//! or emitting events.

use rivulet_core::{EdgeId, HandleId, NodeId};
use thiserror::Error;

use crate::handle::HandleRole;

/// Errors returned by graph mutation operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// An operation referenced a node that does not exist.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// An operation referenced an edge that does not exist.
    #[error("edge not found: {0}")]
    EdgeNotFound(EdgeId),

    /// A node with this id already exists.
    #[error("duplicate node id: {0}")]
    DuplicateNodeId(NodeId),

    /// An edge between these handles already exists.
    ///
    /// The node fields avoid the name `source`, which thiserror reserves
    /// for an underlying cause.
    #[error("duplicate edge: {source_node}:{source_handle} -> {target_node}:{target_handle}")]
    DuplicateEdge {
        /// Origin node of the rejected connection.
        source_node: NodeId,
        /// Source handle on the origin node.
        source_handle: HandleId,
        /// Destination node of the rejected connection.
        target_node: NodeId,
        /// Target handle on the destination node.
        target_handle: HandleId,
    },

    /// A connection named a handle the node does not declare for that role.
    #[error("node {node} has no {role} handle named {handle}")]
    InvalidHandle {
        /// Node whose declaration was checked.
        node: NodeId,
        /// Role the handle was required to have.
        role: HandleRole,
        /// The undeclared handle id.
        handle: HandleId,
    },
}
