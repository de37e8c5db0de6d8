//! Raw interaction signals from the rendering collaborator.
//!
//! The renderer owns hit-testing and gesture recognition; what arrives
//! here is the already-resolved outcome of a gesture. [`Board::apply`]
//! maps each signal onto one graph operation.
//!
//! [`Board::apply`]: crate::board::Board::apply

use rivulet_core::{HandleId, NodeId, Point, Size};

/// One resolved user gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    /// A node drag ended at a new canvas position.
    NodeDragEnd {
        /// The dragged node.
        id: NodeId,
        /// Final top-left position.
        position: Point,
    },
    /// A node was clicked.
    NodeClick {
        /// The clicked node.
        id: NodeId,
    },
    /// Empty canvas was clicked.
    CanvasClick,
    /// A connect drag ended on a valid target handle.
    ConnectEnd {
        /// Node the drag started from.
        source: NodeId,
        /// Source handle the drag started from.
        source_handle: HandleId,
        /// Node the drag ended on.
        target: NodeId,
        /// Target handle the drag ended on.
        target_handle: HandleId,
    },
    /// A node resize ended with a new pixel extent.
    NodeResizeEnd {
        /// The resized node.
        id: NodeId,
        /// Final pixel extent.
        size: Size,
    },
    /// The delete key was pressed.
    DeletePressed,
}
