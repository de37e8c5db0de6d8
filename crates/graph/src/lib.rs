#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Rivulet Graph
//!
//! Flow-graph state, mutation operations, and domain events for the Rivulet
//! flow engine.
//!
//! This crate owns the editable graph behind a flow diagram: nodes with
//! declared connection handles, directed edges between those handles, a
//! single-node selection, and the event stream hosts persist and react to.
//! It includes:
//!
//! - [`GraphStore`] for atomic mutations over nodes, edges, and selection
//! - [`Node`], [`Edge`], and [`FlowSnapshot`] mirroring the host wire format
//! - [`resolve_handle_bounds`] for deriving handle geometry from node size
//! - [`FlowEvent`] and [`EventEmitter`] for the synchronous event queue
//! - [`FlowError`] for mutation failures that leave state untouched

pub mod edge;
pub mod error;
pub mod event;
pub mod handle;
pub mod node;
pub mod snapshot;
pub mod store;
pub mod view;

pub use edge::Edge;
pub use error::FlowError;
pub use event::{ActionType, EventEmitter, FlowEvent};
pub use handle::{
    HANDLE_SIZE, HandleBound, HandleBounds, HandleRole, HandleSide, resolve_handle_bounds,
};
pub use node::{Handles, Node, NodeKind, ViewFlags};
pub use snapshot::FlowSnapshot;
pub use store::GraphStore;
pub use view::ViewState;
