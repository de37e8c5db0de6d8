//! Selection and per-node view flags, tracked outside the node records.
//!
//! The store keeps at most one selected node. Flags arriving on the wire
//! are captured here at load time and merged back onto nodes when a
//! snapshot is taken, so the wire format stays flat while the engine owns
//! a single source of truth for selection.

use std::collections::HashMap;

use rivulet_core::NodeId;

use crate::node::ViewFlags;

/// Transient editor state for the whole graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    selected: Option<NodeId>,
    flags: HashMap<NodeId, ViewFlags>,
}

impl ViewState {
    /// Currently selected node, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    /// Whether `id` is the current selection.
    #[must_use]
    pub fn is_selected(&self, id: &NodeId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// Make `id` the current selection, replacing any previous one.
    pub fn select(&mut self, id: &NodeId) {
        self.selected = Some(id.clone());
    }

    /// Drop the current selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Take over the flags a node arrived with. A `selected` flag claims
    /// the single selection slot; when several nodes arrive selected, the
    /// last one wins. Only non-default flags are retained.
    pub fn capture(&mut self, id: &NodeId, mut flags: ViewFlags) {
        if flags.selected {
            self.selected = Some(id.clone());
            flags.selected = false;
        }
        if flags == ViewFlags::default() {
            self.flags.remove(id);
        } else {
            self.flags.insert(id.clone(), flags);
        }
    }

    /// Flags for `id` with the selection slot merged back in.
    #[must_use]
    pub fn flags_for(&self, id: &NodeId) -> ViewFlags {
        let mut flags = self.flags.get(id).copied().unwrap_or_default();
        flags.selected = self.is_selected(id);
        flags
    }

    /// Forget everything tracked for `id`, clearing the selection if it
    /// pointed there.
    pub fn remove(&mut self, id: &NodeId) {
        self.flags.remove(id);
        if self.is_selected(id) {
            self.selected = None;
        }
    }

    /// Reset to an empty view.
    pub fn clear(&mut self) {
        self.selected = None;
        self.flags.clear();
    }
}
