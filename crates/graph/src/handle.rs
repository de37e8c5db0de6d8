//! Connection handles: roles, sides, derived geometry, and the resolver.
//!
//! A node declares which handles edges may attach to; the resolver derives
//! where those handles sit. Derivation is a pure function of node kind and
//! pixel size, so identical inputs always produce identical geometry.

use std::fmt;

use rivulet_core::{HandleId, Point, Size};
use serde::{Deserialize, Serialize};

use crate::node::NodeKind;

/// Side length of the square handle box, in pixels.
pub const HANDLE_SIZE: f64 = 6.0;

/// Role a handle plays for edges attached to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleRole {
    /// Edges originate here.
    Source,
    /// Edges terminate here.
    Target,
}

impl fmt::Display for HandleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Node side a handle sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleSide {
    /// Top edge of the node.
    Top,
    /// Bottom edge of the node.
    Bottom,
    /// Left edge of the node.
    Left,
    /// Right edge of the node.
    Right,
}

impl HandleSide {
    /// Canonical name of the side, which doubles as its handle id.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for HandleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HandleSide> for HandleId {
    fn from(side: HandleSide) -> Self {
        HandleId::new(side.as_str()).expect("side names are non-blank")
    }
}

/// Derived geometry of a single handle: a small box straddling the node
/// border, positioned relative to the node's top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandleBound {
    /// Handle this box belongs to.
    pub id: HandleId,
    /// Node side the handle sits on.
    pub position: HandleSide,
    /// Box origin, horizontal.
    pub x: f64,
    /// Box origin, vertical.
    pub y: f64,
    /// Box width in pixels.
    pub width: f64,
    /// Box height in pixels.
    pub height: f64,
}

impl HandleBound {
    /// Point where a routed edge attaches: the midpoint of the box edge
    /// facing away from the node, relative to the node's top-left corner.
    #[must_use]
    pub fn anchor(&self) -> Point {
        match self.position {
            HandleSide::Top => Point::new(self.x + self.width / 2.0, self.y),
            HandleSide::Bottom => Point::new(self.x + self.width / 2.0, self.y + self.height),
            HandleSide::Left => Point::new(self.x, self.y + self.height / 2.0),
            HandleSide::Right => Point::new(self.x + self.width, self.y + self.height / 2.0),
        }
    }
}

/// Handle geometry grouped by role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HandleBounds {
    /// Bounds of the node's source handles.
    #[serde(default)]
    pub source: Vec<HandleBound>,
    /// Bounds of the node's target handles.
    #[serde(default)]
    pub target: Vec<HandleBound>,
}

impl HandleBounds {
    /// Whether no handle geometry is present for either role.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source.is_empty() && self.target.is_empty()
    }

    /// Look up a handle's bound box by role and id.
    #[must_use]
    pub fn get(&self, role: HandleRole, id: &HandleId) -> Option<&HandleBound> {
        let group = match role {
            HandleRole::Source => &self.source,
            HandleRole::Target => &self.target,
        };
        group.iter().find(|bound| bound.id == *id)
    }
}

/// Compute handle geometry for a node of the given kind and pixel size.
///
/// Each cardinal side gets a [`HANDLE_SIZE`] square centered along its edge,
/// straddling the border with the box center 1px outside it. `custom` nodes
/// expose `right` and `bottom` as source handles, `top` and `left` as
/// targets.
#[must_use]
pub fn resolve_handle_bounds(kind: NodeKind, size: Size) -> HandleBounds {
    let centered_x = (size.width - HANDLE_SIZE) / 2.0;
    let centered_y = (size.height - HANDLE_SIZE) / 2.0;
    // Box centers sit 1px outside the node border.
    let near = -(HANDLE_SIZE / 2.0 + 1.0);
    let far_right = size.width - HANDLE_SIZE / 2.0 + 1.0;
    let far_bottom = size.height - HANDLE_SIZE / 2.0 + 1.0;

    match kind {
        NodeKind::Custom => HandleBounds {
            source: vec![
                bound(HandleSide::Right, far_right, centered_y),
                bound(HandleSide::Bottom, centered_x, far_bottom),
            ],
            target: vec![
                bound(HandleSide::Top, centered_x, near),
                bound(HandleSide::Left, near, centered_y),
            ],
        },
    }
}

fn bound(side: HandleSide, x: f64, y: f64) -> HandleBound {
    HandleBound {
        id: side.into(),
        position: side,
        x,
        y,
        width: HANDLE_SIZE,
        height: HANDLE_SIZE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // Golden values taken from a rendered 280x96 node.

    #[test]
    fn resolves_golden_bounds_for_280x96() {
        let bounds = resolve_handle_bounds(NodeKind::Custom, Size::new(280.0, 96.0));

        let right = bounds.get(HandleRole::Source, &"right".parse().unwrap()).unwrap();
        assert_eq!((right.x, right.y), (278.0, 45.0));

        let bottom = bounds.get(HandleRole::Source, &"bottom".parse().unwrap()).unwrap();
        assert_eq!((bottom.x, bottom.y), (137.0, 94.0));

        let top = bounds.get(HandleRole::Target, &"top".parse().unwrap()).unwrap();
        assert_eq!((top.x, top.y), (137.0, -4.0));

        let left = bounds.get(HandleRole::Target, &"left".parse().unwrap()).unwrap();
        assert_eq!((left.x, left.y), (-4.0, 45.0));

        for b in bounds.source.iter().chain(bounds.target.iter()) {
            assert_eq!((b.width, b.height), (HANDLE_SIZE, HANDLE_SIZE));
        }
    }

    #[test]
    fn role_split_is_right_bottom_source_top_left_target() {
        let bounds = resolve_handle_bounds(NodeKind::Custom, Size::new(100.0, 50.0));
        let source: Vec<_> = bounds.source.iter().map(|b| b.position).collect();
        let target: Vec<_> = bounds.target.iter().map(|b| b.position).collect();

        assert_eq!(source, vec![HandleSide::Right, HandleSide::Bottom]);
        assert_eq!(target, vec![HandleSide::Top, HandleSide::Left]);
    }

    #[test]
    fn resolver_is_deterministic() {
        let size = Size::new(312.5, 87.25);
        let first = resolve_handle_bounds(NodeKind::Custom, size);
        let second = resolve_handle_bounds(NodeKind::Custom, size);
        assert_eq!(first, second);
    }

    #[test]
    fn anchors_sit_on_the_outer_edge_midpoint() {
        let bounds = resolve_handle_bounds(NodeKind::Custom, Size::new(280.0, 96.0));

        let bottom = bounds.get(HandleRole::Source, &"bottom".parse().unwrap()).unwrap();
        assert_eq!(bottom.anchor(), Point::new(140.0, 100.0));

        let top = bounds.get(HandleRole::Target, &"top".parse().unwrap()).unwrap();
        assert_eq!(top.anchor(), Point::new(140.0, -4.0));

        let left = bounds.get(HandleRole::Target, &"left".parse().unwrap()).unwrap();
        assert_eq!(left.anchor(), Point::new(-4.0, 48.0));

        let right = bounds.get(HandleRole::Source, &"right".parse().unwrap()).unwrap();
        assert_eq!(right.anchor(), Point::new(284.0, 48.0));
    }

    #[test]
    fn bound_serializes_to_wire_shape() {
        let bounds = resolve_handle_bounds(NodeKind::Custom, Size::new(280.0, 96.0));
        let json = serde_json::to_value(&bounds.source[0]).unwrap();

        assert_eq!(json["id"], "right");
        assert_eq!(json["position"], "right");
        assert_eq!(json["x"], 278.0);
        assert_eq!(json["y"], 45.0);
        assert_eq!(json["width"], 6.0);
        assert_eq!(json["height"], 6.0);
    }

    #[test]
    fn get_distinguishes_roles() {
        let bounds = resolve_handle_bounds(NodeKind::Custom, Size::new(280.0, 96.0));
        let top: HandleId = "top".parse().unwrap();

        assert!(bounds.get(HandleRole::Target, &top).is_some());
        assert!(bounds.get(HandleRole::Source, &top).is_none());
    }
}
