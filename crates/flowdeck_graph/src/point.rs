// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection points: the typed anchors a connection starts or ends at.

use crate::event::InputEvent;
use crate::node::NodeId;
use crate::style::PointStyle;
use crate::ui::CanvasView;
use egui::{PointerButton, Pos2, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Distance (canvas units) within which a pointer press hits a point.
///
/// Zoom-independent: the host converts input to canvas space before
/// dispatch, so hit-testing never sees screen coordinates.
pub const HIT_RADIUS: f32 = 8.0;

/// Unique identifier for a connection point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointId(pub Uuid);

impl PointId {
    /// Create a new random point ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PointId {
    fn default() -> Self {
        Self::new()
    }
}

/// Which side of a node a point sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointKind {
    /// Terminates connections; laid out along the node's left edge
    In,
    /// Originates connections; laid out along the node's right edge
    Out,
}

/// Everything needed to refer to a point from outside its node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointRef {
    /// The owning node
    pub node: NodeId,
    /// The point itself
    pub point: PointId,
    /// Which side of the node the point sits on
    pub kind: PointKind,
}

/// A typed anchor belonging to exactly one node.
///
/// Its position is a pure function of the owner's rect and its place
/// among same-kind siblings, recomputed on every use so it can never go
/// stale relative to node movement.
#[derive(Debug, Clone)]
pub struct ConnectionPoint {
    id: PointId,
    owner: NodeId,
    kind: PointKind,
    index: usize,
    sibling_count: usize,
}

impl ConnectionPoint {
    /// Panics if `index` is out of range for `sibling_count`.
    pub(crate) fn new(owner: NodeId, kind: PointKind, index: usize, sibling_count: usize) -> Self {
        assert!(
            index < sibling_count,
            "connection point index {index} out of range for {sibling_count} siblings"
        );
        Self {
            id: PointId::new(),
            owner,
            kind,
            index,
            sibling_count,
        }
    }

    /// The point's id
    pub fn id(&self) -> PointId {
        self.id
    }

    /// The node this point belongs to
    pub fn owner(&self) -> NodeId {
        self.owner
    }

    /// In or Out
    pub fn kind(&self) -> PointKind {
        self.kind
    }

    /// Position among siblings of the same kind
    pub fn index(&self) -> usize {
        self.index
    }

    /// Total number of same-kind siblings on the owning node
    pub fn sibling_count(&self) -> usize {
        self.sibling_count
    }

    /// A copyable reference to this point
    pub fn reference(&self) -> PointRef {
        PointRef {
            node: self.owner,
            point: self.id,
            kind: self.kind,
        }
    }

    /// Canvas position: on the owner's left (In) or right (Out) edge,
    /// vertically distributed as `top + height * (index + 1) / (count + 1)`.
    pub fn position(&self, owner_rect: Rect) -> Pos2 {
        let x = match self.kind {
            PointKind::In => owner_rect.left(),
            PointKind::Out => owner_rect.right(),
        };
        let y = owner_rect.top()
            + owner_rect.height() * (self.index + 1) as f32 / (self.sibling_count + 1) as f32;
        Pos2::new(x, y)
    }

    /// Whether `pos` lands within the hit radius of this point.
    pub fn hit_test(&self, owner_rect: Rect, pos: Pos2) -> bool {
        self.position(owner_rect).distance(pos) <= HIT_RADIUS
    }

    /// React to a primary pointer press within the hit radius; every other
    /// event is ignored.
    pub(crate) fn process_event(&self, owner_rect: Rect, event: &InputEvent) -> Option<PointRef> {
        match *event {
            InputEvent::PointerDown {
                pos,
                button: PointerButton::Primary,
            } if self.hit_test(owner_rect, pos) => Some(self.reference()),
            _ => None,
        }
    }

    /// Draw the point marker.
    pub fn draw(
        &self,
        painter: &egui::Painter,
        view: &CanvasView,
        owner_rect: Rect,
        style: &PointStyle,
    ) {
        let center = view.to_screen(self.position(owner_rect));
        let radius = style.radius * view.zoom;
        painter.circle_filled(center, radius, style.fill);
        painter.circle_stroke(center, radius, style.stroke);
    }
}
