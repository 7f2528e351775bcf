// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connections: directed edges from an out point to an in point.

use crate::node::NodeId;
use crate::point::{PointId, PointRef};
use crate::ui::CanvasView;
use egui::{Pos2, Stroke};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Horizontal control-point offset for connection curves
const BEZIER_CURVATURE: f32 = 50.0;
/// Segments a curve is flattened into
const BEZIER_SEGMENTS: usize = 32;

/// Unique identifier for a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Create a new random connection ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

/// A directed edge between one out point and one in point.
///
/// Purely relational: owned by the editor, not by the nodes, and
/// identified for deduplication by its endpoint pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Unique connection ID
    pub id: ConnectionId,
    /// Node owning the out point
    pub from_node: NodeId,
    /// The out point the connection leaves from
    pub from_point: PointId,
    /// Node owning the in point
    pub to_node: NodeId,
    /// The in point the connection arrives at
    pub to_point: PointId,
}

impl Connection {
    /// Create a new connection between an out reference and an in one.
    pub(crate) fn new(from: PointRef, to: PointRef) -> Self {
        Self {
            id: ConnectionId::new(),
            from_node: from.node,
            from_point: from.point,
            to_node: to.node,
            to_point: to.point,
        }
    }

    /// Check if this connection involves a specific node
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.from_node == node_id || self.to_node == node_id
    }

    /// Check if this connection involves a specific point
    pub fn involves_point(&self, point_id: PointId) -> bool {
        self.from_point == point_id || self.to_point == point_id
    }

    /// Whether this connection joins exactly the given endpoint pair.
    pub fn joins(&self, from: PointId, to: PointId) -> bool {
        self.from_point == from && self.to_point == to
    }

    /// Draw the connection as a curve between the two endpoint positions,
    /// recomputed by the caller every frame. Purely presentational.
    pub fn draw(
        &self,
        painter: &egui::Painter,
        view: &CanvasView,
        from: Pos2,
        to: Pos2,
        stroke: Stroke,
    ) {
        draw_curve(painter, view, from, to, stroke);
    }
}

/// Draw a cubic bezier between two canvas positions.
pub(crate) fn draw_curve(
    painter: &egui::Painter,
    view: &CanvasView,
    from: Pos2,
    to: Pos2,
    stroke: Stroke,
) {
    let from = view.to_screen(from);
    let to = view.to_screen(to);

    let distance = (to.x - from.x).abs();
    let curvature = (BEZIER_CURVATURE * view.zoom).min(distance * 0.5);
    let ctrl1 = Pos2::new(from.x + curvature, from.y);
    let ctrl2 = Pos2::new(to.x - curvature, to.y);

    let stroke = Stroke::new(stroke.width * view.zoom, stroke.color);
    let points = bezier_points(from, ctrl1, ctrl2, to, BEZIER_SEGMENTS);
    for pair in points.windows(2) {
        painter.line_segment([pair[0], pair[1]], stroke);
    }
}

/// Generate points along a cubic bezier curve
fn bezier_points(p0: Pos2, p1: Pos2, p2: Pos2, p3: Pos2, segments: usize) -> Vec<Pos2> {
    let mut points = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let t = i as f32 / segments as f32;
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        let x = mt3 * p0.x + 3.0 * mt2 * t * p1.x + 3.0 * mt * t2 * p2.x + t3 * p3.x;
        let y = mt3 * p0.y + 3.0 * mt2 * t * p1.y + 3.0 * mt * t2 * p2.y + t3 * p3.y;

        points.push(Pos2::new(x, y));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::PointKind;

    fn reference(node: NodeId, kind: PointKind) -> PointRef {
        PointRef {
            node,
            point: PointId::new(),
            kind,
        }
    }

    #[test]
    fn test_involves_endpoints_only() {
        let a = NodeId::new();
        let b = NodeId::new();
        let from = reference(a, PointKind::Out);
        let to = reference(b, PointKind::In);
        let connection = Connection::new(from, to);

        assert!(connection.involves_node(a));
        assert!(connection.involves_node(b));
        assert!(!connection.involves_node(NodeId::new()));

        assert!(connection.involves_point(from.point));
        assert!(connection.involves_point(to.point));
        assert!(!connection.involves_point(PointId::new()));
    }

    #[test]
    fn test_joins_matches_endpoint_pair_in_order() {
        let from = reference(NodeId::new(), PointKind::Out);
        let to = reference(NodeId::new(), PointKind::In);
        let connection = Connection::new(from, to);

        assert!(connection.joins(from.point, to.point));
        assert!(!connection.joins(to.point, from.point));
    }

    #[test]
    fn test_bezier_endpoints_are_exact() {
        let p0 = Pos2::new(0.0, 0.0);
        let p3 = Pos2::new(100.0, 50.0);
        let points = bezier_points(p0, Pos2::new(50.0, 0.0), Pos2::new(50.0, 50.0), p3, 16);
        assert_eq!(points.len(), 17);
        assert_eq!(points[0], p0);
        assert_eq!(points[16], p3);
    }
}
