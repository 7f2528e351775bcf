// SPDX-License-Identifier: MIT OR Apache-2.0
//! The orchestrating surface: owns the graph, dispatches the host's
//! event stream, and renders everything each frame.

use crate::connection::{draw_curve, Connection, ConnectionId};
use crate::event::{InputEvent, InputFocus, NodeSignal};
use crate::node::{MenuAction, Node, NodeId, NodeTemplate};
use crate::point::{PointId, PointKind, PointRef};
use crate::style::EditorStyle;
use crate::ui::CanvasView;
use egui::{PointerButton, Pos2, Vec2};
use indexmap::IndexMap;

/// Offset applied to a duplicated node so it does not cover its source
const DUPLICATE_OFFSET: Vec2 = Vec2::new(24.0, 24.0);

/// Error when creating a connection
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// Node not found
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),
    /// Point not found on its node
    #[error("connection point not found: {0:?}")]
    PointNotFound(PointId),
    /// Endpoints are not an out/in pair
    #[error("connection endpoints must be an out point and an in point")]
    KindMismatch,
    /// Both endpoints sit on the same node
    #[error("cannot connect a node to itself")]
    SameNode,
}

/// What the editor did with one event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EditorResponse {
    /// The event was consumed and should not reach other UI.
    pub consumed: bool,
    /// A secondary press landed on empty canvas; the host may open its
    /// "create node" menu at this canvas position.
    pub canvas_menu: Option<Pos2>,
}

/// An open node context menu.
struct OpenMenu {
    node: NodeId,
    pos: Pos2,
}

/// The node editor.
///
/// Owns all nodes and connections (insertion order is draw order,
/// back-to-front), receives the host's per-frame event stream, performs
/// hit-testing and dispatch in reverse insertion order (front-most node
/// first), and draws the whole graph each frame. Nodes and connections
/// are created and destroyed only through the operations here.
pub struct NodeEditor {
    nodes: IndexMap<NodeId, Node>,
    connections: IndexMap<ConnectionId, Connection>,
    pending: Option<PointRef>,
    pointer_pos: Pos2,
    open_menu: Option<OpenMenu>,
    focus: Option<Box<dyn InputFocus>>,
}

impl NodeEditor {
    /// Create an empty editor.
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
            connections: IndexMap::new(),
            pending: None,
            pointer_pos: Pos2::ZERO,
            open_menu: None,
            focus: None,
        }
    }

    /// Install the host's focus-clearing capability.
    pub fn set_focus_collaborator(&mut self, focus: Box<dyn InputFocus>) {
        self.focus = Some(focus);
    }

    /// Node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Mutable node by id.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// All nodes in insertion (draw) order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All connections.
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Number of connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// The currently selected node, if any (front-most wins).
    pub fn selected_node(&self) -> Option<NodeId> {
        self.nodes
            .values()
            .rev()
            .find(|node| node.selected())
            .map(Node::id)
    }

    /// Where a pending connection started, if one is in progress.
    pub fn pending_source(&self) -> Option<PointRef> {
        self.pending
    }

    /// Canvas position of a referenced point, if it is still alive.
    pub fn point_position(&self, reference: PointRef) -> Option<Pos2> {
        let node = self.nodes.get(&reference.node)?;
        let point = node.point(reference.point)?;
        Some(point.position(node.rect()))
    }

    /// Build a node from `template` at `position` and take ownership of
    /// it. This is the only way nodes enter the graph.
    pub fn add_node(&mut self, template: NodeTemplate, position: Pos2) -> NodeId {
        let node = Node::new(template, position);
        let id = node.id();
        tracing::debug!(node = ?id, title = %node.title, "node added");
        self.nodes.insert(id, node);
        id
    }

    /// Duplicate a node: copied geometry and behavior state, fresh
    /// connection points, no connections. Returns `None` if the node is
    /// gone or its behavior does not support duplication.
    pub fn duplicate_node(&mut self, id: NodeId) -> Option<NodeId> {
        let Some(source) = self.nodes.get(&id) else {
            tracing::warn!(node = ?id, "duplicate requested for a removed node");
            return None;
        };
        let Some(behavior) = source.behavior().duplicate() else {
            tracing::warn!(node = ?id, title = %source.title, "node kind does not support duplication");
            return None;
        };
        let template = NodeTemplate {
            title: source.title.clone(),
            tag: source.tag.clone(),
            inputs: source.in_points().len(),
            outputs: source.out_points().len(),
            width: source.rect().width(),
            height: source.rect().height(),
            behavior,
        };
        let position = source.rect().min + DUPLICATE_OFFSET;
        Some(self.add_node(template, position))
    }

    /// Remove a node and every connection with an endpoint on it. The
    /// only path that prunes connections as a side effect of removal.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        if !self.nodes.contains_key(&id) {
            tracing::warn!(node = ?id, "removal requested for a node that is already gone");
            return None;
        }
        self.connections
            .retain(|_, connection| !connection.involves_node(id));
        if self.pending.is_some_and(|pending| pending.node == id) {
            self.pending = None;
        }
        if self.open_menu.as_ref().is_some_and(|menu| menu.node == id) {
            self.open_menu = None;
        }
        let node = self.nodes.shift_remove(&id);
        tracing::debug!(node = ?id, "node removed");
        node
    }

    /// Create the connection `from` (out) → `to` (in). Repeating an
    /// existing endpoint pair is idempotent: the existing connection's
    /// id is returned and nothing is added.
    pub fn connect(&mut self, from: PointRef, to: PointRef) -> Result<ConnectionId, ConnectError> {
        if from.kind != PointKind::Out || to.kind != PointKind::In {
            return Err(ConnectError::KindMismatch);
        }
        if from.node == to.node {
            return Err(ConnectError::SameNode);
        }
        let from_node = self
            .nodes
            .get(&from.node)
            .ok_or(ConnectError::NodeNotFound(from.node))?;
        from_node
            .point(from.point)
            .ok_or(ConnectError::PointNotFound(from.point))?;
        let to_node = self
            .nodes
            .get(&to.node)
            .ok_or(ConnectError::NodeNotFound(to.node))?;
        to_node
            .point(to.point)
            .ok_or(ConnectError::PointNotFound(to.point))?;

        if let Some(existing) = self
            .connections
            .values()
            .find(|connection| connection.joins(from.point, to.point))
        {
            tracing::debug!(connection = ?existing.id, "duplicate connection request ignored");
            return Ok(existing.id);
        }

        let connection = Connection::new(from, to);
        let id = connection.id;
        tracing::debug!(connection = ?id, from = ?from.node, to = ?to.node, "connection added");
        self.connections.insert(id, connection);
        Ok(id)
    }

    /// Remove a connection.
    pub fn disconnect(&mut self, id: ConnectionId) -> Option<Connection> {
        let removed = self.connections.shift_remove(&id);
        if removed.is_none() {
            tracing::warn!(connection = ?id, "disconnect requested for a connection that is already gone");
        }
        removed
    }

    /// Feed one canvas-space event through the editor. Call for every
    /// event, before [`NodeEditor::draw`], each frame.
    pub fn process_event(&mut self, event: &InputEvent) -> EditorResponse {
        let mut response = EditorResponse::default();
        if let Some(pos) = event.pointer_pos() {
            self.pointer_pos = pos;
        }

        // an open context menu is modal: pointer input goes to it alone
        if self.open_menu.is_some()
            && matches!(
                event,
                InputEvent::PointerDown { .. }
                    | InputEvent::PointerUp { .. }
                    | InputEvent::PointerDrag { .. }
            )
        {
            response.consumed = true;
            return response;
        }

        let mut signals = Vec::new();
        response.consumed = match *event {
            InputEvent::PointerDown {
                pos,
                button: PointerButton::Primary,
            } => self.dispatch_primary_down(pos, event, &mut signals),
            _ => self.dispatch_front_to_back(event, &mut signals),
        };

        if !response.consumed {
            if let InputEvent::PointerDown {
                pos,
                button: PointerButton::Secondary,
            } = *event
            {
                response.canvas_menu = Some(pos);
            }
        }

        for signal in signals {
            self.handle_signal(signal);
        }
        response
    }

    /// Front-to-back dispatch, stopping at the first node that consumes.
    fn dispatch_front_to_back(
        &mut self,
        event: &InputEvent,
        signals: &mut Vec<NodeSignal>,
    ) -> bool {
        for node in self.nodes.values_mut().rev() {
            if node.process_event(event, signals) {
                return true;
            }
        }
        false
    }

    /// Primary presses additionally resolve occlusion: once a node's body
    /// has claimed the press, nodes behind it only lose their selection.
    fn dispatch_primary_down(
        &mut self,
        pos: Pos2,
        event: &InputEvent,
        signals: &mut Vec<NodeSignal>,
    ) -> bool {
        let mut claimed = false;
        for node in self.nodes.values_mut().rev() {
            if claimed {
                node.deselect();
                continue;
            }
            let over_body = node.rect().contains(pos);
            if node.process_event(event, signals) {
                return true;
            }
            if over_body {
                claimed = true;
            }
        }
        false
    }

    fn handle_signal(&mut self, signal: NodeSignal) {
        match signal {
            NodeSignal::PointClicked(reference) => self.on_point_clicked(reference),
            NodeSignal::RemoveRequested(id) => {
                self.remove_node(id);
            }
            NodeSignal::ClearFocus => {
                if let Some(focus) = &mut self.focus {
                    focus.clear_focus();
                }
            }
            NodeSignal::MenuRequested { node, pos } => {
                self.open_menu = Some(OpenMenu { node, pos });
            }
        }
    }

    /// The point-click protocol driving connection creation: first click
    /// records the start; an opposite-kind click on a different node
    /// completes the connection oriented out → in regardless of click
    /// order; anything else restarts from the new point.
    pub(crate) fn on_point_clicked(&mut self, clicked: PointRef) {
        match self.pending {
            None => self.pending = Some(clicked),
            Some(start) => {
                if start.kind != clicked.kind && start.node != clicked.node {
                    let (from, to) = if start.kind == PointKind::Out {
                        (start, clicked)
                    } else {
                        (clicked, start)
                    };
                    if let Err(error) = self.connect(from, to) {
                        tracing::warn!(%error, "connection rejected");
                    }
                    self.pending = None;
                } else {
                    self.pending = Some(clicked);
                }
            }
        }
    }

    /// Draw the whole graph: connections below, nodes above in insertion
    /// order, then the pending overlay and any open context menu on top.
    pub fn draw(&mut self, ui: &mut egui::Ui, view: &CanvasView, style: &EditorStyle) {
        let painter = ui.painter().clone();

        for connection in self.connections.values() {
            let from = self.point_position(PointRef {
                node: connection.from_node,
                point: connection.from_point,
                kind: PointKind::Out,
            });
            let to = self.point_position(PointRef {
                node: connection.to_node,
                point: connection.to_point,
                kind: PointKind::In,
            });
            if let (Some(from), Some(to)) = (from, to) {
                connection.draw(&painter, view, from, to, style.connection);
            }
        }

        for node in self.nodes.values_mut() {
            node.draw(ui, view, style);
        }

        if let Some(pending) = self.pending {
            match self.point_position(pending) {
                Some(origin) => {
                    let (from, to) = match pending.kind {
                        PointKind::Out => (origin, self.pointer_pos),
                        PointKind::In => (self.pointer_pos, origin),
                    };
                    draw_curve(&painter, view, from, to, style.pending);
                }
                None => {
                    tracing::warn!("pending connection start vanished");
                    self.pending = None;
                }
            }
        }

        self.draw_context_menu(ui, view);
    }

    fn draw_context_menu(&mut self, ui: &mut egui::Ui, view: &CanvasView) {
        let Some(open) = &self.open_menu else { return };
        let node_id = open.node;
        let screen_pos = view.to_screen(open.pos);
        let Some(node) = self.nodes.get(&node_id) else {
            self.open_menu = None;
            return;
        };

        let mut picked = None;
        let area = egui::Area::new(egui::Id::new(("flowdeck_node_menu", node_id)))
            .order(egui::Order::Foreground)
            .fixed_pos(screen_pos)
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    for (label, action) in node.menu().entries() {
                        if ui.button(label).clicked() {
                            picked = Some((label.to_string(), action));
                        }
                    }
                });
            });

        if let Some((label, action)) = picked {
            self.open_menu = None;
            match action {
                MenuAction::RemoveNode => {
                    self.remove_node(node_id);
                }
                MenuAction::DuplicateNode => {
                    self.duplicate_node(node_id);
                }
                MenuAction::Behavior => {
                    if let Some(node) = self.nodes.get_mut(&node_id) {
                        node.behavior_mut().menu_selected(&label);
                    }
                }
            }
        } else if area.response.clicked_elsewhere() {
            self.open_menu = None;
        }
    }
}

impl Default for NodeEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentUi;
    use crate::node::{ContextMenu, NodeBehavior};
    use egui::Key;

    struct Probe;

    impl NodeBehavior for Probe {
        fn init(&mut self, _menu: &mut ContextMenu) {}
        fn draw_content(&mut self, _ui: &mut ContentUi<'_>) {}
    }

    #[derive(Clone, Default)]
    struct Copyable;

    impl NodeBehavior for Copyable {
        fn init(&mut self, _menu: &mut ContextMenu) {}
        fn draw_content(&mut self, _ui: &mut ContentUi<'_>) {}
        fn duplicate(&self) -> Option<Box<dyn NodeBehavior>> {
            Some(Box::new(self.clone()))
        }
    }

    fn template(inputs: usize, outputs: usize) -> NodeTemplate {
        NodeTemplate::new("Test", inputs, outputs, Box::new(Probe))
    }

    fn press(pos: Pos2) -> InputEvent {
        InputEvent::PointerDown {
            pos,
            button: PointerButton::Primary,
        }
    }

    fn point_ref(editor: &NodeEditor, node: NodeId, kind: PointKind, index: usize) -> PointRef {
        let node = editor.node(node).unwrap();
        match kind {
            PointKind::In => node.in_point(index),
            PointKind::Out => node.out_point(index),
        }
        .unwrap()
        .reference()
    }

    fn point_pos(editor: &NodeEditor, reference: PointRef) -> Pos2 {
        editor.point_position(reference).unwrap()
    }

    /// Editor with A(2 in, 1 out) at the origin and B(1 in, 2 out) at
    /// x = 200, matching the canonical wiring scenario.
    fn two_node_editor() -> (NodeEditor, NodeId, NodeId) {
        let mut editor = NodeEditor::new();
        let a = editor.add_node(template(2, 1), Pos2::new(0.0, 0.0));
        let b = editor.add_node(template(1, 2), Pos2::new(200.0, 0.0));
        (editor, a, b)
    }

    #[test]
    fn test_click_out_then_in_creates_one_connection() {
        let (mut editor, a, b) = two_node_editor();
        let b_out = point_ref(&editor, b, PointKind::Out, 0);
        let a_in = point_ref(&editor, a, PointKind::In, 0);

        let first = editor.process_event(&press(point_pos(&editor, b_out)));
        assert!(first.consumed);
        assert_eq!(editor.pending_source(), Some(b_out));

        let second = editor.process_event(&press(point_pos(&editor, a_in)));
        assert!(second.consumed);
        assert_eq!(editor.pending_source(), None);
        assert_eq!(editor.connection_count(), 1);

        let connection = editor.connections().next().unwrap();
        assert_eq!(connection.from_node, b);
        assert_eq!(connection.to_node, a);
    }

    #[test]
    fn test_in_then_out_is_oriented_out_to_in() {
        let (mut editor, a, b) = two_node_editor();
        let a_in = point_ref(&editor, a, PointKind::In, 0);
        let b_out = point_ref(&editor, b, PointKind::Out, 0);

        editor.process_event(&press(point_pos(&editor, a_in)));
        editor.process_event(&press(point_pos(&editor, b_out)));

        assert_eq!(editor.connection_count(), 1);
        let connection = editor.connections().next().unwrap();
        assert_eq!(connection.from_node, b);
        assert_eq!(connection.to_node, a);
    }

    #[test]
    fn test_same_kind_click_restarts_pending() {
        let (mut editor, a, b) = two_node_editor();
        let a_out = point_ref(&editor, a, PointKind::Out, 0);
        let b_out = point_ref(&editor, b, PointKind::Out, 0);

        editor.process_event(&press(point_pos(&editor, a_out)));
        editor.process_event(&press(point_pos(&editor, b_out)));

        assert_eq!(editor.connection_count(), 0);
        assert_eq!(editor.pending_source(), Some(b_out));
    }

    #[test]
    fn test_same_point_click_restarts_pending() {
        let (mut editor, a, _) = two_node_editor();
        let a_out = point_ref(&editor, a, PointKind::Out, 0);

        editor.process_event(&press(point_pos(&editor, a_out)));
        editor.process_event(&press(point_pos(&editor, a_out)));

        assert_eq!(editor.connection_count(), 0);
        assert_eq!(editor.pending_source(), Some(a_out));
    }

    #[test]
    fn test_same_node_opposite_kind_restarts_pending() {
        let (mut editor, a, _) = two_node_editor();
        let a_out = point_ref(&editor, a, PointKind::Out, 0);
        let a_in = point_ref(&editor, a, PointKind::In, 0);

        editor.process_event(&press(point_pos(&editor, a_out)));
        editor.process_event(&press(point_pos(&editor, a_in)));

        assert_eq!(editor.connection_count(), 0);
        assert_eq!(editor.pending_source(), Some(a_in));
    }

    #[test]
    fn test_connect_is_idempotent() {
        let (mut editor, a, b) = two_node_editor();
        let from = point_ref(&editor, b, PointKind::Out, 0);
        let to = point_ref(&editor, a, PointKind::In, 0);

        let first = editor.connect(from, to).unwrap();
        let second = editor.connect(from, to).unwrap();
        assert_eq!(first, second);
        assert_eq!(editor.connection_count(), 1);
    }

    #[test]
    fn test_connect_rejects_kind_mismatch_and_self() {
        let (mut editor, a, b) = two_node_editor();
        let a_in = point_ref(&editor, a, PointKind::In, 0);
        let a_out = point_ref(&editor, a, PointKind::Out, 0);
        let b_in = point_ref(&editor, b, PointKind::In, 0);

        assert!(matches!(
            editor.connect(a_in, b_in),
            Err(ConnectError::KindMismatch)
        ));
        assert!(matches!(
            editor.connect(a_out, a_in),
            Err(ConnectError::SameNode)
        ));
        assert_eq!(editor.connection_count(), 0);
    }

    #[test]
    fn test_connect_rejects_removed_node() {
        let (mut editor, a, b) = two_node_editor();
        let from = point_ref(&editor, b, PointKind::Out, 0);
        let to = point_ref(&editor, a, PointKind::In, 0);

        editor.remove_node(b);
        assert!(matches!(
            editor.connect(from, to),
            Err(ConnectError::NodeNotFound(id)) if id == b
        ));
    }

    #[test]
    fn test_remove_node_prunes_only_its_connections() {
        let mut editor = NodeEditor::new();
        let a = editor.add_node(template(2, 1), Pos2::new(0.0, 0.0));
        let b = editor.add_node(template(1, 2), Pos2::new(200.0, 0.0));
        let c = editor.add_node(template(1, 1), Pos2::new(400.0, 0.0));

        editor
            .connect(
                point_ref(&editor, b, PointKind::Out, 0),
                point_ref(&editor, a, PointKind::In, 0),
            )
            .unwrap();
        editor
            .connect(
                point_ref(&editor, c, PointKind::Out, 0),
                point_ref(&editor, a, PointKind::In, 1),
            )
            .unwrap();
        let kept = editor
            .connect(
                point_ref(&editor, c, PointKind::Out, 0),
                point_ref(&editor, b, PointKind::In, 0),
            )
            .unwrap();
        assert_eq!(editor.connection_count(), 3);

        editor.remove_node(a);
        assert_eq!(editor.connection_count(), 1);
        assert_eq!(editor.connections().next().unwrap().id, kept);
        assert!(editor.node(a).is_none());
    }

    #[test]
    fn test_remove_unconnected_node_leaves_connections() {
        let mut editor = NodeEditor::new();
        let a = editor.add_node(template(2, 1), Pos2::new(0.0, 0.0));
        let b = editor.add_node(template(1, 2), Pos2::new(200.0, 0.0));
        let c = editor.add_node(template(1, 1), Pos2::new(400.0, 0.0));

        editor
            .connect(
                point_ref(&editor, b, PointKind::Out, 0),
                point_ref(&editor, a, PointKind::In, 0),
            )
            .unwrap();

        editor.remove_node(c);
        assert_eq!(editor.connection_count(), 1);
        assert_eq!(editor.node_count(), 2);
    }

    #[test]
    fn test_wiring_scenario_end_to_end() {
        let (mut editor, a, b) = two_node_editor();
        editor
            .connect(
                point_ref(&editor, b, PointKind::Out, 0),
                point_ref(&editor, a, PointKind::In, 0),
            )
            .unwrap();
        assert_eq!(editor.connection_count(), 1);
        let connection = editor.connections().next().unwrap();
        assert_eq!(connection.from_node, b);
        assert_eq!(connection.to_node, a);

        editor.remove_node(a);
        assert_eq!(editor.connection_count(), 0);
        assert_eq!(editor.node_count(), 1);
        assert!(editor.node(b).is_some());
    }

    #[test]
    fn test_overlapping_nodes_front_one_wins() {
        let mut editor = NodeEditor::new();
        let a = editor.add_node(template(2, 1), Pos2::new(0.0, 0.0));
        let b = editor.add_node(template(1, 2), Pos2::new(50.0, 40.0));

        // inside both rects, away from every connection point
        editor.process_event(&press(Pos2::new(100.0, 60.0)));

        assert!(editor.node(b).unwrap().selected());
        assert!(editor.node(b).unwrap().dragging());
        assert!(!editor.node(a).unwrap().selected());
        assert_eq!(editor.selected_node(), Some(b));
    }

    #[test]
    fn test_drag_scenario_moves_exactly_by_delta() {
        let mut editor = NodeEditor::new();
        let a = editor.add_node(template(2, 1), Pos2::new(0.0, 0.0));

        editor.process_event(&press(Pos2::new(90.0, 40.0)));
        let drag = editor.process_event(&InputEvent::PointerDrag {
            pos: Pos2::new(100.0, 45.0),
            delta: Vec2::new(10.0, 5.0),
            button: PointerButton::Primary,
        });
        assert!(drag.consumed);
        editor.process_event(&InputEvent::PointerUp {
            pos: Pos2::new(100.0, 45.0),
            button: PointerButton::Primary,
        });

        let node = editor.node(a).unwrap();
        assert_eq!(node.rect().min, Pos2::new(10.0, 5.0));
        assert!(!node.dragging());
    }

    #[test]
    fn test_delete_key_removes_only_selected() {
        let mut editor = NodeEditor::new();
        let a = editor.add_node(template(1, 1), Pos2::new(0.0, 0.0));
        let b = editor.add_node(template(1, 1), Pos2::new(400.0, 0.0));

        editor.process_event(&InputEvent::KeyDown { key: Key::Delete });
        assert_eq!(editor.node_count(), 2);

        editor.process_event(&press(Pos2::new(90.0, 40.0)));
        editor.process_event(&InputEvent::KeyDown { key: Key::Delete });
        assert!(editor.node(a).is_none());
        assert!(editor.node(b).is_some());
        assert_eq!(editor.node_count(), 1);
    }

    #[test]
    fn test_pending_cleared_when_its_node_is_removed() {
        let (mut editor, a, _) = two_node_editor();
        let a_out = point_ref(&editor, a, PointKind::Out, 0);

        editor.process_event(&press(point_pos(&editor, a_out)));
        assert!(editor.pending_source().is_some());

        editor.remove_node(a);
        assert_eq!(editor.pending_source(), None);
    }

    #[test]
    fn test_duplicate_node_mints_fresh_points_without_connections() {
        let mut editor = NodeEditor::new();
        let a = editor.add_node(
            NodeTemplate::new("Src", 1, 1, Box::new(Copyable)),
            Pos2::new(0.0, 0.0),
        );
        let b = editor.add_node(template(1, 1), Pos2::new(400.0, 0.0));
        editor
            .connect(
                point_ref(&editor, a, PointKind::Out, 0),
                point_ref(&editor, b, PointKind::In, 0),
            )
            .unwrap();

        let copy = editor.duplicate_node(a).unwrap();
        assert_eq!(editor.node_count(), 3);
        assert_eq!(editor.connection_count(), 1);

        let source = editor.node(a).unwrap();
        let twin = editor.node(copy).unwrap();
        assert_eq!(twin.title, source.title);
        assert_eq!(twin.rect().min, source.rect().min + DUPLICATE_OFFSET);
        assert_ne!(twin.out_points()[0].id(), source.out_points()[0].id());
        assert!(!editor
            .connections()
            .any(|connection| connection.involves_node(copy)));
    }

    #[test]
    fn test_duplicate_unsupported_behavior_returns_none() {
        let mut editor = NodeEditor::new();
        let a = editor.add_node(template(1, 1), Pos2::new(0.0, 0.0));
        assert_eq!(editor.duplicate_node(a), None);
        assert_eq!(editor.node_count(), 1);
    }

    #[test]
    fn test_empty_canvas_right_click_requests_host_menu() {
        let (mut editor, _, _) = two_node_editor();
        let response = editor.process_event(&InputEvent::PointerDown {
            pos: Pos2::new(1000.0, 1000.0),
            button: PointerButton::Secondary,
        });
        assert!(!response.consumed);
        assert_eq!(response.canvas_menu, Some(Pos2::new(1000.0, 1000.0)));
    }

    #[test]
    fn test_node_right_click_is_consumed_and_menu_is_modal() {
        let (mut editor, a, _) = two_node_editor();
        let response = editor.process_event(&InputEvent::PointerDown {
            pos: Pos2::new(90.0, 40.0),
            button: PointerButton::Secondary,
        });
        assert!(response.consumed);
        assert_eq!(response.canvas_menu, None);
        assert!(editor.node(a).unwrap().selected());

        // pointer input is swallowed while the menu is open
        let swallowed = editor.process_event(&press(Pos2::new(1000.0, 1000.0)));
        assert!(swallowed.consumed);
        assert!(editor.node(a).unwrap().selected());
    }

    #[test]
    fn test_stale_operations_are_no_ops() {
        let mut editor = NodeEditor::new();
        let a = editor.add_node(template(1, 1), Pos2::new(0.0, 0.0));
        let reference = point_ref(&editor, a, PointKind::Out, 0);

        editor.remove_node(a);
        assert!(editor.remove_node(a).is_none());
        assert_eq!(editor.point_position(reference), None);
        assert_eq!(editor.duplicate_node(a), None);
    }
}
