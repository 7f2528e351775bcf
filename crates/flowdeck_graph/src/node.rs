// SPDX-License-Identifier: MIT OR Apache-2.0
//! Nodes: titled, draggable boxes owning fixed arrays of connection
//! points and behavior-driven content.

use crate::content::ContentUi;
use crate::event::{InputEvent, NodeSignal};
use crate::point::{ConnectionPoint, PointId, PointKind};
use crate::style::EditorStyle;
use crate::ui::CanvasView;
use egui::{Key, PointerButton, Pos2, Rect, Vec2};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Gap between the title line and the behavior's content
const TITLE_SPACING: f32 = 12.0;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Insets between a node's frame and its content area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Border {
    /// Top inset
    pub top: f32,
    /// Right inset
    pub right: f32,
    /// Bottom inset
    pub bottom: f32,
    /// Left inset
    pub left: f32,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            top: 12.0,
            right: 12.0,
            bottom: 12.0,
            left: 12.0,
        }
    }
}

/// What a context-menu entry does when picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Ask the editor to remove the node
    RemoveNode,
    /// Ask the editor to duplicate the node
    DuplicateNode,
    /// Forwarded to the behavior via [`NodeBehavior::menu_selected`]
    Behavior,
}

/// The right-click menu of a node: display label to action, insertion
/// order preserved. The first registration of a label wins; later
/// duplicates are silently dropped.
#[derive(Debug, Default)]
pub struct ContextMenu {
    entries: IndexMap<String, MenuAction>,
}

impl ContextMenu {
    /// Register an entry. A label that is already present is ignored.
    pub fn add(&mut self, label: impl Into<String>, action: MenuAction) {
        let label = label.into();
        if self.entries.contains_key(&label) {
            tracing::debug!(%label, "duplicate context menu label ignored");
            return;
        }
        self.entries.insert(label, action);
    }

    /// Entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, MenuAction)> {
        self.entries
            .iter()
            .map(|(label, action)| (label.as_str(), *action))
    }

    /// The action registered under `label`.
    pub fn action(&self, label: &str) -> Option<MenuAction> {
        self.entries.get(label).copied()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the menu has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A concrete node kind: supplies the content and custom menu actions of
/// a node.
///
/// Implementations are handed to the editor inside a [`NodeTemplate`];
/// they must not assume a particular rendering backend beyond the
/// [`ContentUi`] primitives.
pub trait NodeBehavior {
    /// One-time initialization hook, invoked exactly once while the
    /// editor builds the node. The built-in "Remove Node" entry is
    /// already registered when this runs, so re-registering that label
    /// has no effect.
    fn init(&mut self, menu: &mut ContextMenu);

    /// Draw the node's content with the provided layout primitives.
    fn draw_content(&mut self, ui: &mut ContentUi<'_>);

    /// A custom context-menu entry (registered with
    /// [`MenuAction::Behavior`]) was picked.
    fn menu_selected(&mut self, label: &str) {
        let _ = label;
    }

    /// A fresh copy of this behavior for node duplication. Kinds that do
    /// not support duplication return `None` (the default).
    fn duplicate(&self) -> Option<Box<dyn NodeBehavior>> {
        None
    }
}

/// The bundle a node is built from.
pub struct NodeTemplate {
    /// Display title
    pub title: String,
    /// Free-form identifier for the caller; never used by the editor
    pub tag: String,
    /// Number of in points
    pub inputs: usize,
    /// Number of out points
    pub outputs: usize,
    /// Fixed node width (canvas units)
    pub width: f32,
    /// Initial node height; recomputed from content on every draw
    pub height: f32,
    /// The node kind
    pub behavior: Box<dyn NodeBehavior>,
}

impl NodeTemplate {
    /// Template with default geometry and an empty tag.
    pub fn new(
        title: impl Into<String>,
        inputs: usize,
        outputs: usize,
        behavior: Box<dyn NodeBehavior>,
    ) -> Self {
        Self {
            title: title.into(),
            tag: String::new(),
            inputs,
            outputs,
            width: 180.0,
            height: 80.0,
            behavior,
        }
    }

    /// Set the caller tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Set the fixed width.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }
}

/// A positioned, titled, draggable element owning a fixed set of
/// connection points and behavior-driven content.
///
/// Per-node interaction runs Idle → Selected → Dragging and back; both
/// flags are transient session state. Width is fixed at construction;
/// height is recomputed from the content on every draw.
pub struct Node {
    id: NodeId,
    /// Free-form identifier for the caller; never used by the editor.
    pub tag: String,
    /// Display title drawn at the top of the node.
    pub title: String,
    /// Insets between the frame and the content area.
    pub border: Border,
    rect: Rect,
    in_points: Vec<ConnectionPoint>,
    out_points: Vec<ConnectionPoint>,
    selected: bool,
    dragging: bool,
    menu: ContextMenu,
    behavior: Box<dyn NodeBehavior>,
}

impl Node {
    /// Built exclusively by the editor factory. Construction is the
    /// one-time initialization: points are minted here, the built-in
    /// "Remove Node" menu entry is registered, then the behavior's init
    /// hook runs. There is no re-initialization path.
    pub(crate) fn new(template: NodeTemplate, position: Pos2) -> Self {
        let id = NodeId::new();
        let in_points = (0..template.inputs)
            .map(|index| ConnectionPoint::new(id, PointKind::In, index, template.inputs))
            .collect();
        let out_points = (0..template.outputs)
            .map(|index| ConnectionPoint::new(id, PointKind::Out, index, template.outputs))
            .collect();

        let mut menu = ContextMenu::default();
        menu.add("Remove Node", MenuAction::RemoveNode);
        let mut behavior = template.behavior;
        behavior.init(&mut menu);

        Self {
            id,
            tag: template.tag,
            title: template.title,
            border: Border::default(),
            rect: Rect::from_min_size(position, Vec2::new(template.width, template.height)),
            in_points,
            out_points,
            selected: false,
            dragging: false,
            menu,
            behavior,
        }
    }

    /// The node's id
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node's frame in canvas space
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Whether the node is currently selected
    pub fn selected(&self) -> bool {
        self.selected
    }

    /// Whether the node is currently being dragged
    pub fn dragging(&self) -> bool {
        self.dragging
    }

    /// In points in index order
    pub fn in_points(&self) -> &[ConnectionPoint] {
        &self.in_points
    }

    /// Out points in index order
    pub fn out_points(&self) -> &[ConnectionPoint] {
        &self.out_points
    }

    /// In point by index
    pub fn in_point(&self, index: usize) -> Option<&ConnectionPoint> {
        self.in_points.get(index)
    }

    /// Out point by index
    pub fn out_point(&self, index: usize) -> Option<&ConnectionPoint> {
        self.out_points.get(index)
    }

    /// The point with `id`, searching both arrays.
    pub fn point(&self, id: PointId) -> Option<&ConnectionPoint> {
        self.in_points
            .iter()
            .chain(&self.out_points)
            .find(|point| point.id() == id)
    }

    /// The context menu.
    pub fn menu(&self) -> &ContextMenu {
        &self.menu
    }

    /// The node's behavior.
    pub fn behavior(&self) -> &dyn NodeBehavior {
        self.behavior.as_ref()
    }

    /// Mutable access to the node's behavior.
    pub fn behavior_mut(&mut self) -> &mut dyn NodeBehavior {
        self.behavior.as_mut()
    }

    /// Move the node by `delta`. No clamping; nodes may leave the canvas.
    pub fn drag(&mut self, delta: Vec2) {
        self.rect = self.rect.translate(delta);
    }

    pub(crate) fn deselect(&mut self) {
        self.selected = false;
    }

    /// The border-inset content area.
    pub fn content_rect(&self) -> Rect {
        Rect::from_min_max(
            Pos2::new(
                self.rect.left() + self.border.left,
                self.rect.top() + self.border.top,
            ),
            Pos2::new(
                self.rect.right() - self.border.right,
                self.rect.bottom() - self.border.bottom,
            ),
        )
    }

    /// Process one event. Returns true when the event is consumed and
    /// must not reach nodes behind this one.
    ///
    /// Connection points get first refusal; a primary press inside the
    /// body selects and starts dragging but deliberately does not consume
    /// (siblings deselect off the same press).
    pub fn process_event(&mut self, event: &InputEvent, signals: &mut Vec<NodeSignal>) -> bool {
        match *event {
            InputEvent::PointerDown {
                pos,
                button: PointerButton::Primary,
            } => {
                for point in self.in_points.iter().chain(&self.out_points) {
                    if let Some(reference) = point.process_event(self.rect, event) {
                        signals.push(NodeSignal::PointClicked(reference));
                        return true;
                    }
                }
                if self.rect.contains(pos) {
                    self.selected = true;
                    self.dragging = true;
                    signals.push(NodeSignal::ClearFocus);
                } else {
                    self.selected = false;
                }
                false
            }
            InputEvent::PointerDown {
                pos,
                button: PointerButton::Secondary,
            } => {
                if self.rect.contains(pos) {
                    self.selected = true;
                    signals.push(NodeSignal::ClearFocus);
                    signals.push(NodeSignal::MenuRequested { node: self.id, pos });
                    true
                } else {
                    false
                }
            }
            InputEvent::PointerUp { .. } => {
                self.dragging = false;
                false
            }
            InputEvent::PointerDrag {
                delta,
                button: PointerButton::Primary,
                ..
            } if self.dragging => {
                self.drag(delta);
                true
            }
            InputEvent::KeyDown { key: Key::Delete } if self.selected => {
                signals.push(NodeSignal::RemoveRequested(self.id));
                false
            }
            _ => false,
        }
    }

    /// Draw the node: points, frame, then title and behavior content
    /// inside the clipped content area. Height is recomputed from what
    /// the content actually used this frame.
    pub fn draw(&mut self, ui: &mut egui::Ui, view: &CanvasView, style: &EditorStyle) {
        let painter = ui.painter().clone();

        for point in &self.in_points {
            point.draw(&painter, view, self.rect, &style.in_point);
        }
        for point in &self.out_points {
            point.draw(&painter, view, self.rect, &style.out_point);
        }

        let node_style = if self.selected {
            &style.node_selected
        } else {
            &style.node
        };
        let screen_rect = view.rect_to_screen(self.rect);
        let rounding = style.rounding * view.zoom;
        painter.rect_filled(screen_rect, rounding, node_style.fill);
        painter.rect_stroke(screen_rect, rounding, node_style.stroke);

        let content_screen = view.rect_to_screen(self.content_rect());
        let mut child = ui.new_child(
            egui::UiBuilder::new()
                .max_rect(content_screen)
                .layout(egui::Layout::top_down(egui::Align::Min)),
        );
        child.set_clip_rect(content_screen.intersect(ui.clip_rect()));
        child.set_width(content_screen.width());

        let mut content = ContentUi::new(&mut child);
        content.label(egui::RichText::new(self.title.clone()).strong());
        content.space(TITLE_SPACING);
        self.behavior.draw_content(&mut content);
        let used = content.used_height();

        self.rect
            .set_height(self.border.top + used + self.border.bottom);
    }
}
