// SPDX-License-Identifier: MIT OR Apache-2.0
//! egui host adapter: the pan/zoom canvas transform, input translation,
//! background grid, and a one-call wrapper wiring a [`NodeEditor`] into
//! an egui panel.

use crate::editor::NodeEditor;
use crate::event::{InputEvent, InputFocus};
use crate::style::EditorStyle;
use egui::{PointerButton, Pos2, Rect, Stroke, Vec2};

/// Grid line spacing (canvas units)
const GRID_SPACING: f32 = 20.0;
/// Scroll-wheel zoom limits
const MIN_ZOOM: f32 = 0.25;
/// Scroll-wheel zoom limits
const MAX_ZOOM: f32 = 4.0;

/// The host-owned pan/zoom mapping between screen and canvas space.
///
/// The editor itself only ever works in canvas space; this view belongs
/// to the surrounding surface and is applied to input on the way in and
/// to draw commands on the way out.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasView {
    /// Pan offset (canvas units)
    pub pan: Vec2,
    /// Zoom level (1.0 = 1:1)
    pub zoom: f32,
    /// Screen rectangle the canvas is drawn into; updated by [`show`]
    pub screen_rect: Rect,
    /// Whether to draw the background grid
    pub show_grid: bool,
}

impl Default for CanvasView {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
            screen_rect: Rect::from_min_max(Pos2::ZERO, Pos2::ZERO),
            show_grid: true,
        }
    }
}

impl CanvasView {
    /// Convert a screen position to canvas space.
    pub fn to_canvas(&self, screen_pos: Pos2) -> Pos2 {
        let center = self.screen_rect.center();
        Pos2::new(
            (screen_pos.x - center.x) / self.zoom - self.pan.x,
            (screen_pos.y - center.y) / self.zoom - self.pan.y,
        )
    }

    /// Convert a canvas position to screen space.
    pub fn to_screen(&self, canvas_pos: Pos2) -> Pos2 {
        let center = self.screen_rect.center();
        Pos2::new(
            (canvas_pos.x + self.pan.x) * self.zoom + center.x,
            (canvas_pos.y + self.pan.y) * self.zoom + center.y,
        )
    }

    /// Transform a canvas rectangle to screen space.
    pub fn rect_to_screen(&self, rect: Rect) -> Rect {
        Rect::from_min_size(self.to_screen(rect.min), rect.size() * self.zoom)
    }
}

/// Clears egui keyboard focus; the editor's focus collaborator for egui
/// hosts.
pub struct EguiFocus {
    ctx: egui::Context,
}

impl EguiFocus {
    /// Capability bound to `ctx`.
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl InputFocus for EguiFocus {
    fn clear_focus(&mut self) {
        self.ctx.memory_mut(|memory| {
            if let Some(focused) = memory.focused() {
                memory.surrender_focus(focused);
            }
        });
    }
}

/// What [`show`] reports back to the host.
pub struct CanvasResponse {
    /// The canvas widget's egui response
    pub response: egui::Response,
    /// Canvas position of a secondary press on empty canvas this frame,
    /// if any: the host's "create node" extension point
    pub canvas_menu: Option<Pos2>,
}

/// Run one full editor frame inside `ui`: allocate the canvas, apply pan
/// and zoom input, translate egui input into canvas-space events,
/// process them, then draw.
pub fn show(
    editor: &mut NodeEditor,
    ui: &mut egui::Ui,
    view: &mut CanvasView,
    style: &EditorStyle,
) -> CanvasResponse {
    let rect = ui.available_rect_before_wrap();
    let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
    view.screen_rect = rect;

    handle_pan_zoom(ui, &response, view);

    if view.show_grid {
        draw_grid(&ui.painter_at(rect), view, style);
    }

    let events = gather_events(ui, view, rect);
    let mut canvas_menu = None;
    for event in &events {
        let editor_response = editor.process_event(event);
        if editor_response.canvas_menu.is_some() {
            canvas_menu = editor_response.canvas_menu;
        }
    }

    editor.draw(ui, view, style);

    CanvasResponse {
        response,
        canvas_menu,
    }
}

/// Middle-drag pans; the scroll wheel zooms toward the pointer.
fn handle_pan_zoom(ui: &egui::Ui, response: &egui::Response, view: &mut CanvasView) {
    if response.dragged_by(PointerButton::Middle) {
        view.pan += response.drag_delta() / view.zoom;
    }

    ui.input(|input| {
        let Some(pointer) = input.pointer.hover_pos() else {
            return;
        };
        if !view.screen_rect.contains(pointer) {
            return;
        }
        let scroll = input.raw_scroll_delta.y;
        if scroll != 0.0 {
            let old_zoom = view.zoom;
            view.zoom = (view.zoom * (1.0 + scroll * 0.001)).clamp(MIN_ZOOM, MAX_ZOOM);

            // keep the canvas point under the pointer fixed
            if view.zoom != old_zoom {
                let pointer_canvas = view.to_canvas(pointer);
                let zoom_ratio = view.zoom / old_zoom;
                view.pan.x += pointer_canvas.x * (1.0 - zoom_ratio);
                view.pan.y += pointer_canvas.y * (1.0 - zoom_ratio);
            }
        }
    });
}

/// Translate this frame's egui input into canvas-space editor events.
fn gather_events(ui: &egui::Ui, view: &CanvasView, rect: Rect) -> Vec<InputEvent> {
    // keys belong to the canvas only while no widget holds keyboard focus
    let keyboard_free = ui.ctx().memory(|memory| memory.focused().is_none());

    ui.input(|input| {
        let mut events = Vec::new();
        let mut moved = None;

        for event in &input.events {
            match *event {
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed,
                    ..
                } => {
                    if pressed && !rect.contains(pos) {
                        continue;
                    }
                    let pos = view.to_canvas(pos);
                    events.push(if pressed {
                        InputEvent::PointerDown { pos, button }
                    } else {
                        InputEvent::PointerUp { pos, button }
                    });
                }
                egui::Event::PointerMoved(pos) => {
                    moved = Some(pos);
                }
                egui::Event::Key {
                    key,
                    pressed: true,
                    ..
                } => {
                    if keyboard_free {
                        events.push(InputEvent::KeyDown { key });
                    }
                }
                _ => {}
            }
        }

        // one coalesced move/drag per frame with the whole-frame delta
        if let Some(pos) = moved {
            let canvas_pos = view.to_canvas(pos);
            if input.pointer.primary_down() {
                events.push(InputEvent::PointerDrag {
                    pos: canvas_pos,
                    delta: input.pointer.delta() / view.zoom,
                    button: PointerButton::Primary,
                });
            } else if !input.pointer.middle_down() {
                events.push(InputEvent::PointerMove { pos: canvas_pos });
            }
        }

        events
    })
}

/// Draw the background grid with minor and major lines.
fn draw_grid(painter: &egui::Painter, view: &CanvasView, style: &EditorStyle) {
    let rect = view.screen_rect;
    let spacing = GRID_SPACING * view.zoom;
    let major_spacing = spacing * 5.0;

    let offset_x = (view.pan.x * view.zoom) % major_spacing;
    let offset_y = (view.pan.y * view.zoom) % major_spacing;

    let minor = Stroke::new(1.0, style.grid_minor);
    let mut x = rect.left() + offset_x % spacing;
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], minor);
        x += spacing;
    }
    let mut y = rect.top() + offset_y % spacing;
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], minor);
        y += spacing;
    }

    let major = Stroke::new(1.0, style.grid_major);
    x = rect.left() + offset_x % major_spacing;
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], major);
        x += major_spacing;
    }
    y = rect.top() + offset_y % major_spacing;
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], major);
        y += major_spacing;
    }
}
