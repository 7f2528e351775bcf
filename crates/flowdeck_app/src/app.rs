// SPDX-License-Identifier: MIT OR Apache-2.0
//! The eframe application embedding the node editor.

use egui::Pos2;
use flowdeck_graph::kinds::{builtin_registry, NodeRegistry};
use flowdeck_graph::ui as canvas;
use flowdeck_graph::ui::EguiFocus;
use flowdeck_graph::{CanvasView, EditorStyle, NodeEditor};

/// The demo application state.
pub struct FlowdeckApp {
    editor: NodeEditor,
    view: CanvasView,
    style: EditorStyle,
    registry: NodeRegistry,
    /// Open "create node" palette, at a canvas position
    palette: Option<Pos2>,
}

impl FlowdeckApp {
    /// Build the app and wire the editor's focus collaborator.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let mut editor = NodeEditor::new();
        editor.set_focus_collaborator(Box::new(EguiFocus::new(cc.egui_ctx.clone())));

        // a small starter graph so the canvas is not empty
        let registry = builtin_registry();
        if let Some(template) = registry.template("source") {
            editor.add_node(template, Pos2::new(-320.0, -60.0));
        }
        if let Some(template) = registry.template("blend") {
            editor.add_node(template, Pos2::new(-60.0, -80.0));
        }
        if let Some(template) = registry.template("note") {
            editor.add_node(template, Pos2::new(220.0, -40.0));
        }

        Self {
            editor,
            view: CanvasView::default(),
            style: EditorStyle::default(),
            registry,
            palette: None,
        }
    }

    fn top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.checkbox(&mut self.view.show_grid, "Grid");
            ui.separator();
            if ui.button("Reset View").clicked() {
                self.view.pan = egui::Vec2::ZERO;
                self.view.zoom = 1.0;
            }
            ui.separator();
            ui.label(format!(
                "Nodes: {} | Connections: {} | Zoom: {:.0}%",
                self.editor.node_count(),
                self.editor.connection_count(),
                self.view.zoom * 100.0,
            ));
        });
    }

    fn palette_ui(&mut self, ctx: &egui::Context) {
        let Some(canvas_pos) = self.palette else {
            return;
        };
        let screen_pos = self.view.to_screen(canvas_pos);
        let kinds: Vec<(String, String)> = self
            .registry
            .kinds()
            .map(|kind| (kind.id.clone(), kind.name.clone()))
            .collect();

        let mut close = false;
        let area = egui::Area::new(egui::Id::new("flowdeck_create_palette"))
            .order(egui::Order::Foreground)
            .fixed_pos(screen_pos)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label("Create node");
                    ui.separator();
                    for (id, name) in kinds {
                        if ui.button(name).clicked() {
                            if let Some(template) = self.registry.template(&id) {
                                self.editor.add_node(template, canvas_pos);
                            }
                            close = true;
                        }
                    }
                });
            });

        if close || area.response.clicked_elsewhere() {
            self.palette = None;
        }
    }
}

impl eframe::App for FlowdeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("flowdeck_top").show(ctx, |ui| self.top_bar(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            let response = canvas::show(&mut self.editor, ui, &mut self.view, &self.style);
            if let Some(pos) = response.canvas_menu {
                self.palette = Some(pos);
            }
        });

        self.palette_ui(ctx);
    }
}
