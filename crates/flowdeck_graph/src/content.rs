// SPDX-License-Identifier: MIT OR Apache-2.0
//! The widget set node content is drawn with.
//!
//! Every primitive renders its control and adds the rendered height to
//! the node's running height accumulator for the frame, so nodes grow to
//! fit their content without the behavior tracking a layout cursor.

use std::ops::RangeInclusive;

/// Layout surface handed to
/// [`NodeBehavior::draw_content`](crate::node::NodeBehavior::draw_content).
pub struct ContentUi<'a> {
    ui: &'a mut egui::Ui,
    height: f32,
}

impl<'a> ContentUi<'a> {
    pub(crate) fn new(ui: &'a mut egui::Ui) -> Self {
        Self { ui, height: 0.0 }
    }

    fn track(&mut self, height: f32) {
        self.height += height + self.ui.spacing().item_spacing.y;
    }

    /// Total height the content has used so far this frame.
    pub fn used_height(&self) -> f32 {
        self.height
    }

    /// A static text line.
    pub fn label(&mut self, text: impl Into<egui::WidgetText>) {
        let rect = self.ui.label(text).rect;
        self.track(rect.height());
    }

    /// A single-press button; true on the frame it is clicked.
    pub fn button(&mut self, text: impl Into<egui::WidgetText>) -> bool {
        let response = self.ui.button(text);
        self.track(response.rect.height());
        response.clicked()
    }

    /// A button that reports true for as long as it is held down.
    pub fn repeat_button(&mut self, text: impl Into<egui::WidgetText>) -> bool {
        let response = self.ui.button(text);
        self.track(response.rect.height());
        response.is_pointer_button_down_on()
    }

    /// Horizontal slider over `range`; true when the value changed.
    pub fn slider(&mut self, value: &mut f32, range: RangeInclusive<f32>) -> bool {
        let response = self.ui.add(egui::Slider::new(value, range));
        self.track(response.rect.height());
        response.changed()
    }

    /// Vertical slider over `range`; true when the value changed.
    pub fn vertical_slider(&mut self, value: &mut f32, range: RangeInclusive<f32>) -> bool {
        let response = self.ui.add(egui::Slider::new(value, range).vertical());
        self.track(response.rect.height());
        response.changed()
    }

    /// An on/off toggle; true when flipped.
    pub fn toggle(&mut self, value: &mut bool, text: impl Into<egui::WidgetText>) -> bool {
        let response = self.ui.checkbox(value, text);
        self.track(response.rect.height());
        response.changed()
    }

    /// Single-line editable text; true when edited this frame.
    pub fn text_field(&mut self, text: &mut String) -> bool {
        let response = self
            .ui
            .add(egui::TextEdit::singleline(text).desired_width(f32::INFINITY));
        self.track(response.rect.height());
        response.changed()
    }

    /// Multi-line editable text; true when edited this frame.
    pub fn text_area(&mut self, text: &mut String) -> bool {
        let response = self
            .ui
            .add(egui::TextEdit::multiline(text).desired_width(f32::INFINITY));
        self.track(response.rect.height());
        response.changed()
    }

    /// A row of mutually exclusive buttons; true when the selection
    /// changed.
    pub fn toolbar(&mut self, selected: &mut usize, labels: &[&str]) -> bool {
        let mut changed = false;
        let response = self.ui.horizontal(|ui| {
            for (index, label) in labels.iter().enumerate() {
                if ui.selectable_label(index == *selected, *label).clicked() && *selected != index
                {
                    *selected = index;
                    changed = true;
                }
            }
        });
        self.track(response.response.rect.height());
        changed
    }

    /// A vertical gap of `height` canvas units.
    pub fn space(&mut self, height: f32) {
        self.ui.add_space(height);
        self.height += height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_accumulates_exact_height() {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let mut content = ContentUi::new(ui);
                content.space(12.0);
                content.space(8.0);
                assert_eq!(content.used_height(), 20.0);
            });
        });
    }

    #[test]
    fn test_widgets_contribute_height() {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let mut content = ContentUi::new(ui);
                content.label("line");
                let after_label = content.used_height();
                assert!(after_label > 0.0);

                content.button("press");
                assert!(content.used_height() > after_label);
            });
        });
    }
}
