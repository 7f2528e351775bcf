// SPDX-License-Identifier: MIT OR Apache-2.0
//! A constant-value source node.

use crate::content::ContentUi;
use crate::node::{ContextMenu, NodeBehavior};

/// Emits a single adjustable value. Not duplicable.
#[derive(Debug, Clone)]
pub struct SourceBehavior {
    /// Emitted value
    pub value: f32,
    /// Editable display label
    pub label: String,
}

impl Default for SourceBehavior {
    fn default() -> Self {
        Self {
            value: 1.0,
            label: "Value".to_string(),
        }
    }
}

impl SourceBehavior {
    /// Boxed factory for registry use.
    pub fn boxed() -> Box<dyn NodeBehavior> {
        Box::new(Self::default())
    }
}

impl NodeBehavior for SourceBehavior {
    fn init(&mut self, _menu: &mut ContextMenu) {}

    fn draw_content(&mut self, ui: &mut ContentUi<'_>) {
        ui.text_field(&mut self.label);
        ui.vertical_slider(&mut self.value, 0.0..=10.0);
        if ui.repeat_button("Nudge +0.1") {
            self.value = (self.value + 0.1).min(10.0);
        }
        if ui.button("Reset") {
            self.value = 1.0;
        }
        ui.label(format!("{}: {:.2}", self.label, self.value));
    }
}
