// SPDX-License-Identifier: MIT OR Apache-2.0
//! A two-input blend node.

use crate::content::ContentUi;
use crate::node::{ContextMenu, MenuAction, NodeBehavior};

/// Blend modes selectable in the toolbar
const MODES: [&str; 3] = ["Mix", "Add", "Multiply"];

/// Blends its two inputs with a selectable mode and factor.
#[derive(Debug, Clone)]
pub struct BlendBehavior {
    /// Blend factor
    pub factor: f32,
    /// Pass the first input through unchanged
    pub bypass: bool,
    /// Selected blend mode index
    pub mode: usize,
}

impl Default for BlendBehavior {
    fn default() -> Self {
        Self {
            factor: 0.5,
            bypass: false,
            mode: 0,
        }
    }
}

impl BlendBehavior {
    /// Boxed factory for registry use.
    pub fn boxed() -> Box<dyn NodeBehavior> {
        Box::new(Self::default())
    }
}

impl NodeBehavior for BlendBehavior {
    fn init(&mut self, menu: &mut ContextMenu) {
        menu.add("Reset", MenuAction::Behavior);
        menu.add("Duplicate", MenuAction::DuplicateNode);
    }

    fn draw_content(&mut self, ui: &mut ContentUi<'_>) {
        ui.toolbar(&mut self.mode, &MODES);
        ui.slider(&mut self.factor, 0.0..=1.0);
        ui.toggle(&mut self.bypass, "Bypass");
    }

    fn menu_selected(&mut self, label: &str) {
        if label == "Reset" {
            *self = Self::default();
        }
    }

    fn duplicate(&self) -> Option<Box<dyn NodeBehavior>> {
        Some(Box::new(self.clone()))
    }
}
