// SPDX-License-Identifier: MIT OR Apache-2.0
//! A free-text note node.

use crate::content::ContentUi;
use crate::node::{ContextMenu, MenuAction, NodeBehavior};

/// Editable multi-line note with a clear action in its context menu.
#[derive(Debug, Clone, Default)]
pub struct NoteBehavior {
    /// Current note text
    pub text: String,
}

impl NoteBehavior {
    /// Boxed factory for registry use.
    pub fn boxed() -> Box<dyn NodeBehavior> {
        Box::new(Self::default())
    }
}

impl NodeBehavior for NoteBehavior {
    fn init(&mut self, menu: &mut ContextMenu) {
        menu.add("Clear Text", MenuAction::Behavior);
        menu.add("Duplicate", MenuAction::DuplicateNode);
    }

    fn draw_content(&mut self, ui: &mut ContentUi<'_>) {
        ui.text_area(&mut self.text);
    }

    fn menu_selected(&mut self, label: &str) {
        if label == "Clear Text" {
            self.text.clear();
        }
    }

    fn duplicate(&self) -> Option<Box<dyn NodeBehavior>> {
        Some(Box::new(self.clone()))
    }
}
