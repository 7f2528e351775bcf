// SPDX-License-Identifier: MIT OR Apache-2.0
//! The input events the host feeds in and the signals nodes raise back.

use crate::node::NodeId;
use crate::point::PointRef;
use egui::{Key, PointerButton, Pos2, Vec2};

/// One input event, in canvas space.
///
/// The host applies its pan/zoom transform before dispatch; the editor
/// never sees screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A pointer button went down.
    PointerDown {
        /// Pointer position.
        pos: Pos2,
        /// The button that went down.
        button: PointerButton,
    },
    /// A pointer button was released.
    PointerUp {
        /// Pointer position.
        pos: Pos2,
        /// The button that was released.
        button: PointerButton,
    },
    /// The pointer moved with no button held.
    PointerMove {
        /// Pointer position.
        pos: Pos2,
    },
    /// The pointer moved while a button is held.
    PointerDrag {
        /// Pointer position.
        pos: Pos2,
        /// Movement since the previous event.
        delta: Vec2,
        /// The button being held.
        button: PointerButton,
    },
    /// A key went down.
    KeyDown {
        /// The pressed key.
        key: Key,
    },
}

impl InputEvent {
    /// The pointer position carried by the event, if any.
    pub fn pointer_pos(&self) -> Option<Pos2> {
        match *self {
            Self::PointerDown { pos, .. }
            | Self::PointerUp { pos, .. }
            | Self::PointerMove { pos }
            | Self::PointerDrag { pos, .. } => Some(pos),
            Self::KeyDown { .. } => None,
        }
    }
}

/// A notification raised by a node (or one of its points) during event
/// dispatch.
///
/// Nodes never mutate the editor's collections; they signal intent and
/// the editor performs the mutation once dispatch has finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeSignal {
    /// A connection point was clicked.
    PointClicked(PointRef),
    /// The node asks to be removed from the graph.
    RemoveRequested(NodeId),
    /// Any focused host text input should be defocused.
    ClearFocus,
    /// The node's context menu should open.
    MenuRequested {
        /// Node whose menu to open.
        node: NodeId,
        /// Canvas position to open it at.
        pos: Pos2,
    },
}

/// Host capability for clearing keyboard focus when a node is selected.
///
/// Injected into the editor instead of reaching into global UI state; a
/// no-op implementation is used when the host installs none.
pub trait InputFocus {
    /// Defocus whatever text input currently holds keyboard focus.
    fn clear_focus(&mut self);
}
