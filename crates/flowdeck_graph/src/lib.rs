// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node graph editor framework for Flowdeck.
//!
//! A reusable surface for placing, connecting, dragging, selecting and
//! removing nodes on a pannable canvas, driven by the host application's
//! per-frame event/redraw loop.
//!
//! ## Architecture
//!
//! The framework is built on a small persistent graph model with:
//! - Typed in/out connection points and click-to-connect wiring
//! - Pluggable node kinds ([`NodeBehavior`]) with auto-sizing content
//! - Front-to-back event dispatch over per-node state machines
//! - An egui host adapter ([`ui::show`]) supplying pan/zoom, the grid,
//!   and input translation
//!
//! The host forwards canvas-space input into
//! [`NodeEditor::process_event`] and calls [`NodeEditor::draw`] once per
//! frame; the graph itself is only ever mutated through editor
//! operations.

pub mod connection;
pub mod content;
pub mod editor;
pub mod event;
pub mod kinds;
pub mod node;
pub mod point;
pub mod style;
pub mod ui;

pub use connection::{Connection, ConnectionId};
pub use content::ContentUi;
pub use editor::{ConnectError, EditorResponse, NodeEditor};
pub use event::{InputEvent, InputFocus, NodeSignal};
pub use kinds::{NodeKind, NodeRegistry};
pub use node::{Border, ContextMenu, MenuAction, Node, NodeBehavior, NodeId, NodeTemplate};
pub use point::{ConnectionPoint, PointId, PointKind, PointRef};
pub use style::{EditorStyle, NodeStyle, PointStyle};
pub use ui::{CanvasResponse, CanvasView};
