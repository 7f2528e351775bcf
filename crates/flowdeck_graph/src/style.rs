// SPDX-License-Identifier: MIT OR Apache-2.0
//! Visual parameters for the editor surface.

use egui::{Color32, Stroke};

/// Box styling for a node in one interaction state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStyle {
    /// Background fill
    pub fill: Color32,
    /// Outline stroke
    pub stroke: Stroke,
}

/// Marker styling for connection points of one kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointStyle {
    /// Marker radius (canvas units)
    pub radius: f32,
    /// Marker fill
    pub fill: Color32,
    /// Marker outline
    pub stroke: Stroke,
}

/// Visual parameters for the whole editor surface.
///
/// Owned by the editor's host and handed to the draw pass each frame;
/// nodes themselves never store styles.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorStyle {
    /// Node box in the idle state
    pub node: NodeStyle,
    /// Node box while selected
    pub node_selected: NodeStyle,
    /// Corner rounding of node boxes (canvas units)
    pub rounding: f32,
    /// In-point markers
    pub in_point: PointStyle,
    /// Out-point markers
    pub out_point: PointStyle,
    /// Established connections
    pub connection: Stroke,
    /// The in-progress connection overlay
    pub pending: Stroke,
    /// Minor grid lines
    pub grid_minor: Color32,
    /// Major grid lines
    pub grid_major: Color32,
}

impl Default for EditorStyle {
    fn default() -> Self {
        Self {
            node: NodeStyle {
                fill: Color32::from_rgb(45, 45, 48),
                stroke: Stroke::new(1.0, Color32::from_gray(70)),
            },
            node_selected: NodeStyle {
                fill: Color32::from_rgb(60, 70, 90),
                stroke: Stroke::new(2.0, Color32::from_rgb(100, 150, 255)),
            },
            rounding: 6.0,
            in_point: PointStyle {
                radius: 6.0,
                fill: Color32::from_rgb(80, 200, 120),
                stroke: Stroke::new(1.0, Color32::from_gray(30)),
            },
            out_point: PointStyle {
                radius: 6.0,
                fill: Color32::from_rgb(100, 150, 200),
                stroke: Stroke::new(1.0, Color32::from_gray(30)),
            },
            connection: Stroke::new(2.5, Color32::from_gray(180)),
            pending: Stroke::new(2.0, Color32::from_rgb(230, 200, 90)),
            grid_minor: Color32::from_rgba_unmultiplied(60, 60, 60, 100),
            grid_major: Color32::from_rgba_unmultiplied(80, 80, 80, 150),
        }
    }
}
