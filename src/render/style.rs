use serde::Deserialize;

use super::surface::Color;

/// Colors, stroke widths and text sizes used when drawing a room.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SketchStyle {
    /// Unselected wall bodies.
    pub wall_color: Color,
    /// Selected wall body, its guide-line and the guide label.
    pub selected_color: Color,
    /// Connectors between the selected wall and its guide-line.
    pub connector_color: Color,
    /// Perpendicular extent line, its markers and label.
    pub extent_color: Color,
    /// Reference dot at the canvas center.
    pub center_color: Color,
    /// Markers at wall endpoints.
    pub corner_color: Color,
    /// Labels of unselected walls.
    pub label_color: Color,

    pub wall_width: f64,
    pub guide_width: f64,
    pub connector_width: f64,
    /// On/off lengths for the guide and extent lines.
    pub dash: Vec<f64>,

    pub corner_radius: f64,
    pub marker_radius: f64,

    pub wall_font_size: f64,
    pub annotation_font_size: f64,
    /// Distance between a label's baseline and its line, in pixels.
    pub label_gap: f64,
}

impl Default for SketchStyle {
    fn default() -> Self {
        Self {
            wall_color: Color::BLACK,
            selected_color: Color::RED,
            connector_color: Color::rgba(255, 0, 0, 0.3),
            extent_color: Color::BLUE,
            center_color: Color::GREEN,
            corner_color: Color::RED,
            label_color: Color::BLACK,
            wall_width: 1.0,
            guide_width: 2.0,
            connector_width: 1.0,
            dash: vec![5.0, 5.0],
            corner_radius: 4.0,
            marker_radius: 3.0,
            wall_font_size: 8.0,
            annotation_font_size: 12.0,
            label_gap: 5.0,
        }
    }
}
