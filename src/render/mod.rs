//! Drawing a computed room onto a [`DrawingSurface`].
//!
//! The renderer only reads canvas-space coordinates from a [`RoomGeometry`];
//! all vector math happens in [`crate::geometry`]. Every problem met while
//! drawing is logged and skipped, never fatal.

mod label;
mod recording;
mod style;
mod surface;
mod svg;

pub use label::{readable_angle, LabelPlacement};
pub use recording::{DrawCommand, RecordingSurface};
pub use style::SketchStyle;
pub use surface::{Color, DrawingSurface, InvalidColor, TextAlign, TextBaseline};
pub use svg::SvgSurface;

use std::f64::consts::TAU;

use crate::geometry::{RoomGeometry, Segment, WallGeometry};
use crate::math::Point2;
use crate::room::WallId;
use label::{draw_label, LabelStyle};

/// Draws rooms with a fixed [`SketchStyle`].
#[derive(Debug, Clone, Default)]
pub struct RoomRenderer {
    style: SketchStyle,
}

impl RoomRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_style(style: SketchStyle) -> Self {
        Self { style }
    }

    #[must_use]
    pub fn style(&self) -> &SketchStyle {
        &self.style
    }

    /// Clears `surface` and draws the whole room, annotating `selected`.
    ///
    /// A surface without a usable size or a missing `geometry` makes this a
    /// logged no-op; nothing is cleared in that case.
    pub fn render<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        geometry: Option<&RoomGeometry>,
        selected: Option<&WallId>,
    ) {
        let (width, height) = surface.size();
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            tracing::warn!(width, height, "invalid drawing surface");
            return;
        }
        let Some(geometry) = geometry else {
            tracing::warn!("no room geometry provided");
            return;
        };
        if let Some(id) = selected {
            if geometry.wall(id).is_none() {
                tracing::debug!(wall = %id, "selected wall is not part of the room");
            }
        }

        surface.clear_rect(0.0, 0.0, width, height);
        self.dot(
            surface,
            Point2::new(width / 2.0, height / 2.0),
            self.style.center_color,
            self.style.corner_radius,
        );

        for wall in geometry.walls() {
            if !wall.is_drawable() {
                tracing::warn!(wall = %wall.id, "wall has no usable canvas coordinates, skipping");
                continue;
            }
            if selected == Some(&wall.id) {
                self.draw_selected_wall(surface, wall);
            } else {
                self.draw_wall(surface, wall);
            }
            self.dot(surface, wall.canvas.start, self.style.corner_color, self.style.corner_radius);
            self.dot(surface, wall.canvas.end, self.style.corner_color, self.style.corner_radius);
        }
    }

    fn draw_wall<S: DrawingSurface + ?Sized>(&self, surface: &mut S, wall: &WallGeometry) {
        let s = &self.style;
        self.line(surface, &wall.canvas, s.wall_color, s.wall_width, &[]);
        draw_label(
            surface,
            &wall.canvas,
            &format!("Length {}", wall.length.round()),
            LabelStyle {
                color: s.label_color,
                font_size: s.wall_font_size,
                gap: s.label_gap,
            },
        );
    }

    fn draw_selected_wall<S: DrawingSurface + ?Sized>(&self, surface: &mut S, wall: &WallGeometry) {
        let s = &self.style;
        self.line(surface, &wall.canvas, s.selected_color, s.wall_width, &[]);

        // Parallel guide with connectors back to the wall.
        let guide = &wall.parallel_canvas;
        if wall.has_guide() {
            self.line(surface, guide, s.selected_color, s.guide_width, &s.dash);
            for connector in [
                Segment::new(wall.canvas.start, guide.start),
                Segment::new(wall.canvas.end, guide.end),
            ] {
                self.line(surface, &connector, s.connector_color, s.connector_width, &[]);
            }
            draw_label(
                surface,
                guide,
                &format!("Length: {}", wall.length.round()),
                LabelStyle {
                    color: s.selected_color,
                    font_size: s.annotation_font_size,
                    gap: s.label_gap,
                },
            );
            self.dot(surface, guide.start, s.selected_color, s.marker_radius);
            self.dot(surface, guide.end, s.selected_color, s.marker_radius);
        } else {
            tracing::warn!(wall = %wall.id, "guide line has no usable canvas coordinates, skipping");
        }

        // Perpendicular extent through the wall midpoint.
        let extent = &wall.extent_canvas;
        if !wall.has_extent() {
            tracing::warn!(wall = %wall.id, "extent line has no usable canvas coordinates, skipping");
            return;
        }
        self.line(surface, extent, s.extent_color, s.guide_width, &s.dash);
        self.dot(surface, extent.start, s.extent_color, s.marker_radius);
        self.dot(surface, extent.end, s.extent_color, s.marker_radius);
        draw_label(
            surface,
            extent,
            &format!("Depth: {}", wall.perpendicular_length.round()),
            LabelStyle {
                color: s.extent_color,
                font_size: s.annotation_font_size,
                gap: s.label_gap,
            },
        );
    }

    fn line<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        segment: &Segment,
        color: Color,
        width: f64,
        dash: &[f64],
    ) {
        surface.save();
        surface.begin_path();
        surface.move_to(segment.start);
        surface.line_to(segment.end);
        surface.set_stroke_color(color);
        surface.set_line_width(width);
        surface.set_line_dash(dash);
        surface.stroke();
        surface.restore();
    }

    fn dot<S: DrawingSurface + ?Sized>(&self, surface: &mut S, at: Point2, color: Color, radius: f64) {
        surface.save();
        surface.begin_path();
        surface.arc(at, radius, 0.0, TAU);
        surface.set_fill_color(color);
        surface.fill();
        surface.restore();
    }
}

/// Draws `geometry` onto `surface` with the default style.
///
/// See [`RoomRenderer::render`].
pub fn render_room<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    geometry: Option<&RoomGeometry>,
    selected: Option<&WallId>,
) {
    RoomRenderer::new().render(surface, geometry, selected);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{compute_room_geometry, CanvasSize};
    use crate::room::{CornerData, Room};
    use approx::assert_relative_eq;

    fn square_geometry() -> RoomGeometry {
        let room = Room::closed_loop(&[
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ]);
        compute_room_geometry(&room, CanvasSize::new(800.0, 600.0), 1.0, 50.0).unwrap()
    }

    fn is_clear(c: &DrawCommand) -> bool {
        matches!(c, DrawCommand::ClearRect { .. })
    }

    fn is_stroke(c: &DrawCommand) -> bool {
        matches!(c, DrawCommand::Stroke)
    }

    fn is_fill(c: &DrawCommand) -> bool {
        matches!(c, DrawCommand::Fill)
    }

    #[test]
    fn clears_once_then_draws_center_dot() {
        let mut surface = RecordingSurface::new(800.0, 600.0);
        render_room(&mut surface, Some(&square_geometry()), None);

        let cmds = surface.commands();
        assert_eq!(
            cmds[0],
            DrawCommand::ClearRect {
                x: 0.0,
                y: 0.0,
                width: 800.0,
                height: 600.0
            }
        );
        assert_eq!(surface.count(is_clear), 1);
        assert!(cmds.contains(&DrawCommand::Arc {
            center: Point2::new(400.0, 300.0),
            radius: 4.0,
            start_angle: 0.0,
            end_angle: TAU,
        }));
        assert!(cmds.contains(&DrawCommand::FillColor(Color::GREEN)));
        assert!(surface.is_balanced());
    }

    #[test]
    fn unselected_walls_get_length_labels() {
        let mut surface = RecordingSurface::new(800.0, 600.0);
        render_room(&mut surface, Some(&square_geometry()), None);

        assert_eq!(surface.texts(), vec!["Length 10"; 4]);
        assert_eq!(surface.count(is_stroke), 4);
        // Center dot plus two markers per wall.
        assert_eq!(surface.count(is_fill), 1 + 8);
    }

    #[test]
    fn selected_wall_gets_guide_and_extent() {
        let geom = square_geometry();
        let selected = WallId::from("w0");
        let mut surface = RecordingSurface::new(800.0, 600.0);
        render_room(&mut surface, Some(&geom), Some(&selected));

        let texts = surface.texts();
        assert_eq!(texts.len(), 5);
        assert!(texts.contains(&"Length: 10"));
        assert!(texts.contains(&"Depth: 10"));
        assert_eq!(texts.iter().filter(|t| **t == "Length 10").count(), 3);

        // Selected: body, guide, two connectors, extent. Others: one body each.
        assert_eq!(surface.count(is_stroke), 5 + 3);
        assert_eq!(surface.count(|c| *c == DrawCommand::LineDash(vec![5.0, 5.0])), 2);
        assert!(surface.commands().contains(&DrawCommand::StrokeColor(Color::BLUE)));
        assert!(surface
            .commands()
            .contains(&DrawCommand::StrokeColor(Color::rgba(255, 0, 0, 0.3))));

        let wall = geom.wall(&selected).unwrap();
        assert!(surface.commands().contains(&DrawCommand::MoveTo(wall.parallel_canvas.start)));
        assert!(surface.commands().contains(&DrawCommand::LineTo(wall.extent_canvas.end)));
        assert!(surface.is_balanced());
    }

    #[test]
    fn markers_follow_wall_body() {
        let mut surface = RecordingSurface::new(800.0, 600.0);
        render_room(&mut surface, Some(&square_geometry()), None);
        let cmds = surface.commands();
        let first_stroke = cmds.iter().position(is_stroke).unwrap();
        let first_marker = cmds
            .iter()
            .position(|c| matches!(c, DrawCommand::Arc { center, .. } if *center == Point2::new(395.0, 295.0)))
            .unwrap();
        assert!(first_marker > first_stroke);
    }

    #[test]
    fn labels_are_rotated_and_restored() {
        let mut surface = RecordingSurface::new(800.0, 600.0);
        render_room(&mut surface, Some(&square_geometry()), None);
        let cmds = surface.commands();
        let text_at = cmds
            .iter()
            .position(|c| matches!(c, DrawCommand::FillText { .. }))
            .unwrap();
        assert!(matches!(cmds[text_at - 5], DrawCommand::Rotate(_)));
        assert!(matches!(cmds[text_at - 6], DrawCommand::Translate(..)));
        assert_eq!(cmds[text_at + 1], DrawCommand::Restore);
        assert_eq!(
            cmds[text_at],
            DrawCommand::FillText {
                text: "Length 10".to_owned(),
                at: Point2::new(0.0, -5.0)
            }
        );
    }

    #[test]
    fn missing_geometry_is_a_no_op() {
        let mut surface = RecordingSurface::new(800.0, 600.0);
        render_room(&mut surface, None, None);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn unusable_surface_is_a_no_op() {
        let geom = square_geometry();
        for (w, h) in [(0.0, 600.0), (800.0, -1.0), (f64::NAN, 10.0)] {
            let mut surface = RecordingSurface::new(w, h);
            render_room(&mut surface, Some(&geom), None);
            assert!(surface.commands().is_empty());
        }
    }

    #[test]
    fn degenerate_wall_renders_without_panicking() {
        let mut room = Room::new();
        let a = room.add_corner(CornerData::new(Point2::new(1.0, 1.0)));
        let b = room.add_corner(CornerData::new(Point2::new(1.0, 1.0)));
        room.connect(a, b, WallId::from("dot"));
        let geom = compute_room_geometry(&room, CanvasSize::new(200.0, 100.0), 1.0, 50.0).unwrap();

        let mut surface = RecordingSurface::new(200.0, 100.0);
        render_room(&mut surface, Some(&geom), Some(&WallId::from("dot")));
        assert!(surface.texts().contains(&"Length: 0"));
        assert!(surface.texts().contains(&"Depth: 0"));
        assert!(surface.is_balanced());
    }

    #[test]
    fn undrawable_wall_is_skipped_and_the_rest_drawn() {
        let mut room = Room::closed_loop(&[
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ]);
        let a = room.add_corner(CornerData::new(Point2::new(f64::NAN, 0.0)));
        let b = room.add_corner(CornerData::new(Point2::new(5.0, 5.0)));
        room.connect(a, b, WallId::from("broken"));
        let geom = compute_room_geometry(&room, CanvasSize::new(800.0, 600.0), 1.0, 50.0).unwrap();
        assert!(!geom.wall(&WallId::from("broken")).unwrap().is_drawable());

        for selected in [None, Some(WallId::from("broken"))] {
            let mut surface = RecordingSurface::new(800.0, 600.0);
            render_room(&mut surface, Some(&geom), selected.as_ref());
            assert_eq!(surface.count(is_clear), 1);
            assert_eq!(surface.texts(), vec!["Length 10"; 4]);
            assert_eq!(surface.count(is_stroke), 4);
            assert_eq!(surface.count(is_fill), 1 + 8);
            assert!(surface.is_balanced());
        }
    }

    #[test]
    fn infinite_offset_distance_keeps_walls_and_guides() {
        let room = Room::closed_loop(&[
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ]);
        let geom =
            compute_room_geometry(&room, CanvasSize::new(800.0, 600.0), 1.0, f64::INFINITY).unwrap();
        let mut surface = RecordingSurface::new(800.0, 600.0);
        render_room(&mut surface, Some(&geom), Some(&WallId::from("w0")));

        let texts = surface.texts();
        assert_eq!(texts.iter().filter(|t| **t == "Length 10").count(), 3);
        assert!(texts.contains(&"Length: 10"));
        assert!(texts.contains(&"Depth: 10"));
        assert_eq!(surface.count(is_stroke), 5 + 3);
    }

    #[test]
    fn huge_finite_room_still_renders() {
        let room = Room::closed_loop(&[
            Point2::new(1e308, 0.0),
            Point2::new(1.7e308, 0.0),
            Point2::new(1.7e308, 10.0),
            Point2::new(1e308, 10.0),
        ]);
        let geom = compute_room_geometry(&room, CanvasSize::new(800.0, 600.0), 1.0, 50.0).unwrap();
        assert!(geom.sketch_offset().x.is_finite());
        let bottom = geom.wall(&WallId::from("w0")).unwrap();
        assert_relative_eq!(bottom.length, 0.7e308, max_relative = 1e-12);
        assert_relative_eq!(bottom.perpendicular_length, 10.0);

        let mut surface = RecordingSurface::new(800.0, 600.0);
        render_room(&mut surface, Some(&geom), None);
        assert_eq!(surface.count(is_stroke), 4);
        assert_eq!(surface.texts().len(), 4);
    }

    #[test]
    fn unknown_selection_draws_plain_room() {
        let mut surface = RecordingSurface::new(800.0, 600.0);
        render_room(&mut surface, Some(&square_geometry()), Some(&WallId::from("zz")));
        assert_eq!(surface.texts(), vec!["Length 10"; 4]);
    }

    #[test]
    fn custom_style_is_used() {
        let style = SketchStyle {
            wall_color: Color::rgb(10, 20, 30),
            ..SketchStyle::default()
        };
        let renderer = RoomRenderer::with_style(style);
        let mut surface = RecordingSurface::new(800.0, 600.0);
        renderer.render(&mut surface, Some(&square_geometry()), None);
        assert!(surface
            .commands()
            .contains(&DrawCommand::StrokeColor(Color::rgb(10, 20, 30))));
    }

    #[test]
    fn renders_to_svg() {
        let geom = square_geometry();
        let mut svg = SvgSurface::new(800.0, 600.0);
        render_room(&mut svg, Some(&geom), Some(&WallId::from("w1")));
        let out = svg.to_svg();
        assert!(out.contains("stroke-dasharray=\"5,5\""));
        assert!(out.contains(">Length: 10</text>"));
        assert!(out.contains("<circle cx=\"400\" cy=\"300\" r=\"4\" fill=\"#008000\"/>"));
    }
}
