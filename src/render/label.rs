use std::f64::consts::{FRAC_PI_2, PI};

use crate::geometry::Segment;
use crate::math::Point2;

use super::surface::{Color, DrawingSurface, TextAlign, TextBaseline};

/// Where and how a segment label is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    /// Segment midpoint in canvas space.
    pub anchor: Point2,
    /// Rotation of the text in radians, never upside-down.
    pub rotation: f64,
}

impl LabelPlacement {
    /// Places a label at the middle of `segment`, parallel to it.
    #[must_use]
    pub fn for_segment(segment: &Segment) -> Self {
        let d = segment.end - segment.start;
        Self {
            anchor: segment.midpoint(),
            rotation: readable_angle(d.y.atan2(d.x)),
        }
    }
}

/// Flips angles beyond ±90° by half a turn so text stays upright.
#[must_use]
pub fn readable_angle(angle: f64) -> f64 {
    if angle.abs() > FRAC_PI_2 {
        angle + PI
    } else {
        angle
    }
}

/// Text appearance for a single label.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LabelStyle {
    pub color: Color,
    pub font_size: f64,
    pub gap: f64,
}

/// Draws `text` centered just above the middle of `segment`.
///
/// The surface transform is saved and restored around the draw.
pub(crate) fn draw_label<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    segment: &Segment,
    text: &str,
    style: LabelStyle,
) {
    let placement = LabelPlacement::for_segment(segment);
    surface.save();
    surface.translate(placement.anchor.x, placement.anchor.y);
    surface.rotate(placement.rotation);
    surface.set_font_size(style.font_size);
    surface.set_fill_color(style.color);
    surface.set_text_align(TextAlign::Center);
    surface.set_text_baseline(TextBaseline::Bottom);
    surface.fill_text(text, Point2::new(0.0, -style.gap));
    surface.restore();
}
