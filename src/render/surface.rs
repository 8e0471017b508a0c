use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::math::Point2;

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `[0, 1]`.
    pub a: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 128, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    /// Opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Color with explicit opacity, clamped to `[0, 1]`.
    #[must_use]
    pub fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// `#rrggbb` form, ignoring alpha.
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }
}

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid color: {0:?}")]
pub struct InvalidColor(pub String);

impl TryFrom<String> for Color {
    type Error = InvalidColor;

    /// Accepts `#rrggbb`, `#rrggbbaa` and a few CSS color names.
    fn try_from(s: String) -> Result<Self, Self::Error> {
        let named = match s.to_ascii_lowercase().as_str() {
            "black" => Some(Self::BLACK),
            "white" => Some(Self::WHITE),
            "red" => Some(Self::RED),
            "green" => Some(Self::GREEN),
            "blue" => Some(Self::BLUE),
            _ => None,
        };
        if let Some(color) = named {
            return Ok(color);
        }

        let digits = s.strip_prefix('#').ok_or_else(|| InvalidColor(s.clone()))?;
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(InvalidColor(s.clone()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| InvalidColor(s.clone()))
        };
        let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
        let a = if digits.len() == 8 {
            f64::from(channel(6)?) / 255.0
        } else {
            1.0
        };
        Ok(Self::rgba(r, g, b, a))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

/// Vertical text placement relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Middle,
    Bottom,
    Top,
}

/// A 2D immediate-mode drawing backend.
///
/// The capability set mirrors an HTML canvas context: paths with stroke
/// style, filled arcs, a save/restore stack of transform and style state,
/// and aligned text. Stroke and fill settings apply to the next
/// [`stroke`](Self::stroke) or [`fill`](Self::fill).
pub trait DrawingSurface {
    /// Pixel size of the surface as `(width, height)`.
    fn size(&self) -> (f64, f64);

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point2);
    fn line_to(&mut self, p: Point2);
    /// Adds a circular arc from `start_angle` to `end_angle` (radians).
    fn arc(&mut self, center: Point2, radius: f64, start_angle: f64, end_angle: f64);

    fn set_stroke_color(&mut self, color: Color);
    fn set_fill_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);
    /// Dash pattern as alternating on/off lengths. Empty means solid.
    fn set_line_dash(&mut self, pattern: &[f64]);

    fn stroke(&mut self);
    fn fill(&mut self);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    fn rotate(&mut self, angle: f64);

    fn set_font_size(&mut self, px: f64);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn fill_text(&mut self, text: &str, at: Point2);
}
