use serde::Deserialize;

use crate::math::{Point2, Vector2};

/// Pixel size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Center of the canvas in pixels.
    #[must_use]
    pub fn center(&self) -> Point2 {
        Point2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Clamps a model-to-pixel scale to a usable value.
///
/// Non-positive or non-finite scales become `1.0` and log a warning.
#[must_use]
pub fn clamp_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        tracing::warn!(scale, "invalid sketch scale, using default scale of 1");
        1.0
    }
}

/// Model space to canvas space mapping: `canvas = offset + model * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SketchTransform {
    offset: Vector2,
    scale: f64,
}

impl SketchTransform {
    /// Creates a transform from an explicit offset and scale.
    #[must_use]
    pub fn new(offset: Vector2, scale: f64) -> Self {
        Self {
            offset,
            scale: clamp_scale(scale),
        }
    }

    /// The transform that places `model_center` at the center of `canvas`.
    #[must_use]
    pub fn centering(canvas: CanvasSize, model_center: &Point2, scale: f64) -> Self {
        let scale = clamp_scale(scale);
        Self::new(canvas.center().coords - model_center.coords * scale, scale)
    }

    /// The canvas-space translation (the sketch offset).
    #[must_use]
    pub fn offset(&self) -> Vector2 {
        self.offset
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Maps a model-space point to canvas space.
    #[must_use]
    pub fn to_canvas(&self, p: &Point2) -> Point2 {
        Point2::from(self.offset + p.coords * self.scale)
    }

    /// Maps a canvas-space point back to model space.
    #[must_use]
    pub fn to_model(&self, p: &Point2) -> Point2 {
        Point2::from((p.coords - self.offset) / self.scale)
    }
}
