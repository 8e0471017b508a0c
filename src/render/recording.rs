use crate::math::Point2;

use super::surface::{Color, DrawingSurface, TextAlign, TextBaseline};

/// One call made against a [`DrawingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    BeginPath,
    MoveTo(Point2),
    LineTo(Point2),
    Arc { center: Point2, radius: f64, start_angle: f64, end_angle: f64 },
    StrokeColor(Color),
    FillColor(Color),
    LineWidth(f64),
    LineDash(Vec<f64>),
    Stroke,
    Fill,
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
    FontSize(f64),
    TextAlign(TextAlign),
    TextBaseline(TextBaseline),
    FillText { text: String, at: Point2 },
}

/// A surface that records every call, for replay or inspection.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// The recorded calls, oldest first.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Takes the recorded calls, leaving the surface empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Text of every `fill_text` call, in order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(*c)).count()
    }

    /// Returns `true` if every `save` has a matching `restore` and the
    /// stack never underflows.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        let mut depth: usize = 0;
        for c in &self.commands {
            match c {
                DrawCommand::Save => depth += 1,
                DrawCommand::Restore => match depth.checked_sub(1) {
                    Some(d) => depth = d,
                    None => return false,
                },
                _ => {}
            }
        }
        depth == 0
    }

    /// Replays the recorded calls onto another surface.
    pub fn replay<S: DrawingSurface + ?Sized>(&self, target: &mut S) {
        for c in &self.commands {
            match c {
                DrawCommand::ClearRect { x, y, width, height } => {
                    target.clear_rect(*x, *y, *width, *height);
                }
                DrawCommand::BeginPath => target.begin_path(),
                DrawCommand::MoveTo(p) => target.move_to(*p),
                DrawCommand::LineTo(p) => target.line_to(*p),
                DrawCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                } => target.arc(*center, *radius, *start_angle, *end_angle),
                DrawCommand::StrokeColor(color) => target.set_stroke_color(*color),
                DrawCommand::FillColor(color) => target.set_fill_color(*color),
                DrawCommand::LineWidth(w) => target.set_line_width(*w),
                DrawCommand::LineDash(pattern) => target.set_line_dash(pattern),
                DrawCommand::Stroke => target.stroke(),
                DrawCommand::Fill => target.fill(),
                DrawCommand::Save => target.save(),
                DrawCommand::Restore => target.restore(),
                DrawCommand::Translate(dx, dy) => target.translate(*dx, *dy),
                DrawCommand::Rotate(angle) => target.rotate(*angle),
                DrawCommand::FontSize(px) => target.set_font_size(*px),
                DrawCommand::TextAlign(align) => target.set_text_align(*align),
                DrawCommand::TextBaseline(baseline) => target.set_text_baseline(*baseline),
                DrawCommand::FillText { text, at } => target.fill_text(text, *at),
            }
        }
    }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::ClearRect { x, y, width, height });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, p: Point2) {
        self.commands.push(DrawCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Point2) {
        self.commands.push(DrawCommand::LineTo(p));
    }

    fn arc(&mut self, center: Point2, radius: f64, start_angle: f64, end_angle: f64) {
        self.commands.push(DrawCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::StrokeColor(color));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::FillColor(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn set_line_dash(&mut self, pattern: &[f64]) {
        self.commands.push(DrawCommand::LineDash(pattern.to_vec()));
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.commands.push(DrawCommand::Translate(dx, dy));
    }

    fn rotate(&mut self, angle: f64) {
        self.commands.push(DrawCommand::Rotate(angle));
    }

    fn set_font_size(&mut self, px: f64) {
        self.commands.push(DrawCommand::FontSize(px));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.commands.push(DrawCommand::TextAlign(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.commands.push(DrawCommand::TextBaseline(baseline));
    }

    fn fill_text(&mut self, text: &str, at: Point2) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_owned(),
            at,
        });
    }
}
