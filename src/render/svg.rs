use std::f64::consts::TAU;
use std::fmt::Write as _;

use crate::math::{Matrix3, Point2, Vector2};

use super::surface::{Color, DrawingSurface, TextAlign, TextBaseline};

/// Number of chords used to approximate a full turn of a partial arc.
const ARC_SEGMENTS_PER_TURN: f64 = 32.0;

#[derive(Debug, Clone)]
struct SvgState {
    transform: Matrix3,
    stroke: Color,
    fill: Color,
    line_width: f64,
    dash: Vec<f64>,
    font_size: f64,
    align: TextAlign,
    baseline: TextBaseline,
}

impl Default for SvgState {
    fn default() -> Self {
        Self {
            transform: Matrix3::identity(),
            stroke: Color::BLACK,
            fill: Color::BLACK,
            line_width: 1.0,
            dash: Vec::new(),
            font_size: 10.0,
            align: TextAlign::Start,
            baseline: TextBaseline::Alphabetic,
        }
    }
}

/// Path element in device coordinates.
#[derive(Debug, Clone, Copy)]
enum PathOp {
    Move(Point2),
    Line(Point2),
    Circle { center: Point2, radius: f64 },
}

/// A [`DrawingSurface`] that serializes everything drawn into an SVG document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    state: SvgState,
    stack: Vec<SvgState>,
    path: Vec<PathOp>,
    body: String,
}

impl SvgSurface {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            state: SvgState::default(),
            stack: Vec::new(),
            path: Vec::new(),
            body: String::new(),
        }
    }

    /// Returns the complete SVG document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let (w, h) = (fmt_num(self.width), fmt_num(self.height));
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{}</svg>\n",
            self.body
        )
    }

    fn device(&self, p: Point2) -> Point2 {
        self.state.transform.transform_point(&p)
    }

    fn stroke_attrs(&self) -> String {
        let s = &self.state;
        let mut attrs = format!(
            "fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"",
            s.stroke.hex(),
            fmt_num(s.line_width)
        );
        if !s.stroke.is_opaque() {
            let _ = write!(attrs, " stroke-opacity=\"{}\"", fmt_num(s.stroke.a));
        }
        if !s.dash.is_empty() {
            let dash: Vec<String> = s.dash.iter().map(|d| fmt_num(*d)).collect();
            let _ = write!(attrs, " stroke-dasharray=\"{}\"", dash.join(","));
        }
        attrs
    }

    fn fill_attrs(&self) -> String {
        let fill = self.state.fill;
        let mut attrs = format!("fill=\"{}\"", fill.hex());
        if !fill.is_opaque() {
            let _ = write!(attrs, " fill-opacity=\"{}\"", fmt_num(fill.a));
        }
        attrs
    }

    /// Polyline path data for the non-circle part of the current path.
    fn path_data(&self, close: bool) -> String {
        let mut d = String::new();
        let mut open = false;
        for op in &self.path {
            match op {
                PathOp::Move(p) => {
                    if open && close {
                        d.push_str("Z ");
                    }
                    let _ = write!(d, "M{},{} ", fmt_num(p.x), fmt_num(p.y));
                    open = true;
                }
                PathOp::Line(p) => {
                    let _ = write!(d, "L{},{} ", fmt_num(p.x), fmt_num(p.y));
                }
                PathOp::Circle { .. } => {}
            }
        }
        if open && close {
            d.push('Z');
        }
        d.trim_end().to_owned()
    }

    fn circles(&self) -> impl Iterator<Item = (Point2, f64)> + '_ {
        self.path.iter().filter_map(|op| match op {
            PathOp::Circle { center, radius } => Some((*center, *radius)),
            _ => None,
        })
    }

    fn emit_circles(&mut self, attrs: &str) {
        let circles: Vec<(Point2, f64)> = self.circles().collect();
        for (c, r) in circles {
            let _ = writeln!(
                self.body,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" {attrs}/>",
                fmt_num(c.x),
                fmt_num(c.y),
                fmt_num(r)
            );
        }
    }
}

impl DrawingSurface for SvgSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if x <= 0.0 && y <= 0.0 && x + width >= self.width && y + height >= self.height {
            self.body.clear();
            return;
        }
        let _ = writeln!(
            self.body,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#ffffff\"/>",
            fmt_num(x),
            fmt_num(y),
            fmt_num(width),
            fmt_num(height)
        );
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, p: Point2) {
        let p = self.device(p);
        self.path.push(PathOp::Move(p));
    }

    fn line_to(&mut self, p: Point2) {
        let p = self.device(p);
        if self.path.is_empty() {
            self.path.push(PathOp::Move(p));
        } else {
            self.path.push(PathOp::Line(p));
        }
    }

    fn arc(&mut self, center: Point2, radius: f64, start_angle: f64, end_angle: f64) {
        let sweep = end_angle - start_angle;
        if sweep.abs() >= TAU {
            let center = self.device(center);
            self.path.push(PathOp::Circle { center, radius });
            return;
        }
        let steps = ((sweep.abs() / TAU) * ARC_SEGMENTS_PER_TURN).ceil().max(1.0);
        let mut t = 0.0;
        while t <= steps {
            let angle = start_angle + sweep * (t / steps);
            self.line_to(center + Vector2::new(angle.cos(), angle.sin()) * radius);
            t += 1.0;
        }
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_line_dash(&mut self, pattern: &[f64]) {
        self.state.dash = pattern.to_vec();
    }

    fn stroke(&mut self) {
        let attrs = self.stroke_attrs();
        let d = self.path_data(false);
        if !d.is_empty() {
            let _ = writeln!(self.body, "<path d=\"{d}\" {attrs}/>");
        }
        self.emit_circles(&attrs);
    }

    fn fill(&mut self) {
        let attrs = self.fill_attrs();
        let d = self.path_data(true);
        if !d.is_empty() {
            let _ = writeln!(self.body, "<path d=\"{d}\" {attrs}/>");
        }
        self.emit_circles(&attrs);
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(state) => self.state = state,
            None => tracing::warn!("restore without matching save"),
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.transform *= Matrix3::new_translation(&Vector2::new(dx, dy));
    }

    fn rotate(&mut self, angle: f64) {
        self.state.transform *= Matrix3::new_rotation(angle);
    }

    fn set_font_size(&mut self, px: f64) {
        self.state.font_size = px;
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.baseline = baseline;
    }

    fn fill_text(&mut self, text: &str, at: Point2) {
        let m = &self.state.transform;
        let anchor = match self.state.align {
            TextAlign::Start => "start",
            TextAlign::Center => "middle",
            TextAlign::End => "end",
        };
        let baseline = match self.state.baseline {
            TextBaseline::Alphabetic => "",
            TextBaseline::Middle => " dominant-baseline=\"middle\"",
            TextBaseline::Bottom => " dominant-baseline=\"text-after-edge\"",
            TextBaseline::Top => " dominant-baseline=\"text-before-edge\"",
        };
        let line = format!(
            "<text x=\"{}\" y=\"{}\" transform=\"matrix({} {} {} {} {} {})\" font-family=\"Arial\" font-size=\"{}\" text-anchor=\"{anchor}\"{baseline} {}>{}</text>",
            fmt_num(at.x),
            fmt_num(at.y),
            fmt_num(m[(0, 0)]),
            fmt_num(m[(1, 0)]),
            fmt_num(m[(0, 1)]),
            fmt_num(m[(1, 1)]),
            fmt_num(m[(0, 2)]),
            fmt_num(m[(1, 2)]),
            fmt_num(self.state.font_size),
            self.fill_attrs(),
            escape_xml(text)
        );
        self.body.push_str(&line);
        self.body.push('\n');
    }
}

/// Formats a coordinate with at most three decimals, trailing zeros trimmed.
fn fmt_num(value: f64) -> String {
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_owned()
    } else {
        s.to_owned()
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
