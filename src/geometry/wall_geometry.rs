use crate::math::vector_2d::{direction_and_length, is_finite_point, left_normal, midpoint, project_onto};
use crate::math::{Point2, Vector2, TOLERANCE};
use crate::room::{CornerId, WallId};

use super::transform::SketchTransform;

/// A straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        midpoint(&self.start, &self.end)
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        let d = self.end - self.start;
        d.x.hypot(d.y)
    }

    /// Maps both endpoints through `transform` into canvas space.
    #[must_use]
    pub fn to_canvas(&self, transform: &SketchTransform) -> Self {
        Self::new(transform.to_canvas(&self.start), transform.to_canvas(&self.end))
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        is_finite_point(&self.start) && is_finite_point(&self.end)
    }
}

/// Derived geometry of one wall, in model and canvas space.
#[derive(Debug, Clone, PartialEq)]
pub struct WallGeometry {
    pub id: WallId,
    pub start_corner: CornerId,
    pub end_corner: CornerId,
    /// Wall endpoints in model space.
    pub model: Segment,
    /// Wall endpoints in canvas space.
    pub canvas: Segment,
    /// Wall length in model units.
    pub length: f64,
    /// Unit direction from start to end, zero for a degenerate wall.
    pub direction: Vector2,
    /// Unit left normal of `direction`, zero for a degenerate wall.
    pub perpendicular: Vector2,
    /// Guide-line parallel to the wall, offset along `perpendicular`.
    pub parallel_model: Segment,
    pub parallel_canvas: Segment,
    /// Line through the wall midpoint spanning the room's extent along
    /// `perpendicular`.
    pub extent_model: Segment,
    pub extent_canvas: Segment,
    /// Length of the extent line in model units.
    pub perpendicular_length: f64,
}

impl WallGeometry {
    /// Returns `true` when the wall body has finite canvas coordinates.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.canvas.is_finite()
    }

    /// Returns `true` when the guide line has finite canvas coordinates.
    #[must_use]
    pub fn has_guide(&self) -> bool {
        self.parallel_canvas.is_finite()
    }

    /// Returns `true` when the extent line has finite canvas coordinates.
    #[must_use]
    pub fn has_extent(&self) -> bool {
        self.extent_canvas.is_finite()
    }

    /// Returns `true` for a wall whose endpoints coincide.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.length < TOLERANCE
    }
}

/// Resolved endpoints of a wall, ready for derivation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WallEndpoints {
    pub start_corner: CornerId,
    pub start: Point2,
    pub end_corner: CornerId,
    pub end: Point2,
}

/// Computes the full geometry record for a single wall.
///
/// `room_corners` are the model-space positions of every corner in the room;
/// they define the span of the perpendicular extent line.
pub(crate) fn derive_wall(
    id: WallId,
    ends: WallEndpoints,
    room_corners: &[Point2],
    transform: &SketchTransform,
    offset_distance: f64,
) -> WallGeometry {
    let model = Segment::new(ends.start, ends.end);
    let (direction, length) = direction_and_length(&ends.start, &ends.end);
    let mid = model.midpoint();

    let (perpendicular, parallel_model, extent_model, perpendicular_length) = if length < TOLERANCE {
        // Degenerate wall: the guide sits on the wall and the extent collapses
        // onto the midpoint.
        (Vector2::zeros(), model, Segment::new(mid, mid), 0.0)
    } else {
        let perp = left_normal(&direction);
        let shift = perp * offset_distance;
        let parallel = Segment::new(ends.start + shift, ends.end + shift);

        let (min_proj, max_proj) = projection_range(room_corners, &ends.start, &perp);
        let extent = Segment::new(mid + perp * min_proj, mid + perp * max_proj);
        (perp, parallel, extent, max_proj - min_proj)
    };

    WallGeometry {
        id,
        start_corner: ends.start_corner,
        end_corner: ends.end_corner,
        model,
        canvas: model.to_canvas(transform),
        length,
        direction,
        perpendicular,
        parallel_model,
        parallel_canvas: parallel_model.to_canvas(transform),
        extent_model,
        extent_canvas: extent_model.to_canvas(transform),
        perpendicular_length,
    }
}

/// Minimum and maximum signed projection of `points` onto `axis`, measured
/// from `origin`. An empty slice yields `(0, 0)`.
fn projection_range(points: &[Point2], origin: &Point2, axis: &Vector2) -> (f64, f64) {
    points
        .iter()
        .map(|p| project_onto(p, origin, axis))
        .fold(None, |acc: Option<(f64, f64)>, proj| {
            Some(match acc {
                None => (proj, proj),
                Some((lo, hi)) => (lo.min(proj), hi.max(proj)),
            })
        })
        .unwrap_or((0.0, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::transform::CanvasSize;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use slotmap::KeyData;

    fn ids() -> (CornerId, CornerId) {
        (CornerId::from(KeyData::from_ffi(1)), CornerId::from(KeyData::from_ffi(2)))
    }

    fn square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ]
    }

    fn derive(start: Point2, end: Point2, corners: &[Point2], offset: f64) -> WallGeometry {
        let (a, b) = ids();
        let transform = SketchTransform::centering(CanvasSize::new(800.0, 600.0), &Point2::new(5.0, 5.0), 1.0);
        derive_wall(
            WallId::from("w"),
            WallEndpoints {
                start_corner: a,
                start,
                end_corner: b,
                end,
            },
            corners,
            &transform,
            offset,
        )
    }

    #[test]
    fn bottom_wall_of_square() {
        let wall = derive(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0), &square(), 50.0);

        assert_relative_eq!(wall.length, 10.0);
        assert_relative_eq!(wall.direction, Vector2::new(1.0, 0.0));
        assert_relative_eq!(wall.perpendicular, Vector2::new(0.0, 1.0));

        assert_relative_eq!(wall.parallel_model.start, Point2::new(0.0, 50.0));
        assert_relative_eq!(wall.parallel_model.end, Point2::new(10.0, 50.0));
        assert_relative_eq!(wall.parallel_canvas.start, Point2::new(395.0, 345.0));

        assert_relative_eq!(wall.perpendicular_length, 10.0);
        assert_relative_eq!(wall.extent_model.start, Point2::new(5.0, 0.0));
        assert_relative_eq!(wall.extent_model.end, Point2::new(5.0, 10.0));
        assert_relative_eq!(wall.canvas.start, Point2::new(395.0, 295.0));
    }

    #[test]
    fn extent_spans_corners_on_both_sides() {
        // Wall through the middle of the square: corners lie on both sides.
        let wall = derive(Point2::new(0.0, 5.0), Point2::new(10.0, 5.0), &square(), 50.0);
        assert_relative_eq!(wall.perpendicular_length, 10.0);
        assert_relative_eq!(wall.extent_model.start, Point2::new(5.0, 0.0));
        assert_relative_eq!(wall.extent_model.end, Point2::new(5.0, 10.0));
    }

    #[test]
    fn perpendicular_is_unit_and_orthogonal() {
        let corners = [Point2::new(1.0, 2.0), Point2::new(7.0, -3.0), Point2::new(4.0, 9.0)];
        for (s, e) in [(0, 1), (1, 2), (2, 0)] {
            let wall = derive(corners[s], corners[e], &corners, 50.0);
            assert_abs_diff_eq!(wall.direction.dot(&wall.perpendicular), 0.0, epsilon = 1e-12);
            assert_relative_eq!(wall.perpendicular.norm(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(wall.parallel_model.length(), wall.length, epsilon = 1e-9);
        }
    }

    #[test]
    fn guide_offset_follows_ccw_convention() {
        // Reversed winding: the guide flips to the other side.
        let wall = derive(Point2::new(10.0, 0.0), Point2::new(0.0, 0.0), &square(), 50.0);
        assert_relative_eq!(wall.perpendicular, Vector2::new(0.0, -1.0));
        assert_relative_eq!(wall.parallel_model.start, Point2::new(10.0, -50.0));
        assert_relative_eq!(wall.perpendicular_length, 10.0);
    }

    #[test]
    fn degenerate_wall_has_no_nan() {
        let p = Point2::new(3.0, 3.0);
        let wall = derive(p, p, &square(), 50.0);

        assert!(wall.is_degenerate());
        assert_relative_eq!(wall.length, 0.0);
        assert_relative_eq!(wall.perpendicular_length, 0.0);
        assert_eq!(wall.parallel_model, wall.model);
        assert_eq!(wall.extent_model.start, p);
        assert_eq!(wall.extent_model.end, p);
        assert!(wall.is_drawable());
        assert!(!wall.direction.x.is_nan() && !wall.perpendicular.y.is_nan());
    }

    #[test]
    fn finiteness_is_checked_per_line() {
        let mut wall = derive(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0), &square(), 50.0);
        assert!(wall.is_drawable() && wall.has_guide() && wall.has_extent());

        wall.extent_canvas.end.x = f64::NAN;
        assert!(wall.is_drawable() && wall.has_guide());
        assert!(!wall.has_extent());

        wall.canvas.start.y = f64::INFINITY;
        assert!(!wall.is_drawable());
    }

    #[test]
    fn infinite_offset_breaks_only_the_guide() {
        let wall = derive(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0), &square(), f64::INFINITY);
        assert!(wall.is_drawable());
        assert!(wall.has_extent());
        assert!(!wall.has_guide());
    }

    #[test]
    fn empty_projection_range() {
        let (lo, hi) = projection_range(&[], &Point2::origin(), &Vector2::new(0.0, 1.0));
        assert_relative_eq!(lo, 0.0);
        assert_relative_eq!(hi, 0.0);
    }
}
