use super::{Point2, Vector2, TOLERANCE};

/// Returns the unit direction from `a` to `b` together with the segment length.
///
/// A segment shorter than [`TOLERANCE`] yields the zero vector as direction,
/// so callers never divide by zero.
#[must_use]
pub fn direction_and_length(a: &Point2, b: &Point2) -> (Vector2, f64) {
    let d = b - a;
    let len = d.x.hypot(d.y);
    if len < TOLERANCE {
        return (Vector2::zeros(), len);
    }
    (d / len, len)
}

/// Returns the left-pointing normal of a direction vector (90° counter-clockwise).
#[must_use]
pub fn left_normal(dir: &Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// Midpoint of the segment `a`-`b`. Halves before adding, so finite inputs
/// never overflow.
#[must_use]
pub fn midpoint(a: &Point2, b: &Point2) -> Point2 {
    Point2::from(a.coords / 2.0 + b.coords / 2.0)
}

/// Signed length of the projection of `p - origin` onto `axis`.
#[must_use]
pub fn project_onto(p: &Point2, origin: &Point2, axis: &Vector2) -> f64 {
    (p - origin).dot(axis)
}

/// Returns `true` if both coordinates are finite.
#[must_use]
pub fn is_finite_point(p: &Point2) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
