use crate::math::vector_2d::midpoint;
use crate::math::Point2;

/// An axis-aligned bounding box in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomBounds {
    /// Minimum corner of the bounding box.
    pub min: Point2,
    /// Maximum corner of the bounding box.
    pub max: Point2,
}

impl RoomBounds {
    /// Folds the points into a bounding box. Returns `None` for an empty input.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self { min: *p, max: *p },
                Some(b) => Self {
                    min: Point2::new(b.min.x.min(p.x), b.min.y.min(p.y)),
                    max: Point2::new(b.max.x.max(p.x), b.max.y.max(p.y)),
                },
            })
        })
    }

    /// Midpoint of the box. Finite bounds always give a finite center.
    #[must_use]
    pub fn center(&self) -> Point2 {
        midpoint(&self.min, &self.max)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Summary record of the box.
    #[must_use]
    pub fn dimensions(&self) -> RoomDimensions {
        let center = self.center();
        RoomDimensions {
            width: self.width(),
            height: self.height(),
            center_x: center.x,
            center_y: center.y,
        }
    }
}

/// Overall room extent and center in model units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RoomDimensions {
    pub width: f64,
    pub height: f64,
    pub center_x: f64,
    pub center_y: f64,
}
