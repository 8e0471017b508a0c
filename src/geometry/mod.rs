//! The dimension calculator: turns a [`Room`] into canvas-space geometry.
//!
//! The pipeline runs once per (room, canvas size, scale, offset distance):
//!
//! 1. fold every corner into a model-space bounding box;
//! 2. build the [`SketchTransform`] that centers that box on the canvas;
//! 3. resolve each wall against the corners and derive its [`WallGeometry`].
//!
//! The result is an immutable [`RoomGeometry`]. The room itself is never
//! modified, and a failure produces no geometry at all.

mod bounds;
mod transform;
mod wall_geometry;

pub use bounds::{RoomBounds, RoomDimensions};
pub use transform::{clamp_scale, CanvasSize, SketchTransform};
pub use wall_geometry::{Segment, WallGeometry};

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{GeometryError, Result, WallEnd};
use crate::math::{Point2, Vector2};
use crate::room::{Room, WallId};
use wall_geometry::{derive_wall, WallEndpoints};

/// Default distance, in model units, between a wall and its parallel guide.
pub const DEFAULT_OFFSET_DISTANCE: f64 = 50.0;

/// Default model-to-pixel scale.
pub const DEFAULT_SCALE: f64 = 0.5;

/// Clamps a guide offset distance to a usable value.
///
/// Non-finite distances become [`DEFAULT_OFFSET_DISTANCE`] and log a warning.
/// Negative distances are kept; they place the guide on the other side.
#[must_use]
pub fn clamp_offset_distance(offset_distance: f64) -> f64 {
    if offset_distance.is_finite() {
        offset_distance
    } else {
        tracing::warn!(offset_distance, "invalid guide offset distance, using default");
        DEFAULT_OFFSET_DISTANCE
    }
}

/// Parameters of the model-to-canvas mapping.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SketchParams {
    pub canvas: CanvasSize,
    /// Model units to pixels. Non-positive values are clamped to 1.
    pub scale: f64,
    /// Distance between a wall and its parallel guide, in model units.
    pub offset_distance: f64,
}

impl Default for SketchParams {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            scale: DEFAULT_SCALE,
            offset_distance: DEFAULT_OFFSET_DISTANCE,
        }
    }
}

/// Derived geometry for a whole room.
#[derive(Debug, Clone)]
pub struct RoomGeometry {
    canvas: CanvasSize,
    transform: SketchTransform,
    bounds: RoomBounds,
    walls: Vec<WallGeometry>,
    index: HashMap<WallId, usize>,
}

impl RoomGeometry {
    /// Canvas size the geometry was computed for.
    #[must_use]
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// The model-to-canvas transform.
    #[must_use]
    pub fn transform(&self) -> &SketchTransform {
        &self.transform
    }

    /// Canvas-space translation that centers the room.
    #[must_use]
    pub fn sketch_offset(&self) -> Vector2 {
        self.transform.offset()
    }

    /// The scale actually applied, after clamping.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.transform.scale()
    }

    /// Model-space bounding box of all corners.
    #[must_use]
    pub fn bounds(&self) -> &RoomBounds {
        &self.bounds
    }

    /// Width, height and center of the room in model units.
    #[must_use]
    pub fn dimensions(&self) -> RoomDimensions {
        self.bounds.dimensions()
    }

    /// Wall records in room order.
    #[must_use]
    pub fn walls(&self) -> &[WallGeometry] {
        &self.walls
    }

    /// Looks up the record of `id`.
    #[must_use]
    pub fn wall(&self, id: &WallId) -> Option<&WallGeometry> {
        self.index.get(id).map(|&i| &self.walls[i])
    }

    /// Position of `id` in room order.
    #[must_use]
    pub fn wall_index(&self, id: &WallId) -> Option<usize> {
        self.index.get(id).copied()
    }
}

/// Computes the [`RoomGeometry`] of a room.
#[derive(Debug, Clone, Copy)]
pub struct ComputeRoomGeometry {
    params: SketchParams,
}

impl ComputeRoomGeometry {
    /// Creates a new `ComputeRoomGeometry` operation.
    #[must_use]
    pub fn new(params: SketchParams) -> Self {
        Self { params }
    }

    /// Executes the computation.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidGeometry` if the room has no corners or
    /// its centered position overflows the canvas, or
    /// `GeometryError::DanglingWallReference` if a wall is missing its start
    /// or end corner.
    pub fn execute(&self, room: &Room) -> Result<RoomGeometry> {
        let positions: Vec<Point2> = room.corners().map(|(_, c)| c.position).collect();
        let bounds = RoomBounds::from_points(&positions).ok_or_else(|| {
            GeometryError::InvalidGeometry("room has no corners to bound".to_owned())
        })?;

        let transform =
            SketchTransform::centering(self.params.canvas, &bounds.center(), self.params.scale);
        if !(transform.offset().x.is_finite() && transform.offset().y.is_finite()) {
            return Err(GeometryError::InvalidGeometry(format!(
                "room does not fit the canvas at scale {}",
                transform.scale()
            ))
            .into());
        }
        let offset_distance = clamp_offset_distance(self.params.offset_distance);
        tracing::debug!(
            offset_x = transform.offset().x,
            offset_y = transform.offset().y,
            scale = transform.scale(),
            "sketch transform"
        );

        let mut walls = Vec::with_capacity(room.walls().len());
        let mut index = HashMap::with_capacity(room.walls().len());
        for wall in room.walls() {
            let ends = resolve_endpoints(room, &wall.id)?;
            let geometry = derive_wall(
                wall.id.clone(),
                ends,
                &positions,
                &transform,
                offset_distance,
            );
            if geometry.is_degenerate() {
                tracing::debug!(wall = %wall.id, "zero-length wall");
            }
            index.entry(wall.id.clone()).or_insert(walls.len());
            walls.push(geometry);
        }

        Ok(RoomGeometry {
            canvas: self.params.canvas,
            transform,
            bounds,
            walls,
            index,
        })
    }
}

/// Computes the derived geometry of `room` for the given canvas and scale.
///
/// Returns a new [`RoomGeometry`]; `room` is left untouched.
///
/// # Errors
///
/// See [`ComputeRoomGeometry::execute`].
pub fn compute_room_geometry(
    room: &Room,
    canvas: CanvasSize,
    scale: f64,
    offset_distance: f64,
) -> Result<RoomGeometry> {
    ComputeRoomGeometry::new(SketchParams {
        canvas,
        scale,
        offset_distance,
    })
    .execute(room)
}

fn resolve_endpoints(room: &Room, id: &WallId) -> std::result::Result<WallEndpoints, GeometryError> {
    let dangling = |missing| GeometryError::DanglingWallReference {
        wall: id.clone(),
        missing,
    };
    let start_corner = room.wall_start(id).ok_or_else(|| dangling(WallEnd::Start))?;
    let end_corner = room.wall_end(id).ok_or_else(|| dangling(WallEnd::End))?;
    let start = room.corner(start_corner).ok_or_else(|| dangling(WallEnd::Start))?;
    let end = room.corner(end_corner).ok_or_else(|| dangling(WallEnd::End))?;
    Ok(WallEndpoints {
        start_corner,
        start: start.position,
        end_corner,
        end: end.position,
    })
}
