use crate::math::Point2;

use super::wall::WallId;

slotmap::new_key_type! {
    /// Unique identifier for a corner in a room.
    pub struct CornerId;
}

/// A room vertex in model space with its wall adjacency.
#[derive(Debug, Clone)]
pub struct CornerData {
    /// Model-space position of the corner.
    pub position: Point2,
    /// Walls that start at this corner.
    pub wall_starts: Vec<WallId>,
    /// Walls that end at this corner.
    pub wall_ends: Vec<WallId>,
}

impl CornerData {
    /// Creates a corner at the given position with no adjacent walls.
    #[must_use]
    pub fn new(position: Point2) -> Self {
        Self {
            position,
            wall_starts: Vec::new(),
            wall_ends: Vec::new(),
        }
    }

    /// Returns `true` if `wall` starts at this corner.
    #[must_use]
    pub fn starts(&self, wall: &WallId) -> bool {
        self.wall_starts.contains(wall)
    }

    /// Returns `true` if `wall` ends at this corner.
    #[must_use]
    pub fn ends(&self, wall: &WallId) -> bool {
        self.wall_ends.contains(wall)
    }
}
