pub mod corner;
pub mod wall;

pub use corner::{CornerData, CornerId};
pub use wall::{WallData, WallId};

use slotmap::SlotMap;

use crate::math::{Point2, Vector2};

/// A floor plan: corners owned by an arena plus the ordered list of walls.
///
/// Corners carry the wall adjacency; walls are bare identifiers until the
/// geometry pipeline resolves them against the corners.
#[derive(Debug, Clone, Default)]
pub struct Room {
    corners: SlotMap<CornerId, CornerData>,
    walls: Vec<WallData>,
}

impl Room {
    /// Creates a new, empty room.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a closed loop of walls through `points`.
    ///
    /// Wall `w{i}` runs from corner `i` to corner `i + 1`, and the last wall
    /// closes back to the first corner.
    #[must_use]
    pub fn closed_loop(points: &[Point2]) -> Self {
        let mut room = Self::new();
        let ids: Vec<CornerId> = points
            .iter()
            .map(|p| room.add_corner(CornerData::new(*p)))
            .collect();
        let n = ids.len();
        for i in 0..n {
            let wall = WallId::new(format!("w{i}"));
            room.connect(ids[i], ids[(i + 1) % n], wall);
        }
        room
    }

    // --- Corner operations ---

    /// Inserts a corner and returns its ID.
    pub fn add_corner(&mut self, data: CornerData) -> CornerId {
        self.corners.insert(data)
    }

    /// Returns the corner data, if present.
    #[must_use]
    pub fn corner(&self, id: CornerId) -> Option<&CornerData> {
        self.corners.get(id)
    }

    /// Iterates over all corners in insertion order.
    pub fn corners(&self) -> impl Iterator<Item = (CornerId, &CornerData)> {
        self.corners.iter()
    }

    /// Number of corners in the room.
    #[must_use]
    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }

    // --- Wall operations ---

    /// Appends a wall to the room's wall list.
    pub fn add_wall(&mut self, data: WallData) {
        self.walls.push(data);
    }

    /// Adds wall `id` running from `start` to `end`, recording the adjacency
    /// on both corners. Unknown corner ids leave that end unrecorded.
    pub fn connect(&mut self, start: CornerId, end: CornerId, id: WallId) {
        if let Some(corner) = self.corners.get_mut(start) {
            corner.wall_starts.push(id.clone());
        }
        if let Some(corner) = self.corners.get_mut(end) {
            corner.wall_ends.push(id.clone());
        }
        self.walls.push(WallData { id });
    }

    /// The walls in document order.
    #[must_use]
    pub fn walls(&self) -> &[WallData] {
        &self.walls
    }

    /// Returns the first corner listing `wall` among its starts.
    #[must_use]
    pub fn wall_start(&self, wall: &WallId) -> Option<CornerId> {
        self.corners
            .iter()
            .find_map(|(id, c)| c.starts(wall).then_some(id))
    }

    /// Returns the first corner listing `wall` among its ends.
    #[must_use]
    pub fn wall_end(&self, wall: &WallId) -> Option<CornerId> {
        self.corners
            .iter()
            .find_map(|(id, c)| c.ends(wall).then_some(id))
    }

    /// Returns a copy of this room with every corner moved by `displacement`.
    #[must_use]
    pub fn translated(&self, displacement: Vector2) -> Self {
        let mut moved = self.clone();
        for corner in moved.corners.values_mut() {
            corner.position += displacement;
        }
        moved
    }
}
