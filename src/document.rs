//! The JSON room document and its validation into a [`Room`].
//!
//! ```json
//! {
//!   "corners": [{ "x": 0, "y": 0, "wallStarts": [{ "id": "a" }], "wallEnds": [{ "id": "d" }] }],
//!   "walls": [{ "id": "a" }]
//! }
//! ```
//!
//! Wall ids may be strings or integers. Unknown fields are ignored.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::{DocumentError, Result};
use crate::math::Point2;
use crate::room::{CornerData, Room, WallData, WallId};

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
}

impl From<RawId> for WallId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => WallId::new(s),
            RawId::Integer(n) => WallId::new(n.to_string()),
        }
    }
}

/// A reference to a wall by id.
#[derive(Debug, Clone, Deserialize)]
pub struct WallRef {
    id: RawId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CornerDocument {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub wall_starts: Vec<WallRef>,
    #[serde(default)]
    pub wall_ends: Vec<WallRef>,
}

/// A room as loaded from JSON, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomDocument {
    pub corners: Vec<CornerDocument>,
    pub walls: Vec<WallRef>,
}

impl RoomDocument {
    /// Parses a room document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Parse` if the text is not a room document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json).map_err(DocumentError::Parse)?)
    }

    /// Validates the document and builds the [`Room`].
    ///
    /// Wall references that cannot be resolved are left for the geometry
    /// pipeline to report.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentError`] for non-finite coordinates, empty wall ids
    /// or a wall listed twice.
    pub fn into_room(self) -> Result<Room> {
        let mut room = Room::new();

        let mut seen = HashSet::with_capacity(self.walls.len());
        for wall in self.walls {
            let id = WallId::from(wall.id);
            if id.as_str().is_empty() {
                return Err(DocumentError::EmptyWallId("walls").into());
            }
            if !seen.insert(id.clone()) {
                return Err(DocumentError::DuplicateWall(id).into());
            }
            room.add_wall(WallData { id });
        }

        for (index, corner) in self.corners.into_iter().enumerate() {
            if !(corner.x.is_finite() && corner.y.is_finite()) {
                return Err(DocumentError::NonFiniteCoordinate {
                    index,
                    x: corner.x,
                    y: corner.y,
                }
                .into());
            }
            let mut data = CornerData::new(Point2::new(corner.x, corner.y));
            data.wall_starts = collect_ids(corner.wall_starts, "wallStarts")?;
            data.wall_ends = collect_ids(corner.wall_ends, "wallEnds")?;
            for id in data.wall_starts.iter().chain(&data.wall_ends) {
                if !seen.contains(id) {
                    tracing::debug!(corner = index, wall = %id, "corner references an unlisted wall");
                }
            }
            room.add_corner(data);
        }

        Ok(room)
    }
}

fn collect_ids(refs: Vec<WallRef>, field: &'static str) -> Result<Vec<WallId>> {
    refs.into_iter()
        .map(|r| -> Result<WallId> {
            let id = WallId::from(r.id);
            if id.as_str().is_empty() {
                Err(DocumentError::EmptyWallId(field).into())
            } else {
                Ok(id)
            }
        })
        .collect()
}

/// Parses and validates a room document in one step.
///
/// # Errors
///
/// See [`RoomDocument::from_json`] and [`RoomDocument::into_room`].
pub fn load_room(json: &str) -> Result<Room> {
    RoomDocument::from_json(json)?.into_room()
}
