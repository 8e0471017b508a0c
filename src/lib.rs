//! Floor-plan sketching: derive canvas-space geometry for a room of corners
//! and walls, then draw it with measurement guides for the selected wall.
//!
//! ```text
//! RoomDocument --into_room--> Room --compute_room_geometry--> RoomGeometry --render_room--> DrawingSurface
//! ```

pub mod document;
pub mod error;
pub mod geometry;
pub mod math;
pub mod render;
pub mod room;
pub mod session;

pub use document::{load_room, RoomDocument};
pub use error::{DocumentError, GeometryError, Result, SessionError, SketchError};
pub use geometry::{compute_room_geometry, CanvasSize, ComputeRoomGeometry, RoomGeometry, SketchParams, WallGeometry};
pub use render::{render_room, DrawingSurface, RoomRenderer, SketchStyle};
pub use room::{Room, WallId};
pub use session::Sketcher;
