use thiserror::Error;

use crate::room::WallId;

/// Top-level error type for room sketching.
#[derive(Debug, Error)]
pub enum SketchError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Errors raised while deriving wall geometry from a room.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("wall {wall} has no resolvable {missing} corner")]
    DanglingWallReference { wall: WallId, missing: WallEnd },
}

/// Which end of a wall failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallEnd {
    Start,
    End,
}

impl std::fmt::Display for WallEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// Errors raised while loading a room document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed room document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("corner {index} has a non-finite coordinate ({x}, {y})")]
    NonFiniteCoordinate { index: usize, x: f64, y: f64 },

    #[error("wall id {0} is listed more than once")]
    DuplicateWall(WallId),

    #[error("empty wall id in {0}")]
    EmptyWallId(&'static str),
}

/// Errors related to sketch session state.
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("no room loaded")]
    NoRoom,

    #[error("no walls available to select")]
    NoWalls,

    #[error("unknown wall: {0}")]
    UnknownWall(WallId),
}

/// Convenience type alias for results using [`SketchError`].
pub type Result<T> = std::result::Result<T, SketchError>;
