use std::fmt;

/// Opaque wall identifier as it appears in the room document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WallId(String);

impl WallId {
    /// Creates a wall id from anything string-like.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WallId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for WallId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A wall in the room. Derived geometry lives in
/// [`WallGeometry`](crate::geometry::WallGeometry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallData {
    pub id: WallId,
}

impl WallData {
    #[must_use]
    pub fn new(id: impl Into<WallId>) -> Self {
        Self { id: id.into() }
    }
}
