//! Integer tile coordinates.

use serde::{Deserialize, Serialize};

/// A grid cell identifier.
///
/// Signed so neighbor offsets can step outside the grid before the bounds
/// check rejects them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Coord {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate shifted by an offset.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_by_component() {
        assert_eq!(Coord::new(3, 4), Coord::from((3, 4)));
        assert_ne!(Coord::new(3, 4), Coord::new(4, 3));
    }

    #[test]
    fn test_offset() {
        assert_eq!(Coord::new(0, 0).offset(-1, 1), Coord::new(-1, 1));
    }

    #[test]
    fn test_display() {
        assert_eq!(Coord::new(5, -2).to_string(), "(5, -2)");
    }
}
