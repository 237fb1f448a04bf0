//! Grid coordinate system and occupancy buffer.
//!
//! [`GridLayout`] maps tile coordinates to world positions. The grid is
//! centered on the world origin: tile `(0, 0)` sits half a tile in from the
//! left/top boundary so that tile centers, not corners, line up.
//!
//! [`OccupancyGrid`] is the boolean obstacle buffer mutated by the placement
//! loop and frozen once generation completes.

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::error::{MapError, Result};
use crate::math::{fixed_serde, Fixed, Vec3Fixed};

/// Largest accepted width or height in tiles.
pub const MAX_MAP_DIMENSION: u32 = 4096;

/// Check dimensions against the supported range.
pub(crate) fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 || width > MAX_MAP_DIMENSION || height > MAX_MAP_DIMENSION {
        return Err(MapError::InvalidDimensions {
            width,
            height,
            max: MAX_MAP_DIMENSION,
        });
    }
    Ok(())
}

/// Coordinate system of a generated map.
///
/// Dimensions never change after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    width: u32,
    height: u32,
    #[serde(with = "fixed_serde")]
    tile_size: Fixed,
    /// `-width / 2 + 0.5`, in tiles.
    #[serde(with = "fixed_serde")]
    left_boundary: Fixed,
    /// `-height / 2 + 0.5`, in tiles.
    #[serde(with = "fixed_serde")]
    top_boundary: Fixed,
}

impl GridLayout {
    /// Create a layout for a `width` x `height` grid.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidDimensions`] for zero or oversized sides and
    /// [`MapError::InvalidTileSize`] when `tile_size` is not positive.
    pub fn new(width: u32, height: u32, tile_size: Fixed) -> Result<Self> {
        check_dimensions(width, height)?;
        if tile_size <= Fixed::ZERO {
            return Err(MapError::InvalidTileSize(tile_size.to_num()));
        }

        let half = Fixed::from_num(0.5);
        Ok(Self {
            width,
            height,
            tile_size,
            left_boundary: -Fixed::from_num(width) / 2 + half,
            top_boundary: -Fixed::from_num(height) / 2 + half,
        })
    }

    /// Grid width in tiles.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in tiles.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Tile size in world units.
    #[must_use]
    pub const fn tile_size(&self) -> Fixed {
        self.tile_size
    }

    /// Total number of tiles.
    #[must_use]
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The map center, `(width / 2, height / 2)` with integer division.
    ///
    /// Never a candidate obstacle and always the flood-fill seed.
    #[must_use]
    pub const fn center(&self) -> Coord {
        Coord::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Check if a coordinate is inside the grid.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < self.width as i32 && coord.y < self.height as i32
    }

    /// Iterate over every coordinate, column by column.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..width).flat_map(move |x| (0..height).map(move |y| Coord::new(x, y)))
    }

    /// World position of a tile center on the floor plane.
    #[must_use]
    pub fn coord_to_position(&self, coord: Coord) -> Vec3Fixed {
        Vec3Fixed::on_floor(
            (self.left_boundary + Fixed::from_num(coord.x)) * self.tile_size,
            (self.top_boundary + Fixed::from_num(coord.y)) * self.tile_size,
        )
    }

    /// Tile nearest to a world position.
    ///
    /// Positions outside the grid clamp to the nearest edge tile. The
    /// vertical component is ignored.
    #[must_use]
    pub fn position_to_coord(&self, position: Vec3Fixed) -> Coord {
        let x = self.axis_to_index(position.x, self.left_boundary, self.width);
        let y = self.axis_to_index(position.z, self.top_boundary, self.height);
        Coord::new(x, y)
    }

    fn axis_to_index(&self, world: Fixed, boundary: Fixed, extent: u32) -> i32 {
        let tiles = world
            .saturating_div(self.tile_size)
            .saturating_sub(boundary)
            .saturating_round()
            .to_num::<i64>();
        tiles.clamp(0, i64::from(extent) - 1) as i32
    }

    /// World extent of the floor as `(width * tile_size, height * tile_size)`.
    #[must_use]
    pub fn world_extent(&self) -> (Fixed, Fixed) {
        (
            Fixed::from_num(self.width) * self.tile_size,
            Fixed::from_num(self.height) * self.tile_size,
        )
    }
}

/// Boolean obstacle buffer stored in row-major order.
///
/// `true` marks a tile blocked, either committed or provisionally during a
/// placement attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OccupancyGrid {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Create an empty grid with every tile open.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidDimensions`] for zero or oversized sides.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        })
    }

    /// Create an empty grid matching a layout.
    #[must_use]
    pub fn for_layout(layout: &GridLayout) -> Self {
        Self {
            width: layout.width(),
            height: layout.height(),
            cells: vec![false; layout.area()],
        }
    }

    /// Grid width in tiles.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in tiles.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of tiles.
    #[must_use]
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Row-major index of an in-bounds coordinate.
    #[inline]
    #[must_use]
    pub fn index(&self, coord: Coord) -> Option<usize> {
        if coord.x >= 0 && coord.y >= 0 && coord.x < self.width as i32 && coord.y < self.height as i32
        {
            Some(coord.y as usize * self.width as usize + coord.x as usize)
        } else {
            None
        }
    }

    /// Whether a tile is blocked. Out-of-bounds tiles report `false`.
    #[must_use]
    pub fn is_blocked(&self, coord: Coord) -> bool {
        self.index(coord).is_some_and(|i| self.cells[i])
    }

    /// Set a tile's state and return the previous one.
    ///
    /// The returned value is the rollback point for a placement attempt.
    /// Out-of-bounds coordinates are ignored and report `false`.
    pub fn replace(&mut self, coord: Coord, blocked: bool) -> bool {
        match self.index(coord) {
            Some(i) => std::mem::replace(&mut self.cells[i], blocked),
            None => false,
        }
    }

    /// Number of blocked tiles.
    #[must_use]
    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|&&blocked| blocked).count()
    }

    /// Iterate over blocked coordinates in row-major order.
    pub fn blocked_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &blocked)| blocked)
            .map(move |(i, _)| Coord::new((i % width) as i32, (i / width) as i32))
    }
}
