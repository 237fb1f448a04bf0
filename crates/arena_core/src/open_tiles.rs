//! Open tiles and spawn-point queries.
//!
//! During generation an [`OpenTileSet`] loses a tile every time an obstacle
//! is committed. Once generation finishes it is frozen into an
//! [`OpenTileTracker`], the read surface handed to spawning and combat
//! code: a seed-shuffled [`OpenTileCycle`] plus position lookup.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::grid::GridLayout;
use crate::math::Vec3Fixed;
use crate::shuffle::shuffled;

/// Mutable set of non-obstacle tiles, kept in grid iteration order.
#[derive(Debug, Clone)]
pub struct OpenTileSet {
    width: u32,
    open: Vec<bool>,
    remaining: usize,
}

impl OpenTileSet {
    /// Start with every tile of the layout open.
    #[must_use]
    pub fn new(layout: &GridLayout) -> Self {
        Self {
            width: layout.width(),
            open: vec![true; layout.area()],
            remaining: layout.area(),
        }
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        let height = self.open.len() / self.width as usize;
        if coord.x >= 0 && coord.y >= 0 && coord.x < self.width as i32 && coord.y < height as i32 {
            Some(coord.y as usize * self.width as usize + coord.x as usize)
        } else {
            None
        }
    }

    /// Remove a tile. Returns `false` if it was already closed or outside.
    pub fn remove(&mut self, coord: Coord) -> bool {
        match self.index(coord) {
            Some(i) if self.open[i] => {
                self.open[i] = false;
                self.remaining -= 1;
                true
            }
            _ => false,
        }
    }

    /// Whether a tile is still open.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        self.index(coord).is_some_and(|i| self.open[i])
    }

    /// Number of open tiles.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.remaining
    }

    /// Whether no tile is open.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Open tiles in column-major order, matching [`GridLayout::coords`].
    #[must_use]
    pub fn to_vec(&self) -> Vec<Coord> {
        let width = self.width as i32;
        let height = (self.open.len() / self.width as usize) as i32;
        (0..width)
            .flat_map(|x| (0..height).map(move |y| Coord::new(x, y)))
            .filter(|&c| self.contains(c))
            .collect()
    }
}

/// Endless round-robin over a fixed, non-empty tile order.
///
/// Each call to [`next_tile`](Self::next_tile) returns the tile at the cursor and
/// advances it, wrapping at the end, so the sequence repeats forever. The
/// cursor is atomic: concurrent readers each get a tile and the cycle
/// stays intact.
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenTileCycle {
    tiles: Vec<Coord>,
    #[serde(skip)]
    cursor: AtomicUsize,
}

impl OpenTileCycle {
    /// Shuffle `tiles` with `seed` and cycle over the result.
    ///
    /// Returns `None` for an empty list.
    #[must_use]
    pub fn shuffled(tiles: Vec<Coord>, seed: i64) -> Option<Self> {
        Self::in_order(shuffled(tiles, seed))
    }

    /// Cycle over `tiles` in the given order.
    ///
    /// Returns `None` for an empty list.
    #[must_use]
    pub fn in_order(tiles: Vec<Coord>) -> Option<Self> {
        if tiles.is_empty() {
            return None;
        }
        Some(Self {
            tiles,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Next tile in the cycle.
    pub fn next_tile(&self) -> Coord {
        let len = self.tiles.len();
        let previous = self
            .cursor
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |c| Some((c + 1) % len))
            .unwrap_or_else(|c| c);
        self.tiles[previous % len]
    }

    /// Infinite iterator drawing from the cycle.
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        std::iter::repeat_with(move || self.next_tile())
    }

    /// Number of distinct tiles in one lap.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always `false`; an empty cycle cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// One lap of the cycle, starting from its first tile.
    #[must_use]
    pub fn order(&self) -> &[Coord] {
        &self.tiles
    }
}

impl Clone for OpenTileCycle {
    fn clone(&self) -> Self {
        Self {
            tiles: self.tiles.clone(),
            cursor: AtomicUsize::new(self.cursor.load(Ordering::Relaxed)),
        }
    }
}

/// Read surface for spawn and combat collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenTileTracker {
    layout: GridLayout,
    cycle: OpenTileCycle,
}

impl OpenTileTracker {
    /// Freeze an open-tile set into a seed-shuffled spawn cycle.
    ///
    /// Returns `None` if no tile is open.
    #[must_use]
    pub fn new(layout: GridLayout, open: &OpenTileSet, seed: i64) -> Option<Self> {
        let cycle = OpenTileCycle::shuffled(open.to_vec(), seed)?;
        Some(Self { layout, cycle })
    }

    /// Next spawn tile from the repeating shuffled cycle.
    pub fn random_open_tile(&self) -> Coord {
        self.cycle.next_tile()
    }

    /// Tile nearest to a world position, clamped to the grid.
    #[must_use]
    pub fn tile_from_position(&self, position: Vec3Fixed) -> Coord {
        self.layout.position_to_coord(position)
    }

    /// The underlying cycle.
    #[must_use]
    pub fn cycle(&self) -> &OpenTileCycle {
        &self.cycle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Fixed;
    use std::collections::HashSet;

    fn layout(width: u32, height: u32) -> GridLayout {
        GridLayout::new(width, height, Fixed::ONE).unwrap()
    }

    #[test]
    fn test_set_starts_full() {
        let set = OpenTileSet::new(&layout(4, 3));
        assert_eq!(set.len(), 12);
        assert!(set.contains(Coord::new(3, 2)));
        assert!(!set.contains(Coord::new(4, 0)));
    }

    #[test]
    fn test_set_remove() {
        let mut set = OpenTileSet::new(&layout(3, 3));
        assert!(set.remove(Coord::new(0, 0)));
        assert!(!set.remove(Coord::new(0, 0)));
        assert!(!set.remove(Coord::new(-1, 0)));
        assert_eq!(set.len(), 8);
        assert!(!set.to_vec().contains(&Coord::new(0, 0)));
    }

    #[test]
    fn test_set_order_matches_layout() {
        let grid = layout(3, 2);
        let set = OpenTileSet::new(&grid);
        assert_eq!(set.to_vec(), grid.coords().collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_cycle_rejected() {
        assert!(OpenTileCycle::in_order(Vec::new()).is_none());
    }

    #[test]
    fn test_cycle_wraps() {
        let cycle =
            OpenTileCycle::in_order(vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)])
                .unwrap();
        let drawn: Vec<Coord> = cycle.iter().take(7).collect();
        assert_eq!(
            drawn,
            vec![
                Coord::new(0, 0),
                Coord::new(1, 0),
                Coord::new(2, 0),
                Coord::new(0, 0),
                Coord::new(1, 0),
                Coord::new(2, 0),
                Coord::new(0, 0),
            ]
        );
    }

    #[test]
    fn test_cycle_visits_every_tile_once_per_lap() {
        let grid = layout(6, 5);
        let tracker = OpenTileTracker::new(grid.clone(), &OpenTileSet::new(&grid), 10).unwrap();

        let lap: Vec<Coord> = (0..30).map(|_| tracker.random_open_tile()).collect();
        let unique: HashSet<Coord> = lap.iter().copied().collect();
        assert_eq!(unique.len(), 30);

        let second: Vec<Coord> = (0..30).map(|_| tracker.random_open_tile()).collect();
        assert_eq!(lap, second);
    }

    #[test]
    fn test_cycle_deterministic_for_seed() {
        let grid = layout(8, 8);
        let open = OpenTileSet::new(&grid);
        let a = OpenTileTracker::new(grid.clone(), &open, -3).unwrap();
        let b = OpenTileTracker::new(grid, &open, -3).unwrap();
        assert_eq!(a.cycle().order(), b.cycle().order());
    }

    #[test]
    fn test_clone_keeps_cursor() {
        let cycle = OpenTileCycle::in_order(vec![Coord::new(0, 0), Coord::new(1, 1)]).unwrap();
        cycle.next_tile();
        let copy = cycle.clone();
        assert_eq!(copy.next_tile(), Coord::new(1, 1));
    }

    #[test]
    fn test_concurrent_readers_share_cycle() {
        let grid = layout(4, 4);
        let tracker = OpenTileTracker::new(grid.clone(), &OpenTileSet::new(&grid), 1).unwrap();

        let drawn: Vec<Coord> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| (0..4).map(|_| tracker.random_open_tile()).collect::<Vec<_>>()))
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });

        let unique: HashSet<Coord> = drawn.into_iter().collect();
        assert_eq!(unique.len(), 16);
    }

    #[test]
    fn test_tile_from_position_clamps() {
        let grid = layout(5, 5);
        let tracker = OpenTileTracker::new(grid.clone(), &OpenTileSet::new(&grid), 0).unwrap();
        let outside = Vec3Fixed::on_floor(Fixed::from_num(500), Fixed::from_num(-500));
        assert_eq!(tracker.tile_from_position(outside), Coord::new(4, 0));
    }
}
