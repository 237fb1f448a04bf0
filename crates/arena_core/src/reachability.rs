//! Flood-fill accessibility check.
//!
//! Used online by the placement loop: every candidate obstacle is validated
//! by walking the open tiles from the map center and comparing the count
//! against `area - obstacle_count`.

use std::collections::VecDeque;

use crate::coord::Coord;
use crate::grid::OccupancyGrid;

/// Neighbor offsets scanned around each tile.
///
/// All eight are visited but [`is_orthogonal`] rejects the diagonals, so
/// movement is 4-connected. Changing the filter changes which layouts are
/// accepted.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[inline]
const fn is_orthogonal(dx: i32, dy: i32) -> bool {
    dx == 0 || dy == 0
}

/// Breadth-first reachability counter with reusable scratch buffers.
///
/// One validator serves a whole generation run so the per-candidate check
/// does not allocate.
#[derive(Debug, Default)]
pub struct ReachabilityValidator {
    visited: Vec<bool>,
    queue: VecDeque<Coord>,
}

impl ReachabilityValidator {
    /// Create a validator with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count tiles reachable from `start` through open tiles.
    ///
    /// `start` itself is counted even when blocked; it is the seed of the
    /// walk. Returns 0 if `start` is outside the grid.
    pub fn reachable_count(&mut self, grid: &OccupancyGrid, start: Coord) -> usize {
        let Some(start_index) = grid.index(start) else {
            return 0;
        };

        self.visited.clear();
        self.visited.resize(grid.area(), false);
        self.queue.clear();

        self.visited[start_index] = true;
        self.queue.push_back(start);
        let mut count = 1;

        while let Some(tile) = self.queue.pop_front() {
            for (dx, dy) in NEIGHBOR_OFFSETS {
                if !is_orthogonal(dx, dy) {
                    continue;
                }
                let neighbor = tile.offset(dx, dy);
                let Some(index) = grid.index(neighbor) else {
                    continue;
                };
                if !self.visited[index] && !grid.is_blocked(neighbor) {
                    self.visited[index] = true;
                    count += 1;
                    self.queue.push_back(neighbor);
                }
            }
        }

        count
    }

    /// Whether every non-obstacle tile is reachable from `center`.
    ///
    /// `obstacle_count` is the number of blocked tiles the caller believes
    /// are on the grid, including any provisional one.
    pub fn is_fully_accessible(
        &mut self,
        grid: &OccupancyGrid,
        center: Coord,
        obstacle_count: usize,
    ) -> bool {
        let target = grid.area().saturating_sub(obstacle_count);
        self.reachable_count(grid, center) == target
    }
}

/// One-shot convenience wrapper around [`ReachabilityValidator`].
#[must_use]
pub fn is_fully_accessible(grid: &OccupancyGrid, center: Coord, obstacle_count: usize) -> bool {
    ReachabilityValidator::new().is_fully_accessible(grid, center, obstacle_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(width: u32, height: u32, blocked: &[(i32, i32)]) -> OccupancyGrid {
        let mut grid = OccupancyGrid::new(width, height).unwrap();
        for &(x, y) in blocked {
            grid.replace(Coord::new(x, y), true);
        }
        grid
    }

    #[test]
    fn test_open_grid_fully_reachable() {
        let grid = grid_with(5, 4, &[]);
        let mut validator = ReachabilityValidator::new();
        assert_eq!(validator.reachable_count(&grid, Coord::new(2, 2)), 20);
        assert!(validator.is_fully_accessible(&grid, Coord::new(2, 2), 0));
    }

    #[test]
    fn test_sealed_corner_detected() {
        // (0,0) is cut off by (1,0) and (0,1)
        let grid = grid_with(4, 4, &[(1, 0), (0, 1)]);
        assert!(!is_fully_accessible(&grid, Coord::new(2, 2), 2));
    }

    #[test]
    fn test_diagonal_gap_does_not_connect() {
        // (0,0) touches the rest only diagonally through (1,1)
        let grid = grid_with(3, 3, &[(1, 0), (0, 1)]);
        let mut validator = ReachabilityValidator::new();
        assert_eq!(validator.reachable_count(&grid, Coord::new(1, 1)), 6);
        assert!(!validator.is_fully_accessible(&grid, Coord::new(1, 1), 2));
    }

    #[test]
    fn test_wall_with_gap_is_accessible() {
        let grid = grid_with(5, 5, &[(0, 2), (1, 2), (3, 2), (4, 2)]);
        assert!(is_fully_accessible(&grid, Coord::new(2, 2), 4));
    }

    #[test]
    fn test_count_mismatch_fails() {
        let grid = grid_with(3, 3, &[(0, 0)]);
        assert!(is_fully_accessible(&grid, Coord::new(1, 1), 1));
        assert!(!is_fully_accessible(&grid, Coord::new(1, 1), 0));
    }

    #[test]
    fn test_scratch_reused_across_sizes() {
        let mut validator = ReachabilityValidator::new();
        let big = grid_with(10, 10, &[]);
        let small = grid_with(2, 2, &[(1, 1)]);
        assert_eq!(validator.reachable_count(&big, Coord::new(5, 5)), 100);
        assert_eq!(validator.reachable_count(&small, Coord::new(0, 0)), 3);
    }

    #[test]
    fn test_start_outside_grid() {
        let grid = grid_with(2, 2, &[]);
        assert_eq!(
            ReachabilityValidator::new().reachable_count(&grid, Coord::new(9, 9)),
            0
        );
    }
}
