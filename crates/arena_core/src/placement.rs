//! Obstacle placement with commit-or-rollback validation.
//!
//! Candidates come from a seed-shuffled queue. Each one is marked blocked,
//! the flood fill re-checks that every open tile still reaches the center,
//! and the mark is either kept or restored. Rejected candidates are dropped
//! for the rest of the run.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::grid::{GridLayout, OccupancyGrid};
use crate::open_tiles::OpenTileSet;
use crate::reachability::ReachabilityValidator;
use crate::shuffle::shuffled;

/// Which tiles may become obstacles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CandidatePolicy {
    /// Exclude every tile sharing the center's row or column.
    ///
    /// This is the layout existing maps were built with: it keeps a full
    /// cross through the center open, which looks like an and/or mixup in
    /// the exclusion test rather than a design choice. Kept as the default
    /// so seeds reproduce those maps.
    #[default]
    CenterCross,
    /// Exclude only the center tile.
    CenterOnly,
}

impl CandidatePolicy {
    /// Whether `coord` may be offered as an obstacle.
    #[must_use]
    pub fn allows(self, coord: Coord, center: Coord) -> bool {
        match self {
            Self::CenterCross => coord.x != center.x && coord.y != center.y,
            Self::CenterOnly => coord != center,
        }
    }
}

/// Eligible obstacle coordinates in grid iteration order.
#[must_use]
pub fn candidate_coords(layout: &GridLayout, policy: CandidatePolicy) -> Vec<Coord> {
    let center = layout.center();
    layout
        .coords()
        .filter(|&c| policy.allows(c, center))
        .collect()
}

/// Seed-shuffled candidate queue, consumed one coordinate per attempt.
#[must_use]
pub fn candidate_queue(layout: &GridLayout, policy: CandidatePolicy, seed: i64) -> VecDeque<Coord> {
    shuffled(candidate_coords(layout, policy), seed).into()
}

/// Why the placement loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The loop ran once per unit of budget.
    BudgetReached,
    /// The candidate queue ran dry first.
    CandidatesExhausted,
}

/// Summary of one placement run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementReport {
    /// Committed obstacles in commit order.
    pub committed: Vec<Coord>,
    /// Candidates that would have sealed off part of the map.
    pub rejected: usize,
    /// Why the loop ended.
    pub stop: StopReason,
}

impl PlacementReport {
    /// Number of candidates taken from the queue.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.committed.len() + self.rejected
    }
}

/// Drives candidates through tentative placement and validation.
#[derive(Debug)]
pub struct ObstaclePlacer<'a> {
    grid: &'a mut OccupancyGrid,
    open: &'a mut OpenTileSet,
    center: Coord,
    validator: ReachabilityValidator,
}

impl<'a> ObstaclePlacer<'a> {
    /// Create a placer over a grid and its open-tile set.
    pub fn new(grid: &'a mut OccupancyGrid, open: &'a mut OpenTileSet, center: Coord) -> Self {
        Self {
            grid,
            open,
            center,
            validator: ReachabilityValidator::new(),
        }
    }

    /// Run up to `budget` attempts, calling `on_commit` for each kept obstacle.
    ///
    /// Each attempt consumes one candidate whether or not it is kept, so
    /// the final count can fall short of the budget on crowded maps.
    pub fn place<F>(
        &mut self,
        candidates: &mut VecDeque<Coord>,
        budget: usize,
        mut on_commit: F,
    ) -> PlacementReport
    where
        F: FnMut(Coord),
    {
        let mut committed = Vec::new();
        let mut rejected = 0;
        let mut obstacle_count = self.grid.blocked_count();

        for _ in 0..budget {
            let Some(candidate) = candidates.pop_front() else {
                return PlacementReport {
                    committed,
                    rejected,
                    stop: StopReason::CandidatesExhausted,
                };
            };

            let previous = self.grid.replace(candidate, true);
            obstacle_count += 1;

            if !previous
                && candidate != self.center
                && self
                    .validator
                    .is_fully_accessible(&*self.grid, self.center, obstacle_count)
            {
                self.open.remove(candidate);
                committed.push(candidate);
                on_commit(candidate);
            } else {
                self.grid.replace(candidate, previous);
                obstacle_count -= 1;
                rejected += 1;
                tracing::trace!(x = candidate.x, y = candidate.y, "Obstacle candidate rejected");
            }
        }

        PlacementReport {
            committed,
            rejected,
            stop: StopReason::BudgetReached,
        }
    }
}
