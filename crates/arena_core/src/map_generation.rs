//! Procedural arena generation.
//!
//! Generates a rectangular tile map with:
//! - Seed-deterministic obstacle scatter
//! - Every open tile reachable from the map center
//! - Per-obstacle height and color for the renderer
//! - A shuffled spawn cycle over the open tiles
//!
//! The renderer and spawner are callers: this module only computes
//! coordinates, world positions and the obstacle classification.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::error::{MapError, Result};
use crate::grid::{check_dimensions, GridLayout, OccupancyGrid};
use crate::math::{fixed_from_f32, fixed_serde, lerp, Color, Fixed, Vec3Fixed};
use crate::open_tiles::{OpenTileSet, OpenTileTracker};
use crate::placement::{candidate_queue, CandidatePolicy, ObstaclePlacer, StopReason};
use crate::shuffle::seeded_rng;

/// How many obstacles to aim for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleBudget {
    /// Fraction of the map area in `[0, 1]`, floored to a whole count.
    Density(f32),
    /// Absolute number of placement attempts.
    Count(u32),
}

impl Default for ObstacleBudget {
    fn default() -> Self {
        Self::Density(0.3)
    }
}

/// Map configuration for procedural generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Map width in tiles.
    pub width: u32,
    /// Map height in tiles.
    pub height: u32,
    /// Obstacle target.
    #[serde(default)]
    pub obstacles: ObstacleBudget,
    /// Tile size in world units.
    pub tile_size: f32,
    /// Fraction each tile is shrunk by when rendered (`0` = no gap).
    #[serde(default)]
    pub tile_padding: f32,
    /// Seed for the candidate shuffle, obstacle heights and spawn cycle.
    pub seed: i64,
    /// Shortest obstacle.
    pub min_obstacle_height: f32,
    /// Tallest obstacle.
    pub max_obstacle_height: f32,
    /// Obstacle color on the first row.
    pub foreground_color: Color,
    /// Obstacle color approached towards the last row.
    pub background_color: Color,
    /// Which tiles may hold obstacles.
    #[serde(default)]
    pub candidate_policy: CandidatePolicy,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            obstacles: ObstacleBudget::default(),
            tile_size: 1.0,
            tile_padding: 0.05,
            seed: 10,
            min_obstacle_height: 1.0,
            max_obstacle_height: 3.0,
            foreground_color: Color::rgb(36, 52, 71),
            background_color: Color::rgb(181, 196, 212),
            candidate_policy: CandidatePolicy::default(),
        }
    }
}

impl MapConfig {
    /// Create a small arena (15x15 tiles).
    #[must_use]
    pub fn small() -> Self {
        Self {
            width: 15,
            height: 15,
            ..Default::default()
        }
    }

    /// Create a medium arena (31x25 tiles).
    #[must_use]
    pub fn medium() -> Self {
        Self {
            width: 31,
            height: 25,
            ..Default::default()
        }
    }

    /// Create a large arena (49x41 tiles).
    #[must_use]
    pub fn large() -> Self {
        Self {
            width: 49,
            height: 41,
            ..Default::default()
        }
    }

    /// Set the map dimensions.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    /// Set obstacle density. Out-of-range values are rejected at generation.
    #[must_use]
    pub fn with_obstacle_density(mut self, density: f32) -> Self {
        self.obstacles = ObstacleBudget::Density(density);
        self
    }

    /// Set an absolute obstacle count.
    #[must_use]
    pub const fn with_obstacle_count(mut self, count: u32) -> Self {
        self.obstacles = ObstacleBudget::Count(count);
        self
    }

    /// Set the candidate policy.
    #[must_use]
    pub const fn with_candidate_policy(mut self, policy: CandidatePolicy) -> Self {
        self.candidate_policy = policy;
        self
    }

    /// Number of tiles on the map.
    #[must_use]
    pub const fn area(&self) -> u32 {
        self.width.saturating_mul(self.height)
    }

    /// Check every field without generating anything.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<()> {
        check_dimensions(self.width, self.height)?;

        match self.obstacles {
            ObstacleBudget::Density(density) => {
                if !(0.0..=1.0).contains(&density) {
                    return Err(MapError::InvalidDensity(density));
                }
            }
            ObstacleBudget::Count(count) => {
                if count > self.area() {
                    return Err(MapError::ObstacleCountTooLarge {
                        count,
                        area: self.area(),
                    });
                }
            }
        }

        // The widest side in world units must fit the fixed range.
        let longest_side = Fixed::from_num(self.width.max(self.height));
        match fixed_from_f32(self.tile_size) {
            Some(size) if size > Fixed::ZERO && size.checked_mul(longest_side).is_some() => {}
            _ => return Err(MapError::InvalidTileSize(self.tile_size)),
        }

        if !(0.0..=1.0).contains(&self.tile_padding) {
            return Err(MapError::InvalidTilePadding(self.tile_padding));
        }

        let heights = (
            fixed_from_f32(self.min_obstacle_height),
            fixed_from_f32(self.max_obstacle_height),
        );
        match heights {
            (Some(min), Some(max))
                if min <= max
                    && max.checked_sub(min).is_some()
                    && max.checked_add(max / 2).is_some() =>
            {
                Ok(())
            }
            _ => Err(MapError::InvalidObstacleHeight {
                min: self.min_obstacle_height,
                max: self.max_obstacle_height,
            }),
        }
    }

    /// Maximum number of placement attempts, `floor(area * density)` or the
    /// configured count.
    #[must_use]
    pub fn obstacle_budget(&self) -> usize {
        match self.obstacles {
            ObstacleBudget::Density(density) => {
                let density = f64::from(density).clamp(0.0, 1.0);
                (f64::from(self.area()) * density).floor() as usize
            }
            ObstacleBudget::Count(count) => count.min(self.area()) as usize,
        }
    }
}

/// A floor tile for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileInstance {
    /// Grid coordinate.
    pub coord: Coord,
    /// World position of the tile center.
    pub position: Vec3Fixed,
    /// Rendered edge length after padding.
    #[serde(with = "fixed_serde")]
    pub scale: Fixed,
}

/// A committed obstacle for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleInstance {
    /// Grid coordinate.
    pub coord: Coord,
    /// World position of the obstacle's center (lifted by half its height).
    pub position: Vec3Fixed,
    /// Obstacle height.
    #[serde(with = "fixed_serde")]
    pub height: Fixed,
    /// Edge length of the obstacle footprint after padding.
    #[serde(with = "fixed_serde")]
    pub footprint: Fixed,
    /// Row-gradient color.
    pub color: Color,
}

/// Generated map data.
///
/// Immutable once built; regenerating produces a new value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedMap {
    /// Map configuration used.
    pub config: MapConfig,
    layout: GridLayout,
    occupancy: OccupancyGrid,
    obstacles: Vec<ObstacleInstance>,
    open_tiles: OpenTileTracker,
    #[serde(with = "fixed_serde")]
    tile_scale: Fixed,
    budget: usize,
    candidate_count: usize,
    rejected: usize,
    stop: StopReason,
}

impl GeneratedMap {
    /// Coordinate system of the map.
    #[must_use]
    pub const fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Final obstacle classification.
    #[must_use]
    pub const fn occupancy(&self) -> &OccupancyGrid {
        &self.occupancy
    }

    /// The map center tile.
    #[must_use]
    pub const fn center(&self) -> Coord {
        self.layout.center()
    }

    /// Committed obstacles in commit order.
    #[must_use]
    pub fn obstacles(&self) -> &[ObstacleInstance] {
        &self.obstacles
    }

    /// Committed obstacle coordinates in commit order.
    pub fn obstacle_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.obstacles.iter().map(|o| o.coord)
    }

    /// Number of committed obstacles.
    #[must_use]
    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// Whether a tile holds an obstacle. Out-of-bounds tiles report `false`.
    #[must_use]
    pub fn is_obstacle(&self, coord: Coord) -> bool {
        self.occupancy.is_blocked(coord)
    }

    /// Every floor tile with its world position.
    pub fn tiles(&self) -> impl Iterator<Item = TileInstance> + '_ {
        self.layout.coords().map(|coord| TileInstance {
            coord,
            position: self.layout.coord_to_position(coord),
            scale: self.tile_scale,
        })
    }

    /// Spawn and lookup surface.
    #[must_use]
    pub const fn open_tiles(&self) -> &OpenTileTracker {
        &self.open_tiles
    }

    /// Next spawn tile from the repeating shuffled cycle.
    pub fn random_open_tile(&self) -> Coord {
        self.open_tiles.random_open_tile()
    }

    /// Tile nearest to a world position, clamped to the grid.
    #[must_use]
    pub fn tile_from_position(&self, position: Vec3Fixed) -> Coord {
        self.open_tiles.tile_from_position(position)
    }

    /// Attempt budget the placement loop ran with.
    #[must_use]
    pub const fn obstacle_budget(&self) -> usize {
        self.budget
    }

    /// Size of the candidate queue before placement.
    #[must_use]
    pub const fn candidate_count(&self) -> usize {
        self.candidate_count
    }

    /// Candidates rolled back because they would have sealed off open tiles.
    #[must_use]
    pub const fn rejected_count(&self) -> usize {
        self.rejected
    }

    /// Why placement stopped.
    #[must_use]
    pub const fn stop_reason(&self) -> StopReason {
        self.stop
    }

    /// World extent of the floor, used to size the floor collider.
    #[must_use]
    pub fn world_extent(&self) -> (Fixed, Fixed) {
        self.layout.world_extent()
    }
}

/// Generate a map with the given configuration.
///
/// # Errors
///
/// Returns a [`MapError`] for invalid configuration; no grid is built in
/// that case. Running out of candidates is not an error.
pub fn generate_map(config: &MapConfig) -> Result<GeneratedMap> {
    config.validate()?;

    let tile_size =
        fixed_from_f32(config.tile_size).ok_or(MapError::InvalidTileSize(config.tile_size))?;
    let padding = fixed_from_f32(config.tile_padding)
        .ok_or(MapError::InvalidTilePadding(config.tile_padding))?;
    let (min_height, max_height) = match (
        fixed_from_f32(config.min_obstacle_height),
        fixed_from_f32(config.max_obstacle_height),
    ) {
        (Some(min), Some(max)) => (min, max),
        _ => {
            return Err(MapError::InvalidObstacleHeight {
                min: config.min_obstacle_height,
                max: config.max_obstacle_height,
            })
        }
    };

    let layout = GridLayout::new(config.width, config.height, tile_size)?;
    let center = layout.center();
    let tile_scale = tile_size * (Fixed::ONE - padding);
    let row_count = Fixed::from_num(config.height);

    let mut occupancy = OccupancyGrid::for_layout(&layout);
    let mut open = OpenTileSet::new(&layout);
    let mut candidates = candidate_queue(&layout, config.candidate_policy, config.seed);
    let candidate_count = candidates.len();
    let budget = config.obstacle_budget();

    let mut height_rng = seeded_rng(config.seed);
    let mut obstacles = Vec::new();

    let report = ObstaclePlacer::new(&mut occupancy, &mut open, center).place(
        &mut candidates,
        budget,
        |coord| {
            // Uniform in [0, 1): the low 32 bits are the fractional part.
            let t = Fixed::from_bits(i64::from(height_rng.next_u32()));
            let height = lerp(min_height, max_height, t);
            let gradient = Fixed::from_num(coord.y) / row_count;
            obstacles.push(ObstacleInstance {
                coord,
                position: layout.coord_to_position(coord).raised(height / 2),
                height,
                footprint: tile_scale,
                color: config
                    .foreground_color
                    .lerp(config.background_color, gradient),
            });
        },
    );

    if report.committed.len() < budget {
        tracing::debug!(
            stop = ?report.stop,
            placed = report.committed.len(),
            rejected = report.rejected,
            budget,
            "Obstacle placement stopped short of budget"
        );
    }

    #[cfg(feature = "debug-validation")]
    assert!(
        crate::reachability::is_fully_accessible(&occupancy, center, obstacles.len()),
        "generated map failed its reachability audit"
    );

    let open_tiles = OpenTileTracker::new(layout.clone(), &open, config.seed)
        .ok_or_else(|| MapError::InvalidState("no open tiles after generation".into()))?;

    tracing::info!(
        width = config.width,
        height = config.height,
        seed = config.seed,
        budget,
        candidates = candidate_count,
        placed = obstacles.len(),
        open = open.len(),
        "Map generated"
    );

    Ok(GeneratedMap {
        config: config.clone(),
        layout,
        occupancy,
        obstacles,
        open_tiles,
        tile_scale,
        budget,
        candidate_count,
        rejected: report.rejected,
        stop: report.stop,
    })
}
