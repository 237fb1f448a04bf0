//! Terminal previews of generated maps.
//!
//! Renders the occupancy grid as ASCII for quick review, or a JSON summary
//! for scripts.

use arena_core::coord::Coord;
use arena_core::map_generation::GeneratedMap;
use arena_core::math::Color;
use serde::Serialize;

/// Glyph for an obstacle tile.
pub const OBSTACLE_GLYPH: char = '#';
/// Glyph for an open tile.
pub const OPEN_GLYPH: char = '.';
/// Glyph for the map center.
pub const CENTER_GLYPH: char = '@';

/// Render the map one row per line, row 0 first.
#[must_use]
pub fn render_ascii(map: &GeneratedMap) -> String {
    let layout = map.layout();
    let center = map.center();
    let mut out = String::with_capacity(layout.area() + layout.height() as usize);

    for y in 0..layout.height() as i32 {
        for x in 0..layout.width() as i32 {
            let coord = Coord::new(x, y);
            let glyph = if coord == center {
                CENTER_GLYPH
            } else if map.is_obstacle(coord) {
                OBSTACLE_GLYPH
            } else {
                OPEN_GLYPH
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// One-line description of a map.
#[must_use]
pub fn describe(map: &GeneratedMap) -> String {
    format!(
        "{}x{} seed {}: {} obstacles (budget {}, {} candidates, stopped: {:?})",
        map.layout().width(),
        map.layout().height(),
        map.config.seed,
        map.obstacle_count(),
        map.obstacle_budget(),
        map.candidate_count(),
        map.stop_reason(),
    )
}

/// An obstacle as plain numbers.
#[derive(Debug, Clone, Serialize)]
pub struct ObstacleSummary {
    /// Grid coordinate.
    pub coord: Coord,
    /// World position `[x, y, z]`.
    pub position: [f64; 3],
    /// Height in world units.
    pub height: f64,
    /// Row-gradient color.
    pub color: Color,
}

/// JSON-friendly view of a generated map.
#[derive(Debug, Clone, Serialize)]
pub struct MapSummary {
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    /// Generation seed.
    pub seed: i64,
    /// The map center.
    pub center: Coord,
    /// Placement attempt budget.
    pub budget: usize,
    /// Committed obstacles in commit order.
    pub obstacles: Vec<ObstacleSummary>,
    /// One lap of the spawn cycle.
    pub spawn_cycle: Vec<Coord>,
}

impl MapSummary {
    /// Summarize a map.
    #[must_use]
    pub fn new(map: &GeneratedMap) -> Self {
        Self {
            width: map.layout().width(),
            height: map.layout().height(),
            seed: map.config.seed,
            center: map.center(),
            budget: map.obstacle_budget(),
            obstacles: map
                .obstacles()
                .iter()
                .map(|o| ObstacleSummary {
                    coord: o.coord,
                    position: [
                        o.position.x.to_num(),
                        o.position.y.to_num(),
                        o.position.z.to_num(),
                    ],
                    height: o.height.to_num(),
                    color: o.color,
                })
                .collect(),
            spawn_cycle: map.open_tiles().cycle().order().to_vec(),
        }
    }
}

/// Draw `count` tiles from the map's spawn cycle.
#[must_use]
pub fn spawn_sequence(map: &GeneratedMap, count: usize) -> Vec<Coord> {
    (0..count).map(|_| map.random_open_tile()).collect()
}
