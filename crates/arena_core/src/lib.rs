//! # Arena Core
//!
//! Deterministic arena map generation.
//!
//! This crate contains **only** deterministic logic:
//! - No rendering
//! - No IO
//! - No system randomness (every generator is explicitly seeded)
//! - No floating-point world math (uses fixed-point)
//!
//! A map is built in one synchronous pass: the grid is laid out, a
//! seed-shuffled candidate queue feeds the obstacle placer, every
//! candidate is validated by a flood fill from the map center, and the
//! remaining open tiles become a repeating spawn cycle.
//!
//! ## Crate Structure
//!
//! - [`grid`] - Coordinate system and occupancy buffer
//! - [`shuffle`] - Seeded Fisher–Yates shuffling
//! - [`reachability`] - Flood-fill accessibility check
//! - [`placement`] - Candidate queue and commit/rollback placement loop
//! - [`open_tiles`] - Spawn cycle and position lookup
//! - [`map_generation`] - Configuration and the generation entry point
//! - [`presets`] - RON map catalogs
//! - [`session`] - Current-map ownership and regeneration
//! - [`math`] - Fixed-point math utilities

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod coord;
pub mod error;
pub mod grid;
pub mod map_generation;
pub mod math;
pub mod open_tiles;
pub mod placement;
pub mod presets;
pub mod reachability;
pub mod session;
pub mod shuffle;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::coord::Coord;
    pub use crate::error::{MapError, Result};
    pub use crate::grid::{GridLayout, OccupancyGrid, MAX_MAP_DIMENSION};
    pub use crate::map_generation::{
        generate_map, GeneratedMap, MapConfig, ObstacleBudget, ObstacleInstance, TileInstance,
    };
    pub use crate::math::{Color, Fixed, Vec3Fixed};
    pub use crate::open_tiles::{OpenTileCycle, OpenTileTracker};
    pub use crate::placement::{CandidatePolicy, StopReason};
    pub use crate::presets::{MapCatalog, MapPreset};
    pub use crate::session::{MapHandle, MapSession};
}
