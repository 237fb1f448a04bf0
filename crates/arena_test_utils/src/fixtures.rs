//! Test fixtures and helpers.
//!
//! Pre-built map configurations for consistent testing.

use arena_core::map_generation::MapConfig;
use arena_core::math::Color;
use arena_core::placement::CandidatePolicy;
use fixed::types::I32F32;

/// Create a fixed-point number from an integer.
#[must_use]
pub fn fixed(n: i32) -> I32F32 {
    I32F32::from_num(n)
}

/// 10x10 map at 30% density with seed 10.
#[must_use]
pub fn reference_map() -> MapConfig {
    MapConfig::default()
        .with_size(10, 10)
        .with_obstacle_density(0.3)
        .with_seed(10)
}

/// 3x3 map asking for every tile; saturates after the four corners.
#[must_use]
pub fn saturated_three_by_three() -> MapConfig {
    MapConfig::default()
        .with_size(3, 3)
        .with_obstacle_density(1.0)
}

/// Map with no obstacles, so every tile is open.
#[must_use]
pub fn open_field(width: u32, height: u32) -> MapConfig {
    MapConfig::default()
        .with_size(width, height)
        .with_obstacle_density(0.0)
}

/// Dense map where only the center is protected from obstacles.
#[must_use]
pub fn dense_center_only(seed: i64) -> MapConfig {
    MapConfig::medium()
        .with_obstacle_density(0.9)
        .with_candidate_policy(CandidatePolicy::CenterOnly)
        .with_seed(seed)
}

/// Black-to-white gradient so obstacle colors are easy to assert.
#[must_use]
pub fn grayscale(config: MapConfig) -> MapConfig {
    MapConfig {
        foreground_color: Color::rgb(0, 0, 0),
        background_color: Color::rgb(255, 255, 255),
        ..config
    }
}
