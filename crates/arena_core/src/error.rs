//! Error types for map generation.

use thiserror::Error;

/// Result type alias using [`MapError`].
pub type Result<T> = std::result::Result<T, MapError>;

/// Top-level error type for map generation and preset handling.
///
/// Configuration problems are detected before generation starts. Running
/// out of candidates or saturating the map is not an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    /// Width or height is zero or exceeds the supported maximum.
    #[error("Invalid map dimensions {width}x{height} (each side must be 1..={max})")]
    InvalidDimensions {
        /// Requested width in tiles.
        width: u32,
        /// Requested height in tiles.
        height: u32,
        /// Largest accepted side length.
        max: u32,
    },

    /// Obstacle density outside `[0, 1]` or not a number.
    #[error("Invalid obstacle density {0} (expected a value in [0, 1])")]
    InvalidDensity(f32),

    /// Absolute obstacle count larger than the map.
    #[error("Obstacle count {count} exceeds map area {area}")]
    ObstacleCountTooLarge {
        /// Requested obstacle count.
        count: u32,
        /// Number of tiles on the map.
        area: u32,
    },

    /// Tile size not finite or not positive.
    #[error("Invalid tile size {0} (must be finite and positive)")]
    InvalidTileSize(f32),

    /// Tile padding outside `[0, 1]`.
    #[error("Invalid tile padding {0} (expected a value in [0, 1])")]
    InvalidTilePadding(f32),

    /// Obstacle height range is inverted or not finite.
    #[error("Invalid obstacle height range {min}..={max}")]
    InvalidObstacleHeight {
        /// Minimum obstacle height.
        min: f32,
        /// Maximum obstacle height.
        max: f32,
    },

    /// Preset index out of range.
    #[error("Map preset {index} not found (catalog has {len} presets)")]
    PresetNotFound {
        /// Requested index.
        index: usize,
        /// Number of presets available.
        len: usize,
    },

    /// Catalog contains no presets.
    #[error("Map catalog is empty")]
    EmptyCatalog,

    /// Preset text failed to parse.
    #[error("Failed to parse map presets: {0}")]
    PresetParse(String),

    /// Catalog could not be written as RON.
    #[error("Failed to serialize map presets: {0}")]
    PresetSerialize(String),

    /// Internal invariant broken during generation.
    #[error("Invalid generator state: {0}")]
    InvalidState(String),

    /// A preset inside a catalog failed validation.
    #[error("Preset '{name}' is invalid: {source}")]
    InvalidPreset {
        /// Preset name.
        name: String,
        /// Underlying validation error.
        #[source]
        source: Box<MapError>,
    },
}
