//! # Arena Development Tools
//!
//! Command-line helpers for working with map presets:
//! - Preset file validation
//! - ASCII and JSON map previews
//! - Spawn cycle inspection

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod preview;
pub mod validate;

use thiserror::Error;

/// Result type alias using [`ToolError`].
pub type Result<T> = std::result::Result<T, ToolError>;

/// Errors surfaced by the tools.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A preset file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Preset or generation error from the core.
    #[error(transparent)]
    Map(#[from] arena_core::error::MapError),

    /// JSON output failed.
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}
