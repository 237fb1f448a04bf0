//! Preset file validation.

use std::path::Path;

use arena_core::presets::MapCatalog;

use crate::{Result, ToolError};

/// Read a RON catalog from disk and validate it.
///
/// # Errors
///
/// Returns [`ToolError::Io`] if the file cannot be read and
/// [`ToolError::Map`] if it fails to parse or any preset is invalid.
pub fn load_catalog(path: &Path) -> Result<MapCatalog> {
    let text = std::fs::read_to_string(path).map_err(|source| ToolError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let catalog = MapCatalog::from_ron(&text)?;
    tracing::debug!(
        path = %path.display(),
        presets = catalog.len(),
        selected = catalog.selected_index(),
        "Loaded map catalog"
    );
    Ok(catalog)
}

/// Validate a preset file and every map it describes.
///
/// Beyond parsing, each preset is generated once so the report can list
/// how many obstacles it actually ends up with.
///
/// # Errors
///
/// Returns the first error encountered.
pub fn validate_preset_file(path: &Path) -> Result<Vec<PresetReport>> {
    let catalog = load_catalog(path)?;
    catalog
        .presets()
        .iter()
        .map(|preset| {
            let map = arena_core::map_generation::generate_map(&preset.config)?;
            Ok(PresetReport {
                name: preset.name.clone(),
                width: preset.config.width,
                height: preset.config.height,
                budget: map.obstacle_budget(),
                placed: map.obstacle_count(),
            })
        })
        .collect()
}

/// Outcome of generating one preset during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetReport {
    /// Preset name.
    pub name: String,
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    /// Placement attempt budget.
    pub budget: usize,
    /// Obstacles actually placed.
    pub placed: usize,
}

impl std::fmt::Display for PresetReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}x{}, {}/{} obstacles",
            self.name, self.width, self.height, self.placed, self.budget
        )
    }
}
