//! Named map presets loaded from RON.
//!
//! A catalog holds several map definitions and the index of the one to
//! build. This module only parses text; reading files is left to callers.
//!
//! # Example RON
//!
//! ```ron
//! MapCatalog(
//!     selected: 0,
//!     presets: [
//!         (
//!             name: "Courtyard",
//!             config: (
//!                 width: 10,
//!                 height: 10,
//!                 obstacles: Density(0.3),
//!                 tile_size: 1.0,
//!                 seed: 10,
//!                 min_obstacle_height: 1.0,
//!                 max_obstacle_height: 3.0,
//!                 foreground_color: (r: 36, g: 52, b: 71),
//!                 background_color: (r: 181, g: 196, b: 212),
//!             ),
//!         ),
//!     ],
//! )
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use crate::map_generation::MapConfig;

/// A named map definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPreset {
    /// Display name.
    pub name: String,
    /// Generation parameters.
    pub config: MapConfig,
}

impl MapPreset {
    /// Create a preset.
    #[must_use]
    pub fn new(name: impl Into<String>, config: MapConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

/// Ordered list of presets with one selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapCatalog {
    presets: Vec<MapPreset>,
    #[serde(default)]
    selected: usize,
}

impl Default for MapCatalog {
    fn default() -> Self {
        Self {
            presets: vec![MapPreset::new("Default", MapConfig::default())],
            selected: 0,
        }
    }
}

impl MapCatalog {
    /// Create a catalog with the first preset selected.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::EmptyCatalog`] if `presets` is empty, or
    /// [`MapError::InvalidPreset`] for the first preset that fails
    /// validation.
    pub fn new(presets: Vec<MapPreset>) -> Result<Self> {
        let catalog = Self {
            presets,
            selected: 0,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse and validate a catalog from RON text.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::PresetParse`] for malformed text, plus the
    /// errors of [`validate`](Self::validate).
    pub fn from_ron(text: &str) -> Result<Self> {
        let catalog: Self = ron::from_str(text).map_err(|e| MapError::PresetParse(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Serialize the catalog as pretty RON.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::PresetSerialize`] if serialization fails.
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| MapError::PresetSerialize(e.to_string()))
    }

    /// Check that the catalog is non-empty, the selection is in range and
    /// every preset is valid.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.presets.is_empty() {
            return Err(MapError::EmptyCatalog);
        }
        if self.selected >= self.presets.len() {
            return Err(MapError::PresetNotFound {
                index: self.selected,
                len: self.presets.len(),
            });
        }
        for preset in &self.presets {
            preset
                .config
                .validate()
                .map_err(|source| MapError::InvalidPreset {
                    name: preset.name.clone(),
                    source: Box::new(source),
                })?;
        }
        Ok(())
    }

    /// Number of presets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Whether the catalog has no presets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// All presets in order.
    #[must_use]
    pub fn presets(&self) -> &[MapPreset] {
        &self.presets
    }

    /// Preset at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MapPreset> {
        self.presets.get(index)
    }

    /// Index of the selected preset.
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected preset.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::PresetNotFound`] if the selection is out of range,
    /// which only happens for catalogs built without validation.
    pub fn selected(&self) -> Result<&MapPreset> {
        self.presets.get(self.selected).ok_or(MapError::PresetNotFound {
            index: self.selected,
            len: self.presets.len(),
        })
    }

    /// Change the selected preset.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::PresetNotFound`] if `index` is out of range; the
    /// selection is unchanged in that case.
    pub fn select(&mut self, index: usize) -> Result<&MapPreset> {
        if index >= self.presets.len() {
            return Err(MapError::PresetNotFound {
                index,
                len: self.presets.len(),
            });
        }
        self.selected = index;
        Ok(&self.presets[index])
    }
}
