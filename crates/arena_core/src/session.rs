//! Map session: the owner of the current map.
//!
//! Spawning, combat and rendering code receive the session (or a
//! [`MapHandle`] cloned from it) instead of reaching for a global
//! generator. Regeneration builds the replacement map completely before
//! swapping it in, so readers only ever observe finished maps.

use std::sync::Arc;

use crate::coord::Coord;
use crate::error::Result;
use crate::map_generation::{generate_map, GeneratedMap};
use crate::math::Vec3Fixed;
use crate::presets::{MapCatalog, MapPreset};

/// Shared reference to one completed map, tagged with the epoch that built it.
#[derive(Debug, Clone)]
pub struct MapHandle {
    map: Arc<GeneratedMap>,
    epoch: u64,
}

impl MapHandle {
    /// Build epoch of this map.
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The map itself.
    #[must_use]
    pub fn map(&self) -> &GeneratedMap {
        &self.map
    }

    /// Whether `session` has regenerated since this handle was taken.
    #[must_use]
    pub fn is_stale(&self, session: &MapSession) -> bool {
        self.epoch != session.epoch
    }
}

impl std::ops::Deref for MapHandle {
    type Target = GeneratedMap;

    fn deref(&self) -> &Self::Target {
        &self.map
    }
}

/// Owns the preset catalog and the most recent completed map.
///
/// Regeneration takes `&mut self` and queries take `&self`, so the borrow
/// checker serializes rebuilds against in-process readers. Handles shared
/// across threads keep their map alive and can detect staleness through
/// [`MapHandle::is_stale`].
#[derive(Debug)]
pub struct MapSession {
    catalog: MapCatalog,
    current: Arc<GeneratedMap>,
    epoch: u64,
}

impl MapSession {
    /// Generate the catalog's selected preset and start a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog or the selected preset is invalid.
    pub fn new(catalog: MapCatalog) -> Result<Self> {
        catalog.validate()?;
        let map = generate_map(&catalog.selected()?.config)?;
        Ok(Self {
            catalog,
            current: Arc::new(map),
            epoch: 1,
        })
    }

    /// Number of successful builds so far.
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The preset catalog.
    #[must_use]
    pub const fn catalog(&self) -> &MapCatalog {
        &self.catalog
    }

    /// The preset the current map was built from.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::PresetNotFound`](crate::error::MapError) if the
    /// catalog selection is out of range.
    pub fn preset(&self) -> Result<&MapPreset> {
        self.catalog.selected()
    }

    /// The current map.
    #[must_use]
    pub fn map(&self) -> &GeneratedMap {
        &self.current
    }

    /// Shareable handle to the current map.
    #[must_use]
    pub fn handle(&self) -> MapHandle {
        MapHandle {
            map: Arc::clone(&self.current),
            epoch: self.epoch,
        }
    }

    /// Rebuild the selected preset.
    ///
    /// # Errors
    ///
    /// Returns the generation error. The previous map stays current and the
    /// epoch is unchanged.
    pub fn regenerate(&mut self) -> Result<MapHandle> {
        let map = generate_map(&self.catalog.selected()?.config)?;
        self.install(map);
        Ok(self.handle())
    }

    /// Select another preset and rebuild.
    ///
    /// # Errors
    ///
    /// Returns an error for an out-of-range index or a failed build. The
    /// selection only changes if the new map generates successfully.
    pub fn select(&mut self, index: usize) -> Result<MapHandle> {
        let mut catalog = self.catalog.clone();
        let map = generate_map(&catalog.select(index)?.config)?;
        self.catalog = catalog;
        self.install(map);
        Ok(self.handle())
    }

    /// Replace the catalog and rebuild from its selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is invalid. The old catalog and map
    /// are kept in that case.
    pub fn replace_catalog(&mut self, catalog: MapCatalog) -> Result<MapHandle> {
        catalog.validate()?;
        let map = generate_map(&catalog.selected()?.config)?;
        self.catalog = catalog;
        self.install(map);
        Ok(self.handle())
    }

    fn install(&mut self, map: GeneratedMap) {
        self.current = Arc::new(map);
        self.epoch += 1;
        tracing::debug!(epoch = self.epoch, "Map session regenerated");
    }

    /// Next spawn tile of the current map.
    #[must_use]
    pub fn random_open_tile(&self) -> Coord {
        self.current.random_open_tile()
    }

    /// Tile of the current map nearest to a world position.
    #[must_use]
    pub fn tile_from_position(&self, position: Vec3Fixed) -> Coord {
        self.current.tile_from_position(position)
    }
}
