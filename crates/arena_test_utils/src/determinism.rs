//! Determinism testing utilities.
//!
//! Provides a harness for verifying that map generation produces
//! identical results given identical inputs.
//!
//! # Testing Strategy
//!
//! A map is a pure function of its [`MapConfig`]. Sources of
//! non-determinism that would break that include:
//!
//! - **Floating-point math**: world positions, heights and colors use
//!   [`arena_core::math::Fixed`] throughout.
//!
//! - **HashMap iteration order**: the generator only iterates `Vec`s in
//!   grid order.
//!
//! - **System randomness**: every generator is built from the config seed.
//!
//! # Test Levels
//!
//! 1. **Unit tests**: shuffler, validator and placer in isolation
//! 2. **Property tests**: arbitrary configs must still generate identically
//! 3. **Parallel tests**: building N copies on N threads all match
//! 4. **Serialization tests**: a map survives a bincode round trip

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

use arena_core::map_generation::{generate_map, GeneratedMap, MapConfig};
use arena_core::prelude::Coord;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Fingerprints from each run.
    pub hashes: Vec<u64>,
}

impl DeterminismResult {
    /// Get all unique hashes (should be 1 for deterministic generation).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that generation was deterministic, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different fingerprints.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Map generation is non-deterministic!\n\
                 Runs: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Fingerprint of everything observable about a generated map: committed
/// obstacles in order, their heights and colors, and the spawn cycle order.
#[must_use]
pub fn map_fingerprint(map: &GeneratedMap) -> u64 {
    let mut hasher = DefaultHasher::new();
    for obstacle in map.obstacles() {
        obstacle.coord.hash(&mut hasher);
        obstacle.height.to_bits().hash(&mut hasher);
        obstacle.color.hash(&mut hasher);
    }
    map.open_tiles().cycle().order().hash(&mut hasher);
    map.occupancy().hash(&mut hasher);
    hasher.finish()
}

/// Generate the same config `runs` times and compare fingerprints.
///
/// # Panics
///
/// Panics if the config is invalid.
///
/// # Example
///
/// ```ignore
/// use arena_test_utils::determinism::verify_determinism;
/// use arena_core::map_generation::MapConfig;
///
/// verify_determinism(5, &MapConfig::medium().with_seed(7)).assert_deterministic();
/// ```
pub fn verify_determinism(runs: usize, config: &MapConfig) -> DeterminismResult {
    let hashes: Vec<u64> = (0..runs)
        .map(|_| {
            let map = generate_map(config).expect("config must be valid");
            map_fingerprint(&map)
        })
        .collect();

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);

    DeterminismResult {
        is_deterministic,
        hashes,
    }
}

/// Generate the same config on `num_threads` scoped threads.
///
/// Catches non-determinism that only shows up under thread scheduling
/// or memory layout differences.
///
/// # Panics
///
/// Panics if the config is invalid or a worker thread panics.
pub fn run_parallel_generations(config: &MapConfig, num_threads: usize) -> DeterminismResult {
    let hashes: Vec<u64> = thread::scope(|s| {
        let handles: Vec<_> = (0..num_threads)
            .map(|_| {
                s.spawn(|| {
                    let map = generate_map(config).expect("config must be valid");
                    map_fingerprint(&map)
                })
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);

    DeterminismResult {
        is_deterministic,
        hashes,
    }
}

/// Compare two runs obstacle by obstacle, finding the first divergence.
///
/// # Returns
///
/// `None` if both runs committed the same obstacles, `Some(index)` of the
/// first commit that differs otherwise (a length mismatch reports the
/// shorter length).
///
/// # Panics
///
/// Panics if the config is invalid.
pub fn find_first_divergence(config: &MapConfig) -> Option<usize> {
    let a: Vec<Coord> = generate_map(config)
        .expect("config must be valid")
        .obstacle_coords()
        .collect();
    let b: Vec<Coord> = generate_map(config)
        .expect("config must be valid")
        .obstacle_coords()
        .collect();

    a.iter()
        .zip(&b)
        .position(|(x, y)| x != y)
        .or_else(|| (a.len() != b.len()).then_some(a.len().min(b.len())))
}

/// Verify that a bincode round trip preserves the map exactly.
pub fn verify_serialization_determinism(map: &GeneratedMap) -> bool {
    let Ok(bytes) = bincode::serialize(map) else {
        return false;
    };
    let Ok(restored) = bincode::deserialize::<GeneratedMap>(&bytes) else {
        return false;
    };
    map_fingerprint(map) == map_fingerprint(&restored)
}

/// Proptest strategies for generation testing.
///
/// These strategies generate random but reproducible configurations for
/// property-based testing of the generator.
pub mod strategies {
    use arena_core::map_generation::{MapConfig, ObstacleBudget};
    use arena_core::placement::CandidatePolicy;
    use proptest::prelude::*;

    /// Any seed, negative values included.
    pub fn arb_seed() -> impl Strategy<Value = i64> {
        any::<i64>()
    }

    /// Map side length small enough to keep property runs fast.
    pub fn arb_dimension() -> impl Strategy<Value = u32> {
        1u32..=24
    }

    /// Obstacle density in `[0, 1]`.
    pub fn arb_density() -> impl Strategy<Value = f32> {
        0.0f32..=1.0
    }

    /// Either candidate policy.
    pub fn arb_policy() -> impl Strategy<Value = CandidatePolicy> {
        prop_oneof![
            Just(CandidatePolicy::CenterCross),
            Just(CandidatePolicy::CenterOnly),
        ]
    }

    /// A valid configuration with a density budget.
    pub fn arb_map_config() -> impl Strategy<Value = MapConfig> {
        (
            arb_dimension(),
            arb_dimension(),
            arb_density(),
            arb_seed(),
            arb_policy(),
        )
            .prop_map(|(width, height, density, seed, policy)| MapConfig {
                width,
                height,
                obstacles: ObstacleBudget::Density(density),
                seed,
                candidate_policy: policy,
                ..MapConfig::default()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_determinism_reference_map() {
        let result = verify_determinism(3, &MapConfig::default());
        result.assert_deterministic();
        assert_eq!(result.hashes.len(), 3);
        assert_eq!(result.unique_hashes().len(), 1);
    }

    #[test]
    #[should_panic(expected = "non-deterministic")]
    fn test_assert_deterministic_reports_mismatch() {
        DeterminismResult {
            is_deterministic: false,
            hashes: vec![1, 2],
        }
        .assert_deterministic();
    }

    #[test]
    fn test_parallel_generations_match() {
        run_parallel_generations(&MapConfig::medium().with_seed(99), 4).assert_deterministic();
    }

    #[test]
    fn test_no_divergence() {
        assert_eq!(find_first_divergence(&MapConfig::large()), None);
    }

    #[test]
    fn test_fingerprint_differs_between_seeds() {
        let a = generate_map(&MapConfig::medium().with_seed(1)).unwrap();
        let b = generate_map(&MapConfig::medium().with_seed(2)).unwrap();
        assert_ne!(map_fingerprint(&a), map_fingerprint(&b));
    }

    #[test]
    fn test_serialization_round_trip() {
        let map = generate_map(&MapConfig::medium()).unwrap();
        assert!(verify_serialization_determinism(&map));
    }
}
