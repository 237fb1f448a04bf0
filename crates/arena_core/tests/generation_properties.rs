//! Property tests for generated maps.
//!
//! Every generated map must be reproducible from its config, keep the
//! center open, stay within budget and leave every open tile reachable
//! from the center.

use std::collections::HashSet;

use arena_core::prelude::*;
use arena_core::reachability::ReachabilityValidator;
use arena_test_utils::determinism::{map_fingerprint, strategies::*, verify_determinism};
use arena_test_utils::fixtures::{dense_center_only, reference_map, saturated_three_by_three};
use arena_test_utils::proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_generation_is_deterministic(config in arb_map_config()) {
        let a = generate_map(&config).unwrap();
        let b = generate_map(&config).unwrap();
        prop_assert_eq!(a.obstacle_coords().collect::<Vec<_>>(), b.obstacle_coords().collect::<Vec<_>>());
        prop_assert_eq!(a.open_tiles().cycle().order(), b.open_tiles().cycle().order());
        prop_assert_eq!(map_fingerprint(&a), map_fingerprint(&b));
    }

    #[test]
    fn prop_every_open_tile_reachable(config in arb_map_config()) {
        let map = generate_map(&config).unwrap();
        let area = map.layout().area();
        let reached = ReachabilityValidator::new().reachable_count(map.occupancy(), map.center());
        prop_assert_eq!(reached, area - map.obstacle_count());
    }

    #[test]
    fn prop_center_never_obstacle(config in arb_map_config()) {
        let map = generate_map(&config).unwrap();
        prop_assert!(!map.is_obstacle(map.center()));
        prop_assert!(map.obstacle_coords().all(|c| c != map.center()));
    }

    #[test]
    fn prop_budget_bound(config in arb_map_config()) {
        let map = generate_map(&config).unwrap();
        prop_assert!(map.obstacle_count() <= config.obstacle_budget());
        prop_assert_eq!(map.occupancy().blocked_count(), map.obstacle_count());
    }

    #[test]
    fn prop_budget_met_when_nothing_rejected(config in arb_map_config()) {
        let map = generate_map(&config).unwrap();
        if map.stop_reason() == StopReason::BudgetReached {
            prop_assert_eq!(map.obstacle_count() + map.rejected_count(), map.obstacle_budget());
            if map.rejected_count() == 0 {
                prop_assert_eq!(map.obstacle_count(), map.obstacle_budget());
            }
        }
    }

    #[test]
    fn prop_open_cycle_is_complement_of_obstacles(config in arb_map_config()) {
        let map = generate_map(&config).unwrap();
        let open: HashSet<Coord> = map.open_tiles().cycle().order().iter().copied().collect();
        prop_assert_eq!(open.len(), map.open_tiles().cycle().len());
        for coord in map.layout().coords() {
            prop_assert_eq!(open.contains(&coord), !map.is_obstacle(coord));
        }
    }

    #[test]
    fn prop_position_round_trip(
        width in arb_dimension(),
        height in arb_dimension(),
        tile in 0.1f32..8.0,
    ) {
        let layout = GridLayout::new(width, height, Fixed::from_num(tile)).unwrap();
        for coord in layout.coords() {
            prop_assert_eq!(layout.position_to_coord(layout.coord_to_position(coord)), coord);
        }
    }

    #[test]
    fn prop_position_lookup_clamps(
        width in arb_dimension(),
        height in arb_dimension(),
        x in -1_000_000i32..1_000_000,
        z in -1_000_000i32..1_000_000,
    ) {
        let layout = GridLayout::new(width, height, Fixed::ONE).unwrap();
        let coord = layout.position_to_coord(Vec3Fixed::on_floor(Fixed::from_num(x), Fixed::from_num(z)));
        prop_assert!(layout.contains(coord));
    }
}

#[test]
fn test_reference_scenario() {
    let map = generate_map(&reference_map()).unwrap();
    assert_eq!(map.obstacle_budget(), 30);
    assert!(map.obstacle_count() <= 30);
    assert_eq!(map.center(), Coord::new(5, 5));
    assert!(!map.is_obstacle(Coord::new(5, 5)));
}

#[test]
fn test_reference_scenario_repeats_exactly() {
    let a = generate_map(&reference_map()).unwrap();
    let b = generate_map(&reference_map()).unwrap();
    assert_eq!(
        a.obstacle_coords().collect::<Vec<_>>(),
        b.obstacle_coords().collect::<Vec<_>>()
    );
    verify_determinism(4, &reference_map()).assert_deterministic();
}

#[test]
fn test_sparse_map_places_full_budget() {
    // A lone obstacle can never cut off a tile on a grid at least 2x2.
    for seed in -8..8 {
        let map = generate_map(&MapConfig::large().with_obstacle_count(1).with_seed(seed)).unwrap();
        assert_eq!(map.stop_reason(), StopReason::BudgetReached);
        assert_eq!(map.rejected_count(), 0);
        assert_eq!(map.obstacle_count(), map.obstacle_budget());
        assert_eq!(map.obstacle_count(), 1);
    }
}

#[test]
fn test_three_by_three_saturates_early() {
    let map = generate_map(&saturated_three_by_three()).unwrap();
    assert_eq!(map.obstacle_budget(), 9);
    assert!(map.obstacle_count() < 8);
    assert_eq!(map.stop_reason(), StopReason::CandidatesExhausted);

    let center = map.center();
    for neighbor in [
        center,
        center.offset(1, 0),
        center.offset(-1, 0),
        center.offset(0, 1),
        center.offset(0, -1),
    ] {
        assert!(!map.is_obstacle(neighbor), "{neighbor} should stay open");
    }
}

#[test]
fn test_dense_map_rejects_sealing_candidates() {
    let map = generate_map(&dense_center_only(5)).unwrap();
    assert!(map.obstacle_count() < map.obstacle_budget());
    assert_eq!(
        ReachabilityValidator::new().reachable_count(map.occupancy(), map.center()),
        map.layout().area() - map.obstacle_count()
    );
}

#[test]
fn test_invalid_configuration_fails_fast() {
    let err = generate_map(&MapConfig::default().with_size(10, 0)).unwrap_err();
    assert!(matches!(err, MapError::InvalidDimensions { width: 10, height: 0, .. }));

    let err = generate_map(&MapConfig::default().with_obstacle_density(-0.1)).unwrap_err();
    assert_eq!(err, MapError::InvalidDensity(-0.1));
}
