//! Spawn-tile and position lookup behavior seen by collaborators.

use std::collections::HashSet;

use arena_core::prelude::*;
use arena_test_utils::fixtures::{fixed, open_field};

#[test]
fn test_open_field_cycle_visits_every_tile_once() {
    let map = generate_map(&open_field(7, 5)).unwrap();
    let area = 7 * 5;

    let first_lap: Vec<Coord> = (0..area).map(|_| map.random_open_tile()).collect();
    let unique: HashSet<Coord> = first_lap.iter().copied().collect();
    assert_eq!(unique.len(), area);
    assert!(map.layout().coords().all(|c| unique.contains(&c)));

    let second_lap: Vec<Coord> = (0..area).map(|_| map.random_open_tile()).collect();
    assert_eq!(first_lap, second_lap);
}

#[test]
fn test_spawns_never_land_on_obstacles() {
    let map = generate_map(&MapConfig::large().with_seed(-12)).unwrap();
    for _ in 0..map.layout().area() * 2 {
        assert!(!map.is_obstacle(map.random_open_tile()));
    }
}

#[test]
fn test_spawn_order_is_seeded() {
    let a = generate_map(&open_field(9, 9).with_seed(4)).unwrap();
    let b = generate_map(&open_field(9, 9).with_seed(4)).unwrap();
    let c = generate_map(&open_field(9, 9).with_seed(5)).unwrap();

    let draw = |map: &GeneratedMap| (0..20).map(|_| map.random_open_tile()).collect::<Vec<_>>();
    assert_eq!(draw(&a), draw(&b));
    assert_ne!(draw(&a), draw(&c));
}

#[test]
fn test_tile_from_position_matches_obstacle_positions() {
    let map = generate_map(&MapConfig::medium()).unwrap();
    for obstacle in map.obstacles() {
        assert_eq!(map.tile_from_position(obstacle.position), obstacle.coord);
    }
}

#[test]
fn test_tile_from_position_far_outside() {
    let map = generate_map(&open_field(6, 4)).unwrap();
    let corner = map.tile_from_position(Vec3Fixed::on_floor(fixed(-10_000), fixed(10_000)));
    assert_eq!(corner, Coord::new(0, 3));
}

#[test]
fn test_session_handles_serve_readers_on_threads() {
    let catalog = MapCatalog::new(vec![MapPreset::new("Field", open_field(4, 4))]).unwrap();
    let session = MapSession::new(catalog).unwrap();
    let handle = session.handle();

    let drawn: Vec<Coord> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let handle = handle.clone();
                scope.spawn(move || (0..4).map(|_| handle.random_open_tile()).collect::<Vec<_>>())
            })
            .collect();
        workers.into_iter().flat_map(|w| w.join().unwrap()).collect()
    });

    let unique: HashSet<Coord> = drawn.into_iter().collect();
    assert_eq!(unique.len(), 16);
}
