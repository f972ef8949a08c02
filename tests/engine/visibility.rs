//! Integration tests for ray field of view
//!
//! Tests determinism, level transitions, and occlusion on world maps.

use std::collections::{BTreeMap, HashSet};

use barrow_engine::{
    EngineConfig, VisibilityEngine, Viewport, open_map, place_wall, refresh_visibility,
    spawn_player,
};
use barrow_foundation::{Coord, EntityId, MapId};
use barrow_storage::{Position, Visibility, VisibilityLevel, World};

fn levels(world: &World) -> BTreeMap<Coord, VisibilityLevel> {
    let c = world.components();
    c.visibilities
        .iter()
        .filter_map(|(id, vis)| c.positions.find(id).map(|p| (p.coord(), vis.level)))
        .collect()
}

fn arena() -> (World, EntityId, VisibilityEngine) {
    let mut world = World::new();
    let map = MapId(0);
    open_map(&mut world, map, 30, 30).unwrap();
    for y in 10..20 {
        place_wall(&mut world, map, Coord::new(15, y)).unwrap();
    }
    let player = spawn_player(&mut world, map, Coord::new(12, 15)).unwrap();
    (world, player, VisibilityEngine::from_config(&EngineConfig::default()))
}

fn move_to(world: &mut World, id: EntityId, to: Coord) {
    let pos = world.get_mut::<Position>(id).unwrap();
    pos.x = to.x;
    pos.y = to.y;
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn repeated_pass_is_identical() {
    let (mut world, player, engine) = arena();

    let first = refresh_visibility(&mut world, player, &engine).unwrap();
    let after_first = levels(&world);
    let second = refresh_visibility(&mut world, player, &engine).unwrap();

    assert_eq!(first, second);
    assert_eq!(levels(&world), after_first);
}

#[test]
fn cast_is_pure() {
    let engine = VisibilityEngine::from_config(&EngineConfig::default());
    let viewport = Viewport::new(0, 40, 0, 40);
    let walls: HashSet<_> = (0..40).map(|y| Coord::new(25, y)).collect();

    let a = engine.cast_rays(Coord::new(20, 20), viewport, |c| walls.contains(&c));
    let b = engine.cast_rays(Coord::new(20, 20), viewport, |c| walls.contains(&c));
    assert_eq!(a, b);
}

// =============================================================================
// Level Transitions
// =============================================================================

#[test]
fn lit_tiles_outside_new_view_drop_to_remembered() {
    let (mut world, player, engine) = arena();

    let before = refresh_visibility(&mut world, player, &engine).unwrap();
    move_to(&mut world, player, Coord::new(5, 15));
    let after = refresh_visibility(&mut world, player, &engine).unwrap();

    let now = levels(&world);
    let mut dropped = 0;
    for coord in before.difference(&after) {
        if let Some(level) = now.get(coord) {
            assert_eq!(*level, VisibilityLevel::Remembered, "{coord} not dimmed");
            dropped += 1;
        }
    }
    assert!(dropped > 0);
}

#[test]
fn every_lit_coord_with_a_tile_is_level_two() {
    let (mut world, player, engine) = arena();
    let lit = refresh_visibility(&mut world, player, &engine).unwrap();

    let now = levels(&world);
    for coord in &lit {
        if let Some(level) = now.get(coord) {
            assert_eq!(*level, VisibilityLevel::Lit);
        }
    }
    assert!(lit.contains(&Coord::new(12, 15)));
}

#[test]
fn never_seen_tiles_stay_unseen() {
    let (mut world, player, engine) = arena();
    refresh_visibility(&mut world, player, &engine).unwrap();

    let now = levels(&world);
    assert_eq!(now[&Coord::new(29, 29)], VisibilityLevel::Unseen);
    assert_eq!(now[&Coord::new(18, 15)], VisibilityLevel::Unseen);
}

#[test]
fn wall_face_is_lit_but_not_beyond() {
    let (mut world, player, engine) = arena();
    let lit = refresh_visibility(&mut world, player, &engine).unwrap();

    assert!(lit.contains(&Coord::new(15, 15)));
    assert!(!lit.contains(&Coord::new(16, 15)));
}

#[test]
fn viewer_without_position_sees_nothing() {
    let (mut world, _, engine) = arena();
    let ghost = world.create().unwrap();
    world.insert(ghost, Visibility::default());

    assert!(refresh_visibility(&mut world, ghost, &engine).unwrap().is_empty());
}
