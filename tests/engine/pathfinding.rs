//! Integration tests for A* pathfinding
//!
//! Tests open-grid routes, unreachable goals, and searches over world maps.

use std::collections::HashSet;

use barrow_engine::{astar, open_map, path_cost, place_wall, spawn_player, walkable_cells};
use barrow_foundation::{Coord, Direction, MapId, Neighborhood};
use barrow_storage::World;

fn open_grid(width: i32, height: i32) -> HashSet<Coord> {
    (0..height)
        .flat_map(|y| (0..width).map(move |x| Coord::new(x, y)))
        .collect()
}

// =============================================================================
// Open Grids
// =============================================================================

#[test]
fn five_by_five_corner_to_corner() {
    let grid = open_grid(5, 5);

    let path = astar(&grid, Coord::new(0, 0), Coord::new(4, 4), Neighborhood::Squares, true);

    assert_eq!(path.len(), 5);
    for step in path.windows(2) {
        let (dx, dy) = (step[1].x - step[0].x, step[1].y - step[0].y);
        assert!(Direction::from_delta(dx, dy).is_some(), "bad step {dx},{dy}");
    }
    let expected = 4.0 * std::f64::consts::SQRT_2;
    assert!(
        (path_cost(&path) - expected).abs() < 0.1,
        "cost {} vs {expected}",
        path_cost(&path)
    );
}

#[test]
fn removing_goal_makes_it_unreachable() {
    let mut grid = open_grid(5, 5);
    grid.remove(&Coord::new(4, 4));

    assert!(astar(&grid, Coord::new(0, 0), Coord::new(4, 4), Neighborhood::Squares, true).is_empty());
    assert!(astar(&grid, Coord::new(0, 0), Coord::new(4, 4), Neighborhood::Cardinal, false).is_empty());
}

#[test]
fn goal_outside_grid_is_unreachable() {
    let grid = open_grid(3, 3);
    assert!(astar(&grid, Coord::new(0, 0), Coord::new(9, 9), Neighborhood::Squares, true).is_empty());
}

// =============================================================================
// World Maps
// =============================================================================

#[test]
fn path_routes_through_gap_in_wall() {
    let mut world = World::new();
    let map = MapId(0);
    open_map(&mut world, map, 9, 7).unwrap();
    for y in 0..7 {
        if y != 5 {
            place_wall(&mut world, map, Coord::new(4, y)).unwrap();
        }
    }

    let walkable = walkable_cells(&world, map, &[]).unwrap();
    let path = astar(&walkable, Coord::new(1, 1), Coord::new(7, 1), Neighborhood::Squares, true);

    assert!(path.contains(&Coord::new(4, 5)));
    assert!(path.iter().all(|c| walkable.contains(c) || *c == Coord::new(1, 1)));
}

#[test]
fn units_block_unless_allowed() {
    let mut world = World::new();
    let map = MapId(0);
    open_map(&mut world, map, 5, 1).unwrap();
    spawn_player(&mut world, map, Coord::new(2, 0)).unwrap();

    let blocked = walkable_cells(&world, map, &[]).unwrap();
    assert!(astar(&blocked, Coord::new(0, 0), Coord::new(4, 0), Neighborhood::Squares, true).is_empty());

    let allowed = walkable_cells(&world, map, &[Coord::new(2, 0)]).unwrap();
    assert_eq!(
        astar(&allowed, Coord::new(0, 0), Coord::new(2, 0), Neighborhood::Squares, false),
        vec![Coord::new(1, 0), Coord::new(2, 0)]
    );
}
