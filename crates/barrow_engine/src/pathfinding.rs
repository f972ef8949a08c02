//! A* pathfinding over a set of walkable cells.
//!
//! Step cost and heuristic are both [`octile`] distance. Ties on `f` go to the
//! node closer to the goal, then to the node pushed first, so a given input
//! always yields the same path.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use barrow_foundation::{Coord, MapId, Neighborhood, Result, octile};
use barrow_storage::World;

/// Node in the A* open set.
#[derive(Debug, Clone, Copy)]
struct OpenNode {
    coord: Coord,
    f: f64,
    h: f64,
    seq: u64,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.h.total_cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Finds the cheapest route from `start` to `goal`.
///
/// `walkable` lists every enterable cell; anything absent is blocked. The
/// start cell itself need not be walkable, since the searcher stands on it.
/// The returned path ends at `goal` and begins with `start` only when
/// `include_start` is set. An empty path means the goal is unreachable.
#[must_use]
pub fn astar(
    walkable: &HashSet<Coord>,
    start: Coord,
    goal: Coord,
    neighborhood: Neighborhood,
    include_start: bool,
) -> Vec<Coord> {
    if start == goal {
        return if include_start { vec![start] } else { Vec::new() };
    }
    if !walkable.contains(&goal) {
        return Vec::new();
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: HashMap<Coord, Coord> = HashMap::new();
    let mut g_scores: HashMap<Coord, f64> = HashMap::new();
    let mut closed: HashSet<Coord> = HashSet::new();
    let mut seq = 0_u64;

    let h = octile(start, goal);
    g_scores.insert(start, 0.0);
    open_set.push(OpenNode {
        coord: start,
        f: h,
        h,
        seq,
    });

    while let Some(current) = open_set.pop() {
        if current.coord == goal {
            return reconstruct_path(&came_from, goal, include_start);
        }
        if !closed.insert(current.coord) {
            continue;
        }

        let current_g = g_scores.get(&current.coord).copied().unwrap_or(f64::INFINITY);

        for neighbor in neighborhood.neighbors(current.coord) {
            if !walkable.contains(&neighbor) || closed.contains(&neighbor) {
                continue;
            }

            let tentative_g = current_g + octile(current.coord, neighbor);
            let neighbor_g = g_scores.get(&neighbor).copied().unwrap_or(f64::INFINITY);

            if tentative_g < neighbor_g {
                came_from.insert(neighbor, current.coord);
                g_scores.insert(neighbor, tentative_g);

                seq += 1;
                let h = octile(neighbor, goal);
                open_set.push(OpenNode {
                    coord: neighbor,
                    f: tentative_g + h,
                    h,
                    seq,
                });
            }
        }
    }

    Vec::new()
}

fn reconstruct_path(
    came_from: &HashMap<Coord, Coord>,
    mut current: Coord,
    include_start: bool,
) -> Vec<Coord> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    if !include_start {
        path.pop();
    }
    path.reverse();
    path
}

/// Sum of octile step costs along a path.
#[must_use]
pub fn path_cost(path: &[Coord]) -> f64 {
    path.windows(2).map(|w| octile(w[0], w[1])).sum()
}

/// Cells of `map` not occupied by anything that blocks movement.
///
/// Blockers standing on a cell listed in `allow` are ignored, so a chaser can
/// path onto its target.
///
/// # Errors
///
/// Returns an `UnknownMap` fault if `map` is not registered.
pub fn walkable_cells(world: &World, map: MapId, allow: &[Coord]) -> Result<HashSet<Coord>> {
    let bounds = world.require_map(map)?;
    let mut walkable: HashSet<Coord> = bounds.cells().collect();

    for (_, pos) in world.components().positions.iter() {
        if pos.map == map && pos.blocks_movement && !allow.contains(&pos.coord()) {
            walkable.remove(&pos.coord());
        }
    }

    Ok(walkable)
}
