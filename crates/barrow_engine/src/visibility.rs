//! Ray-marched field of view.
//!
//! A fixed fan of rays is cast from the viewer, each stepping one cell at a
//! time up to the view radius. A ray lights every cell it enters, including
//! the first opaque one, and stops there or at the viewport edge.

use std::collections::HashSet;

use barrow_foundation::{Coord, EntityId, MapId, Result};
use barrow_storage::{Position, TileMap, Visibility, VisibilityLevel, World};
use tracing::trace;

use crate::config::EngineConfig;

/// Half-open rectangle `x0 <= x < x1`, `y0 <= y < y1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Viewport {
    /// Left edge (inclusive).
    pub x0: i32,
    /// Right edge (exclusive).
    pub x1: i32,
    /// Top edge (inclusive).
    pub y0: i32,
    /// Bottom edge (exclusive).
    pub y1: i32,
}

impl Viewport {
    /// Creates a viewport from its edges.
    #[must_use]
    pub const fn new(x0: i32, x1: i32, y0: i32, y1: i32) -> Self {
        Self { x0, x1, y0, y1 }
    }

    /// The whole of `map`.
    #[must_use]
    pub fn of_map(map: &TileMap) -> Self {
        Self::new(0, map.width, 0, map.height)
    }

    /// The square of cells within `radius` of `center`.
    #[must_use]
    pub fn around(center: Coord, radius: i32) -> Self {
        Self::new(
            center.x - radius,
            center.x + radius + 1,
            center.y - radius,
            center.y + radius + 1,
        )
    }

    /// The overlap of this viewport with `map`.
    #[must_use]
    pub fn clip(self, map: &TileMap) -> Self {
        Self::new(
            self.x0.max(0),
            self.x1.min(map.width),
            self.y0.max(0),
            self.y1.min(map.height),
        )
    }

    /// True if `coord` lies inside.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        (self.x0..self.x1).contains(&coord.x) && (self.y0..self.y1).contains(&coord.y)
    }
}

/// Casts rays from a precomputed direction table.
#[derive(Clone, Debug)]
pub struct VisibilityEngine {
    rays: Vec<(f64, f64)>,
    radius: i32,
}

impl VisibilityEngine {
    /// Builds `ray_count` rays spaced `step_degrees` apart, starting at 0°.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(ray_count: usize, step_degrees: f64, radius: i32) -> Self {
        let rays = (0..ray_count)
            .map(|i| {
                let angle = (i as f64 * step_degrees).to_radians();
                (angle.cos(), angle.sin())
            })
            .collect();
        Self { rays, radius }
    }

    /// Builds the engine described by `config`.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.ray_count, config.ray_step_degrees, config.fov_radius)
    }

    /// Maximum ray length in cells.
    #[must_use]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Number of rays per pass.
    #[must_use]
    pub fn ray_count(&self) -> usize {
        self.rays.len()
    }

    /// Cells lit from `origin`. The origin is always lit.
    #[allow(clippy::cast_possible_truncation)]
    pub fn cast_rays(
        &self,
        origin: Coord,
        viewport: Viewport,
        blocks_sight: impl Fn(Coord) -> bool,
    ) -> HashSet<Coord> {
        let mut lit = HashSet::new();
        lit.insert(origin);

        let ox = f64::from(origin.x);
        let oy = f64::from(origin.y);

        for &(cos, sin) in &self.rays {
            for step in 1..=self.radius {
                let r = f64::from(step);
                let cell = Coord::new((ox + cos * r).round() as i32, (oy + sin * r).round() as i32);
                if !viewport.contains(cell) {
                    break;
                }
                lit.insert(cell);
                if blocks_sight(cell) {
                    break;
                }
            }
        }

        lit
    }

    /// True if any ray from `origin` reaches `target`.
    pub fn can_see(
        &self,
        origin: Coord,
        target: Coord,
        viewport: Viewport,
        blocks_sight: impl Fn(Coord) -> bool,
    ) -> bool {
        origin == target
            || (origin.chebyshev(target) <= self.radius
                && self.cast_rays(origin, viewport, blocks_sight).contains(&target))
    }
}

/// Reclassifies tiles after a ray pass.
///
/// Cells in `lit` become [`VisibilityLevel::Lit`]. Any other cell that was
/// lit falls back to [`VisibilityLevel::Remembered`], including cells that
/// have since left the viewport. Unseen cells stay unseen.
pub fn apply_levels<'a>(
    lit: &HashSet<Coord>,
    tiles: impl IntoIterator<Item = (Coord, &'a mut Visibility)>,
) {
    for (coord, visibility) in tiles {
        if lit.contains(&coord) {
            visibility.level = VisibilityLevel::Lit;
        } else if visibility.level >= VisibilityLevel::Remembered {
            visibility.level = VisibilityLevel::Remembered;
        }
    }
}

/// Cells on `map` holding an opaque tile.
#[must_use]
pub fn opaque_cells(world: &World, map: MapId) -> HashSet<Coord> {
    let components = world.components();
    components
        .tiles
        .iter()
        .filter(|(_, tile)| tile.opaque)
        .filter_map(|(id, _)| components.positions.find(id))
        .filter(|pos| pos.map == map)
        .map(Position::coord)
        .collect()
}

/// Runs a full field-of-view pass for `viewer` and updates every tile
/// visibility on its map. Returns the lit set, empty if the viewer has no
/// position.
///
/// # Errors
///
/// Returns an `UnknownMap` fault if the viewer stands on an unregistered map.
pub fn refresh_visibility(
    world: &mut World,
    viewer: EntityId,
    engine: &VisibilityEngine,
) -> Result<HashSet<Coord>> {
    let Some(pos) = world.get::<Position>(viewer).cloned() else {
        return Ok(HashSet::new());
    };
    let origin = pos.coord();
    let viewport = Viewport::around(origin, engine.radius()).clip(world.require_map(pos.map)?);

    let opaque = opaque_cells(world, pos.map);
    let lit = engine.cast_rays(origin, viewport, |c| opaque.contains(&c));

    let components = world.components_mut();
    let positions = &components.positions;
    let tiles = components.visibilities.iter_mut().filter_map(|(id, vis)| {
        positions
            .find(id)
            .filter(|p| p.map == pos.map)
            .map(|p| (p.coord(), vis))
    });
    apply_levels(&lit, tiles);

    trace!(viewer = %viewer, origin = %origin, lit = lit.len(), "visibility refreshed");
    Ok(lit)
}

/// Line-of-sight test between two cells on `map`, bounded by `engine`'s
/// radius and the map edges.
///
/// # Errors
///
/// Returns an `UnknownMap` fault if `map` is not registered.
pub fn can_see(
    world: &World,
    engine: &VisibilityEngine,
    map: MapId,
    from: Coord,
    to: Coord,
) -> Result<bool> {
    let viewport = Viewport::around(from, engine.radius()).clip(world.require_map(map)?);
    let opaque = opaque_cells(world, map);
    Ok(engine.can_see(from, to, viewport, |c| opaque.contains(&c)))
}
