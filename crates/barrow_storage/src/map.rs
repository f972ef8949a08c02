//! Tile map bounds.

use barrow_foundation::{Coord, MapId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dimensions of one map. Authoritative for position bounds and for sizing
/// the pathfinding and visibility grids.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TileMap {
    /// Map identifier.
    pub id: MapId,
    /// Number of columns.
    pub width: i32,
    /// Number of rows.
    pub height: i32,
}

impl TileMap {
    /// Creates a map descriptor.
    #[must_use]
    pub fn new(id: MapId, width: i32, height: i32) -> Self {
        Self { id, width, height }
    }

    /// True if `0 <= x < width` and `0 <= y < height`.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        (0..self.width).contains(&coord.x) && (0..self.height).contains(&coord.y)
    }

    /// Iterates every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Coord::new(x, y)))
    }
}
