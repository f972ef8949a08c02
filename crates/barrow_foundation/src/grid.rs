//! Grid geometry: coordinates, compass directions, neighbourhoods, and the
//! octile distance metric shared by the pathfinder and the AI.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Weight of the diagonal component in [`octile`].
const DIAGONAL_WEIGHT: f64 = 0.4;

/// A cell on a tile grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Coord {
    /// Creates a coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this coordinate shifted by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns this coordinate moved one step in `dir`.
    #[must_use]
    pub const fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        self.offset(dx, dy)
    }

    /// Chebyshev (king-move) distance.
    #[must_use]
    pub fn chebyshev(self, other: Coord) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// True if `other` is one king move away (not the same cell).
    #[must_use]
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.chebyshev(other) == 1
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Octile distance: `0.4 * min(dx, dy) + max(dx, dy)`.
///
/// Admissible for 8-directional movement; on 4-directional grids it
/// underestimates, so it stays a valid heuristic there too.
#[must_use]
pub fn octile(a: Coord, b: Coord) -> f64 {
    let dx = f64::from((a.x - b.x).abs());
    let dy = f64::from((a.y - b.y).abs());
    DIAGONAL_WEIGHT * dx.min(dy) + dx.max(dy)
}

/// The eight compass directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// `(0, -1)`
    North,
    /// `(0, 1)`
    South,
    /// `(1, 0)`
    East,
    /// `(-1, 0)`
    West,
    /// `(1, -1)`
    NorthEast,
    /// `(-1, -1)`
    NorthWest,
    /// `(1, 1)`
    SouthEast,
    /// `(-1, 1)`
    SouthWest,
}

impl Direction {
    /// Orthogonal directions.
    pub const CARDINAL: [Direction; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// All eight directions, orthogonals first.
    pub const ALL: [Direction; 8] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    /// Returns the `(dx, dy)` offset. `y` grows downward.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
            Self::NorthEast => (1, -1),
            Self::NorthWest => (-1, -1),
            Self::SouthEast => (1, 1),
            Self::SouthWest => (-1, 1),
        }
    }

    /// Maps a delta back to a direction. `(0, 0)` and non-unit deltas have none.
    #[must_use]
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.delta() == (dx, dy))
    }

    /// Direction of the single king move from `from` toward `to`.
    #[must_use]
    pub fn toward(from: Coord, to: Coord) -> Option<Self> {
        Self::from_delta((to.x - from.x).signum(), (to.y - from.y).signum())
    }
}

/// Neighbour generation rule for grid searches.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Neighborhood {
    /// Four orthogonal neighbours.
    Cardinal,
    /// All eight surrounding squares.
    #[default]
    Squares,
}

impl Neighborhood {
    /// Returns the directions this rule generates.
    #[must_use]
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Self::Cardinal => &Direction::CARDINAL,
            Self::Squares => &Direction::ALL,
        }
    }

    /// Iterates the neighbours of `coord`.
    pub fn neighbors(self, coord: Coord) -> impl Iterator<Item = Coord> {
        self.directions().iter().map(move |d| coord.step(*d))
    }
}
