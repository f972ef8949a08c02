//! Component kind descriptors.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Every component kind the registry holds a store for.
///
/// Each store declares exactly one kind; values crossing the typed boundary
/// are checked against it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ComponentKind {
    /// Grid placement.
    Position,
    /// One-turn movement delta.
    Movement,
    /// Hit points and regeneration.
    Health,
    /// Mana and regeneration.
    Mana,
    /// AI behavior and cached path.
    Ai,
    /// Player-controlled marker.
    Input,
    /// Per-tile visibility level.
    Visibility,
    /// Marker for the entity whose turn is being resolved.
    CurrentTurn,
    /// Terrain cell.
    Tile,
    /// Glyph and color for the renderer.
    Render,
    /// Name and description.
    Information,
    /// Marker for things that lie on the floor.
    Item,
    /// Carried item handles.
    Inventory,
    /// Countdown to removal.
    Decay,
    /// Melee statistics.
    Combat,
}

impl ComponentKind {
    /// All kinds, in declaration order.
    pub const ALL: [ComponentKind; 15] = [
        Self::Position,
        Self::Movement,
        Self::Health,
        Self::Mana,
        Self::Ai,
        Self::Input,
        Self::Visibility,
        Self::CurrentTurn,
        Self::Tile,
        Self::Render,
        Self::Information,
        Self::Item,
        Self::Inventory,
        Self::Decay,
        Self::Combat,
    ];

    /// Returns the lowercase name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Movement => "movement",
            Self::Health => "health",
            Self::Mana => "mana",
            Self::Ai => "ai",
            Self::Input => "input",
            Self::Visibility => "visibility",
            Self::CurrentTurn => "current-turn",
            Self::Tile => "tile",
            Self::Render => "render",
            Self::Information => "information",
            Self::Item => "item",
            Self::Inventory => "inventory",
            Self::Decay => "decay",
            Self::Combat => "combat",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
