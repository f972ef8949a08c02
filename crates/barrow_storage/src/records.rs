//! Component records.
//!
//! Plain data attached to entities through typed stores. Every record type
//! has a matching [`ComponentKind`] and a variant in [`ComponentValue`].

#![allow(missing_docs)]

use barrow_foundation::{ComponentKind, Coord, EntityId, MapId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::component::Component;

/// Grid placement. Bounds are enforced by the mover, not the store.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub map: MapId,
    pub moveable: bool,
    pub blocks_movement: bool,
}

impl Position {
    /// A fixed, non-blocking placement (floors, items).
    #[must_use]
    pub fn new(x: i32, y: i32, map: MapId) -> Self {
        Self {
            x,
            y,
            map,
            moveable: false,
            blocks_movement: false,
        }
    }

    /// A moveable placement that blocks other movers (units).
    #[must_use]
    pub fn unit(x: i32, y: i32, map: MapId) -> Self {
        Self {
            moveable: true,
            blocks_movement: true,
            ..Self::new(x, y, map)
        }
    }

    /// A fixed placement that blocks movers (walls).
    #[must_use]
    pub fn wall(x: i32, y: i32, map: MapId) -> Self {
        Self {
            blocks_movement: true,
            ..Self::new(x, y, map)
        }
    }

    #[must_use]
    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }
}

/// One-turn movement delta, each axis in `-1..=1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Movement {
    pub dx: i32,
    pub dy: i32,
}

impl Movement {
    /// Creates a delta, clamping each axis to a single step.
    #[must_use]
    pub fn new(dx: i32, dy: i32) -> Self {
        Self {
            dx: dx.clamp(-1, 1),
            dy: dy.clamp(-1, 1),
        }
    }
}

/// Hit points with tick-based regeneration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Health {
    pub current: i32,
    pub max: i32,
    /// Cycles accumulated toward the next point of healing.
    pub heal_accumulator: u32,
    /// Cycles needed per point of healing.
    pub heal_threshold: u32,
}

impl Health {
    /// Full health with a default regeneration rate.
    #[must_use]
    pub fn new(max: i32) -> Self {
        Self {
            current: max,
            max,
            heal_accumulator: 0,
            heal_threshold: 10,
        }
    }

    #[must_use]
    pub fn with_heal_threshold(mut self, threshold: u32) -> Self {
        self.heal_threshold = threshold;
        self
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.current > 0
    }
}

/// Mana pool with tick-based regeneration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mana {
    pub current: i32,
    pub max: i32,
    pub regen_accumulator: u32,
    pub regen_threshold: u32,
}

impl Mana {
    #[must_use]
    pub fn new(max: i32) -> Self {
        Self {
            current: max,
            max,
            regen_accumulator: 0,
            regen_threshold: 5,
        }
    }
}

/// What an AI-driven entity does with its turn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AiBehavior {
    /// Step in a random direction.
    #[default]
    Wander,
    /// Chase and melee the player.
    Attack,
    /// Pass.
    Wait,
}

/// AI state.
///
/// `path` is cleared whenever line of sight to the target is regained.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ai {
    pub behavior: AiBehavior,
    /// Remaining steps toward the target, nearest first.
    pub path: Vec<Coord>,
    /// Whether the target was in sight at the previous decision.
    pub sees_target: bool,
}

impl Ai {
    #[must_use]
    pub fn new(behavior: AiBehavior) -> Self {
        Self {
            behavior,
            ..Self::default()
        }
    }
}

/// Marks an entity whose commands come from outside the core.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Input {
    pub needs_input: bool,
}

impl Default for Input {
    fn default() -> Self {
        Self { needs_input: true }
    }
}

/// Per-tile visibility classification.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VisibilityLevel {
    #[default]
    Unseen = 0,
    Remembered = 1,
    Lit = 2,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Visibility {
    pub level: VisibilityLevel,
}

/// Marker for the entity whose turn is being resolved.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurrentTurn;

/// Terrain cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tile {
    /// Blocks line of sight.
    pub opaque: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Render {
    pub glyph: char,
    pub color: [u8; 3],
    /// Draw order; higher layers draw over lower ones.
    pub layer: u8,
}

impl Render {
    #[must_use]
    pub fn new(glyph: char, color: [u8; 3], layer: u8) -> Self {
        Self {
            glyph,
            color,
            layer,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Information {
    pub name: String,
    pub description: String,
}

impl Information {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Inventory {
    pub items: Vec<EntityId>,
}

/// Countdown to removal, ticked once per scheduler cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Decay {
    pub turns_left: u32,
}

/// Melee statistics.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Combat {
    pub power: i32,
    pub defense: i32,
}

impl Default for Combat {
    fn default() -> Self {
        Self {
            power: 1,
            defense: 0,
        }
    }
}

macro_rules! component_kinds {
    ($($ty:ident),+ $(,)?) => {
        /// Tagged union over every component record.
        ///
        /// Used where values cross the typed boundary: spawn bundles from the
        /// map generator and store contents for persistence.
        #[derive(Clone, Debug, PartialEq)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub enum ComponentValue {
            $($ty($ty),)+
        }

        impl ComponentValue {
            /// The kind of the wrapped record.
            #[must_use]
            pub fn kind(&self) -> ComponentKind {
                match self {
                    $(Self::$ty(_) => ComponentKind::$ty,)+
                }
            }
        }

        $(
            impl Component for $ty {
                const KIND: ComponentKind = ComponentKind::$ty;

                fn into_value(self) -> ComponentValue {
                    ComponentValue::$ty(self)
                }

                fn from_value(value: ComponentValue) -> std::result::Result<Self, ComponentValue> {
                    match value {
                        ComponentValue::$ty(inner) => Ok(inner),
                        other => Err(other),
                    }
                }
            }

            impl From<$ty> for ComponentValue {
                fn from(value: $ty) -> Self {
                    ComponentValue::$ty(value)
                }
            }
        )+
    };
}

component_kinds!(
    Position,
    Movement,
    Health,
    Mana,
    Ai,
    Input,
    Visibility,
    CurrentTurn,
    Tile,
    Render,
    Information,
    Item,
    Inventory,
    Decay,
    Combat,
);
