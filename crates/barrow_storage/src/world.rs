//! World state: the entity registry, the component registry, and tile maps.
//!
//! [`Components`] is a fixed struct of typed stores, one per
//! [`ComponentKind`]. Access is checked at compile time; the only dynamic
//! path is [`Components::insert_into`], used when values arrive as
//! [`ComponentValue`]s from outside the core.

use std::collections::BTreeMap;

use barrow_foundation::{ComponentKind, Coord, EntityId, Error, MapId, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentStore};
use crate::entity::EntityRegistry;
use crate::map::TileMap;
use crate::records::{
    Ai, Combat, ComponentValue, CurrentTurn, Decay, Health, Information, Input, Inventory, Item,
    Mana, Movement, Position, Render, Tile, Visibility,
};

/// Component types with a dedicated store in [`Components`].
pub trait Stored: Component {
    /// The store for this type.
    fn store(components: &Components) -> &ComponentStore<Self>;

    /// The store for this type, mutably.
    fn store_mut(components: &mut Components) -> &mut ComponentStore<Self>;
}

macro_rules! registry {
    ($($field:ident : $ty:ident),+ $(,)?) => {
        /// One typed store per component kind.
        ///
        /// Fields are public so systems can borrow disjoint stores at once,
        /// e.g. join positions and health while mutating AI state.
        #[derive(Clone, Debug, Default)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[allow(missing_docs)]
        pub struct Components {
            $(pub $field: ComponentStore<$ty>,)+
        }

        impl Components {
            /// Inserts a dynamic value into the store for `kind`.
            ///
            /// # Errors
            ///
            /// Returns a `TypeMismatch` fault if the value is not of `kind`.
            pub fn insert_into(
                &mut self,
                kind: ComponentKind,
                id: EntityId,
                value: ComponentValue,
            ) -> Result<()> {
                match kind {
                    $(ComponentKind::$ty => self.$field.insert_value(id, value),)+
                }
            }

            /// Removes an entity's components from every store.
            pub fn remove_entity(&mut self, id: EntityId) {
                $(self.$field.remove(id);)+
            }

            /// Kinds attached to an entity, in declaration order.
            #[must_use]
            pub fn kinds_of(&self, id: EntityId) -> Vec<ComponentKind> {
                let mut kinds = Vec::new();
                $(
                    if self.$field.contains(id) {
                        kinds.push(ComponentKind::$ty);
                    }
                )+
                kinds
            }

            /// The contents of one store as dynamic values, sorted by id.
            #[must_use]
            pub fn export(&self, kind: ComponentKind) -> Vec<(EntityId, ComponentValue)> {
                match kind {
                    $(ComponentKind::$ty => self.$field.export(),)+
                }
            }

            /// Number of entries in the store for `kind`.
            #[must_use]
            pub fn count(&self, kind: ComponentKind) -> usize {
                match kind {
                    $(ComponentKind::$ty => self.$field.len(),)+
                }
            }
        }

        $(
            impl Stored for $ty {
                fn store(components: &Components) -> &ComponentStore<Self> {
                    &components.$field
                }

                fn store_mut(components: &mut Components) -> &mut ComponentStore<Self> {
                    &mut components.$field
                }
            }
        )+
    };
}

registry!(
    positions: Position,
    movements: Movement,
    healths: Health,
    manas: Mana,
    ais: Ai,
    inputs: Input,
    visibilities: Visibility,
    current_turn: CurrentTurn,
    tiles: Tile,
    renders: Render,
    information: Information,
    items: Item,
    inventories: Inventory,
    decays: Decay,
    combat: Combat,
);

impl Components {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The store for `T`.
    #[must_use]
    pub fn store<T: Stored>(&self) -> &ComponentStore<T> {
        T::store(self)
    }

    /// The store for `T`, mutably.
    pub fn store_mut<T: Stored>(&mut self) -> &mut ComponentStore<T> {
        T::store_mut(self)
    }

    /// Inserts a dynamic value into the store matching its own kind.
    ///
    /// # Errors
    ///
    /// Propagates faults from [`Components::insert_into`].
    pub fn insert_value(&mut self, id: EntityId, value: ComponentValue) -> Result<()> {
        self.insert_into(value.kind(), id, value)
    }
}

/// The complete simulation state.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct World {
    entities: EntityRegistry,
    components: Components,
    maps: BTreeMap<MapId, TileMap>,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The entity registry.
    #[must_use]
    pub fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    /// The component registry.
    #[must_use]
    pub fn components(&self) -> &Components {
        &self.components
    }

    /// The component registry, mutably.
    pub fn components_mut(&mut self) -> &mut Components {
        &mut self.components
    }

    // --- Entities ---

    /// Allocates a new entity with no components.
    ///
    /// # Errors
    ///
    /// Returns an `Internal` fault if the id space is exhausted.
    pub fn create(&mut self) -> Result<EntityId> {
        self.entities.create()
    }

    /// Allocates a new entity and attaches every value in `bundle`.
    ///
    /// # Errors
    ///
    /// Propagates allocation and store faults.
    pub fn spawn_bundle(
        &mut self,
        bundle: impl IntoIterator<Item = ComponentValue>,
    ) -> Result<EntityId> {
        let id = self.entities.create()?;
        for value in bundle {
            self.components.insert_value(id, value)?;
        }
        Ok(id)
    }

    /// Removes an entity from the registry and from every store.
    ///
    /// Returns `true` if the entity was live.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        self.components.remove_entity(id);
        self.entities.remove(id)
    }

    /// Checks whether an entity is live.
    #[must_use]
    pub fn is_live(&self, id: EntityId) -> bool {
        self.entities.is_live(id)
    }

    // --- Components ---

    /// Attaches a component.
    pub fn insert<T: Stored>(&mut self, id: EntityId, value: T) {
        T::store_mut(&mut self.components).add(id, value);
    }

    /// Looks up a component.
    #[must_use]
    pub fn get<T: Stored>(&self, id: EntityId) -> Option<&T> {
        T::store(&self.components).find(id)
    }

    /// Looks up a component for mutation.
    pub fn get_mut<T: Stored>(&mut self, id: EntityId) -> Option<&mut T> {
        T::store_mut(&mut self.components).find_mut(id)
    }

    /// Checks if an entity has a component.
    #[must_use]
    pub fn has<T: Stored>(&self, id: EntityId) -> bool {
        T::store(&self.components).contains(id)
    }

    /// Detaches a component. Returns whether it was present.
    pub fn remove<T: Stored>(&mut self, id: EntityId) -> bool {
        T::store_mut(&mut self.components).remove(id)
    }

    // --- Maps ---

    /// Registers (or replaces) a tile map.
    pub fn insert_map(&mut self, map: TileMap) {
        self.maps.insert(map.id, map);
    }

    /// Looks up a tile map.
    #[must_use]
    pub fn map(&self, id: MapId) -> Option<&TileMap> {
        self.maps.get(&id)
    }

    /// Looks up a tile map that must exist.
    ///
    /// # Errors
    ///
    /// Returns an `UnknownMap` fault if no map is registered under `id`.
    pub fn require_map(&self, id: MapId) -> Result<&TileMap> {
        self.maps.get(&id).ok_or_else(|| Error::unknown_map(id))
    }

    /// Iterates registered maps in id order.
    pub fn maps(&self) -> impl Iterator<Item = &TileMap> + '_ {
        self.maps.values()
    }

    // --- Spatial lookups ---

    /// Entities positioned at `coord` on `map`, in creation order.
    #[must_use]
    pub fn entities_at(&self, map: MapId, coord: Coord) -> Vec<EntityId> {
        let mut found: Vec<_> = self
            .components
            .positions
            .iter()
            .filter(|(_, pos)| pos.map == map && pos.coord() == coord)
            .map(|(id, _)| id)
            .collect();
        found.sort_unstable();
        found
    }

    /// Entities at `coord` on `map` whose position blocks movement.
    #[must_use]
    pub fn blockers_at(&self, map: MapId, coord: Coord) -> Vec<EntityId> {
        self.entities_at(map, coord)
            .into_iter()
            .filter(|id| {
                self.components
                    .positions
                    .find(*id)
                    .is_some_and(|pos| pos.blocks_movement)
            })
            .collect()
    }

    // --- Persistence hooks ---

    /// Makes a saved entity id live again.
    ///
    /// # Errors
    ///
    /// Returns a `DuplicateId` fault if the id is already live.
    pub fn restore_entity(&mut self, id: EntityId) -> Result<()> {
        self.entities.add(id)
    }

    /// Loads saved rows into the store for `kind`.
    ///
    /// # Errors
    ///
    /// Returns a `TypeMismatch` fault on the first row whose value is not of
    /// `kind`; earlier rows stay inserted.
    pub fn restore_store(
        &mut self,
        kind: ComponentKind,
        rows: impl IntoIterator<Item = (EntityId, ComponentValue)>,
    ) -> Result<()> {
        for (id, value) in rows {
            self.components.insert_into(kind, id, value)?;
        }
        Ok(())
    }

    /// The contents of the store for `kind`, sorted by id.
    #[must_use]
    pub fn export_store(&self, kind: ComponentKind) -> Vec<(EntityId, ComponentValue)> {
        self.components.export(kind)
    }
}
