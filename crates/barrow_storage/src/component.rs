//! Typed component storage.
//!
//! Each component kind lives in its own sparse map from entity handle to
//! value. The store's element type is fixed at compile time; the only way a
//! mismatched value can reach a store is through the dynamic
//! [`ComponentValue`] path, which is checked against the store's declared kind.

use std::collections::HashMap;
use std::collections::hash_map;

use barrow_foundation::{ComponentKind, EntityId, Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::records::ComponentValue;

/// A plain data record that can be stored against an entity.
pub trait Component: Clone + 'static {
    /// The kind the store for this type declares.
    const KIND: ComponentKind;

    /// Wraps this record in the dynamic value union.
    fn into_value(self) -> ComponentValue;

    /// Unwraps a dynamic value, handing it back untouched on a kind mismatch.
    ///
    /// # Errors
    ///
    /// Returns the original value if it holds a different kind.
    fn from_value(value: ComponentValue) -> std::result::Result<Self, ComponentValue>;
}

/// Sparse map from entity handle to one component kind.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComponentStore<T> {
    data: HashMap<EntityId, T>,
}

impl<T> Default for ComponentStore<T> {
    fn default() -> Self {
        Self {
            data: HashMap::new(),
        }
    }
}

impl<T: Component> ComponentStore<T> {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The kind this store declares.
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        T::KIND
    }

    /// Attaches a component, replacing any previous value.
    pub fn add(&mut self, id: EntityId, value: T) {
        self.data.insert(id, value);
    }

    /// Attaches a dynamically typed component.
    ///
    /// # Errors
    ///
    /// Returns a `TypeMismatch` fault if the value is not of this store's kind.
    pub fn insert_value(&mut self, id: EntityId, value: ComponentValue) -> Result<()> {
        let value = T::from_value(value)
            .map_err(|other| Error::type_mismatch(T::KIND, other.kind()))?;
        self.data.insert(id, value);
        Ok(())
    }

    /// Detaches a component. Returns whether an entry existed.
    pub fn remove(&mut self, id: EntityId) -> bool {
        self.data.remove(&id).is_some()
    }

    /// Detaches and returns a component.
    pub fn take(&mut self, id: EntityId) -> Option<T> {
        self.data.remove(&id)
    }

    /// Looks up a component. Absence is the common case, not a fault.
    #[must_use]
    pub fn find(&self, id: EntityId) -> Option<&T> {
        self.data.get(&id)
    }

    /// Looks up a component for mutation.
    pub fn find_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.data.get_mut(&id)
    }

    /// Checks if an entity has this component.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.data.contains_key(&id)
    }

    /// Iterates `(id, &value)` pairs in map order (unspecified).
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> + '_ {
        self.data.iter().map(|(id, value)| (*id, value))
    }

    /// Iterates `(id, &mut value)` pairs in map order (unspecified).
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> + '_ {
        self.data.iter_mut().map(|(id, value)| (*id, value))
    }

    /// Iterates the handles that have this component.
    pub fn ids(&self) -> hash_map::Keys<'_, EntityId, T> {
        self.data.keys()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Copies the contents out as dynamic values, for persistence collaborators.
    #[must_use]
    pub fn export(&self) -> Vec<(EntityId, ComponentValue)> {
        let mut rows: Vec<_> = self
            .data
            .iter()
            .map(|(id, value)| (*id, value.clone().into_value()))
            .collect();
        rows.sort_by_key(|(id, _)| *id);
        rows
    }
}
