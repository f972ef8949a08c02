//! Entity lifecycle management.
//!
//! The `EntityRegistry` issues handles from a strictly increasing counter
//! and keeps the live handles in creation order. That order is the canonical
//! turn order, so removal must never reorder the survivors.

use std::collections::HashSet;

use barrow_foundation::{EntityId, Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Issues entity handles and tracks which are live.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityRegistry {
    /// Next counter value to hand out.
    next: u64,
    /// Live handles in creation order.
    live: Vec<EntityId>,
    /// Membership index over `live`.
    live_set: HashSet<EntityId>,
    /// Handles that have been removed. Never handed out again.
    removed: HashSet<EntityId>,
}

impl EntityRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next handle and appends it to the live list.
    ///
    /// # Errors
    ///
    /// Returns an `Internal` fault once the counter cannot advance.
    pub fn create(&mut self) -> Result<EntityId> {
        let id = EntityId::new(self.next);
        self.next = advance(id)?;
        self.live.push(id);
        self.live_set.insert(id);
        Ok(id)
    }

    /// Removes a live handle.
    ///
    /// Returns `true` if the handle was live. The integer is recorded as
    /// removed and is not recycled.
    pub fn remove(&mut self, id: EntityId) -> bool {
        if !self.live_set.remove(&id) {
            return false;
        }
        // `retain` keeps the relative order of the survivors.
        self.live.retain(|live| *live != id);
        self.removed.insert(id);
        true
    }

    /// Makes a specific handle live again, for restoring saved state.
    ///
    /// The handle is placed at its creation-order position and the counter
    /// advances past it so `create` never repeats it.
    ///
    /// # Errors
    ///
    /// Returns a `DuplicateId` fault if the handle is already live, and an
    /// `Internal` fault if no handle could follow it.
    pub fn add(&mut self, id: EntityId) -> Result<()> {
        if self.live_set.contains(&id) {
            return Err(Error::duplicate_id(id));
        }
        let after = advance(id)?;
        let pos = self.live.partition_point(|live| *live < id);
        self.live.insert(pos, id);
        self.live_set.insert(id);
        self.removed.remove(&id);
        self.next = self.next.max(after);
        Ok(())
    }

    /// Checks whether a handle is live.
    #[must_use]
    pub fn is_live(&self, id: EntityId) -> bool {
        self.live_set.contains(&id)
    }

    /// Checks whether a handle has been removed.
    #[must_use]
    pub fn is_removed(&self, id: EntityId) -> bool {
        self.removed.contains(&id)
    }

    /// Live handles in creation order.
    #[must_use]
    pub fn live(&self) -> &[EntityId] {
        &self.live
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Returns true if there are no live entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

/// The counter value following `id`. The top of the id space is never
/// issued, so the counter cannot wrap back onto a used handle.
fn advance(id: EntityId) -> Result<u64> {
    id.raw()
        .checked_add(1)
        .ok_or_else(|| Error::internal("entity id space exhausted"))
}
