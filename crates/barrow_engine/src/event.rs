//! Turn events, retained for the message panel.

use std::collections::VecDeque;
use std::fmt;

use barrow_foundation::{Coord, EntityId};

/// Something observable that happened while resolving turns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnEvent {
    /// An entity changed cells.
    Moved {
        /// Who moved.
        actor: EntityId,
        /// Origin cell.
        from: Coord,
        /// Destination cell.
        to: Coord,
    },
    /// A move was refused: out of bounds or into a wall.
    Bumped {
        /// Who tried to move.
        actor: EntityId,
        /// The refused destination.
        at: Coord,
    },
    /// A melee hit.
    Attacked {
        /// Attacker.
        attacker: EntityId,
        /// Defender.
        defender: EntityId,
        /// Hit points removed.
        damage: i32,
    },
    /// An entity's health reached zero.
    Died {
        /// Who died.
        victim: EntityId,
        /// Its display name.
        name: String,
    },
    /// A corpse was left behind.
    CorpseSpawned {
        /// The corpse entity.
        corpse: EntityId,
        /// Where it lies.
        at: Coord,
    },
    /// A decay timer expired and its entity was removed.
    Decayed {
        /// The removed entity.
        entity: EntityId,
    },
    /// The spawner introduced a unit.
    Spawned {
        /// The new unit.
        entity: EntityId,
        /// Where it appeared.
        at: Coord,
    },
    /// Every actor acted once and post-cycle systems ran.
    CycleCompleted {
        /// Number of completed cycles so far.
        cycle: u64,
    },
    /// The player died.
    GameOver,
    /// An actor asked to end the run.
    QuitRequested {
        /// Who asked.
        actor: EntityId,
    },
}

impl fmt::Display for TurnEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Moved { actor, from, to } => write!(f, "{actor} moves {from} -> {to}"),
            Self::Bumped { actor, at } => write!(f, "{actor} bumps into {at}"),
            Self::Attacked {
                attacker,
                defender,
                damage,
            } => write!(f, "{attacker} hits {defender} for {damage}"),
            Self::Died { name, .. } => write!(f, "{name} dies"),
            Self::CorpseSpawned { at, .. } => write!(f, "a corpse falls at {at}"),
            Self::Decayed { entity } => write!(f, "{entity} rots away"),
            Self::Spawned { entity, at } => write!(f, "{entity} appears at {at}"),
            Self::CycleCompleted { cycle } => write!(f, "cycle {cycle} complete"),
            Self::GameOver => write!(f, "you die"),
            Self::QuitRequested { actor } => write!(f, "{actor} quits"),
        }
    }
}

/// Bounded event history. Oldest events drop first.
#[derive(Clone, Debug)]
pub struct EventLog {
    events: VecDeque<TurnEvent>,
    capacity: usize,
}

impl EventLog {
    /// Creates a log holding at most `capacity` events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Appends an event, evicting the oldest when full.
    pub fn push(&mut self, event: TurnEvent) {
        if self.capacity == 0 {
            return;
        }
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Iterates events oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &TurnEvent> + '_ {
        self.events.iter()
    }

    /// The most recent event.
    #[must_use]
    pub fn latest(&self) -> Option<&TurnEvent> {
        self.events.back()
    }

    /// Returns the number of retained events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no events are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drops every event.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
