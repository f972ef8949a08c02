//! Configuration for the simulation engine.

use barrow_foundation::Neighborhood;
use barrow_storage::AiBehavior;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Engine-wide tuning.
///
/// Built with [`EngineConfig::default`] and adjusted through the `with_*`
/// builder methods.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Seed for the AI and spawner RNG.
    pub seed: u64,

    /// Maximum ray length in cells, for both the player view and AI sight.
    pub fov_radius: i32,

    /// Number of rays cast per field-of-view pass.
    pub ray_count: usize,

    /// Angle between consecutive rays, in degrees.
    pub ray_step_degrees: f64,

    /// Post-cycle passes a corpse survives before it is removed.
    pub corpse_decay_turns: u32,

    /// Number of events the log retains.
    pub event_log_capacity: usize,

    /// Neighbour rule used by AI path searches.
    pub ai_neighborhood: Neighborhood,

    /// Population spawner settings.
    pub spawn: SpawnConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            fov_radius: 10,
            ray_count: 121,
            ray_step_degrees: 3.0,
            corpse_decay_turns: 20,
            event_log_capacity: 256,
            ai_neighborhood: Neighborhood::Squares,
            spawn: SpawnConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Builder method to set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder method to set the view radius.
    #[must_use]
    pub fn with_fov_radius(mut self, radius: i32) -> Self {
        self.fov_radius = radius;
        self
    }

    /// Builder method to set the corpse lifetime.
    #[must_use]
    pub fn with_corpse_decay_turns(mut self, turns: u32) -> Self {
        self.corpse_decay_turns = turns;
        self
    }

    /// Builder method to set the event log capacity.
    #[must_use]
    pub fn with_event_log_capacity(mut self, capacity: usize) -> Self {
        self.event_log_capacity = capacity;
        self
    }

    /// Builder method to set the AI neighbour rule.
    #[must_use]
    pub fn with_ai_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.ai_neighborhood = neighborhood;
        self
    }

    /// Builder method to set the spawner.
    #[must_use]
    pub fn with_spawn(mut self, spawn: SpawnConfig) -> Self {
        self.spawn = spawn;
        self
    }
}

/// Keeps the AI population from dropping below a floor.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpawnConfig {
    /// Minimum number of AI units on the player's map. Zero disables spawning.
    pub population_floor: usize,

    /// What gets spawned.
    pub template: ActorTemplate,
}

impl SpawnConfig {
    /// Spawner that keeps at least `floor` units of `template` alive.
    #[must_use]
    pub fn new(floor: usize, template: ActorTemplate) -> Self {
        Self {
            population_floor: floor,
            template,
        }
    }
}

/// Stats and presentation for a spawned AI unit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActorTemplate {
    /// Display name.
    pub name: String,
    /// Map glyph.
    pub glyph: char,
    /// Glyph color.
    pub color: [u8; 3],
    /// Maximum (and starting) health.
    pub health: i32,
    /// Melee power.
    pub power: i32,
    /// Melee defense.
    pub defense: i32,
    /// Starting behavior.
    pub behavior: AiBehavior,
}

impl Default for ActorTemplate {
    fn default() -> Self {
        Self {
            name: "goblin".to_string(),
            glyph: 'g',
            color: [0, 160, 0],
            health: 8,
            power: 3,
            defense: 0,
            behavior: AiBehavior::Attack,
        }
    }
}

impl ActorTemplate {
    /// Builder method to set the behavior.
    #[must_use]
    pub fn with_behavior(mut self, behavior: AiBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Builder method to set health, power and defense.
    #[must_use]
    pub fn with_stats(mut self, health: i32, power: i32, defense: i32) -> Self {
        self.health = health;
        self.power = power;
        self.defense = defense;
        self
    }
}
