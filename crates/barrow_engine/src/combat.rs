//! Melee resolution and death handling.

use barrow_foundation::{EntityId, Result};
use barrow_storage::{Combat, Health, Information, Input, Inventory, Position, World};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::event::{EventLog, TurnEvent};
use crate::spawn::spawn_corpse;

/// Result of a single melee exchange.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeleeOutcome {
    /// The defender survived.
    Hit {
        /// Hit points removed.
        damage: i32,
    },
    /// The defender died and was removed.
    Killed {
        /// The corpse left behind, if the defender had a position.
        corpse: Option<EntityId>,
        /// Whether the defender was player-controlled.
        was_player: bool,
    },
}

/// Whether `attacker` is willing to hit `defender`.
///
/// Player-controlled entities fight anything with health; AI units only
/// fight player-controlled ones.
#[must_use]
pub fn is_hostile(world: &World, attacker: EntityId, defender: EntityId) -> bool {
    if attacker == defender || !world.has::<Health>(defender) {
        return false;
    }
    world.has::<Input>(attacker) || world.has::<Input>(defender)
}

/// Damage dealt by one blow: power minus defense, never negative.
#[must_use]
pub fn damage(attacker: &Combat, defender: &Combat) -> i32 {
    (attacker.power - defender.defense).max(0)
}

/// `attacker` strikes `defender` once.
///
/// Entities without [`Combat`] fight with the default stats. Returns `None`
/// if the defender has no health to lose.
///
/// # Errors
///
/// Propagates faults from spawning the corpse.
pub fn melee(
    world: &mut World,
    attacker: EntityId,
    defender: EntityId,
    config: &EngineConfig,
    log: &mut EventLog,
) -> Result<Option<MeleeOutcome>> {
    let offense = world.get::<Combat>(attacker).copied().unwrap_or_default();
    let defense = world.get::<Combat>(defender).copied().unwrap_or_default();
    let dealt = damage(&offense, &defense);

    let Some(health) = world.get_mut::<Health>(defender) else {
        return Ok(None);
    };
    health.current -= dealt;
    let alive = health.is_alive();

    debug!(attacker = %attacker, defender = %defender, damage = dealt, "melee");
    log.push(TurnEvent::Attacked {
        attacker,
        defender,
        damage: dealt,
    });

    if alive {
        return Ok(Some(MeleeOutcome::Hit { damage: dealt }));
    }

    let was_player = world.has::<Input>(defender);
    let corpse = kill(world, defender, config, log)?;
    Ok(Some(MeleeOutcome::Killed { corpse, was_player }))
}

/// Removes `victim` from the world, dropping its inventory where it stood
/// and leaving a decaying corpse. Returns the corpse.
///
/// # Errors
///
/// Returns an `Internal` fault if the corpse cannot be allocated; the
/// victim is left in place.
pub fn kill(
    world: &mut World,
    victim: EntityId,
    config: &EngineConfig,
    log: &mut EventLog,
) -> Result<Option<EntityId>> {
    let name = world
        .get::<Information>(victim)
        .map_or_else(|| victim.to_string(), |info| info.name.clone());
    let position = world.get::<Position>(victim).cloned();
    let corpse = match &position {
        Some(pos) => Some(spawn_corpse(
            world,
            &name,
            pos.map,
            pos.coord(),
            config.corpse_decay_turns,
        )?),
        None => None,
    };

    let items = world
        .components_mut()
        .inventories
        .take(victim)
        .map(|inv| inv.items)
        .unwrap_or_default();
    if let Some(pos) = &position {
        for &item in &items {
            if world.is_live(item) {
                world.insert(item, Position::new(pos.x, pos.y, pos.map));
            }
        }
    }

    world.destroy(victim);
    info!(victim = %victim, name = %name, "died");
    log.push(TurnEvent::Died { victim, name });

    if let (Some(corpse), Some(pos)) = (corpse, position) {
        log.push(TurnEvent::CorpseSpawned {
            corpse,
            at: pos.coord(),
        });
    }

    Ok(corpse)
}

/// Gives `item` to `holder`, lifting it off the floor.
pub fn pick_up(world: &mut World, holder: EntityId, item: EntityId) {
    world.remove::<Position>(item);
    match world.get_mut::<Inventory>(holder) {
        Some(inventory) => inventory.items.push(item),
        None => world.insert(holder, Inventory { items: vec![item] }),
    }
}
