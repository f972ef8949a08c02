//! Systems that run once per full scheduling pass.

use barrow_foundation::{Coord, EntityId, Result};
use barrow_storage::{Input, Position, World};
use rand::Rng;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::event::{EventLog, TurnEvent};
use crate::pathfinding::walkable_cells;
use crate::spawn::spawn_actor;

/// Ticks every decay timer and removes entities whose timer ran out.
/// Returns the removed entities.
pub fn tick_decay(world: &mut World, log: &mut EventLog) -> Vec<EntityId> {
    let mut expired: Vec<EntityId> = world
        .components_mut()
        .decays
        .iter_mut()
        .filter_map(|(id, decay)| {
            decay.turns_left = decay.turns_left.saturating_sub(1);
            (decay.turns_left == 0).then_some(id)
        })
        .collect();
    expired.sort_unstable();

    for &id in &expired {
        world.destroy(id);
        log.push(TurnEvent::Decayed { entity: id });
    }
    if !expired.is_empty() {
        debug!(count = expired.len(), "decayed");
    }
    expired
}

/// Advances health and mana regeneration.
///
/// Each pass below the cap adds one to the accumulator; reaching the
/// threshold restores one point and resets it. At the cap the accumulator
/// stays at zero. Dead entities do not regenerate.
pub fn regenerate(world: &mut World) {
    let components = world.components_mut();

    for (_, health) in components.healths.iter_mut() {
        if !health.is_alive() || health.current >= health.max {
            health.heal_accumulator = 0;
            continue;
        }
        health.heal_accumulator += 1;
        if health.heal_accumulator >= health.heal_threshold {
            health.current += 1;
            health.heal_accumulator = 0;
        }
    }

    for (_, mana) in components.manas.iter_mut() {
        if mana.current >= mana.max {
            mana.regen_accumulator = 0;
            continue;
        }
        mana.regen_accumulator += 1;
        if mana.regen_accumulator >= mana.regen_threshold {
            mana.current += 1;
            mana.regen_accumulator = 0;
        }
    }
}

/// Tops the AI population on the player's map up to the configured floor.
///
/// Units appear on random free cells. Nothing spawns when the floor is zero,
/// when there is no player, or when the map is full.
///
/// # Errors
///
/// Returns an `UnknownMap` fault if the player stands on an unregistered map.
pub fn spawn_population(
    world: &mut World,
    config: &EngineConfig,
    rng: &mut impl Rng,
    log: &mut EventLog,
) -> Result<Vec<EntityId>> {
    let floor = config.spawn.population_floor;
    if floor == 0 {
        return Ok(Vec::new());
    }
    let Some(map) = world.entities().live().iter().find_map(|&id| {
        if world.has::<Input>(id) {
            world.get::<Position>(id).map(|pos| pos.map)
        } else {
            None
        }
    }) else {
        return Ok(Vec::new());
    };

    let population = {
        let components = world.components();
        components
            .ais
            .ids()
            .filter(|id| components.positions.find(**id).is_some_and(|p| p.map == map))
            .count()
    };
    if population >= floor {
        return Ok(Vec::new());
    }

    let mut free: Vec<Coord> = walkable_cells(world, map, &[])?.into_iter().collect();
    free.sort_unstable();

    let mut spawned = Vec::new();
    for _ in population..floor {
        if free.is_empty() {
            break;
        }
        let at = free.swap_remove(rng.gen_range(0..free.len()));
        let id = spawn_actor(world, &config.spawn.template, map, at)?;
        log.push(TurnEvent::Spawned { entity: id, at });
        spawned.push(id);
    }

    if !spawned.is_empty() {
        info!(map = %map, count = spawned.len(), "spawned");
    }
    Ok(spawned)
}
