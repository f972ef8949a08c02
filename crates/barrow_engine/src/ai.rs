//! AI decision making.
//!
//! Attackers chase the first player-controlled entity on their map. A path is
//! planned with A* when none is cached and followed one step per turn; it is
//! thrown away whenever sight of the target is regained or its next step
//! turns out to be blocked.

use barrow_foundation::{Coord, Direction, EntityId, MapId, Result};
use barrow_storage::{Ai, AiBehavior, Input, Position, World};
use rand::Rng;
use tracing::trace;

use crate::command::Command;
use crate::config::EngineConfig;
use crate::pathfinding::{astar, walkable_cells};
use crate::visibility::{VisibilityEngine, can_see};

/// Picks the command `actor` takes this turn.
///
/// Entities without [`Ai`] wait.
///
/// # Errors
///
/// Returns an `UnknownMap` fault if the actor stands on an unregistered map.
pub fn decide(
    world: &mut World,
    actor: EntityId,
    vision: &VisibilityEngine,
    config: &EngineConfig,
    rng: &mut impl Rng,
) -> Result<Command> {
    let Some(behavior) = world.get::<Ai>(actor).map(|ai| ai.behavior) else {
        return Ok(Command::Wait);
    };

    let command = match behavior {
        AiBehavior::Wait => Command::Wait,
        AiBehavior::Wander => wander(rng),
        AiBehavior::Attack => chase(world, actor, vision, config)?,
    };

    trace!(actor = %actor, ?behavior, command = %command, "decided");
    Ok(command)
}

fn wander(rng: &mut impl Rng) -> Command {
    Command::Move(Direction::ALL[rng.gen_range(0..Direction::ALL.len())])
}

/// First live player-controlled entity on `map`, with its cell.
#[must_use]
pub fn find_target(world: &World, map: MapId) -> Option<(EntityId, Coord)> {
    world.entities().live().iter().find_map(|&id| {
        if !world.has::<Input>(id) {
            return None;
        }
        world
            .get::<Position>(id)
            .filter(|pos| pos.map == map)
            .map(|pos| (id, pos.coord()))
    })
}

fn chase(
    world: &mut World,
    actor: EntityId,
    vision: &VisibilityEngine,
    config: &EngineConfig,
) -> Result<Command> {
    let Some(pos) = world.get::<Position>(actor).cloned() else {
        return Ok(Command::Wait);
    };
    let here = pos.coord();
    let Some((_, target)) = find_target(world, pos.map) else {
        return Ok(Command::Wait);
    };

    let sees = can_see(world, vision, pos.map, here, target)?;

    if here.is_adjacent(target) {
        update_sight(world, actor, sees, Vec::new());
        return Ok(Direction::toward(here, target).map_or(Command::Wait, Command::Move));
    }

    let mut path = world
        .get::<Ai>(actor)
        .map(|ai| {
            if sees && !ai.sees_target {
                Vec::new()
            } else {
                ai.path.clone()
            }
        })
        .unwrap_or_default();

    let stale = path.first().is_none_or(|&next| {
        !next.is_adjacent(here) || !world.blockers_at(pos.map, next).is_empty()
    });
    if stale {
        let walkable = walkable_cells(world, pos.map, &[target])?;
        path = astar(&walkable, here, target, config.ai_neighborhood, false);
    }

    let command = if path.is_empty() {
        Command::Wait
    } else {
        let next = path.remove(0);
        Direction::toward(here, next).map_or(Command::Wait, Command::Move)
    };

    update_sight(world, actor, sees, path);
    Ok(command)
}

fn update_sight(world: &mut World, actor: EntityId, sees: bool, path: Vec<Coord>) {
    if let Some(ai) = world.get_mut::<Ai>(actor) {
        ai.sees_target = sees;
        ai.path = path;
    }
}
