//! Command resolution: movement, collision, and bump attacks.

use barrow_foundation::{EntityId, Result};
use barrow_storage::{Movement, Position, World};
use tracing::trace;

use crate::combat::{MeleeOutcome, is_hostile, melee};
use crate::command::Command;
use crate::config::EngineConfig;
use crate::event::{EventLog, TurnEvent};

/// What a resolved command means for the run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing run-ending happened.
    Continue,
    /// The player was killed.
    PlayerDied,
    /// The actor asked to end the run.
    Quit,
}

/// Resolves one command for `actor`. The command is atomic: on return the
/// world is consistent and the actor carries no [`Movement`].
///
/// # Errors
///
/// Returns an `UnknownMap` fault if the actor stands on an unregistered map,
/// and propagates corpse allocation faults from melee.
pub fn resolve_command(
    world: &mut World,
    actor: EntityId,
    command: Command,
    config: &EngineConfig,
    log: &mut EventLog,
) -> Result<Resolution> {
    trace!(actor = %actor, command = %command, "resolving");
    match command {
        Command::Move(_) => {
            if let Some(intent) = command.movement() {
                world.insert(actor, intent);
            }
            apply_movement(world, actor, config, log)
        }
        Command::Attack => attack_adjacent(world, actor, config, log),
        Command::Wait => Ok(Resolution::Continue),
        Command::Quit => {
            log.push(TurnEvent::QuitRequested { actor });
            Ok(Resolution::Quit)
        }
    }
}

/// Consumes `actor`'s [`Movement`] and applies it.
///
/// Out-of-bounds destinations are a no-op. A destination held by a hostile
/// is a melee attack, by anything else blocking a bump. Otherwise the
/// position changes.
///
/// # Errors
///
/// Returns an `UnknownMap` fault if the actor stands on an unregistered map,
/// and propagates corpse allocation faults from melee.
pub fn apply_movement(
    world: &mut World,
    actor: EntityId,
    config: &EngineConfig,
    log: &mut EventLog,
) -> Result<Resolution> {
    let Some(intent) = world.components_mut().movements.take(actor) else {
        return Ok(Resolution::Continue);
    };
    let Some(pos) = world.get::<Position>(actor).cloned() else {
        return Ok(Resolution::Continue);
    };
    if !pos.moveable || (intent.dx == 0 && intent.dy == 0) {
        return Ok(Resolution::Continue);
    }

    let from = pos.coord();
    let to = from.offset(intent.dx, intent.dy);
    if !world.require_map(pos.map)?.contains(to) {
        log.push(TurnEvent::Bumped { actor, at: to });
        return Ok(Resolution::Continue);
    }

    let blockers: Vec<_> = world
        .blockers_at(pos.map, to)
        .into_iter()
        .filter(|id| *id != actor)
        .collect();

    if let Some(&target) = blockers.iter().find(|id| is_hostile(world, actor, **id)) {
        return strike(world, actor, target, config, log);
    }
    if !blockers.is_empty() {
        log.push(TurnEvent::Bumped { actor, at: to });
        return Ok(Resolution::Continue);
    }

    if let Some(position) = world.get_mut::<Position>(actor) {
        position.x = to.x;
        position.y = to.y;
    }
    log.push(TurnEvent::Moved { actor, from, to });
    Ok(Resolution::Continue)
}

fn attack_adjacent(
    world: &mut World,
    actor: EntityId,
    config: &EngineConfig,
    log: &mut EventLog,
) -> Result<Resolution> {
    let Some(pos) = world.get::<Position>(actor).cloned() else {
        return Ok(Resolution::Continue);
    };
    let origin = pos.coord();

    let target = world
        .entities()
        .live()
        .iter()
        .copied()
        .find(|&id| {
            is_hostile(world, actor, id)
                && world
                    .get::<Position>(id)
                    .is_some_and(|p| p.map == pos.map && p.coord().is_adjacent(origin))
        });

    match target {
        Some(target) => strike(world, actor, target, config, log),
        None => Ok(Resolution::Continue),
    }
}

fn strike(
    world: &mut World,
    actor: EntityId,
    target: EntityId,
    config: &EngineConfig,
    log: &mut EventLog,
) -> Result<Resolution> {
    Ok(match melee(world, actor, target, config, log)? {
        Some(MeleeOutcome::Killed {
            was_player: true, ..
        }) => Resolution::PlayerDied,
        _ => Resolution::Continue,
    })
}
