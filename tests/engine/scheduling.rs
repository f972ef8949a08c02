//! Integration tests for turn scheduling
//!
//! Tests suspension, turn order, stale ids, and post-cycle work.

use barrow_engine::{
    ActorTemplate, Command, EngineConfig, Scheduler, SchedulerState, StepOutcome, open_map,
    spawn_actor, spawn_player,
};
use barrow_foundation::{Coord, Direction, EntityId, MapId};
use barrow_storage::{AiBehavior, Position, World};

fn positions(world: &World) -> Vec<(EntityId, Position)> {
    let mut all: Vec<_> = world
        .components()
        .positions
        .iter()
        .map(|(id, pos)| (id, pos.clone()))
        .collect();
    all.sort_by_key(|(id, _)| *id);
    all
}

fn one_player() -> (World, EntityId) {
    let mut world = World::new();
    open_map(&mut world, MapId(0), 8, 8).unwrap();
    let player = spawn_player(&mut world, MapId(0), Coord::new(3, 3)).unwrap();
    (world, player)
}

// =============================================================================
// Suspension
// =============================================================================

#[test]
fn suspension_is_idempotent_and_pure() {
    let (mut world, player) = one_player();
    let mut scheduler = Scheduler::default();
    let before = positions(&world);

    let outcomes: Vec<_> = (0..5).map(|_| scheduler.step(&mut world).unwrap()).collect();

    assert!(outcomes.iter().all(|o| *o == StepOutcome::AwaitingInput { actor: player }));
    assert_eq!(positions(&world), before);
    assert_eq!(scheduler.state(), SchedulerState::AwaitingInput(player));
    assert_eq!(scheduler.cycle(), 0);
}

#[test]
fn injecting_resumes_the_same_actor() {
    let (mut world, player) = one_player();
    let mut scheduler = Scheduler::default();
    scheduler.step(&mut world).unwrap();

    scheduler.inject(Command::Move(Direction::North));
    let outcome = scheduler.step(&mut world).unwrap();

    assert_eq!(
        outcome,
        StepOutcome::Acted {
            actor: player,
            command: Command::Move(Direction::North)
        }
    );
    assert_eq!(
        world.get::<Position>(player).map(Position::coord),
        Some(Coord::new(3, 2))
    );
}

#[test]
fn player_without_needs_input_is_not_suspended() {
    let (mut world, player) = one_player();
    world.get_mut::<barrow_storage::Input>(player).unwrap().needs_input = false;
    let mut scheduler = Scheduler::default();

    assert_eq!(
        scheduler.step(&mut world).unwrap(),
        StepOutcome::Acted {
            actor: player,
            command: Command::Wait
        }
    );
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn ai_units_act_between_player_turns() {
    let (mut world, player) = one_player();
    let template = ActorTemplate::default().with_behavior(AiBehavior::Wait);
    let units: Vec<_> = (0..3)
        .map(|i| spawn_actor(&mut world, &template, MapId(0), Coord::new(i, 7)).unwrap())
        .collect();
    let mut scheduler = Scheduler::default();

    for _ in 0..2 {
        scheduler.inject(Command::Wait);
        assert!(matches!(
            scheduler.step(&mut world).unwrap(),
            StepOutcome::Acted { actor, .. } if actor == player
        ));
        for &unit in &units {
            assert!(matches!(
                scheduler.step(&mut world).unwrap(),
                StepOutcome::Acted { actor, .. } if actor == unit
            ));
        }
    }
    assert_eq!(scheduler.cycle(), 1);
}

#[test]
fn actor_killed_mid_pass_is_skipped() {
    let (mut world, player) = one_player();
    let template = ActorTemplate::default().with_stats(1, 1, 0);
    let victim = spawn_actor(&mut world, &template, MapId(0), Coord::new(4, 3)).unwrap();
    let bystander = spawn_actor(
        &mut world,
        &template.clone().with_behavior(AiBehavior::Wait),
        MapId(0),
        Coord::new(7, 7),
    )
    .unwrap();
    let mut scheduler = Scheduler::default();

    scheduler.inject(Command::Move(Direction::East));
    scheduler.step(&mut world).unwrap();
    assert!(!world.is_live(victim));

    assert!(matches!(
        scheduler.step(&mut world).unwrap(),
        StepOutcome::Acted { actor, .. } if actor == bystander
    ));
}

#[test]
fn chasing_ai_reaches_and_hits_player() {
    let mut world = World::new();
    open_map(&mut world, MapId(0), 10, 10).unwrap();
    let player = spawn_player(&mut world, MapId(0), Coord::new(1, 1)).unwrap();
    let goblin =
        spawn_actor(&mut world, &ActorTemplate::default(), MapId(0), Coord::new(6, 6))
            .unwrap();
    let mut scheduler = Scheduler::new(EngineConfig::default().with_seed(5));
    let start_hp = world.get::<barrow_storage::Health>(player).unwrap().current;

    for _ in 0..6 {
        scheduler.inject(Command::Wait);
        scheduler.step(&mut world).unwrap();
        scheduler.step(&mut world).unwrap();
    }

    let goblin_at = world.get::<Position>(goblin).unwrap().coord();
    assert!(goblin_at.is_adjacent(Coord::new(1, 1)));
    assert!(world.get::<barrow_storage::Health>(player).unwrap().current < start_hp);
}
