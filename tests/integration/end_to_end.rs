//! Full runs from map setup to shutdown or death.

use barrow_engine::{
    ActorTemplate, EngineConfig, Game, StepOutcome, TurnEvent, open_map, spawn_actor,
    spawn_player,
};
use barrow_foundation::{Coord, EntityId, MapId};
use barrow_storage::{
    AiBehavior, Health, Information, Item, Movement, Position, VisibilityLevel, World,
};

fn small_world(behavior: AiBehavior) -> (World, EntityId, EntityId) {
    let mut world = World::new();
    open_map(&mut world, MapId(0), 10, 10).unwrap();
    let player = spawn_player(&mut world, MapId(0), Coord::new(1, 1)).unwrap();
    let goblin = spawn_actor(
        &mut world,
        &ActorTemplate::default().with_behavior(behavior),
        MapId(0),
        Coord::new(5, 5),
    )
    .unwrap();
    (world, player, goblin)
}

fn coord_of(game: &Game, id: EntityId) -> Option<Coord> {
    game.world().get::<Position>(id).map(Position::coord)
}

// =============================================================================
// Movement
// =============================================================================

#[test]
fn player_walks_right_three_times() {
    let (world, player, _) = small_world(AiBehavior::Wait);
    let mut game = Game::new(world, EngineConfig::default());

    assert_eq!(
        game.run_until_input(10).unwrap(),
        StepOutcome::AwaitingInput { actor: player }
    );
    for _ in 0..3 {
        game.inject("right").unwrap();
        let outcome = game.run_until_input(10).unwrap();
        assert_eq!(outcome, StepOutcome::AwaitingInput { actor: player });
        assert!(!game.world().has::<Movement>(player));
    }

    assert_eq!(coord_of(&game, player), Some(Coord::new(4, 1)));
    assert_eq!(game.scheduler().cycle(), 3);
}

#[test]
fn walking_updates_what_the_player_sees() {
    let (world, player, _) = small_world(AiBehavior::Wait);
    let mut game = Game::new(world, EngineConfig::default());
    game.run_until_input(10).unwrap();
    game.inject("down_right").unwrap();
    game.run_until_input(10).unwrap();

    let c = game.world().components();
    let lit_at = |coord: Coord| {
        c.visibilities.iter().any(|(id, vis)| {
            vis.level == VisibilityLevel::Lit
                && c.positions.find(id).is_some_and(|p| p.coord() == coord)
        })
    };
    assert_eq!(coord_of(&game, player), Some(Coord::new(2, 2)));
    assert!(lit_at(Coord::new(2, 2)));
    assert!(lit_at(Coord::new(9, 9)));
}

// =============================================================================
// Combat
// =============================================================================

#[test]
fn player_kills_goblin_and_leaves_corpse() {
    let (world, player, goblin) = small_world(AiBehavior::Wait);
    let mut game = Game::new(world, EngineConfig::default());
    game.run_until_input(10).unwrap();

    // Three steps to close in, then two blows.
    for _ in 0..5 {
        game.inject("down_right").unwrap();
        game.run_until_input(10).unwrap();
    }

    assert!(!game.world().is_live(goblin));
    assert_eq!(coord_of(&game, player), Some(Coord::new(4, 4)));
    let corpse = game
        .world()
        .entities_at(MapId(0), Coord::new(5, 5))
        .into_iter()
        .find(|&id| game.world().has::<Item>(id))
        .unwrap();
    assert_eq!(
        game.world().get::<Information>(corpse).map(|i| i.name.as_str()),
        Some("corpse of goblin")
    );
    assert!(
        game.scheduler()
            .log()
            .iter()
            .any(|e| matches!(e, TurnEvent::Died { victim, .. } if *victim == goblin))
    );
}

#[test]
fn goblin_hunts_player_to_death() {
    let (mut world, player, _) = small_world(AiBehavior::Attack);
    world.get_mut::<Health>(player).unwrap().current = 2;
    let mut game = Game::new(world, EngineConfig::default());

    let mut outcome = game.run_until_input(10).unwrap();
    for _ in 0..20 {
        if !game.is_running() {
            break;
        }
        game.inject("wait").unwrap();
        outcome = game.run_until_input(10).unwrap();
    }

    assert_eq!(outcome, StepOutcome::GameOver);
    assert!(!game.is_running());
    assert!(!game.world().is_live(player));
    assert!(game.scheduler().is_over());
}

// =============================================================================
// Shutdown
// =============================================================================

#[test]
fn quit_leaves_world_consistent() {
    let (world, player, goblin) = small_world(AiBehavior::Wait);
    let mut game = Game::new(world, EngineConfig::default());
    game.run_until_input(10).unwrap();

    game.inject("right").unwrap();
    game.run_until_input(10).unwrap();
    game.inject("quit").unwrap();
    let outcome = game.run_until_input(10).unwrap();

    assert_eq!(outcome, StepOutcome::ShutdownRequested { actor: player });
    assert!(!game.is_running());
    assert_eq!(coord_of(&game, player), Some(Coord::new(2, 1)));
    assert_eq!(coord_of(&game, goblin), Some(Coord::new(5, 5)));
}
