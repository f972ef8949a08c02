//! Entity templates: the player, AI units, corpses, and map tiles.

use barrow_foundation::{Coord, EntityId, MapId, Result};
use barrow_storage::{
    Ai, Combat, Decay, Health, Information, Input, Inventory, Item, Mana, Position, Render, Tile,
    TileMap, Visibility, World,
};

use crate::config::ActorTemplate;

/// Spawns the player character.
///
/// # Errors
///
/// Returns an `Internal` fault if the id space is exhausted.
pub fn spawn_player(world: &mut World, map: MapId, at: Coord) -> Result<EntityId> {
    let id = world.create()?;
    world.insert(id, Position::unit(at.x, at.y, map));
    world.insert(id, Input::default());
    world.insert(id, Health::new(30));
    world.insert(id, Mana::new(10));
    world.insert(id, Combat {
        power: 5,
        defense: 2,
    });
    world.insert(id, Render::new('@', [255, 255, 255], 2));
    world.insert(id, Information::named("player"));
    world.insert(id, Inventory::default());
    Ok(id)
}

/// Spawns an AI unit from a template.
///
/// # Errors
///
/// Returns an `Internal` fault if the id space is exhausted.
pub fn spawn_actor(
    world: &mut World,
    template: &ActorTemplate,
    map: MapId,
    at: Coord,
) -> Result<EntityId> {
    let id = world.create()?;
    world.insert(id, Position::unit(at.x, at.y, map));
    world.insert(id, Ai::new(template.behavior));
    world.insert(id, Health::new(template.health));
    world.insert(id, Combat {
        power: template.power,
        defense: template.defense,
    });
    world.insert(id, Render::new(template.glyph, template.color, 2));
    world.insert(id, Information::named(template.name.clone()));
    Ok(id)
}

/// Spawns a pick-up item lying on the floor.
///
/// # Errors
///
/// Returns an `Internal` fault if the id space is exhausted.
pub fn spawn_item(world: &mut World, name: &str, map: MapId, at: Coord) -> Result<EntityId> {
    let id = world.create()?;
    world.insert(id, Position::new(at.x, at.y, map));
    world.insert(id, Item);
    world.insert(id, Render::new('!', [200, 200, 0], 1));
    world.insert(id, Information::named(name));
    Ok(id)
}

/// Spawns the remains of `name` with a decay timer.
///
/// # Errors
///
/// Returns an `Internal` fault if the id space is exhausted.
pub fn spawn_corpse(
    world: &mut World,
    name: &str,
    map: MapId,
    at: Coord,
    turns: u32,
) -> Result<EntityId> {
    let id = world.create()?;
    world.insert(id, Position::new(at.x, at.y, map));
    world.insert(id, Item);
    world.insert(id, Decay { turns_left: turns });
    world.insert(id, Render::new('%', [160, 0, 0], 1));
    world.insert(id, Information::named(format!("corpse of {name}")));
    Ok(id)
}

/// Registers a `width` by `height` map with a transparent floor tile on
/// every cell.
///
/// # Errors
///
/// Returns an `Internal` fault if the id space is exhausted.
pub fn open_map(world: &mut World, map: MapId, width: i32, height: i32) -> Result<TileMap> {
    let tiles = TileMap::new(map, width, height);
    world.insert_map(tiles);
    for cell in tiles.cells() {
        let id = world.create()?;
        world.insert(id, Position::new(cell.x, cell.y, map));
        world.insert(id, Tile { opaque: false });
        world.insert(id, Visibility::default());
        world.insert(id, Render::new('.', [90, 90, 90], 0));
    }
    Ok(tiles)
}

/// Places an opaque, blocking wall tile.
///
/// # Errors
///
/// Returns an `Internal` fault if the id space is exhausted.
pub fn place_wall(world: &mut World, map: MapId, at: Coord) -> Result<EntityId> {
    let id = world.create()?;
    world.insert(id, Position::wall(at.x, at.y, map));
    world.insert(id, Tile { opaque: true });
    world.insert(id, Visibility::default());
    world.insert(id, Render::new('#', [130, 110, 80], 0));
    Ok(id)
}
