//! Integration tests for the join engine
//!
//! Tests joins over the stores of a live world.

use std::collections::{BTreeMap, BTreeSet};

use barrow_foundation::{EntityId, ErrorKind, MapId};
use barrow_storage::{
    Combat, Health, Mana, Position, Predicate, World, join, join_values, join_where,
};

/// A = health on {1,2,3}, B = mana on {2,3,4}, C = combat on {2,3,5}.
fn overlapping_world() -> World {
    let mut world = World::new();
    for _ in 0..6 {
        world.create().unwrap();
    }
    let id = EntityId::new;

    for raw in [1, 2, 3] {
        world.insert(id(raw), Health::new(i32::try_from(raw).unwrap() * 10));
    }
    for raw in [2, 3, 4] {
        world.insert(id(raw), Mana::new(i32::try_from(raw).unwrap()));
    }
    for raw in [2, 3, 5] {
        world.insert(id(raw), Combat {
            power: i32::try_from(raw).unwrap(),
            defense: 0,
        });
    }
    world
}

// =============================================================================
// Plain Joins
// =============================================================================

#[test]
fn three_way_join_pairs_each_id_with_its_values() {
    let world = overlapping_world();
    let c = world.components();

    let rows: BTreeMap<u64, (i32, i32, i32)> = join((&c.healths, &c.manas, &c.combat))
        .map(|(id, (hp, mana, combat))| (id.raw(), (hp.max, mana.max, combat.power)))
        .collect();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[&2], (20, 2, 2));
    assert_eq!(rows[&3], (30, 3, 3));
}

#[test]
fn argument_order_does_not_change_ids() {
    let world = overlapping_world();
    let c = world.components();

    let abc: BTreeSet<_> = join((&c.healths, &c.manas, &c.combat)).map(|(id, _)| id).collect();
    let cab: BTreeSet<_> = join((&c.combat, &c.healths, &c.manas)).map(|(id, _)| id).collect();
    let ba: BTreeSet<_> = join((&c.manas, &c.healths)).map(|(id, _)| id).collect();

    assert_eq!(abc, cab);
    assert_eq!(ba, BTreeSet::from([EntityId::new(2), EntityId::new(3)]));
}

#[test]
fn row_order_follows_argument_order() {
    let world = overlapping_world();
    let c = world.components();

    for (hp, combat) in join_values((&c.healths, &c.combat)) {
        assert_eq!(hp.max, combat.power * 10);
    }
    for (combat, hp) in join_values((&c.combat, &c.healths)) {
        assert_eq!(hp.max, combat.power * 10);
    }
}

#[test]
fn destroyed_entities_leave_joins() {
    let mut world = overlapping_world();
    world.destroy(EntityId::new(2));
    let c = world.components();

    let ids: Vec<_> = join((&c.healths, &c.manas, &c.combat)).map(|(id, _)| id).collect();
    assert_eq!(ids, vec![EntityId::new(3)]);
}

// =============================================================================
// Conditional Joins
// =============================================================================

#[test]
fn join_where_filters_rows() {
    let world = overlapping_world();
    let c = world.components();

    let rows = join_where(
        (&c.healths, &c.manas),
        &[Predicate::on::<Mana>(1, |mana| mana.max >= 3)],
    )
    .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, EntityId::new(3));
}

#[test]
fn join_where_with_no_predicates_is_plain_join() {
    let world = overlapping_world();
    let c = world.components();

    let rows = join_where((&c.healths, &c.manas, &c.combat), &[]).unwrap();
    assert_eq!(rows.len(), 2);
}

#[test]
fn join_where_mismatched_predicate_is_fault() {
    let world = overlapping_world();
    let c = world.components();

    let err = join_where(
        (&c.healths, &c.manas),
        &[Predicate::on::<Position>(0, |pos| pos.map == MapId(0))],
    )
    .unwrap_err();

    assert!(matches!(err.kind, ErrorKind::MalformedJoin(_)));
}
