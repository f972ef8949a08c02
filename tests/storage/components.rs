//! Integration tests for component stores
//!
//! Tests typed stores, dynamic values, and kind checking.

use barrow_foundation::{ComponentKind, EntityId, ErrorKind, MapId};
use barrow_storage::{
    Component, ComponentStore, ComponentValue, Health, Item, Position, Render, Visibility,
    VisibilityLevel,
};

#[test]
fn find_on_missing_entity_is_none() {
    let store: ComponentStore<Health> = ComponentStore::new();
    assert!(store.find(EntityId::new(0)).is_none());
}

#[test]
fn add_overwrites() {
    let mut store = ComponentStore::new();
    let id = EntityId::new(1);
    store.add(id, Health::new(5));
    store.add(id, Health::new(9));

    assert_eq!(store.len(), 1);
    assert_eq!(store.find(id).map(|h| h.max), Some(9));
}

#[test]
fn remove_then_find_is_none() {
    let mut store = ComponentStore::new();
    let id = EntityId::new(1);
    store.add(id, Item);

    assert!(store.remove(id));
    assert!(!store.remove(id));
    assert!(store.find(id).is_none());
}

#[test]
fn find_mut_edits_in_place() {
    let mut store = ComponentStore::new();
    let id = EntityId::new(4);
    store.add(id, Visibility::default());

    if let Some(vis) = store.find_mut(id) {
        vis.level = VisibilityLevel::Lit;
    }

    assert_eq!(store.find(id).map(|v| v.level), Some(VisibilityLevel::Lit));
}

#[test]
fn dynamic_insert_checks_kind() {
    let mut store: ComponentStore<Position> = ComponentStore::new();
    let id = EntityId::new(2);

    store
        .insert_value(id, Position::new(1, 1, MapId(0)).into())
        .unwrap();
    let err = store
        .insert_value(id, Render::new('x', [0, 0, 0], 0).into())
        .unwrap_err();

    assert!(matches!(
        err.kind,
        ErrorKind::TypeMismatch {
            expected: ComponentKind::Position,
            actual: ComponentKind::Render,
        }
    ));
    assert_eq!(store.find(id).map(Position::coord).map(|c| (c.x, c.y)), Some((1, 1)));
}

#[test]
fn value_round_trips_through_component() {
    let value: ComponentValue = Health::new(3).into();
    assert_eq!(value.kind(), ComponentKind::Health);
    assert_eq!(Health::from_value(value).ok().map(|h| h.max), Some(3));

    let wrong: ComponentValue = Item.into();
    assert!(Health::from_value(wrong).is_err());
}

#[test]
fn export_is_sorted_by_id() {
    let mut store = ComponentStore::new();
    for raw in [5, 1, 3] {
        store.add(EntityId::new(raw), Item);
    }

    let ids: Vec<_> = store.export().into_iter().map(|(id, _)| id.raw()).collect();
    assert_eq!(ids, vec![1, 3, 5]);
}
