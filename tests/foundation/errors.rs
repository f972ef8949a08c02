//! Integration tests for fault types
//!
//! Tests construction, classification, and display of errors.

use barrow_foundation::{ComponentKind, EntityId, Error, ErrorKind, MapId};

#[test]
fn type_mismatch_names_both_kinds() {
    let err = Error::type_mismatch(ComponentKind::Health, ComponentKind::Position);
    let text = err.to_string();

    assert!(text.contains("health"));
    assert!(text.contains("position"));
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

#[test]
fn duplicate_id_mentions_entity() {
    let err = Error::duplicate_id(EntityId::new(7));
    assert!(err.to_string().contains('7'));
}

#[test]
fn unknown_command_keeps_input() {
    let err = Error::unknown_command("teleport");
    assert!(matches!(err.kind, ErrorKind::UnknownCommand(ref s) if s == "teleport"));
}

#[test]
fn unknown_map_keeps_id() {
    let err = Error::unknown_map(MapId(3));
    assert!(matches!(err.kind, ErrorKind::UnknownMap(MapId(3))));
}

#[test]
fn every_kind_has_a_distinct_name() {
    let mut names: Vec<_> = ComponentKind::ALL.iter().map(|k| k.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), ComponentKind::ALL.len());
}
