//! Integration tests for Layer 1: Storage
//!
//! Tests for the entity registry, component stores, joins, and world state.

mod components;
mod joins;
