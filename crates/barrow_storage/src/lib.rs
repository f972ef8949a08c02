//! Entity registry, typed component stores, and the join engine for Barrow.
//!
//! This crate provides:
//! - [`EntityRegistry`] - Monotonic, never-recycled entity handles in creation order
//! - [`ComponentStore`] - One sparse map per component type
//! - [`join`], [`join_values`], [`join_where`] - Smallest-store-first intersection queries
//! - [`Components`] - The fixed registry of typed stores
//! - [`World`] - Registry, stores, and tile maps as one unit

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod component;
pub mod entity;
pub mod join;
pub mod map;
pub mod records;
pub mod world;

pub use component::{Component, ComponentStore};
pub use entity::EntityRegistry;
pub use join::{Join, KeySet, Predicate, intersect, join, join_values, join_where};
pub use map::TileMap;
pub use records::{
    Ai, AiBehavior, Combat, ComponentValue, CurrentTurn, Decay, Health, Information, Input,
    Inventory, Item, Mana, Movement, Position, Render, Tile, Visibility, VisibilityLevel,
};
pub use world::{Components, Stored, World};
