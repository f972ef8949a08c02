//! Barrow - Simulation core for a turn-based grid roguelike
//!
//! This crate re-exports all layers of the Barrow system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: barrow_engine: Turn scheduling, AI, A*, ray field of view
//! Layer 1: barrow_storage: Entity registry, component stores, joins, maps
//! Layer 0: barrow_foundation: Core types (EntityId, Coord, Error)
//! ```

pub use barrow_engine as engine;
pub use barrow_foundation as foundation;
pub use barrow_storage as storage;
