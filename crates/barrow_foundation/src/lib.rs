//! Core types, grid geometry, and errors for Barrow.
//!
//! This crate provides:
//! - [`EntityId`] - Opaque, never-recycled entity handles
//! - [`ComponentKind`] - The closed set of component kinds the registry holds
//! - [`Coord`], [`Direction`], [`Neighborhood`] - Grid geometry and octile distance
//! - [`Error`] - Fault types shared by every layer

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod entity;
mod error;
mod grid;
mod types;

pub use entity::{EntityId, MapId};
pub use error::{Error, ErrorKind, Result};
pub use grid::{Coord, Direction, Neighborhood, octile};
pub use types::ComponentKind;
