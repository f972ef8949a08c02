//! Turn scheduling, command resolution, pathfinding, and field of view for
//! Barrow.
//!
//! This crate provides:
//! - [`Scheduler`] - Creation-ordered turns with a single suspension point for player input
//! - [`Command`] - Symbolic player and AI commands
//! - [`astar`] - A* search over walkable cells with octile costs
//! - [`VisibilityEngine`] - Ray-marched field of view and line of sight
//! - [`Game`] - The running flag and outer-loop entry points

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ai;
pub mod combat;
pub mod command;
pub mod config;
pub mod event;
pub mod game;
pub mod pathfinding;
pub mod resolve;
pub mod scheduler;
pub mod spawn;
pub mod systems;
pub mod visibility;

pub use combat::{MeleeOutcome, is_hostile, kill, melee};
pub use command::Command;
pub use config::{ActorTemplate, EngineConfig, SpawnConfig};
pub use event::{EventLog, TurnEvent};
pub use game::Game;
pub use pathfinding::{astar, path_cost, walkable_cells};
pub use resolve::{Resolution, resolve_command};
pub use scheduler::{Scheduler, SchedulerState, StepOutcome};
pub use spawn::{open_map, place_wall, spawn_actor, spawn_player};
pub use visibility::{VisibilityEngine, Viewport, apply_levels, can_see, refresh_visibility};
