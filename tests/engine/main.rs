//! Integration tests for Layer 2: Engine
//!
//! Tests for pathfinding, field of view, and turn scheduling.

mod pathfinding;
mod scheduling;
mod visibility;
