//! Roadtrip Game Engine
//!
//! Platform-agnostic core logic for the Roadtrip grid-exploration game: a
//! turn-based journey across an unbounded, procedurally expanding grid where
//! the player must reach a randomly placed destination before fuel, food, or
//! days run out. This crate provides all game mechanics without UI or
//! platform-specific dependencies; randomness is injected through a seedable
//! bundle so every journey is reproducible.

pub mod config;
pub mod constants;
pub mod events;
pub mod generator;
pub mod grid;
pub mod rng;
pub mod state;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig};
pub use events::trigger_location_event;
pub use generator::{expand_frontier, pick_location_kind, place_destination};
pub use grid::{Direction, GridLocation, GridPos, LocationKind, Terrain, WorldGrid};
pub use rng::{CountingRng, RngBundle};
pub use state::{DefeatCause, Ending, GameState, MoveBlocked, MoveReport, Supplies};
