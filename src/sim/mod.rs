//! Deterministic simulation module
//!
//! This module contains all game logic that must be deterministic:
//! - Craft physics
//! - Obstacle spawning, scrolling and retirement
//! - Collision detection
//! - Scoring and the game phase machine
//! - Tick advancement

mod collision;
mod craft;
mod obstacle;
pub mod starfield;
pub mod state;
mod tick;

pub use collision::{Aabb, collides};
pub use craft::Craft;
pub use obstacle::{Obstacle, ObstacleField, SpawnedPair};
pub use starfield::{Star, StarLayer, Starfield};
pub use state::{GamePhase, GameState, RunSummary, Viewport};
pub use tick::{TickEvents, TickInput, tick};
