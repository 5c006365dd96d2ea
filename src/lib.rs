//! Neon Thrust - A side-scrolling neon space arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (craft physics, obstacles, collisions, game state)
//! - `app`: Frame driver tying the simulation to input, audio and storage
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction (input, storage)
//! - `best_score`: Persisted best score
//! - `tuning`: Data-driven game balance

pub mod app;
pub mod audio;
pub mod autopilot;
pub mod best_score;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use app::Game;
pub use best_score::BestScore;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
///
/// All per-tick quantities assume one tick per display refresh.
pub mod consts {
    /// Default viewport, used until the host reports its real size
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 600.0;

    /// Craft physics (pixels per tick)
    pub const GRAVITY: f32 = 0.1;
    pub const THRUST_POWER: f32 = 0.2;
    pub const MAX_VERTICAL_VELOCITY: f32 = 8.0;

    /// Craft geometry. `CRAFT_X` is the nose; the hull extends left from it.
    pub const CRAFT_X: f32 = 100.0;
    pub const CRAFT_WIDTH: f32 = 60.0;
    pub const CRAFT_HEIGHT: f32 = 40.0;

    /// Obstacle stream
    pub const OBSTACLE_SPAWN_INTERVAL: u64 = 120;
    pub const OBSTACLE_SPEED: f32 = 2.0;
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    pub const MIN_OBSTACLE_GAP: f32 = 150.0;
    pub const MAX_OBSTACLE_GAP: f32 = 300.0;
    /// Minimum distance between the gap and either viewport edge
    pub const OBSTACLE_MARGIN: f32 = 25.0;

    /// Background star layers, back to front
    pub const STAR_LAYER_SPEEDS: [f32; 4] = [0.5, 1.0, 1.5, 2.0];
    pub const STAR_LAYER_DENSITIES: [usize; 4] = [50, 40, 30, 20];
    pub const STAR_MIN_RADIUS: f32 = 0.5;
    pub const STAR_MAX_RADIUS: f32 = 2.0;
    pub const STAR_MIN_OPACITY: f32 = 0.2;
    pub const STAR_MAX_OPACITY: f32 = 1.0;
}
