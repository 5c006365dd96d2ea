//! Game state and core simulation types
//!
//! [`GameState`] is the whole simulation context. It owns the craft, the
//! obstacle stream, the star field, the score and the current phase, and is
//! the only place those are reset or frozen.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::craft::Craft;
use super::obstacle::ObstacleField;
use super::starfield::Starfield;
use crate::consts::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use crate::tuning::Tuning;

const FX_SEED_SALT: u64 = 0x5eed_57a2_f1e1_d000;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Title screen, waiting for start
    #[default]
    Idle,
    /// Active gameplay, ticks are running
    Playing,
    /// Frozen mid-run; resuming continues exactly where it stopped
    Paused,
    /// Run ended by a collision, waiting for replay
    Ended,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::Ended => "ended",
        }
    }
}

/// Drawable area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Result of ending a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub score: u32,
    pub best_score: u32,
    /// The run beat the previous best
    pub new_best: bool,
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay randomness (obstacle gaps)
    pub rng: Pcg32,
    /// Cosmetic randomness (star field), independent of the obstacle sequence
    pub fx_rng: Pcg32,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub phase: GamePhase,
    pub craft: Craft,
    pub obstacles: ObstacleField,
    /// Background, not gameplay-affecting
    pub starfield: Starfield,
    /// Stars per layer multiplier used when regenerating the star field
    pub star_density: f32,
    pub score: u32,
    pub best_score: u32,
    /// The run that just ended beat the previous best
    pub new_best: bool,
    /// Ticks since the current run started
    pub frame_count: u64,
}

impl GameState {
    /// Create an idle game with default tuning and viewport
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, Tuning::default(), Viewport::default())
    }

    pub fn with_config(seed: u64, tuning: Tuning, viewport: Viewport) -> Self {
        let rng = Pcg32::seed_from_u64(seed);
        let mut fx_rng = Pcg32::seed_from_u64(seed ^ FX_SEED_SALT);
        let starfield = Starfield::generate(&mut fx_rng, &tuning, viewport, 1.0);
        let craft = Craft::new(&tuning, viewport.height);
        Self {
            seed,
            rng,
            fx_rng,
            tuning,
            viewport,
            phase: GamePhase::Idle,
            craft,
            obstacles: ObstacleField::new(),
            starfield,
            star_density: 1.0,
            score: 0,
            best_score: 0,
            new_best: false,
            frame_count: 0,
        }
    }

    /// Seed the best score loaded from storage
    pub fn with_best_score(mut self, best: u32) -> Self {
        self.best_score = best;
        self
    }

    /// Start a fresh run from `Idle` or `Ended`
    ///
    /// Returns false (and changes nothing) from any other phase.
    pub fn start(&mut self) -> bool {
        match self.phase {
            GamePhase::Idle | GamePhase::Ended => {
                self.reset_run();
                self.phase = GamePhase::Playing;
                log::info!("Run started (best {})", self.best_score);
                true
            }
            GamePhase::Playing | GamePhase::Paused => false,
        }
    }

    /// Pause while playing, resume while paused
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                true
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                true
            }
            GamePhase::Idle | GamePhase::Ended => false,
        }
    }

    /// Finish the current run, promoting its score to best if it beat it
    pub fn end_run(&mut self) -> RunSummary {
        let new_best = self.score > self.best_score;
        if new_best {
            self.best_score = self.score;
        }
        self.new_best = new_best;
        self.phase = GamePhase::Ended;
        log::info!(
            "Run ended at frame {} with score {} (best {})",
            self.frame_count,
            self.score,
            self.best_score
        );
        RunSummary {
            score: self.score,
            best_score: self.best_score,
            new_best,
        }
    }

    /// Clear everything a run accumulates
    fn reset_run(&mut self) {
        self.score = 0;
        self.new_best = false;
        self.frame_count = 0;
        self.obstacles.clear();
        self.craft.reset(self.viewport.height);
    }

    /// Follow a resized drawing surface
    ///
    /// Outside a run the craft re-centres vertically. During a run (playing
    /// or paused) it keeps its position and velocity, only pulled back inside
    /// the new vertical bounds, so resuming continues where it stopped. The
    /// star field is regenerated to cover the new area.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        match self.phase {
            GamePhase::Idle | GamePhase::Ended => self.craft.pos.y = viewport.height / 2.0,
            GamePhase::Playing | GamePhase::Paused => {
                let half = self.craft.half_height();
                let bottom = (viewport.height - half).max(half);
                self.craft.pos.y = self.craft.pos.y.clamp(half, bottom);
            }
        }
        self.regenerate_starfield();
    }

    /// Change the star density and rebuild the star field
    pub fn set_star_density(&mut self, density: f32) {
        self.star_density = density;
        self.regenerate_starfield();
    }

    fn regenerate_starfield(&mut self) {
        self.starfield =
            Starfield::generate(&mut self.fx_rng, &self.tuning, self.viewport, self.star_density);
    }
}
