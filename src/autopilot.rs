//! Deterministic autopilot
//!
//! Flies the craft by looking a few ticks ahead and thrusting whenever the
//! predicted position would be below the centre of the next gap. Used by the
//! headless runner to exercise the full game loop without a human.

use serde::Serialize;

use crate::app::Game;
use crate::audio::AudioSink;
use crate::platform::{InputEvent, Storage, ThrustSource};
use crate::sim::{GamePhase, GameState, TickInput, Viewport};

pub struct Autopilot {
    /// Ticks of motion to extrapolate before deciding
    pub lookahead: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { lookahead: 10.0 }
    }
}

impl Autopilot {
    pub fn new(lookahead: f32) -> Self {
        Self { lookahead }
    }

    /// Vertical position to steer for: the centre of the gap the craft must
    /// clear next, or mid-screen when nothing is ahead
    pub fn target_y(&self, state: &GameState) -> f32 {
        let tail = state.craft.bounds().left;
        state
            .obstacles
            .next_ahead(tail)
            .and_then(|o| state.obstacles.gap_of(o.pair_id))
            .map(|(top, bottom)| (top + bottom) / 2.0)
            .unwrap_or(state.viewport.height / 2.0)
    }

    pub fn next_input(&self, state: &GameState) -> TickInput {
        if state.phase != GamePhase::Playing {
            return TickInput::default();
        }
        let craft = &state.craft;
        let t = self.lookahead;
        let predicted = craft.pos.y + craft.vel * t + 0.5 * state.tuning.gravity * t * t;
        TickInput {
            thrust: predicted > self.target_y(state),
        }
    }
}

/// Outcome of one autopilot run
#[derive(Clone, Debug, Serialize)]
pub struct RunMetrics {
    pub seed: u64,
    pub viewport: Viewport,
    pub max_frames: u64,
    pub frame_count: u64,
    pub score: u32,
    pub best_score: u32,
    pub new_best: bool,
    /// The run ended in a collision rather than at the frame cap
    pub crashed: bool,
    pub thrust_frames: u64,
    /// Phase the session left the game in
    pub final_phase: GamePhase,
}

/// Start a run and let the autopilot fly it until it crashes or reaches
/// `max_frames` ticks
///
/// A run stopped by the cap is abandoned, so the game is always left in
/// `Ended` and the next call starts a fresh run.
///
/// Input goes through [`Game::handle_input`] exactly as a keyboard would
/// deliver it, so the run exercises the same paths as interactive play.
pub fn run_session<S: Storage, A: AudioSink>(
    game: &mut Game<S, A>,
    pilot: &Autopilot,
    max_frames: u64,
) -> RunMetrics {
    game.handle_input(InputEvent::StartOrReplay);

    let mut thrust_frames = 0;
    let mut held = false;
    let mut new_best = false;
    let mut crashed = false;
    while game.wants_frame() && game.state().frame_count < max_frames {
        let input = pilot.next_input(game.state());
        if input.thrust != held {
            let event = if input.thrust {
                InputEvent::ThrustStart(ThrustSource::Key)
            } else {
                InputEvent::ThrustEnd(ThrustSource::Key)
            };
            game.handle_input(event);
            held = input.thrust;
        }
        if input.thrust {
            thrust_frames += 1;
        }
        if let Some(summary) = game.frame().run_ended {
            new_best = summary.new_best;
            crashed = true;
        }
    }
    if held {
        game.handle_input(InputEvent::ThrustEnd(ThrustSource::Key));
    }
    if let Some(summary) = game.abandon_run() {
        log::debug!("Run reached the {} frame cap", max_frames);
        new_best = summary.new_best;
    }

    let state = game.state();
    RunMetrics {
        seed: state.seed,
        viewport: state.viewport,
        max_frames,
        frame_count: state.frame_count,
        score: state.score,
        best_score: game.best_score(),
        new_best,
        crashed,
        thrust_frames,
        final_phase: state.phase,
    }
}
