//! Game driver
//!
//! [`Game`] owns the simulation and wires it to the outside world: it turns
//! input events into phase transitions and thrust, runs one tick per frame
//! while playing, fires audio cues and persists new best scores. Hosts only
//! need to call [`Game::handle_input`] from their event handlers and
//! [`Game::frame`] from their frame callback, using [`FrameScheduler`] to keep
//! exactly one frame request outstanding while a run is live.

use crate::audio::{AudioSink, SoundEffect};
use crate::best_score::BestScore;
use crate::platform::{InputEvent, Storage, ThrustSources};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, RunSummary, TickEvents, TickInput, Viewport, tick};
use crate::tuning::Tuning;

/// A running game session
pub struct Game<S: Storage, A: AudioSink> {
    state: GameState,
    best: BestScore,
    storage: S,
    audio: A,
    thrust: ThrustSources,
}

impl<S: Storage, A: AudioSink> Game<S, A> {
    /// Create an idle session, loading the best score from `storage`
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport, storage: S, audio: A) -> Self {
        let best = BestScore::load(&storage);
        let state = GameState::with_config(seed, tuning, viewport).with_best_score(best.value());
        Self {
            state,
            best,
            storage,
            audio,
            thrust: ThrustSources::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn best_score(&self) -> u32 {
        self.best.value()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// Whether thrust is currently held by any source
    pub fn thrust_held(&self) -> bool {
        self.thrust.active()
    }

    /// Ticks only run while playing
    pub fn wants_frame(&self) -> bool {
        self.state.phase == GamePhase::Playing
    }

    /// Apply an input event
    ///
    /// Returns the new phase when the event caused a transition. Events that
    /// do not apply to the current phase are ignored.
    pub fn handle_input(&mut self, event: InputEvent) -> Option<GamePhase> {
        match event {
            InputEvent::ThrustStart(source) => {
                if self.wants_frame() {
                    self.thrust.press(source);
                } else {
                    log::debug!("Ignoring thrust while {}", self.state.phase.as_str());
                }
                None
            }
            InputEvent::ThrustEnd(source) => {
                // Releasing is always honoured so a key let go during a pause
                // does not leave thrust stuck on after resuming
                self.thrust.release(source);
                None
            }
            InputEvent::PauseToggle => {
                if self.state.toggle_pause() {
                    log::info!("Game {}", self.state.phase.as_str());
                    Some(self.state.phase)
                } else {
                    log::debug!("Ignoring pause while {}", self.state.phase.as_str());
                    None
                }
            }
            InputEvent::StartOrReplay => {
                if self.state.start() {
                    self.thrust.clear();
                    Some(self.state.phase)
                } else {
                    log::debug!("Ignoring start while {}", self.state.phase.as_str());
                    None
                }
            }
        }
    }

    /// Pause a live run (tab hidden, window blur)
    pub fn auto_pause(&mut self) -> bool {
        if self.state.phase == GamePhase::Playing {
            self.thrust.clear();
            self.state.toggle_pause();
            log::info!("Auto-paused");
            true
        } else {
            false
        }
    }

    /// Run one frame: a single tick while playing, nothing otherwise
    pub fn frame(&mut self) -> TickEvents {
        if !self.wants_frame() {
            return TickEvents::default();
        }
        let input = TickInput {
            thrust: self.thrust.active(),
        };
        let events = tick(&mut self.state, &input);
        self.dispatch(&events);
        events
    }

    fn dispatch(&mut self, events: &TickEvents) {
        for _ in 0..events.pairs_passed {
            self.audio.play(SoundEffect::Pass);
        }
        if let Some(summary) = events.run_ended {
            self.settle(summary);
            self.audio.play(SoundEffect::Collision);
        }
    }

    /// Persist a finished run's record and drop any held thrust
    fn settle(&mut self, summary: RunSummary) {
        if summary.new_best {
            self.best.submit(summary.score, &mut self.storage);
        }
        self.thrust.clear();
    }

    /// End a live run without a collision (frame cap, host shutting down)
    ///
    /// The score is offered to the best score as usual. No collision cue is
    /// played. Returns `None` when no run is live.
    pub fn abandon_run(&mut self) -> Option<RunSummary> {
        match self.state.phase {
            GamePhase::Playing | GamePhase::Paused => {
                let summary = self.state.end_run();
                self.settle(summary);
                Some(summary)
            }
            GamePhase::Idle | GamePhase::Ended => None,
        }
    }

    /// Follow a resized drawing surface
    pub fn resize(&mut self, viewport: Viewport) {
        self.state.resize(viewport);
    }

    /// Apply the settings that affect the simulation context
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.state.set_star_density(settings.star_density());
    }
}

/// Keeps at most one frame request outstanding
///
/// `H` is the host's request handle (an animation frame id in the browser).
#[derive(Debug)]
pub struct FrameScheduler<H> {
    pending: Option<H>,
}

impl<H> Default for FrameScheduler<H> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<H> FrameScheduler<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The pending request just fired; it is no longer outstanding
    pub fn fired(&mut self) {
        self.pending = None;
    }

    /// Request a frame if one is wanted and none is pending, or cancel the
    /// pending one if frames are no longer wanted
    pub fn sync(
        &mut self,
        wants_frame: bool,
        request: impl FnOnce() -> Option<H>,
        cancel: impl FnOnce(H),
    ) {
        match (wants_frame, self.pending.take()) {
            (true, None) => self.pending = request(),
            (true, Some(handle)) => self.pending = Some(handle),
            (false, Some(handle)) => cancel(handle),
            (false, None) => {}
        }
    }
}
