//! Per-frame simulation tick
//!
//! Core game loop step. Deterministic for a given seed and input sequence, so
//! a recorded list of [`TickInput`]s replays a run exactly.

use super::state::{GamePhase, GameState, RunSummary};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Thrust held (any source)
    pub thrust: bool,
}

/// What happened during a tick, for audio and persistence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// Obstacle pairs newly cleared this tick
    pub pairs_passed: u32,
    /// Set when a collision ended the run
    pub run_ended: Option<RunSummary>,
}

impl TickEvents {
    pub fn is_empty(&self) -> bool {
        self.pairs_passed == 0 && self.run_ended.is_none()
    }
}

/// Advance the game by one tick
///
/// Only `Playing` advances; every other phase is frozen and returns no events.
/// Order within a tick: craft, obstacles (spawn, advance, retire), collision,
/// scoring, background. A collision ends the run immediately, so passes in
/// the same tick are not scored.
pub fn tick(state: &mut GameState, input: &TickInput) -> TickEvents {
    let mut events = TickEvents::default();
    if state.phase != GamePhase::Playing {
        return events;
    }

    // Craft physics
    state.craft.apply_thrust(input.thrust);
    state.craft.step(&state.tuning, state.viewport.height);

    // Obstacle stream
    state
        .obstacles
        .maybe_spawn(state.frame_count, &mut state.rng, &state.tuning, state.viewport);
    state.obstacles.advance(state.tuning.obstacle_speed);
    state.obstacles.retire_offscreen();

    // Collision
    let craft_box = state.craft.bounds();
    if let Some(hit) = state.obstacles.first_hit(&craft_box) {
        log::debug!("Craft hit obstacle of pair {}", hit.pair_id);
        events.run_ended = Some(state.end_run());
        return events;
    }

    // Scoring
    let passed = state.obstacles.record_passes(state.craft.pos.x);
    if passed > 0 {
        state.score += passed;
        events.pairs_passed = passed;
    }

    // Background
    state.starfield.step(&mut state.fx_rng, state.viewport);

    state.frame_count += 1;
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Viewport;
    use crate::tuning::Tuning;

    /// Weightless craft at mid-height and gaps tall enough to always contain it
    fn hovering_state() -> GameState {
        let tuning = Tuning {
            gravity: 0.0,
            min_gap: 550.0,
            max_gap: 550.0,
            ..Tuning::default()
        };
        let mut state = GameState::with_config(7, tuning, Viewport::new(800.0, 600.0));
        state.start();
        state
    }

    #[test]
    fn test_tick_ignored_outside_playing() {
        let mut state = GameState::new(1);
        let input = TickInput { thrust: true };

        assert!(tick(&mut state, &input).is_empty());
        assert_eq!(state.frame_count, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.craft.vel, 0.0);
    }

    #[test]
    fn test_first_tick_spawns_a_pair() {
        let mut state = GameState::new(1);
        state.start();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.frame_count, 1);
        // Spawned at the right edge then advanced once
        assert_eq!(state.obstacles.obstacles[0].pos.x, 798.0);
    }

    #[test]
    fn test_thrust_input_reaches_craft() {
        let mut state = hovering_state();
        tick(&mut state, &TickInput { thrust: true });
        assert!(state.craft.thrusting);
        assert!(state.craft.vel < 0.0);
        tick(&mut state, &TickInput { thrust: false });
        assert!(!state.craft.thrusting);
    }

    #[test]
    fn test_score_once_per_pair() {
        let mut state = hovering_state();
        let mut total = 0;
        for _ in 0..1000 {
            let events = tick(&mut state, &TickInput::default());
            assert!(events.run_ended.is_none());
            total += events.pairs_passed;
        }
        // Pairs spawned at frames 0..=600 have travelled far enough to clear x = 100
        assert_eq!(state.score, 6);
        assert_eq!(total, 6);
        assert!(state.obstacles.iter().filter(|o| o.passed).all(|o| o.right() < 100.0));
    }

    #[test]
    fn test_offscreen_obstacles_retired() {
        let mut state = hovering_state();
        for _ in 0..1000 {
            tick(&mut state, &TickInput::default());
            assert!(state.obstacles.iter().all(|o| o.right() >= 0.0));
        }
        // Pairs from frames 600, 720, 840 and 960 remain
        assert_eq!(state.obstacles.len(), 8);
    }

    #[test]
    fn test_collision_ends_run() {
        // Default gravity drops the craft onto the floor, into every bottom obstacle
        let mut state = GameState::with_config(3, Tuning::default(), Viewport::new(800.0, 600.0));
        state.start();

        let mut ended = None;
        for _ in 0..400 {
            let events = tick(&mut state, &TickInput::default());
            if let Some(summary) = events.run_ended {
                ended = Some(summary);
                break;
            }
        }
        let summary = ended.expect("craft should crash into the first pair");
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(summary.score, 0);
        assert!(!summary.new_best);

        // Frozen after the crash
        let frame = state.frame_count;
        assert!(tick(&mut state, &TickInput::default()).is_empty());
        assert_eq!(state.frame_count, frame);
    }

    #[test]
    fn test_pause_freezes_and_resume_continues() {
        let mut state = hovering_state();
        for _ in 0..500 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.toggle_pause());
        let score = state.score;
        let frame = state.frame_count;
        let obstacles = state.obstacles.obstacles.clone();
        let craft = state.craft.clone();

        for _ in 0..100 {
            assert!(tick(&mut state, &TickInput { thrust: true }).is_empty());
        }
        assert_eq!(state.score, score);
        assert_eq!(state.frame_count, frame);
        assert_eq!(state.obstacles.obstacles, obstacles);
        assert_eq!(state.craft, craft);

        assert!(state.toggle_pause());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, score);
        assert_eq!(state.obstacles.obstacles, obstacles);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.frame_count, frame + 1);
    }

    #[test]
    fn test_replay_after_crash_starts_clean() {
        let mut state = GameState::new(5);
        state.start();
        while state.phase == GamePhase::Playing {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.start());
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.frame_count, 0);
    }

    #[test]
    fn test_determinism() {
        let inputs: Vec<TickInput> = (0..600)
            .map(|i| TickInput {
                thrust: (i / 17) % 2 == 0,
            })
            .collect();

        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        state1.start();
        state2.start();
        for input in &inputs {
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.frame_count, state2.frame_count);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.craft, state2.craft);
        assert_eq!(state1.obstacles.obstacles, state2.obstacles.obstacles);
        assert_eq!(state1.starfield, state2.starfield);
    }

    #[test]
    fn test_star_density_does_not_change_obstacles() {
        let mut plain = GameState::new(42);
        let mut sparse = GameState::new(42);
        sparse.set_star_density(0.25);
        plain.start();
        sparse.start();
        for _ in 0..300 {
            let input = TickInput { thrust: plain.craft.pos.y > 300.0 };
            tick(&mut plain, &input);
            tick(&mut sparse, &input);
        }
        assert_eq!(plain.obstacles.obstacles, sparse.obstacles.obstacles);
    }
}
