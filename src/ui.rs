//! HUD and panel visibility
//!
//! The page holds every panel up front; each frame (and after every
//! transition) the host shows or hides them from a [`HudView`] and fills in
//! the text values. Keeping the decision here lets it be tested without a DOM.

use crate::sim::{GamePhase, GameState};

/// Element ids used by the page
pub mod ids {
    pub const HOME_PANEL: &str = "home-screen";
    pub const SCORE_DISPLAY: &str = "hud-score";
    pub const PAUSE_BUTTON: &str = "pause-btn";
    pub const PAUSE_PANEL: &str = "pause-menu";
    pub const GAME_OVER_PANEL: &str = "game-over";

    pub const SCORE_VALUE: &str = "score";
    pub const HOME_BEST_VALUE: &str = "home-best";
    pub const FINAL_SCORE_VALUE: &str = "final-score";
    pub const FINAL_BEST_VALUE: &str = "final-best";
    pub const NEW_BEST_BADGE: &str = "new-best";

    pub const START_BUTTON: &str = "start-btn";
    pub const REPLAY_BUTTON: &str = "replay-btn";
    pub const RESUME_BUTTON: &str = "resume-btn";
}

/// What the HUD should show for the current state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudView {
    pub home_panel: bool,
    pub score_display: bool,
    pub pause_button: bool,
    pub pause_panel: bool,
    pub game_over_panel: bool,
    pub score: u32,
    pub best_score: u32,
    /// The last run set the current best
    pub new_best: bool,
}

impl HudView {
    pub fn from_state(state: &GameState) -> Self {
        let phase = state.phase;
        Self {
            home_panel: phase == GamePhase::Idle,
            // Frozen score stays visible under the pause panel
            score_display: matches!(phase, GamePhase::Playing | GamePhase::Paused),
            pause_button: phase == GamePhase::Playing,
            pause_panel: phase == GamePhase::Paused,
            game_over_panel: phase == GamePhase::Ended,
            score: state.score,
            best_score: state.best_score,
            new_best: phase == GamePhase::Ended && state.new_best,
        }
    }

    /// Panel ids paired with their visibility
    pub fn panels(&self) -> [(&'static str, bool); 6] {
        [
            (ids::HOME_PANEL, self.home_panel),
            (ids::SCORE_DISPLAY, self.score_display),
            (ids::PAUSE_BUTTON, self.pause_button),
            (ids::PAUSE_PANEL, self.pause_panel),
            (ids::GAME_OVER_PANEL, self.game_over_panel),
            (ids::NEW_BEST_BADGE, self.new_best),
        ]
    }

    /// Text element ids paired with their content
    pub fn texts(&self) -> [(&'static str, String); 4] {
        [
            (ids::SCORE_VALUE, self.score.to_string()),
            (ids::HOME_BEST_VALUE, self.best_score.to_string()),
            (ids::FINAL_SCORE_VALUE, self.score.to_string()),
            (ids::FINAL_BEST_VALUE, self.best_score.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible(view: &HudView) -> Vec<&'static str> {
        view.panels()
            .into_iter()
            .filter(|(_, shown)| *shown)
            .map(|(id, _)| id)
            .collect()
    }

    #[test]
    fn test_idle_shows_home_with_best() {
        let state = GameState::new(1).with_best_score(12);
        let view = HudView::from_state(&state);
        assert_eq!(visible(&view), vec![ids::HOME_PANEL]);
        assert!(view.texts().contains(&(ids::HOME_BEST_VALUE, "12".to_string())));
    }

    #[test]
    fn test_playing_shows_score_and_pause_button() {
        let mut state = GameState::new(1);
        state.start();
        state.score = 3;
        let view = HudView::from_state(&state);
        assert_eq!(visible(&view), vec![ids::SCORE_DISPLAY, ids::PAUSE_BUTTON]);
        assert!(view.texts().contains(&(ids::SCORE_VALUE, "3".to_string())));
    }

    #[test]
    fn test_paused_hides_pause_button() {
        let mut state = GameState::new(1);
        state.start();
        state.toggle_pause();
        let view = HudView::from_state(&state);
        assert_eq!(visible(&view), vec![ids::SCORE_DISPLAY, ids::PAUSE_PANEL]);
    }

    #[test]
    fn test_ended_shows_final_and_best() {
        let mut state = GameState::new(1).with_best_score(9);
        state.start();
        state.score = 4;
        state.end_run();
        let view = HudView::from_state(&state);
        assert_eq!(visible(&view), vec![ids::GAME_OVER_PANEL]);
        let texts = view.texts();
        assert!(texts.contains(&(ids::FINAL_SCORE_VALUE, "4".to_string())));
        assert!(texts.contains(&(ids::FINAL_BEST_VALUE, "9".to_string())));
    }

    #[test]
    fn test_new_best_badge() {
        let mut state = GameState::new(1).with_best_score(2);
        state.start();
        state.score = 5;
        state.end_run();
        let view = HudView::from_state(&state);
        assert!(view.new_best);
        assert_eq!(visible(&view), vec![ids::GAME_OVER_PANEL, ids::NEW_BEST_BADGE]);
    }

    #[test]
    fn test_tying_best_is_not_a_new_best() {
        let mut state = GameState::new(1).with_best_score(5);
        state.start();
        state.score = 5;
        state.end_run();
        assert!(!HudView::from_state(&state).new_best);
    }
}
