//! Input events
//!
//! Hosts translate raw key, touch and button events into [`InputEvent`]s.
//! Several physical sources can hold thrust at once; [`ThrustSources`] folds
//! them into the single flag the simulation sees.

/// Physical origin of a thrust press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThrustSource {
    Key,
    Touch,
    Pointer,
}

/// Discrete input delivered to the game driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    ThrustStart(ThrustSource),
    ThrustEnd(ThrustSource),
    PauseToggle,
    StartOrReplay,
}

/// Which sources currently hold thrust
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThrustSources {
    key: bool,
    touch: bool,
    pointer: bool,
}

impl ThrustSources {
    pub fn press(&mut self, source: ThrustSource) {
        *self.slot(source) = true;
    }

    pub fn release(&mut self, source: ThrustSource) {
        *self.slot(source) = false;
    }

    /// Release everything (new run, lost focus)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Thrust is on while any source holds it
    pub fn active(&self) -> bool {
        self.key || self.touch || self.pointer
    }

    fn slot(&mut self, source: ThrustSource) -> &mut bool {
        match source {
            ThrustSource::Key => &mut self.key,
            ThrustSource::Touch => &mut self.touch,
            ThrustSource::Pointer => &mut self.pointer,
        }
    }
}

/// Map a `KeyboardEvent.key` value on key down
pub fn key_down(key: &str) -> Option<InputEvent> {
    match key {
        " " | "ArrowUp" => Some(InputEvent::ThrustStart(ThrustSource::Key)),
        "Enter" => Some(InputEvent::StartOrReplay),
        _ => None,
    }
}

/// Map a `KeyboardEvent.key` value on key up
///
/// Pause toggles on release so a held key does not flicker the pause panel.
pub fn key_up(key: &str) -> Option<InputEvent> {
    match key {
        " " | "ArrowUp" => Some(InputEvent::ThrustEnd(ThrustSource::Key)),
        "p" | "P" => Some(InputEvent::PauseToggle),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_coalesce() {
        let mut sources = ThrustSources::default();
        assert!(!sources.active());

        sources.press(ThrustSource::Key);
        sources.press(ThrustSource::Touch);
        assert!(sources.active());

        // Releasing one source keeps thrust while the other is still held
        sources.release(ThrustSource::Key);
        assert!(sources.active());
        sources.release(ThrustSource::Touch);
        assert!(!sources.active());
    }

    #[test]
    fn test_repeated_press_is_one_hold() {
        let mut sources = ThrustSources::default();
        sources.press(ThrustSource::Key);
        sources.press(ThrustSource::Key);
        sources.release(ThrustSource::Key);
        assert!(!sources.active());
    }

    #[test]
    fn test_clear() {
        let mut sources = ThrustSources::default();
        sources.press(ThrustSource::Pointer);
        sources.clear();
        assert!(!sources.active());
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_down(" "), Some(InputEvent::ThrustStart(ThrustSource::Key)));
        assert_eq!(key_down("ArrowUp"), Some(InputEvent::ThrustStart(ThrustSource::Key)));
        assert_eq!(key_up("ArrowUp"), Some(InputEvent::ThrustEnd(ThrustSource::Key)));
        assert_eq!(key_up("P"), Some(InputEvent::PauseToggle));
        assert_eq!(key_down("p"), None);
        assert_eq!(key_down("Enter"), Some(InputEvent::StartOrReplay));
        assert_eq!(key_down("x"), None);
    }
}
