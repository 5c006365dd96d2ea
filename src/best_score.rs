//! Best score record
//!
//! A single integer persisted under a fixed key. It is read once at startup
//! and written only when a run sets a new record.

use crate::platform::Storage;

/// The persisted best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore {
    value: u32,
}

impl BestScore {
    /// Storage key (shared with earlier builds of the game)
    pub const STORAGE_KEY: &'static str = "spaceshipHighscore";

    pub fn new(value: u32) -> Self {
        Self { value }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Whether `score` would set a new record
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.value
    }

    /// Load the record; absent or malformed values count as no record
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<u32>(raw.trim()) {
                Ok(value) => {
                    log::info!("Loaded best score {}", value);
                    Self { value }
                }
                Err(_) => {
                    log::warn!("Ignoring malformed best score {:?}", raw);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                Self::default()
            }
            Err(err) => {
                log::warn!("Could not read best score: {}", err);
                Self::default()
            }
        }
    }

    /// Record a finished run's score
    ///
    /// Persists and returns true only when `score` strictly beats the record.
    /// A failed write is logged; the in-memory record still advances.
    pub fn submit(&mut self, score: u32, storage: &mut dyn Storage) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.value = score;
        match serde_json::to_string(&score) {
            Ok(json) => match storage.set_item(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("New best score {} saved", score),
                Err(err) => log::warn!("Could not save best score {}: {}", score, err),
            },
            Err(err) => log::warn!("Could not encode best score {}: {}", score, err),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MemoryStorage, StorageError};

    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn test_load_missing_is_zero() {
        let storage = MemoryStorage::new();
        assert_eq!(BestScore::load(&storage).value(), 0);
    }

    #[test]
    fn test_load_stored_value() {
        let storage = MemoryStorage::with_item(BestScore::STORAGE_KEY, "17");
        assert_eq!(BestScore::load(&storage).value(), 17);
    }

    #[test]
    fn test_load_malformed_is_zero() {
        for raw in ["", "abc", "-4", "3.5", "{}"] {
            let storage = MemoryStorage::with_item(BestScore::STORAGE_KEY, raw);
            assert_eq!(BestScore::load(&storage).value(), 0, "raw value {:?}", raw);
        }
    }

    #[test]
    fn test_load_unreadable_is_zero() {
        assert_eq!(BestScore::load(&BrokenStorage).value(), 0);
    }

    #[test]
    fn test_submit_writes_only_strictly_higher() {
        let mut storage = MemoryStorage::with_item(BestScore::STORAGE_KEY, "5");
        let mut best = BestScore::load(&storage);

        assert!(!best.submit(5, &mut storage));
        assert_eq!(storage.writes(), 0);
        assert!(!best.submit(2, &mut storage));
        assert_eq!(storage.writes(), 0);

        assert!(best.submit(6, &mut storage));
        assert_eq!(best.value(), 6);
        assert_eq!(storage.writes(), 1);
        assert_eq!(
            storage.get_item(BestScore::STORAGE_KEY).unwrap().as_deref(),
            Some("6")
        );
    }

    #[test]
    fn test_submit_survives_write_failure() {
        let mut best = BestScore::new(1);
        assert!(best.submit(4, &mut BrokenStorage));
        assert_eq!(best.value(), 4);
    }
}
