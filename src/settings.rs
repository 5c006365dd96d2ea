//! Game settings and preferences
//!
//! Persisted as JSON separately from the best score.

use serde::{Deserialize, Serialize};

use crate::platform::Storage;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Star count multiplier for the background layers
    pub fn star_density(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.0,
            QualityPreset::Medium => 1.0,
            QualityPreset::High => 1.5,
        }
    }

    /// Whether to render the parallax star field at all
    pub fn starfield_enabled(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => true,
            QualityPreset::High => true,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Behaviour ===
    /// Pause automatically when the tab is hidden or the window loses focus
    pub auto_pause: bool,

    // === Accessibility ===
    /// Reduced motion (steady thrust flame)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            auto_pause: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "neon_thrust_settings";

    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective star density (zero when the star field is off)
    pub fn star_density(&self) -> f32 {
        if self.quality.starfield_enabled() {
            self.quality.star_density()
        } else {
            0.0
        }
    }

    /// Whether the thrust flame flickers
    pub fn flame_flicker(&self) -> bool {
        !self.reduced_motion
    }

    /// Load settings, falling back to defaults when absent or unreadable
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings (quality {})", settings.quality.as_str());
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring malformed settings: {}", err);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(err) => {
                log::warn!("Could not read settings: {}", err);
                Self::default()
            }
        }
    }

    /// Save settings (best-effort)
    pub fn save(&self, storage: &mut dyn Storage) {
        match serde_json::to_string(self) {
            Ok(json) => match storage.set_item(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(err) => log::warn!("Could not save settings: {}", err),
            },
            Err(err) => log::warn!("Could not encode settings: {}", err),
        }
    }
}
