//! Data-driven game balance
//!
//! [`Tuning`] mirrors every gameplay constant in [`crate::consts`]. A JSON
//! document can override any subset of fields; missing keys fall back to the
//! compile-time defaults, so `{"gravity": 0.15}` is a valid tuning file.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Runtime-tunable gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Craft ===
    pub gravity: f32,
    pub thrust_power: f32,
    pub max_vertical_velocity: f32,
    pub craft_x: f32,
    pub craft_width: f32,
    pub craft_height: f32,

    // === Obstacles ===
    /// Ticks between spawned pairs
    pub spawn_interval: u64,
    pub obstacle_speed: f32,
    pub obstacle_width: f32,
    pub min_gap: f32,
    pub max_gap: f32,
    pub obstacle_margin: f32,

    // === Background ===
    pub star_layer_speeds: Vec<f32>,
    pub star_layer_densities: Vec<usize>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            thrust_power: THRUST_POWER,
            max_vertical_velocity: MAX_VERTICAL_VELOCITY,
            craft_x: CRAFT_X,
            craft_width: CRAFT_WIDTH,
            craft_height: CRAFT_HEIGHT,

            spawn_interval: OBSTACLE_SPAWN_INTERVAL,
            obstacle_speed: OBSTACLE_SPEED,
            obstacle_width: OBSTACLE_WIDTH,
            min_gap: MIN_OBSTACLE_GAP,
            max_gap: MAX_OBSTACLE_GAP,
            obstacle_margin: OBSTACLE_MARGIN,

            star_layer_speeds: STAR_LAYER_SPEEDS.to_vec(),
            star_layer_densities: STAR_LAYER_DENSITIES.to_vec(),
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Speed/density pairs for each star layer, back to front.
    /// Extra entries in the longer list are ignored.
    pub fn star_layers(&self) -> impl Iterator<Item = (f32, usize)> + '_ {
        self.star_layer_speeds
            .iter()
            .copied()
            .zip(self.star_layer_densities.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.25, "spawn_interval": 90 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.25);
        assert_eq!(tuning.spawn_interval, 90);
        assert_eq!(tuning.thrust_power, THRUST_POWER);
        assert_eq!(tuning.max_gap, MAX_OBSTACLE_GAP);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("{ gravity: ").is_err());
    }

    #[test]
    fn test_star_layers_zip_speeds_and_densities() {
        let tuning = Tuning::default();
        let layers: Vec<_> = tuning.star_layers().collect();
        assert_eq!(layers, vec![(0.5, 50), (1.0, 40), (1.5, 30), (2.0, 20)]);
    }
}
