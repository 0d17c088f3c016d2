//! Tunable global bias percentages and environment thresholds

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Global tuning for elemental resolution
///
/// Chances are percentages in 0-100. Callers pass the current params
/// into every resolution, so edits take effect on the very next spawn
/// without touching the bias cache.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BiasParams {
    // Storm override
    /// Chance a thunderstorm spawn rolls Thunder
    pub storm_thunder_chance: f64,

    // Environmental defaults
    /// Chance a hot-biome spawn rolls Fire
    pub hot_biome_fire_chance: f64,
    /// Chance a cold-biome spawn rolls Frost
    pub cold_biome_frost_chance: f64,
    /// Chance a forest spawn rolls Nature
    pub forest_nature_chance: f64,

    // Environment thresholds
    /// Temperature at or above which a biome counts as hot (deg C)
    pub hot_temperature: f32,
    /// Temperature at or below which a biome counts as cold (deg C)
    pub cold_temperature: f32,
}

impl Default for BiasParams {
    fn default() -> Self {
        BiasParams {
            // Storm override
            storm_thunder_chance: 60.0,

            // Environmental defaults
            hot_biome_fire_chance: 35.0,
            cold_biome_frost_chance: 35.0,
            forest_nature_chance: 30.0,

            // Environment thresholds
            hot_temperature: 30.0,
            cold_temperature: 0.0,
        }
    }
}

impl BiasParams {
    /// Load from a JSON file, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                log::warn!(
                    "failed to read bias params {}: {} (using defaults)",
                    path.display(),
                    err
                );
                return Self::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(params) => params,
            Err(err) => {
                log::warn!(
                    "failed to parse bias params {}: {} (using defaults)",
                    path.display(),
                    err
                );
                Self::default()
            }
        }
    }
}
