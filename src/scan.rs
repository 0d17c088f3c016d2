//! Spawn scan - assigns elements to newly spawned creatures
//!
//! The scan walks a creature batch once per pass, resolves an element
//! for every creature still carrying the sentinel, and stores the
//! result so later passes skip it. `ElementManager` is the composition
//! root: it owns the configuration, the bias cache, and the tuning
//! params, so tests and callers get isolated instances instead of
//! ambient global state.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cache::BiasCache;
use crate::config::BiasConfig;
use crate::element::Element;
use crate::engine::{resolve_element, SpawnContext};
use crate::params::BiasParams;

/// Unique identifier for a spawned creature
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatureId(pub u32);

/// Static environment facts for one biome
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BiomeProfile {
    /// Stable identifier used to look up configured bias weights
    pub key: String,
    /// Representative temperature (deg C)
    pub temperature: f32,
    /// Snow-covered biome
    pub snowing: bool,
    /// Forest-classified biome
    pub forest: bool,
}

impl BiomeProfile {
    pub fn new(key: &str, temperature: f32, snowing: bool, forest: bool) -> Self {
        BiomeProfile {
            key: key.to_string(),
            temperature,
            snowing,
            forest,
        }
    }

    /// Build the per-spawn context under the current weather
    pub fn spawn_context(&self, thunderstorm: bool) -> SpawnContext<'_> {
        SpawnContext {
            biome_key: &self.key,
            temperature: self.temperature,
            snowing: self.snowing,
            forest: self.forest,
            thunderstorm,
        }
    }
}

/// A spawned creature awaiting (or holding) an elemental affinity
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Creature {
    pub id: CreatureId,
    pub species: String,
    pub biome: BiomeProfile,
    /// `Element::None` until the scan assigns a real element
    pub element: Element,
}

impl Creature {
    pub fn new(id: CreatureId, species: &str, biome: BiomeProfile) -> Self {
        Creature {
            id,
            species: species.to_string(),
            biome,
            element: Element::None,
        }
    }

    /// Creature has not been through elemental assignment yet
    pub fn needs_element(&self) -> bool {
        self.element == Element::None
    }
}

/// Owns the bias configuration, cache, and tuning for spawn scans
#[derive(Debug, Default)]
pub struct ElementManager {
    config: BiasConfig,
    cache: BiasCache,
    params: BiasParams,
}

impl ElementManager {
    pub fn new(config: BiasConfig, params: BiasParams) -> Self {
        ElementManager {
            config,
            cache: BiasCache::new(),
            params,
        }
    }

    /// Swap in a new configuration and drop every cached table
    pub fn reload(&mut self, config: BiasConfig) {
        self.config = config;
        self.cache.invalidate_all();
    }

    /// Replace the tuning percentages; applies from the next roll
    pub fn set_params(&mut self, params: BiasParams) {
        self.params = params;
    }

    pub fn params(&self) -> &BiasParams {
        &self.params
    }

    /// Resolve one spawn directly
    pub fn resolve<R: Rng>(&self, ctx: &SpawnContext, rng: &mut R) -> Element {
        resolve_element(&self.config, &self.cache, ctx, &self.params, rng)
    }

    /// Assign elements to every unprocessed creature in the batch
    ///
    /// Creatures already holding a real element are skipped, so a
    /// creature is resolved at most once across repeated passes.
    /// Returns how many creatures were assigned this pass.
    pub fn scan<R: Rng>(
        &self,
        creatures: &mut [Creature],
        thunderstorm: bool,
        rng: &mut R,
    ) -> usize {
        let mut assigned = 0;
        for creature in creatures.iter_mut().filter(|c| c.needs_element()) {
            let ctx = creature.biome.spawn_context(thunderstorm);
            creature.element = resolve_element(&self.config, &self.cache, &ctx, &self.params, rng);
            assigned += 1;
        }
        assigned
    }
}
