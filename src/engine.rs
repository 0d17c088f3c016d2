//! Elemental resolution - the ordered bias decision procedure
//!
//! Resolution walks four decision stages in priority order and takes
//! the first definitive answer: configured per-biome weights, the
//! thunderstorm override, environmental default rolls, then a uniform
//! pick. Each stage is its own function returning an optional element;
//! resolution always yields a real element in the end.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::cache::BiasCache;
use crate::config::BiasConfig;
use crate::element::{Element, REAL_ELEMENTS};
use crate::params::BiasParams;

/// Minimum summed table weight for configured bias to take over
const BIAS_ACTIVATION_THRESHOLD: f64 = 0.01;

/// Environmental snapshot for one spawn decision
#[derive(Clone, Copy, Debug)]
pub struct SpawnContext<'a> {
    /// Biome identifier used to look up configured bias weights
    pub biome_key: &'a str,
    /// Biome temperature (deg C)
    pub temperature: f32,
    /// Snow is falling or lying at the spawn site
    pub snowing: bool,
    /// Forest-classified biome
    pub forest: bool,
    /// A thunderstorm is active
    pub thunderstorm: bool,
}

/// Resolve the element for one spawn
///
/// Never returns `Element::None`. Params are read per call, so tuning
/// changes apply immediately; only the biome tables are cached.
pub fn resolve_element<R: Rng>(
    config: &BiasConfig,
    cache: &BiasCache,
    ctx: &SpawnContext,
    params: &BiasParams,
    rng: &mut R,
) -> Element {
    configured_bias_roll(config, cache, ctx.biome_key, rng)
        .or_else(|| storm_roll(ctx, params, rng))
        .or_else(|| environment_roll(ctx, params, rng))
        .unwrap_or_else(|| uniform_roll(rng))
}

/// Stage 1: weighted draw from the biome's configured table
///
/// Fires only when the biome carries meaningful configured weight;
/// once it fires it always picks something.
fn configured_bias_roll<R: Rng>(
    config: &BiasConfig,
    cache: &BiasCache,
    biome_key: &str,
    rng: &mut R,
) -> Option<Element> {
    let table = cache.get(config, biome_key);
    if table.total() <= BIAS_ACTIVATION_THRESHOLD {
        return None;
    }
    table.pick_weighted(rng)
}

/// Stage 2: thunderstorms favor Thunder, otherwise one of the rest
fn storm_roll<R: Rng>(ctx: &SpawnContext, params: &BiasParams, rng: &mut R) -> Option<Element> {
    if !ctx.thunderstorm {
        return None;
    }
    if rng.gen::<f64>() < params.storm_thunder_chance / 100.0 {
        return Some(Element::Thunder);
    }

    // Thunder sits out the miss branch; the rest split evenly
    const NON_THUNDER: [Element; 3] = [Element::Fire, Element::Frost, Element::Nature];
    NON_THUNDER.choose(rng).copied()
}

/// Stage 3: independent environment rolls, first success wins
///
/// Predicates are checked in fixed order: hot, cold, forest. A
/// predicate that holds but misses its roll falls through to the next;
/// all three can fail.
fn environment_roll<R: Rng>(
    ctx: &SpawnContext,
    params: &BiasParams,
    rng: &mut R,
) -> Option<Element> {
    if ctx.temperature >= params.hot_temperature
        && rng.gen::<f64>() < params.hot_biome_fire_chance / 100.0
    {
        return Some(Element::Fire);
    }

    if (ctx.snowing || ctx.temperature <= params.cold_temperature)
        && rng.gen::<f64>() < params.cold_biome_frost_chance / 100.0
    {
        return Some(Element::Frost);
    }

    if ctx.forest && rng.gen::<f64>() < params.forest_nature_chance / 100.0 {
        return Some(Element::Nature);
    }

    None
}

/// Stage 4: uniform pick over the real elements
fn uniform_roll<R: Rng>(rng: &mut R) -> Element {
    REAL_ELEMENTS[rng.gen_range(0..REAL_ELEMENTS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    fn config(raw: &[&str]) -> BiasConfig {
        BiasConfig::new(raw.iter().map(|s| s.to_string()).collect())
    }

    fn mild_context(biome_key: &str) -> SpawnContext<'_> {
        SpawnContext {
            biome_key,
            temperature: 15.0,
            snowing: false,
            forest: false,
            thunderstorm: false,
        }
    }

    fn resolve_many(
        config: &BiasConfig,
        ctx: &SpawnContext,
        params: &BiasParams,
        trials: usize,
        seed: u64,
    ) -> HashMap<Element, usize> {
        let cache = BiasCache::new();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut counts = HashMap::new();
        for _ in 0..trials {
            let element = resolve_element(config, &cache, ctx, params, &mut rng);
            *counts.entry(element).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_configured_bias_is_deterministic_for_single_element() {
        let config = config(&["x:nature,100"]);
        let counts = resolve_many(
            &config,
            &mild_context("x"),
            &BiasParams::default(),
            1000,
            9,
        );
        assert_eq!(counts.get(&Element::Nature), Some(&1000));
    }

    #[test]
    fn test_configured_bias_beats_storm() {
        let config = config(&["x:frost,50"]);
        let mut ctx = mild_context("x");
        ctx.thunderstorm = true;
        let mut params = BiasParams::default();
        params.storm_thunder_chance = 100.0;

        let counts = resolve_many(&config, &ctx, &params, 500, 11);
        assert_eq!(counts.get(&Element::Frost), Some(&500));
    }

    #[test]
    fn test_negligible_weight_falls_through_to_storm() {
        // Total of 0.005 sits below the activation threshold
        let config = config(&["x:fire,0.005"]);
        let mut ctx = mild_context("x");
        ctx.thunderstorm = true;
        let mut params = BiasParams::default();
        params.storm_thunder_chance = 100.0;

        let counts = resolve_many(&config, &ctx, &params, 500, 13);
        assert_eq!(counts.get(&Element::Thunder), Some(&500));
    }

    #[test]
    fn test_storm_at_full_chance_always_thunder() {
        let mut ctx = mild_context("anywhere");
        ctx.thunderstorm = true;
        let mut params = BiasParams::default();
        params.storm_thunder_chance = 100.0;

        let counts = resolve_many(&config(&[]), &ctx, &params, 1000, 17);
        assert_eq!(counts.get(&Element::Thunder), Some(&1000));
    }

    #[test]
    fn test_storm_at_zero_chance_splits_remainder_evenly() {
        let mut ctx = mild_context("anywhere");
        ctx.thunderstorm = true;
        let mut params = BiasParams::default();
        params.storm_thunder_chance = 0.0;

        let trials = 9000;
        let counts = resolve_many(&config(&[]), &ctx, &params, trials, 19);
        assert_eq!(counts.get(&Element::Thunder), None);
        for element in [Element::Fire, Element::Frost, Element::Nature] {
            let n = *counts.get(&element).unwrap_or(&0);
            // Expect ~3000 each
            assert!((2500..3500).contains(&n), "{:?} hit {} times", element, n);
        }
    }

    #[test]
    fn test_hot_biome_rolls_fire() {
        let mut ctx = mild_context("desert");
        ctx.temperature = 40.0;
        let mut params = BiasParams::default();
        params.hot_biome_fire_chance = 100.0;

        let counts = resolve_many(&config(&[]), &ctx, &params, 500, 23);
        assert_eq!(counts.get(&Element::Fire), Some(&500));
    }

    #[test]
    fn test_snow_counts_as_cold_regardless_of_temperature() {
        let mut ctx = mild_context("peaks");
        ctx.temperature = 10.0;
        ctx.snowing = true;
        let mut params = BiasParams::default();
        params.cold_biome_frost_chance = 100.0;

        let counts = resolve_many(&config(&[]), &ctx, &params, 500, 29);
        assert_eq!(counts.get(&Element::Frost), Some(&500));
    }

    #[test]
    fn test_environment_checks_hot_before_forest() {
        // Both predicates hold; the hot roll is taken first
        let mut ctx = mild_context("scorched_grove");
        ctx.temperature = 40.0;
        ctx.forest = true;
        let mut params = BiasParams::default();
        params.hot_biome_fire_chance = 100.0;
        params.forest_nature_chance = 100.0;

        let counts = resolve_many(&config(&[]), &ctx, &params, 500, 31);
        assert_eq!(counts.get(&Element::Fire), Some(&500));
    }

    #[test]
    fn test_failed_hot_roll_falls_through_to_forest() {
        let mut ctx = mild_context("scorched_grove");
        ctx.temperature = 40.0;
        ctx.forest = true;
        let mut params = BiasParams::default();
        params.hot_biome_fire_chance = 0.0;
        params.forest_nature_chance = 100.0;

        let counts = resolve_many(&config(&[]), &ctx, &params, 500, 37);
        assert_eq!(counts.get(&Element::Nature), Some(&500));
    }

    #[test]
    fn test_uniform_fallback_covers_all_real_elements() {
        let mut params = BiasParams::default();
        params.hot_biome_fire_chance = 0.0;
        params.cold_biome_frost_chance = 0.0;
        params.forest_nature_chance = 0.0;

        let trials = 8000;
        let counts = resolve_many(&config(&[]), &mild_context("plains"), &params, trials, 41);
        assert_eq!(counts.get(&Element::None), None);
        for &element in &REAL_ELEMENTS {
            let n = *counts.get(&element).unwrap_or(&0);
            // Expect ~2000 each
            assert!((1600..2400).contains(&n), "{:?} hit {} times", element, n);
        }
    }
}
