//! Per-biome bias tables and the weighted element draw

use rand::Rng;

use crate::config::parse_bias_line;
use crate::element::{Element, REAL_ELEMENTS};

/// Accumulated bias weight per real element for one biome
///
/// All four real elements are always present; elements with no
/// configuration sit at 0. A table is built once and replaced
/// wholesale on reload, never mutated after construction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BiasTable {
    weights: [f64; REAL_ELEMENTS.len()],
}

impl BiasTable {
    fn slot(element: Element) -> Option<usize> {
        REAL_ELEMENTS.iter().position(|&e| e == element)
    }

    /// Configured weight for an element (0 for the sentinel)
    pub fn weight(&self, element: Element) -> f64 {
        Self::slot(element).map_or(0.0, |i| self.weights[i])
    }

    /// Add weight for an element; the sentinel contributes nothing
    pub fn add_weight(&mut self, element: Element, weight: f64) {
        if let Some(i) = Self::slot(element) {
            self.weights[i] += weight;
        }
    }

    /// Summed weight across all four elements
    ///
    /// Unbounded above: a biome configured past 100 total is legal and
    /// just shifts the draw odds.
    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Weighted roulette draw over the table
    ///
    /// Rolls uniformly in `[0, total)` and walks the elements in
    /// `REAL_ELEMENTS` order; the first element whose cumulative weight
    /// passes the roll wins, which makes enumeration order the
    /// tie-break at weight boundaries. Elements at weight 0 can never
    /// win. Returns `None` when the table holds no positive weight.
    pub fn pick_weighted<R: Rng>(&self, rng: &mut R) -> Option<Element> {
        let total = self.total();
        if total <= 0.0 {
            return None;
        }

        let mut remaining = rng.gen::<f64>() * total;
        let mut last_weighted = None;
        for (i, &element) in REAL_ELEMENTS.iter().enumerate() {
            let weight = self.weights[i];
            if weight <= 0.0 {
                continue;
            }
            last_weighted = Some(element);
            remaining -= weight;
            if remaining < 0.0 {
                return Some(element);
            }
        }

        // Float roundoff can leave a sliver of the roll unspent; it
        // belongs to the last weighted element
        last_weighted
    }
}

/// Build the bias table for one biome from raw configuration lines
///
/// Keeps entries whose biome key exactly matches `biome_key`. Weights
/// for the same element accumulate across lines rather than override.
pub fn build_bias_table(lines: &[String], biome_key: &str) -> BiasTable {
    let mut table = BiasTable::default();
    for line in lines {
        for entry in parse_bias_line(line) {
            if entry.biome_key == biome_key {
                table.add_weight(entry.element, entry.weight);
            }
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_accumulates_additively() {
        let lines = lines(&["x:fire,150", "x:fire,30", "x:frost,10"]);
        let table = build_bias_table(&lines, "x");
        // 150 clamps to 100 per entry before accumulation
        assert_eq!(table.weight(Element::Fire), 130.0);
        assert_eq!(table.weight(Element::Frost), 10.0);
        assert_eq!(table.weight(Element::Nature), 0.0);
        assert_eq!(table.total(), 140.0);
    }

    #[test]
    fn test_build_all_raises_every_element() {
        let table = build_bias_table(&lines(&["x:all,20"]), "x");
        for &element in &REAL_ELEMENTS {
            assert_eq!(table.weight(element), 20.0);
        }
    }

    #[test]
    fn test_build_matches_biome_key_exactly() {
        let lines = lines(&["x:fire,50", "xx:frost,50", "y:nature,50"]);
        let table = build_bias_table(&lines, "x");
        assert_eq!(table.weight(Element::Fire), 50.0);
        assert_eq!(table.total(), 50.0);
    }

    #[test]
    fn test_build_ignores_malformed_lines() {
        let lines = lines(&["bad_line_no_colon,5", "x:fire,oops", "x:fire,40"]);
        let table = build_bias_table(&lines, "x");
        assert_eq!(table.total(), 40.0);
    }

    #[test]
    fn test_empty_table_picks_nothing() {
        let table = build_bias_table(&[], "x");
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(table.total(), 0.0);
        assert_eq!(table.pick_weighted(&mut rng), None);
    }

    #[test]
    fn test_single_weighted_element_always_wins() {
        let table = build_bias_table(&lines(&["x:nature,100"]), "x");
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..1000 {
            assert_eq!(table.pick_weighted(&mut rng), Some(Element::Nature));
        }
    }

    #[test]
    fn test_pick_follows_weight_ratio() {
        let table = build_bias_table(&lines(&["x:fire,75", "x:frost,25"]), "x");
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        let mut fire = 0;
        for _ in 0..10_000 {
            match table.pick_weighted(&mut rng) {
                Some(Element::Fire) => fire += 1,
                Some(Element::Frost) => {}
                other => panic!("unexpected pick {:?}", other),
            }
        }
        // Expect ~7500 fire picks
        assert!((7000..8000).contains(&fire), "fire picked {} times", fire);
    }
}
