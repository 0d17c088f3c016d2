//! Spawn bias configuration - raw line list and entry parser
//!
//! Each line nominally reads `<biomeKey>:<element>,<weight>` where the
//! element selector is a real element name or `all`. Malformed lines
//! contribute nothing: bad configuration degrades silently instead of
//! failing a spawn. Defaults are embedded in the binary via
//! `include_str!`; an optional config file can replace them.

use std::path::Path;

use crate::element::{Element, REAL_ELEMENTS};

const DEFAULT_BIASES_CFG: &str = include_str!("../data/defaults/spawn_biases.cfg");

/// One parsed bias contribution for a single biome and element
#[derive(Clone, Debug, PartialEq)]
pub struct BiasEntry {
    pub biome_key: String,
    pub element: Element,
    pub weight: f64,
}

/// Parse one configuration line into zero, one, or four entries
///
/// A line is dropped (empty vec, no error) when it lacks a comma,
/// lacks a colon before the comma, the weight does not parse as a
/// number, or the selector names no real element. Weights are clamped
/// to 0-100 before storage. The `all` selector (case-insensitive) fans
/// the weight out to all four real elements.
pub fn parse_bias_line(line: &str) -> Vec<BiasEntry> {
    let Some((key_part, weight_part)) = line.split_once(',') else {
        return Vec::new();
    };
    let Some((biome_key, selector)) = key_part.split_once(':') else {
        return Vec::new();
    };
    let Ok(weight) = weight_part.trim().parse::<f64>() else {
        return Vec::new();
    };
    if weight.is_nan() {
        return Vec::new();
    }

    let weight = weight.clamp(0.0, 100.0);
    let biome_key = biome_key.trim();
    let selector = selector.trim();

    if selector.eq_ignore_ascii_case("all") {
        return REAL_ELEMENTS
            .iter()
            .map(|&element| BiasEntry {
                biome_key: biome_key.to_string(),
                element,
                weight,
            })
            .collect();
    }

    match Element::from_key(selector) {
        Some(element) => vec![BiasEntry {
            biome_key: biome_key.to_string(),
            element,
            weight,
        }],
        None => Vec::new(),
    }
}

/// Ordered bias configuration lines, as supplied by the config source
#[derive(Clone, Debug, Default)]
pub struct BiasConfig {
    lines: Vec<String>,
}

impl BiasConfig {
    /// Wrap an externally supplied line list
    pub fn new(lines: Vec<String>) -> Self {
        BiasConfig { lines }
    }

    /// Embedded default configuration compiled into the binary
    pub fn defaults() -> Self {
        Self::from_contents(DEFAULT_BIASES_CFG)
    }

    /// Load from a config file, falling back to the embedded defaults
    ///
    /// An unreadable file logs a warning and never fails the caller.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_contents(&contents),
            Err(err) => {
                log::warn!(
                    "failed to read bias config {}: {} (using embedded defaults)",
                    path.display(),
                    err
                );
                Self::defaults()
            }
        }
    }

    /// Split file contents into lines, skipping blanks and `#` comments
    fn from_contents(contents: &str) -> Self {
        let lines = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        BiasConfig { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}
