//! Memoized bias tables keyed by biome
//!
//! Tables are parsed from configuration on first lookup per biome and
//! reused until a full invalidation. There is no partial eviction:
//! entries only ever drop all at once, on the reload signal from the
//! configuration source.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::config::BiasConfig;
use crate::table::{build_bias_table, BiasTable};

/// Process-lifetime cache of built bias tables
#[derive(Debug, Default)]
pub struct BiasCache {
    tables: RwLock<HashMap<String, BiasTable>>,
}

impl BiasCache {
    pub fn new() -> Self {
        BiasCache {
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// Get the table for a biome, building it from `config` on first use
    ///
    /// Concurrent misses on the same key may both build; the first
    /// stored result wins. The builder is deterministic for the same
    /// lines, so either result is valid.
    pub fn get(&self, config: &BiasConfig, biome_key: &str) -> BiasTable {
        if let Some(table) = self.tables.read().unwrap().get(biome_key) {
            return *table;
        }

        let table = build_bias_table(config.lines(), biome_key);
        log::debug!(
            "built bias table for biome '{}' (total weight {:.1})",
            biome_key,
            table.total()
        );

        let mut tables = self.tables.write().unwrap();
        *tables.entry(biome_key.to_string()).or_insert(table)
    }

    /// Drop every cached table
    ///
    /// The next lookup per biome rebuilds from whatever configuration
    /// it is handed, so callers signal this whenever the line list
    /// changes.
    pub fn invalidate_all(&self) {
        self.tables.write().unwrap().clear();
    }

    /// Number of biomes with a built table
    pub fn len(&self) -> usize {
        self.tables.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
