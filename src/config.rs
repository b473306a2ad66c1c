//! Runtime configuration
//!
//! Everything has a default; a JSON file can override any subset of fields.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub search: SearchConfig,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }
}

/// How raw catalog data is cleaned up while loading
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Herbs whose name contains any of these never show up as substitutes
    pub denylist: Vec<String>,
    /// Misspelled property value -> canonical spelling
    pub property_fixes: BTreeMap<String, String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            denylist: vec!["Demon Core".to_string()],
            property_fixes: BTreeMap::from([("Coalesing".to_string(), "Coalescing".to_string())]),
        }
    }
}

impl CatalogConfig {
    pub fn is_denied(&self, name: &str) -> bool {
        self.denylist.iter().any(|fragment| name.contains(fragment.as_str()))
    }

    pub fn normalize_property(&self, property: &str) -> String {
        self.property_fixes
            .get(property)
            .cloned()
            .unwrap_or_else(|| property.to_string())
    }
}

/// Substitution rule knobs
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Furnace capacity at which the primary slot may be split
    pub max_capacity: u32,
    /// Minimum capacity for splitting the secondary slot; `None` always allows it
    pub secondary_split_min_capacity: Option<u32>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_capacity: 14,
            secondary_split_min_capacity: Some(10),
        }
    }
}
