//! Category priority table backed by a RON file.
//!
//! Maps a category name to its rank in the generated output. The table is
//! deployment configuration (`config/category_order.ron`); categories it
//! does not name sort after every ranked one.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::CatalogError;

/// Rank given to categories absent from the table
pub const UNRANKED: u32 = u32::MAX;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryOrder {
    ranks: HashMap<String, u32>,
}

impl CategoryOrder {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        Self {
            ranks: pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }

    pub fn parse(content: &str) -> Result<Self, CatalogError> {
        Ok(ron::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let order = Self::parse(&content)?;
        log::info!("[CATALOG] Loaded {} category ranks from {:?}", order.len(), path);
        Ok(order)
    }

    pub fn rank(&self, category: &str) -> u32 {
        self.ranks.get(category).copied().unwrap_or(UNRANKED)
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}
