use std::path::Path;

use serde::{Deserialize, Serialize};

use metaspace_types::MAX_LIST_LIMIT;

use crate::error::{StoreError, StoreResult};

/// Configuration for a store instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum number of entries a single listing page may return.
    pub max_list_limit: usize,
    /// Buckets registered when the store is built.
    pub buckets: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_list_limit: MAX_LIST_LIMIT,
            buckets: Vec::new(),
        }
    }
}

impl StoreConfig {
    /// Parse from TOML. Missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> StoreResult<Self> {
        toml::from_str(s).map_err(|e| StoreError::Config(e.to_string()))
    }

    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Effective page size for an explicitly requested limit. Zero or
    /// oversized requests get the maximum.
    pub fn clamp_limit(&self, requested: usize) -> usize {
        if requested == 0 {
            self.max_list_limit
        } else {
            requested.min(self.max_list_limit)
        }
    }
}
