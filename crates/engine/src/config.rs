// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tailing configuration
//!
//! ```toml
//! chunk_size = 1048576
//! include_system = false
//! system_prefix = "_"
//! excluded_collections = ["_jobs", "_queues"]
//!
//! [[filter]]
//! database = 1
//! collections = [5, 9]
//! ```

use crate::filter::{default_excluded, SystemCollections, WalFilter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walt_core::{CollectionId, DatabaseId};

/// Default bytes of serialized events per `tail` call
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Collections of one database to include
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterEntry {
    pub database: DatabaseId,
    #[serde(default)]
    pub collections: Vec<CollectionId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TailConfig {
    pub chunk_size: usize,
    pub include_system: bool,
    pub system_prefix: String,
    pub excluded_collections: BTreeSet<String>,
    pub filter: Vec<FilterEntry>,
}

impl Default for TailConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            include_system: false,
            system_prefix: "_".to_string(),
            excluded_collections: default_excluded(),
            filter: Vec::new(),
        }
    }
}

impl TailConfig {
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: TailConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Reject filters that name a database twice
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = BTreeSet::new();
        for entry in &self.filter {
            if !seen.insert(entry.database) {
                return Err(ConfigError::Invalid(format!(
                    "database {} appears in more than one filter entry",
                    entry.database
                )));
            }
        }
        Ok(())
    }

    /// The inclusion map; empty when no filter entries are configured
    pub fn wal_filter(&self) -> WalFilter {
        self.filter
            .iter()
            .map(|entry| (entry.database, entry.collections.iter().copied().collect()))
            .collect()
    }

    pub fn system_collections(&self) -> SystemCollections {
        SystemCollections {
            prefix: self.system_prefix.clone(),
            excluded: self.excluded_collections.clone(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
