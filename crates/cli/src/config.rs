// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI configuration file
//!
//! Tailing options sit at the top level; the catalog lists the databases
//! and collections the log refers to.
//!
//! ```toml
//! wal = "/var/lib/walt/wal.jsonl"
//! include_system = false
//!
//! [[filter]]
//! database = 1
//! collections = [5]
//!
//! [[databases]]
//! id = 1
//! name = "shop"
//!
//! [[databases.collections]]
//! id = 5
//! name = "orders"
//! uuid = "h1/5"
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use walt_core::{CollectionId, CollectionInfo, DatabaseId, MemoryCatalog};
use walt_engine::TailConfig;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// WAL file used when `--wal` is not given
    pub wal: Option<PathBuf>,
    pub databases: Vec<DatabaseEntry>,
    #[serde(flatten)]
    pub tail: TailConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseEntry {
    pub id: DatabaseId,
    pub name: String,
    #[serde(default)]
    pub collections: Vec<CollectionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionEntry {
    pub id: CollectionId,
    pub name: String,
    /// Defaults to `<database>/<collection>`
    pub uuid: Option<String>,
}

impl CliConfig {
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: CliConfig = toml::from_str(content)?;
        config.tail.validate()?;
        Ok(config)
    }

    /// Load `explicit` if given, else the default file if it exists
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_path() {
                Some(path) if path.is_file() => path,
                _ => return Ok(Self::default()),
            },
        };
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn catalog(&self) -> MemoryCatalog {
        let catalog = MemoryCatalog::new();
        for database in &self.databases {
            catalog.add_database(database.id, database.name.clone());
            for collection in &database.collections {
                let uuid = collection
                    .uuid
                    .clone()
                    .unwrap_or_else(|| format!("{}/{}", database.id, collection.id));
                catalog.add_collection(
                    database.id,
                    CollectionInfo::with_uuid(collection.id, collection.name.clone(), uuid),
                );
            }
        }
        catalog
    }
}

/// `$XDG_CONFIG_HOME/walt/config.toml` or the platform equivalent
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("walt").join("config.toml"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
