// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Catalog lookups
//!
//! The tailer resolves database handles, collection names and stable
//! collection ids through a `Catalog`. The catalog reflects the current
//! state of the server, so entities dropped since a record was written
//! resolve to `None`.

use crate::id::{CollectionId, DatabaseId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// A database known to the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    pub id: DatabaseId,
    pub name: String,
}

/// A collection known to the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub id: CollectionId,
    pub name: String,
    /// Globally unique id, stable across servers
    pub uuid: String,
}

impl CollectionInfo {
    /// Create a collection with a freshly generated stable id
    pub fn new(id: CollectionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            uuid: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn with_uuid(id: CollectionId, name: impl Into<String>, uuid: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            uuid: uuid.into(),
        }
    }
}

/// Resolves entity ids found in the log
pub trait Catalog {
    fn database(&self, id: DatabaseId) -> Option<DatabaseInfo>;

    fn collection(&self, database: DatabaseId, id: CollectionId) -> Option<CollectionInfo>;
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn database(&self, id: DatabaseId) -> Option<DatabaseInfo> {
        (**self).database(id)
    }

    fn collection(&self, database: DatabaseId, id: CollectionId) -> Option<CollectionInfo> {
        (**self).collection(database, id)
    }
}

impl<C: Catalog + ?Sized> Catalog for Arc<C> {
    fn database(&self, id: DatabaseId) -> Option<DatabaseInfo> {
        (**self).database(id)
    }

    fn collection(&self, database: DatabaseId, id: CollectionId) -> Option<CollectionInfo> {
        (**self).collection(database, id)
    }
}

#[derive(Debug, Clone)]
struct DatabaseEntry {
    info: DatabaseInfo,
    collections: BTreeMap<CollectionId, CollectionInfo>,
}

/// In-memory catalog
///
/// Cloning shares the underlying state, so a test can drop a collection
/// while a scan holds the catalog.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    databases: Arc<Mutex<BTreeMap<DatabaseId, DatabaseEntry>>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_database(&self, id: DatabaseId, name: impl Into<String>) {
        let name = name.into();
        let mut databases = self.databases.lock().unwrap_or_else(|e| e.into_inner());
        match databases.get_mut(&id) {
            Some(entry) => entry.info.name = name,
            None => {
                databases.insert(
                    id,
                    DatabaseEntry {
                        info: DatabaseInfo { id, name },
                        collections: BTreeMap::new(),
                    },
                );
            }
        }
    }

    /// Register a collection; creates the database entry if missing
    pub fn add_collection(&self, database: DatabaseId, collection: CollectionInfo) {
        let mut databases = self.databases.lock().unwrap_or_else(|e| e.into_inner());
        let entry = databases.entry(database).or_insert_with(|| DatabaseEntry {
            info: DatabaseInfo {
                id: database,
                name: format!("db-{}", database),
            },
            collections: BTreeMap::new(),
        });
        entry.collections.insert(collection.id, collection);
    }

    pub fn drop_collection(&self, database: DatabaseId, id: CollectionId) -> Option<CollectionInfo> {
        let mut databases = self.databases.lock().unwrap_or_else(|e| e.into_inner());
        databases
            .get_mut(&database)
            .and_then(|entry| entry.collections.remove(&id))
    }

    pub fn drop_database(&self, id: DatabaseId) -> bool {
        let mut databases = self.databases.lock().unwrap_or_else(|e| e.into_inner());
        databases.remove(&id).is_some()
    }
}

impl Catalog for MemoryCatalog {
    fn database(&self, id: DatabaseId) -> Option<DatabaseInfo> {
        let databases = self.databases.lock().unwrap_or_else(|e| e.into_inner());
        databases.get(&id).map(|entry| entry.info.clone())
    }

    fn collection(&self, database: DatabaseId, id: CollectionId) -> Option<CollectionInfo> {
        let databases = self.databases.lock().unwrap_or_else(|e| e.into_inner());
        databases
            .get(&database)
            .and_then(|entry| entry.collections.get(&id))
            .cloned()
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
