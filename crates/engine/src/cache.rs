// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-scan catalog lookups
//!
//! Each scan owns one cache and drops it when the scan ends. Misses are
//! cached too, so a dropped collection is looked up once per scan.

use std::collections::BTreeMap;
use std::sync::Arc;
use walt_core::{Catalog, CollectionId, CollectionInfo, DatabaseId, DatabaseInfo};

pub struct ResolverCache<'c, C: ?Sized> {
    catalog: &'c C,
    databases: BTreeMap<DatabaseId, Option<Arc<DatabaseInfo>>>,
    collections: BTreeMap<(DatabaseId, CollectionId), Option<Arc<CollectionInfo>>>,
}

impl<'c, C: Catalog + ?Sized> ResolverCache<'c, C> {
    pub fn new(catalog: &'c C) -> Self {
        Self {
            catalog,
            databases: BTreeMap::new(),
            collections: BTreeMap::new(),
        }
    }

    pub fn database(&mut self, id: DatabaseId) -> Option<Arc<DatabaseInfo>> {
        let catalog = self.catalog;
        self.databases
            .entry(id)
            .or_insert_with(|| catalog.database(id).map(Arc::new))
            .clone()
    }

    pub fn collection(
        &mut self,
        database: DatabaseId,
        id: CollectionId,
    ) -> Option<Arc<CollectionInfo>> {
        let catalog = self.catalog;
        self.collections
            .entry((database, id))
            .or_insert_with(|| catalog.collection(database, id).map(Arc::new))
            .clone()
    }

    /// Resolved collection name; `None` for unknown or dropped collections
    pub fn collection_name(&mut self, database: DatabaseId, id: CollectionId) -> Option<String> {
        self.collection(database, id).map(|c| c.name.clone())
    }

    /// Stable collection id
    pub fn collection_uuid(&mut self, database: DatabaseId, id: CollectionId) -> Option<String> {
        self.collection(database, id).map(|c| c.uuid.clone())
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
