// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Which databases and collections a scan reports

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use walt_core::{CollectionId, DatabaseId};

/// Collections to include, per database
///
/// An empty map includes everything. Otherwise a database missing from the
/// map is excluded entirely.
pub type WalFilter = BTreeMap<DatabaseId, BTreeSet<CollectionId>>;

/// Names of collections that are internal to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemCollections {
    /// Names starting with this are system collections
    pub prefix: String,
    /// Never replicated, even when system collections are included
    pub excluded: BTreeSet<String>,
}

impl Default for SystemCollections {
    fn default() -> Self {
        Self {
            prefix: "_".to_string(),
            excluded: default_excluded(),
        }
    }
}

pub(crate) fn default_excluded() -> BTreeSet<String> {
    [
        "_jobs",
        "_queues",
        "_trx",
        "_statistics",
        "_statistics15",
        "_statisticsRaw",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl SystemCollections {
    pub fn is_system(&self, name: &str) -> bool {
        !self.prefix.is_empty() && name.starts_with(&self.prefix)
    }

    /// Whether a collection with this name may be replicated
    pub fn allows(&self, name: &str, include_system: bool) -> bool {
        if name.is_empty() {
            return false;
        }
        if !self.is_system(name) {
            return true;
        }
        include_system && !self.excluded.contains(name)
    }
}

/// The filter of a single scan
#[derive(Debug, Clone, Copy)]
pub struct Filter<'a> {
    include: &'a WalFilter,
    system: &'a SystemCollections,
    include_system: bool,
}

impl<'a> Filter<'a> {
    pub fn new(include: &'a WalFilter, system: &'a SystemCollections, include_system: bool) -> Self {
        Self {
            include,
            system,
            include_system,
        }
    }

    /// Membership check against the inclusion map alone
    pub fn includes(&self, database: DatabaseId, collection: CollectionId) -> bool {
        if self.include.is_empty() {
            return true;
        }
        self.include
            .get(&database)
            .is_some_and(|collections| collections.contains(&collection))
    }

    pub fn allows_name(&self, name: &str) -> bool {
        self.system.allows(name, self.include_system)
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
