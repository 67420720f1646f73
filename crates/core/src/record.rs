// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Physical log records and write batches
//!
//! A write batch is one atomic commit unit of the storage engine. Its first
//! record carries the batch sequence number; every following record takes
//! the next tick.

use crate::id::Tick;
use crate::log_value::LogValue;
use serde::{Deserialize, Serialize};

/// Physical keyspace a put or delete addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnFamily {
    /// Databases, collections, views
    Definitions,
    /// Document bodies
    Documents,
    /// Any other keyspace (indexes, counters); never replicated
    Other(u32),
}

/// A single record inside a write batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RawRecord {
    LogMetadata {
        value: LogValue,
    },
    Put {
        cf: ColumnFamily,
        #[serde(with = "hex::serde")]
        key: Vec<u8>,
        value: serde_json::Value,
    },
    Delete {
        cf: ColumnFamily,
        #[serde(with = "hex::serde")]
        key: Vec<u8>,
    },
    SingleDelete {
        cf: ColumnFamily,
        #[serde(with = "hex::serde")]
        key: Vec<u8>,
    },
}

impl RawRecord {
    pub fn metadata(value: LogValue) -> Self {
        RawRecord::LogMetadata { value }
    }

    pub fn put(cf: ColumnFamily, key: Vec<u8>, value: serde_json::Value) -> Self {
        RawRecord::Put { cf, key, value }
    }

    pub fn delete(cf: ColumnFamily, key: Vec<u8>) -> Self {
        RawRecord::Delete { cf, key }
    }
}

/// An atomic group of records starting at `sequence`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteBatch {
    pub sequence: Tick,
    pub records: Vec<RawRecord>,
}

impl WriteBatch {
    pub fn new(sequence: Tick, records: Vec<RawRecord>) -> Self {
        Self { sequence, records }
    }

    /// Tick of the last record in the batch
    ///
    /// An empty batch occupies its start sequence only.
    pub fn last_tick(&self) -> Tick {
        self.sequence
            .saturating_add((self.records.len() as u64).saturating_sub(1))
    }

    /// Number of ticks this batch occupies
    pub fn tick_count(&self) -> u64 {
        (self.records.len() as u64).max(1)
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
