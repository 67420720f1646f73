// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! WAL entry structure with checksum verification
//!
//! Each entry holds one write batch: its starting sequence number, its
//! records, and a CRC32 checksum of the serialized records.

use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use walt_core::{RawRecord, Tick, WriteBatch};

/// A single line in the write-ahead log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalEntry {
    /// Tick of the first record
    pub sequence: Tick,
    pub records: Vec<RawRecord>,
    /// CRC32 checksum of serialized records
    pub checksum: u32,
}

impl WalEntry {
    /// Create a new WAL entry with computed checksum
    pub fn new(sequence: Tick, records: Vec<RawRecord>) -> Self {
        let checksum = Self::calculate_checksum(&records);
        Self {
            sequence,
            records,
            checksum,
        }
    }

    fn calculate_checksum(records: &[RawRecord]) -> u32 {
        // RawRecord only holds ids, strings, byte keys and JSON values, all of
        // which serialize infallibly
        let json = serde_json::to_string(records).unwrap_or_else(|_| String::new());
        crc32fast::hash(json.as_bytes())
    }

    /// Verify the checksum matches the records
    pub fn verify(&self) -> bool {
        self.checksum == Self::calculate_checksum(&self.records)
    }

    /// Tick of the last record in the entry
    pub fn last_tick(&self) -> Tick {
        self.sequence
            .saturating_add((self.records.len() as u64).saturating_sub(1))
    }

    /// Serialize to newline-delimited JSON (one line)
    pub fn to_line(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(StorageError::from)
    }

    /// Parse from a single line of JSON
    pub fn from_line(line: &str) -> Result<Self, StorageError> {
        serde_json::from_str(line).map_err(StorageError::from)
    }

    pub fn into_batch(self) -> WriteBatch {
        WriteBatch::new(self.sequence, self.records)
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
