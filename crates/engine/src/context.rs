// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scan context threaded through the decoder
//!
//! Physical records carry no grouping of their own. The context remembers
//! what the preceding metadata records announced so a following put or
//! delete can be attributed to the right entity and transaction.

use walt_core::{
    CollectionId, DatabaseId, EventType, LogKind, ReplicationEvent, Tick, TransactionId,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanContext {
    /// Tick of the record being decoded
    pub tick: Tick,
    pub database_id: DatabaseId,
    pub collection_id: CollectionId,
    /// 0 outside a transaction
    pub transaction_id: TransactionId,
    /// Most recent metadata kind, cleared once a write consumed it
    pub last_kind: Option<LogKind>,
    pub seen_begin: bool,
    pub single_op: bool,
    /// Set until the first record of a batch has been ticked
    pub batch_start: bool,
    /// Document key announced for the next document delete
    pub pending_remove_key: Option<String>,
    /// Stable id announced by a collection drop
    pub dropped_uuid: Option<String>,
}

impl ScanContext {
    /// Position the context at the first record of a batch
    pub fn start_batch(self, sequence: Tick) -> Self {
        Self {
            tick: sequence,
            batch_start: true,
            ..self
        }
    }

    /// Move to the next record's tick
    ///
    /// The first record of a batch sits at the batch sequence; every record
    /// after it is one tick later.
    pub fn advance(mut self) -> Self {
        if self.batch_start {
            self.batch_start = false;
        } else {
            self.tick += 1;
        }
        self
    }

    /// Close an open transaction and forget everything but the position
    ///
    /// Returns the commit event when a transaction was open.
    pub fn flush_transaction(self) -> (Self, Option<ReplicationEvent>) {
        let commit = self.seen_begin.then(|| {
            ReplicationEvent::new(self.tick, EventType::TransactionCommit, self.database_id)
                .with_transaction(self.transaction_id)
        });
        let context = Self {
            tick: self.tick,
            batch_start: self.batch_start,
            ..Self::default()
        };
        (context, commit)
    }

    pub fn in_transaction(&self) -> bool {
        self.seen_begin || self.single_op
    }

    /// Forget the collection a definitions write just reported
    pub(crate) fn clear_collection(mut self) -> Self {
        self.last_kind = None;
        self.database_id = 0;
        self.collection_id = 0;
        self.dropped_uuid = None;
        self
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
