// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log metadata values
//!
//! The storage engine writes a metadata value ahead of the physical puts and
//! deletes of a logical operation. The value names the operation and the
//! entities it touches; the physical writes that follow carry the payload.

use crate::id::{CollectionId, DatabaseId, IndexId, TransactionId, ViewId};
use serde::{Deserialize, Serialize};

/// A metadata record written to the log alongside physical writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogValue {
    // Database lifecycle
    DatabaseCreate {
        database_id: DatabaseId,
    },
    DatabaseDrop {
        database_id: DatabaseId,
    },

    // Collection lifecycle
    CollectionCreate {
        database_id: DatabaseId,
        collection_id: CollectionId,
    },
    CollectionChange {
        database_id: DatabaseId,
        collection_id: CollectionId,
    },
    CollectionRename {
        database_id: DatabaseId,
        collection_id: CollectionId,
    },
    /// Carries the stable id because the collection is gone from the catalog
    /// by the time a tailer reads the record
    CollectionDrop {
        database_id: DatabaseId,
        collection_id: CollectionId,
        uuid: String,
    },

    // Index lifecycle
    IndexCreate {
        database_id: DatabaseId,
        collection_id: CollectionId,
        index: serde_json::Value,
    },
    IndexDrop {
        database_id: DatabaseId,
        collection_id: CollectionId,
        index_id: IndexId,
    },

    // View lifecycle
    ViewCreate {
        database_id: DatabaseId,
        view_id: ViewId,
    },
    ViewChange {
        database_id: DatabaseId,
        view_id: ViewId,
    },
    ViewDrop {
        database_id: DatabaseId,
        view_id: ViewId,
    },

    // Document operations
    BeginTransaction {
        database_id: DatabaseId,
        transaction_id: TransactionId,
    },
    DocumentOperationsPrologue {
        collection_id: CollectionId,
    },
    DocumentRemove {
        key: String,
    },
    SingleRemove {
        database_id: DatabaseId,
        collection_id: CollectionId,
        key: String,
    },
    SinglePut {
        database_id: DatabaseId,
        collection_id: CollectionId,
    },

    /// Metadata written by a newer engine version
    #[serde(other)]
    Unknown,
}

/// The kind of a metadata record, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogKind {
    DatabaseCreate,
    DatabaseDrop,
    CollectionCreate,
    CollectionChange,
    CollectionRename,
    CollectionDrop,
    IndexCreate,
    IndexDrop,
    ViewCreate,
    ViewChange,
    ViewDrop,
    BeginTransaction,
    DocumentOperationsPrologue,
    DocumentRemove,
    SingleRemove,
    SinglePut,
    Unknown,
}

impl LogValue {
    pub fn kind(&self) -> LogKind {
        match self {
            LogValue::DatabaseCreate { .. } => LogKind::DatabaseCreate,
            LogValue::DatabaseDrop { .. } => LogKind::DatabaseDrop,
            LogValue::CollectionCreate { .. } => LogKind::CollectionCreate,
            LogValue::CollectionChange { .. } => LogKind::CollectionChange,
            LogValue::CollectionRename { .. } => LogKind::CollectionRename,
            LogValue::CollectionDrop { .. } => LogKind::CollectionDrop,
            LogValue::IndexCreate { .. } => LogKind::IndexCreate,
            LogValue::IndexDrop { .. } => LogKind::IndexDrop,
            LogValue::ViewCreate { .. } => LogKind::ViewCreate,
            LogValue::ViewChange { .. } => LogKind::ViewChange,
            LogValue::ViewDrop { .. } => LogKind::ViewDrop,
            LogValue::BeginTransaction { .. } => LogKind::BeginTransaction,
            LogValue::DocumentOperationsPrologue { .. } => LogKind::DocumentOperationsPrologue,
            LogValue::DocumentRemove { .. } => LogKind::DocumentRemove,
            LogValue::SingleRemove { .. } => LogKind::SingleRemove,
            LogValue::SinglePut { .. } => LogKind::SinglePut,
            LogValue::Unknown => LogKind::Unknown,
        }
    }
}

impl LogKind {
    /// Human-readable name used in log messages
    pub fn name(self) -> &'static str {
        match self {
            LogKind::DatabaseCreate => "database_create",
            LogKind::DatabaseDrop => "database_drop",
            LogKind::CollectionCreate => "collection_create",
            LogKind::CollectionChange => "collection_change",
            LogKind::CollectionRename => "collection_rename",
            LogKind::CollectionDrop => "collection_drop",
            LogKind::IndexCreate => "index_create",
            LogKind::IndexDrop => "index_drop",
            LogKind::ViewCreate => "view_create",
            LogKind::ViewChange => "view_change",
            LogKind::ViewDrop => "view_drop",
            LogKind::BeginTransaction => "begin_transaction",
            LogKind::DocumentOperationsPrologue => "document_operations_prologue",
            LogKind::DocumentRemove => "document_remove",
            LogKind::SingleRemove => "single_remove",
            LogKind::SinglePut => "single_put",
            LogKind::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
#[path = "log_value_tests.rs"]
mod tests;
