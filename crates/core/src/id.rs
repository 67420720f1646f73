// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identifier types shared by the log, the catalog and replication events
//!
//! Zero is never a valid entity id; the decoder uses it to mean "unset".

/// Physical sequence number of a log record
pub type Tick = u64;

pub type DatabaseId = u64;
pub type CollectionId = u64;
pub type ViewId = u64;
pub type IndexId = u64;

/// Transaction id; 0 marks a single-operation write
pub type TransactionId = u64;

/// Document revision embedded in the trailing bytes of a document key
pub type RevisionId = u64;
