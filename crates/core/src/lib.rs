// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! walt-core: data model for tailing the storage engine's write-ahead log
//!
//! This crate provides:
//! - Physical log records (`RawRecord`, `WriteBatch`) and their metadata values
//! - The physical key encoding of the definitions and documents column families
//! - Logical replication events and their wire serialization
//! - The catalog collaborator used to resolve names and stable ids

pub mod catalog;
pub mod event;
pub mod id;
pub mod key;
pub mod log_value;
pub mod record;

pub use catalog::{Catalog, CollectionInfo, DatabaseInfo, MemoryCatalog};
pub use event::{CollectionRef, EventType, ReplicationEvent};
pub use id::{CollectionId, DatabaseId, IndexId, RevisionId, Tick, TransactionId, ViewId};
pub use key::{DefinitionKey, DocumentKey, KeyError};
pub use log_value::{LogKind, LogValue};
pub use record::{ColumnFamily, RawRecord, WriteBatch};
