// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logical replication events
//!
//! Events are what replicas consume. On the wire every id is a decimal
//! string and the event type is its numeric replication marker code.

use crate::id::{CollectionId, DatabaseId, Tick, TransactionId};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Replication event types with their marker codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    DatabaseCreate,
    DatabaseDrop,
    CollectionCreate,
    CollectionDrop,
    CollectionRename,
    CollectionChange,
    IndexCreate,
    IndexDrop,
    TransactionBegin,
    TransactionCommit,
    DocumentWrite,
    DocumentRemove,
}

impl EventType {
    pub fn code(self) -> u16 {
        match self {
            EventType::DatabaseCreate => 1100,
            EventType::DatabaseDrop => 1101,
            EventType::CollectionCreate => 2000,
            EventType::CollectionDrop => 2001,
            EventType::CollectionRename => 2002,
            EventType::CollectionChange => 2003,
            EventType::IndexCreate => 2100,
            EventType::IndexDrop => 2101,
            EventType::TransactionBegin => 2200,
            EventType::TransactionCommit => 2201,
            EventType::DocumentWrite => 2300,
            EventType::DocumentRemove => 2302,
        }
    }
}

impl Serialize for EventType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.code())
    }
}

/// How an event names the collection it concerns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionRef {
    /// Stable, globally unique id (collection and index-create events)
    Uuid(String),
    /// Raw collection id (document and index-drop events)
    Cid(CollectionId),
}

/// A logical change decoded from the write-ahead log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicationEvent {
    pub tick: Tick,
    pub event_type: EventType,
    pub database_id: DatabaseId,
    pub collection: Option<CollectionRef>,
    /// 0 for operations outside a transaction
    pub transaction_id: TransactionId,
    pub data: Option<serde_json::Value>,
}

impl ReplicationEvent {
    pub fn new(tick: Tick, event_type: EventType, database_id: DatabaseId) -> Self {
        Self {
            tick,
            event_type,
            database_id,
            collection: None,
            transaction_id: 0,
            data: None,
        }
    }

    pub fn with_collection(mut self, collection: CollectionRef) -> Self {
        self.collection = Some(collection);
        self
    }

    pub fn with_transaction(mut self, transaction_id: TransactionId) -> Self {
        self.transaction_id = transaction_id;
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl Serialize for ReplicationEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("tick", &self.tick.to_string())?;
        map.serialize_entry("type", &self.event_type)?;
        map.serialize_entry("database", &self.database_id.to_string())?;
        match &self.collection {
            Some(CollectionRef::Uuid(uuid)) => map.serialize_entry("uuid", uuid)?,
            Some(CollectionRef::Cid(cid)) => map.serialize_entry("cid", &cid.to_string())?,
            None => {}
        }
        map.serialize_entry("tid", &self.transaction_id.to_string())?;
        if let Some(data) = &self.data {
            map.serialize_entry("data", data)?;
        }
        map.end()
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
