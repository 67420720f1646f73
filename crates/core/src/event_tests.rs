// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use yare::parameterized;

#[parameterized(
    database_create = { EventType::DatabaseCreate, 1100 },
    database_drop = { EventType::DatabaseDrop, 1101 },
    collection_create = { EventType::CollectionCreate, 2000 },
    collection_drop = { EventType::CollectionDrop, 2001 },
    collection_rename = { EventType::CollectionRename, 2002 },
    collection_change = { EventType::CollectionChange, 2003 },
    index_create = { EventType::IndexCreate, 2100 },
    index_drop = { EventType::IndexDrop, 2101 },
    transaction_begin = { EventType::TransactionBegin, 2200 },
    transaction_commit = { EventType::TransactionCommit, 2201 },
    document_write = { EventType::DocumentWrite, 2300 },
    document_remove = { EventType::DocumentRemove, 2302 },
)]
fn event_type_codes(event_type: EventType, code: u16) {
    assert_eq!(event_type.code(), code);
    assert_eq!(serde_json::to_value(event_type).unwrap(), json!(code));
}

#[test]
fn document_event_serializes_ids_as_strings() {
    let event = ReplicationEvent::new(42, EventType::DocumentWrite, 1)
        .with_collection(CollectionRef::Cid(5))
        .with_transaction(7)
        .with_data(json!({"_key": "a", "value": 1}));

    assert_eq!(
        serde_json::to_value(&event).unwrap(),
        json!({
            "tick": "42",
            "type": 2300,
            "database": "1",
            "cid": "5",
            "tid": "7",
            "data": {"_key": "a", "value": 1}
        })
    );
}

#[test]
fn collection_event_uses_uuid() {
    let event = ReplicationEvent::new(3, EventType::CollectionDrop, 1)
        .with_collection(CollectionRef::Uuid("h1/5".to_string()))
        .with_data(json!({"id": "5", "name": ""}));

    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["uuid"], "h1/5");
    assert!(value.get("cid").is_none());
    assert_eq!(value["tid"], "0");
}

#[test]
fn transaction_event_has_no_collection_or_data() {
    let event = ReplicationEvent::new(9, EventType::TransactionBegin, 1).with_transaction(7);

    assert_eq!(
        serde_json::to_value(&event).unwrap(),
        json!({"tick": "9", "type": 2200, "database": "1", "tid": "7"})
    );
}
