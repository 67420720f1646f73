// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::key::{DefinitionKey, DocumentKey};
use serde_json::json;

#[test]
fn batch_last_tick_counts_records() {
    let batch = WriteBatch::new(
        10,
        vec![
            RawRecord::metadata(LogValue::DatabaseCreate { database_id: 1 }),
            RawRecord::put(
                ColumnFamily::Definitions,
                DefinitionKey::Database(1).encode(),
                json!({"name": "db"}),
            ),
            RawRecord::delete(ColumnFamily::Documents, DocumentKey::new(3, 4).encode()),
        ],
    );

    assert_eq!(batch.last_tick(), 12);
    assert_eq!(batch.tick_count(), 3);
}

#[test]
fn empty_batch_occupies_its_sequence() {
    let batch = WriteBatch::new(7, Vec::new());
    assert_eq!(batch.last_tick(), 7);
    assert_eq!(batch.tick_count(), 1);
}

#[test]
fn last_tick_stops_at_the_largest_tick() {
    let batch = WriteBatch::new(
        Tick::MAX,
        vec![
            RawRecord::metadata(LogValue::DatabaseCreate { database_id: 1 }),
            RawRecord::delete(ColumnFamily::Documents, DocumentKey::new(3, 4).encode()),
        ],
    );
    assert_eq!(batch.last_tick(), Tick::MAX);
}

#[test]
fn record_keys_serialize_as_hex() {
    let record = RawRecord::put(
        ColumnFamily::Definitions,
        DefinitionKey::Database(1).encode(),
        json!({"name": "db"}),
    );

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(
        json,
        json!({
            "op": "put",
            "cf": "definitions",
            "key": "440000000000000001",
            "value": {"name": "db"}
        })
    );

    let parsed: RawRecord = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, record);
}

#[test]
fn other_column_family_keeps_its_id() {
    let record = RawRecord::SingleDelete {
        cf: ColumnFamily::Other(9),
        key: vec![0xab],
    };

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(
        json,
        json!({"op": "single_delete", "cf": {"other": 9}, "key": "ab"})
    );
}

#[test]
fn metadata_record_nests_log_value() {
    let record = RawRecord::metadata(LogValue::SinglePut {
        database_id: 1,
        collection_id: 5,
    });

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(
        json,
        json!({
            "op": "log_metadata",
            "value": {"type": "single_put", "database_id": 1, "collection_id": 5}
        })
    );
}
