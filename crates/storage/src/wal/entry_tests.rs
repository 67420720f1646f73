// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use walt_core::{ColumnFamily, DefinitionKey, LogValue};

fn sample_records() -> Vec<RawRecord> {
    vec![
        RawRecord::metadata(LogValue::DatabaseCreate { database_id: 1 }),
        RawRecord::put(
            ColumnFamily::Definitions,
            DefinitionKey::Database(1).encode(),
            json!({"id": "1", "name": "shop"}),
        ),
    ]
}

#[test]
fn entry_creation_computes_checksum() {
    let entry = WalEntry::new(1, sample_records());

    assert_eq!(entry.sequence, 1);
    assert_eq!(entry.last_tick(), 2);
    assert!(entry.checksum > 0);
    assert!(entry.verify());
}

#[test]
fn entry_at_the_largest_sequence_ends_there() {
    let entry = WalEntry::new(Tick::MAX - 1, sample_records());
    assert_eq!(entry.last_tick(), Tick::MAX);

    let entry = WalEntry::new(Tick::MAX, sample_records());
    assert_eq!(entry.last_tick(), Tick::MAX);
}

#[test]
fn entry_line_parses_back_verified() {
    let entry = WalEntry::new(42, sample_records());

    let line = entry.to_line().unwrap();
    assert!(!line.contains('\n'));
    let parsed = WalEntry::from_line(&line).unwrap();

    assert_eq!(entry, parsed);
    assert!(parsed.verify());
}

#[test]
fn entry_checksum_verification_fails_for_tampered() {
    let mut entry = WalEntry::new(1, sample_records());

    if let RawRecord::Put { ref mut value, .. } = entry.records[1] {
        *value = json!({"id": "1", "name": "tampered"});
    }

    assert!(!entry.verify());
}

#[test]
fn entry_from_invalid_line_fails() {
    assert!(WalEntry::from_line("{\"sequence\": 1, \"reco").is_err());
}

#[test]
fn into_batch_keeps_sequence_and_records() {
    let batch = WalEntry::new(7, sample_records()).into_batch();
    assert_eq!(batch.sequence, 7);
    assert_eq!(batch.records, sample_records());
}
