// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::wal::WalWriter;
use std::io::Write;
use tempfile::TempDir;
use walt_core::{LogValue, RawRecord};

fn temp_wal_path() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wal.jsonl");
    (dir, path)
}

fn records(count: usize) -> Vec<RawRecord> {
    (0..count)
        .map(|i| {
            RawRecord::metadata(LogValue::DatabaseCreate {
                database_id: i as u64 + 1,
            })
        })
        .collect()
}

/// Writes batches of the given sizes
fn write_batches(path: &Path, sizes: &[usize]) {
    let mut writer = WalWriter::open(path).unwrap();
    for size in sizes {
        writer.append(records(*size)).unwrap();
    }
    writer.sync().unwrap();
}

fn append_raw(path: &Path, text: &str) {
    let mut file = std::fs::OpenOptions::new().append(true).open(path).unwrap();
    file.write_all(text.as_bytes()).unwrap();
}

fn sequences(iter: WalEntryIter) -> Vec<Tick> {
    iter.map(|e| e.unwrap().sequence).collect()
}

#[test]
fn reader_reads_all_entries() {
    let (_dir, path) = temp_wal_path();
    write_batches(&path, &[2, 1, 3]);

    let reader = WalReader::open(&path).unwrap();
    assert_eq!(sequences(reader.entries().unwrap()), vec![1, 3, 4]);
    assert_eq!(reader.first_sequence().unwrap(), Some(1));
    assert_eq!(reader.last_tick().unwrap(), Some(6));
}

#[test]
fn reader_handles_empty_file() {
    let (_dir, path) = temp_wal_path();
    std::fs::write(&path, "").unwrap();

    let reader = WalReader::open(&path).unwrap();
    assert!(reader.entries().unwrap().next().is_none());
    assert_eq!(reader.last_tick().unwrap(), None);
}

#[test]
fn open_fails_for_missing_file() {
    let (_dir, path) = temp_wal_path();
    assert!(matches!(WalReader::open(&path), Err(WalReadError::Io(_))));
}

#[test]
fn open_or_empty_treats_missing_file_as_empty() {
    let (_dir, path) = temp_wal_path();
    let reader = WalReader::open_or_empty(&path);
    assert!(reader.entries().unwrap().next().is_none());
    assert_eq!(reader.first_sequence().unwrap(), None);
}

#[test]
fn entries_after_skips_fully_consumed_batches() {
    let (_dir, path) = temp_wal_path();
    write_batches(&path, &[3, 2, 1]); // 1..=3, 4..=5, 6

    let reader = WalReader::open(&path).unwrap();
    assert_eq!(sequences(reader.entries_after(3).unwrap()), vec![4, 6]);
    assert_eq!(sequences(reader.entries_after(4).unwrap()), vec![4, 6]);
    assert_eq!(sequences(reader.entries_after(6).unwrap()), Vec::<Tick>::new());
}

#[test]
fn partial_last_line_ends_the_log() {
    let (_dir, path) = temp_wal_path();
    write_batches(&path, &[1, 1]);
    append_raw(&path, "{\"sequence\":3,\"records\":[");

    let reader = WalReader::open(&path).unwrap();
    let mut iter = reader.entries().unwrap();
    assert_eq!(iter.next().unwrap().unwrap().sequence, 1);
    assert_eq!(iter.next().unwrap().unwrap().sequence, 2);
    assert!(iter.next().is_none());

    let content = std::fs::read_to_string(&path).unwrap();
    let complete_len = content.rfind('\n').unwrap() as u64 + 1;
    assert_eq!(iter.last_valid_position(), complete_len);
}

#[test]
fn unparseable_complete_line_is_corruption() {
    let (_dir, path) = temp_wal_path();
    write_batches(&path, &[1]);
    append_raw(&path, "not json\n");

    let reader = WalReader::open(&path).unwrap();
    let mut iter = reader.entries().unwrap();
    assert!(iter.next().unwrap().is_ok());
    assert!(matches!(
        iter.next(),
        Some(Err(WalReadError::Corrupted { line: 2, .. }))
    ));
    assert!(iter.next().is_none());
}

#[test]
fn checksum_mismatch_is_reported() {
    let (_dir, path) = temp_wal_path();
    write_batches(&path, &[1]);
    let content = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, content.replace("\"database_id\":1", "\"database_id\":9")).unwrap();

    let reader = WalReader::open(&path).unwrap();
    assert!(matches!(
        reader.entries().unwrap().next(),
        Some(Err(WalReadError::ChecksumMismatch { line: 1 }))
    ));
    assert!(reader.last_tick().is_err());
}

#[test]
fn blank_lines_are_skipped() {
    let (_dir, path) = temp_wal_path();
    write_batches(&path, &[1]);
    append_raw(&path, "\n\n");
    let mut writer = WalWriter::open(&path).unwrap();
    writer.append(records(1)).unwrap();

    let reader = WalReader::open(&path).unwrap();
    assert_eq!(sequences(reader.entries().unwrap()), vec![1, 2]);
}
