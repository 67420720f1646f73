// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-Ahead Log (WAL) file
//!
//! An append-only file of write batches, one JSON line per batch.
//!
//! ## Architecture
//!
//! ```text
//! records → WalEntry → WalWriter → append() → sync() → disk (wal.jsonl)
//!                                                       ↓
//!                                   WalReader → WalEntryIter → WriteBatch
//! ```
//!
//! ## Durability Guarantees
//!
//! - Appends write whole lines; `sync()` `fsync()`s them
//! - Checksums detect corruption from bit flips
//! - A trailing line without a newline is a write still in flight
//! - Opening a writer truncates the file at the last valid entry

mod entry;
mod file;
mod reader;
mod writer;

pub use entry::WalEntry;
pub use file::WalFile;
pub use reader::{WalEntryIter, WalReadError, WalReader};
pub use writer::WalWriter;
