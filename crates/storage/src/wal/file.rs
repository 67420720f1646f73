// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File-backed log source

use super::reader::WalReader;
use super::writer::WalWriter;
use crate::error::{SourceError, StorageError};
use crate::source::{BatchIter, LogSource, TickRange};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use walt_core::{RawRecord, Tick};

/// A WAL file that can be appended to and tailed
///
/// Readers open their own handle, so iterators see every line that was
/// completely written before they reached it.
pub struct WalFile {
    path: PathBuf,
    writer: Mutex<WalWriter>,
}

impl WalFile {
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let writer = WalWriter::open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: Mutex::new(writer),
        })
    }

    fn writer(&self) -> MutexGuard<'_, WalWriter> {
        self.writer.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Append one atomic batch and return its sequence number
    pub fn append(&self, records: Vec<RawRecord>) -> Result<Tick, StorageError> {
        self.writer().append(records)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSource for WalFile {
    fn updates_since(&self, tick: Tick) -> Result<BatchIter<'_>, SourceError> {
        let entries = WalReader::open_or_empty(&self.path).entries_after(tick)?;
        Ok(Box::new(entries.map(|entry| {
            entry.map(|e| e.into_batch()).map_err(SourceError::from)
        })))
    }

    fn tick_range(&self) -> Result<TickRange, SourceError> {
        let reader = WalReader::open_or_empty(&self.path);
        Ok(TickRange {
            oldest: reader.first_sequence()?.unwrap_or(0),
            newest: reader.last_tick()?.unwrap_or(0),
        })
    }

    fn latest_tick(&self) -> Result<Tick, SourceError> {
        Ok(self.writer().last_tick())
    }

    fn sync(&self) -> Result<(), SourceError> {
        self.writer().sync()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
