// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! WAL writer for append operations
//!
//! Each append writes one complete line. `sync` makes everything written
//! so far durable.

use super::entry::WalEntry;
use super::reader::{WalReadError, WalReader};
use crate::error::StorageError;
use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use walt_core::{RawRecord, Tick};

/// WAL writer for append operations
pub struct WalWriter {
    path: PathBuf,
    file: File,
    next_sequence: Tick,
}

impl WalWriter {
    /// Open or create a WAL file
    ///
    /// Scans an existing file for the next sequence number and cuts off
    /// anything after the last valid entry.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let (next_sequence, valid_len) = Self::scan(path)?;

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)?;

        let file_len = file.metadata()?.len();
        if file_len > valid_len {
            tracing::warn!(
                path = %path.display(),
                dropped_bytes = file_len - valid_len,
                "truncating WAL after last valid entry"
            );
            file.set_len(valid_len)?;
        }

        file.seek(SeekFrom::End(0))?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            next_sequence,
        })
    }

    /// Find the next sequence number and the length of the valid prefix
    fn scan(path: &Path) -> Result<(Tick, u64), StorageError> {
        let reader = WalReader::open_or_empty(path);
        let mut entries = reader.entries().map_err(io_error)?;
        let mut next_sequence = 1;
        for entry in entries.by_ref() {
            match entry {
                Ok(entry) => next_sequence = entry.last_tick().saturating_add(1),
                Err(WalReadError::Io(e)) => return Err(e.into()),
                Err(_) => break,
            }
        }
        Ok((next_sequence, entries.last_valid_position()))
    }

    /// Append a batch and return its sequence number
    pub fn append(&mut self, records: Vec<RawRecord>) -> Result<Tick, StorageError> {
        let entry = WalEntry::new(self.next_sequence, records);
        let mut line = entry.to_line()?;
        line.push('\n');

        // Newline goes out with the entry, never on its own
        self.file.write_all(line.as_bytes())?;

        let sequence = entry.sequence;
        self.next_sequence = entry.last_tick().saturating_add(1);
        Ok(sequence)
    }

    /// Force sync to disk
    pub fn sync(&mut self) -> Result<(), StorageError> {
        self.file.flush()?;
        self.file.sync_all()?;
        Ok(())
    }

    /// Last assigned tick, 0 when empty
    pub fn last_tick(&self) -> Tick {
        self.next_sequence - 1
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn io_error(err: WalReadError) -> StorageError {
    match err {
        WalReadError::Io(e) => StorageError::Io(e),
        other => StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            other.to_string(),
        )),
    }
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
